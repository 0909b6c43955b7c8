//! Thread-safe entry point for raw datagrams.
//!
//! [`Defragmenter`] combines the stateless [`decode`] step with a shared
//! [`Reassembler`]. Decoding happens outside the lock; a single mutex then
//! covers the whole reassembly call, eviction scan included. The number of
//! in-flight fragmented messages is expected to stay small, so one lock is
//! enough.

use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Instant,
};

use bytes::Bytes;
use log::debug;

use crate::{
    error::SubmitError,
    header::{SequenceNumber, decode},
    metrics,
    reassembler::{AssembledMessage, Reassembler, ReassemblyConfig},
};

/// Decodes datagrams and reassembles fragmented LCM messages.
///
/// Share one instance between receive threads with `Arc` or a scoped
/// reference; every method takes `&self`.
///
/// # Examples
///
/// ```
/// use lcmframe::Defragmenter;
///
/// let defragmenter = Defragmenter::new();
///
/// let mut wire = Vec::new();
/// wire.extend_from_slice(&0x4c43_3032_u32.to_be_bytes());
/// wire.extend_from_slice(&1_u32.to_be_bytes());
/// wire.extend_from_slice(b"TEST\0hello");
///
/// let message = defragmenter
///     .submit(wire)
///     .expect("valid datagram")
///     .expect("short datagrams complete immediately");
/// assert_eq!(message.channel_name(), "TEST");
/// assert_eq!(message.payload(), b"hello");
/// ```
#[derive(Debug, Default)]
pub struct Defragmenter {
    reassembler: Mutex<Reassembler>,
}

impl Defragmenter {
    /// Create a defragmenter without resource limits.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a defragmenter enforcing the limits in `config`.
    #[must_use]
    pub fn with_config(config: ReassemblyConfig) -> Self {
        Self {
            reassembler: Mutex::new(Reassembler::with_config(config)),
        }
    }

    /// Submit one raw datagram using the current time.
    ///
    /// # Errors
    ///
    /// See [`submit_at`](Self::submit_at).
    pub fn submit(
        &self,
        datagram: impl Into<Bytes>,
    ) -> Result<Option<AssembledMessage>, SubmitError> {
        self.submit_at(datagram, Instant::now())
    }

    /// Submit one raw datagram using an explicit clock reading.
    ///
    /// Returns `Ok(Some(_))` when a message is complete and `Ok(None)` while
    /// fragments are outstanding.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Decode`] for a malformed datagram, which leaves
    /// reassembly state untouched, and [`SubmitError::Reassembly`] when the
    /// datagram's logical message had to be discarded.
    pub fn submit_at(
        &self,
        datagram: impl Into<Bytes>,
        now: Instant,
    ) -> Result<Option<AssembledMessage>, SubmitError> {
        let datagram = decode(datagram).map_err(|err| {
            debug!("dropping datagram: {err}");
            metrics::inc_dropped(err.reason());
            err
        })?;
        metrics::inc_datagrams(datagram.header().magic());

        Ok(self.lock().push_at(datagram, now)?)
    }

    /// Evict stale partial messages without submitting a datagram.
    ///
    /// Returns the sequence numbers evicted for staleness.
    pub fn purge_expired_at(&self, now: Instant) -> Vec<SequenceNumber> {
        self.lock().purge_expired_at(now)
    }

    /// Number of sequence numbers currently buffered.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.lock().buffered_len() }

    // Every reassembler call leaves its map consistent, so a panic in another
    // holder does not invalidate the state.
    fn lock(&self) -> MutexGuard<'_, Reassembler> {
        self.reassembler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
