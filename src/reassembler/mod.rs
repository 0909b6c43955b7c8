//! Inbound engine that stitches LCM fragments back into complete messages.
//!
//! [`Reassembler`] buffers fragmented datagrams keyed by
//! [`SequenceNumber`](crate::header::SequenceNumber). Fragments may arrive in
//! any order; assembly is attempted whenever the fragment with the highest
//! index arrives, and succeeds once every index is present. Short datagrams
//! pass straight through.
//!
//! Eviction is lazy: every call to [`Reassembler::push_at`] first discards
//! completed entries and entries idle for longer than
//! [`REASSEMBLY_TIMEOUT`]. No background timer is involved, so a partial
//! message only expires once further traffic arrives.

mod config;
mod message;
mod partial;

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

pub use config::ReassemblyConfig;
use log::{debug, warn};
pub use message::AssembledMessage;
use partial::PartialMessage;

use crate::{
    error::ReassemblyError,
    header::{Datagram, SequenceNumber, decode},
    metrics,
};

/// Idle time after which a partial message is discarded.
pub const REASSEMBLY_TIMEOUT: Duration = Duration::from_secs(1);

/// Progress of a partial message, reported by [`Reassembler::pending`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingStatus {
    /// Distinct fragment indices buffered so far.
    pub received: usize,
    /// Fragment count fixed by the first fragment observed.
    pub expected: u16,
    /// Whether assembly already ran; the entry leaves on the next push.
    pub complete: bool,
}

/// Stateful fragment reassembler with timeout-based eviction.
///
/// The type is not synchronised; share it between threads through
/// [`Defragmenter`](crate::defragmenter::Defragmenter).
#[derive(Debug, Default)]
pub struct Reassembler {
    config: ReassemblyConfig,
    partials: HashMap<SequenceNumber, PartialMessage>,
}

impl Reassembler {
    /// Create a reassembler without resource limits.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a reassembler enforcing the limits in `config`.
    #[must_use]
    pub fn with_config(config: ReassemblyConfig) -> Self {
        Self {
            config,
            partials: HashMap::new(),
        }
    }

    /// Process a decoded datagram using the current time.
    ///
    /// # Errors
    ///
    /// See [`push_at`](Self::push_at).
    pub fn push(&mut self, datagram: Datagram) -> Result<Option<AssembledMessage>, ReassemblyError> {
        self.push_at(datagram, Instant::now())
    }

    /// Process a decoded datagram using an explicit clock reading.
    ///
    /// Returns `Ok(Some(_))` for a short datagram or a fragment that completes
    /// its message, and `Ok(None)` while fragments are outstanding. A
    /// duplicate fragment replaces the earlier copy at the same index.
    ///
    /// # Errors
    ///
    /// Returns [`ReassemblyError::ReassembledDecode`] when the concatenated
    /// fragments fail to decode, [`ReassemblyError::TooManyInFlight`] when a
    /// new sequence number would exceed the in-flight limit and
    /// [`ReassemblyError::MessageTooLarge`] when buffered payload exceeds the
    /// message size limit. The affected message is discarded in every case.
    pub fn push_at(
        &mut self,
        datagram: Datagram,
        now: Instant,
    ) -> Result<Option<AssembledMessage>, ReassemblyError> {
        self.purge_expired_at(now);

        let Some(fragment) = datagram.header().fragment() else {
            metrics::inc_assembled();
            return Ok(Some(AssembledMessage::new(datagram, 1)));
        };
        let sequence_number = datagram.header().sequence_number();

        if !self.partials.contains_key(&sequence_number) {
            self.ensure_capacity()?;
        }
        let partial = self
            .partials
            .entry(sequence_number)
            .or_insert_with(|| PartialMessage::new(fragment.total_fragments(), now));

        if partial.total_fragments() != fragment.total_fragments() {
            debug!(
                "fragment count mismatch: sequence={sequence_number}, expected={}, found={}",
                partial.total_fragments(),
                fragment.total_fragments()
            );
        }
        if partial.record(fragment.fragment_number(), datagram, now) {
            debug!(
                "replaced duplicate fragment: sequence={sequence_number}, index={}",
                fragment.fragment_number()
            );
        }
        let buffered = partial.buffered_bytes();
        self.enforce_message_size(sequence_number, buffered)?;

        if fragment.is_last() {
            self.try_assemble(sequence_number)
        } else {
            Ok(None)
        }
    }

    /// Remove partial messages idle for longer than [`REASSEMBLY_TIMEOUT`].
    ///
    /// Returns the sequence numbers evicted for staleness. Entries whose
    /// assembly already ran are dropped as well but not reported.
    pub fn purge_expired(&mut self) -> Vec<SequenceNumber> { self.purge_expired_at(Instant::now()) }

    /// Remove completed and stale partial messages using an explicit clock
    /// reading.
    ///
    /// Returns the sequence numbers evicted for staleness.
    pub fn purge_expired_at(&mut self, now: Instant) -> Vec<SequenceNumber> {
        let mut expired = Vec::new();

        self.partials.retain(|sequence_number, partial| {
            if partial.is_complete() {
                return false;
            }
            let stale = partial.is_stale(now, REASSEMBLY_TIMEOUT);
            if stale {
                expired.push(*sequence_number);
            }
            !stale
        });

        if !expired.is_empty() {
            debug!(
                "purged expired reassemblies: count={}, sequences={expired:?}",
                expired.len()
            );
            metrics::add_expired(expired.len());
        }
        expired
    }

    /// Number of sequence numbers currently buffered, including completed
    /// entries awaiting eviction.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.partials.len() }

    /// Report progress for `sequence_number`, if it is buffered.
    #[must_use]
    pub fn pending(&self, sequence_number: SequenceNumber) -> Option<PendingStatus> {
        self.partials
            .get(&sequence_number)
            .map(|partial| PendingStatus {
                received: partial.received(),
                expected: partial.total_fragments(),
                complete: partial.is_complete(),
            })
    }

    fn ensure_capacity(&self) -> Result<(), ReassemblyError> {
        match self.config.max_in_flight {
            Some(limit) if self.partials.len() >= limit.get() => {
                let err = ReassemblyError::TooManyInFlight { limit };
                debug!("rejecting fragment: {err}");
                metrics::inc_reassembly_failures(err.reason());
                Err(err)
            }
            _ => Ok(()),
        }
    }

    fn enforce_message_size(
        &mut self,
        sequence_number: SequenceNumber,
        attempted: usize,
    ) -> Result<(), ReassemblyError> {
        match self.config.max_message_size {
            Some(limit) if attempted > limit.get() => {
                self.partials.remove(&sequence_number);
                let err = ReassemblyError::MessageTooLarge {
                    sequence_number,
                    attempted,
                    limit,
                };
                debug!("discarding partial message: {err}");
                metrics::inc_reassembly_failures(err.reason());
                Err(err)
            }
            _ => Ok(()),
        }
    }

    fn try_assemble(
        &mut self,
        sequence_number: SequenceNumber,
    ) -> Result<Option<AssembledMessage>, ReassemblyError> {
        let Some(partial) = self.partials.get_mut(&sequence_number) else {
            return Ok(None);
        };
        let Some(buffer) = partial.concatenate() else {
            debug!(
                "last fragment arrived before the rest: sequence={sequence_number}, received={}, \
                 expected={}",
                partial.received(),
                partial.total_fragments()
            );
            return Ok(None);
        };

        partial.mark_complete();
        let fragment_count = partial.total_fragments();

        match decode(buffer.freeze()) {
            Ok(datagram) => {
                metrics::inc_assembled();
                Ok(Some(AssembledMessage::new(datagram, fragment_count)))
            }
            Err(source) => {
                let err = ReassemblyError::ReassembledDecode {
                    sequence_number,
                    source,
                };
                warn!("dropping reassembled message: {err}");
                metrics::inc_reassembly_failures(err.reason());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests;
