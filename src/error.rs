//! Error types for decoding, reassembly and channel routing.
//!
//! Every error is local to one datagram or one logical message. None of them
//! leave the [`Reassembler`](crate::reassembler::Reassembler) in a state that
//! affects unrelated sequence numbers.

use std::num::NonZeroUsize;

use thiserror::Error;

use crate::header::{FragmentIndex, SequenceNumber};

/// Reasons a single datagram could not be decoded.
///
/// The datagram should be dropped; the engine keeps running.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended before the fixed header fields.
    #[error("datagram truncated: needed {needed} bytes, found {actual}")]
    Truncated { needed: usize, actual: usize },
    /// The leading four bytes match neither known header magic.
    #[error("unrecognised header magic {magic:#010x}")]
    InvalidMagic { magic: u32 },
    /// A fragmented header names an index outside its fragment count.
    #[error("fragment {fragment_number} out of range for a {total_fragments}-fragment message")]
    FragmentOutOfRange {
        fragment_number: FragmentIndex,
        total_fragments: u16,
    },
}

impl DecodeError {
    /// Short label used for logs and metrics.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Truncated { .. } => "truncated",
            Self::InvalidMagic { .. } => "invalid_magic",
            Self::FragmentOutOfRange { .. } => "fragment_out_of_range",
        }
    }
}

/// Failures of a logical message during reassembly.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ReassemblyError {
    /// All fragments arrived but the concatenated buffer did not decode.
    ///
    /// The entry is discarded; the message is lost.
    #[error("reassembled message {sequence_number} failed to decode: {source}")]
    ReassembledDecode {
        sequence_number: SequenceNumber,
        source: DecodeError,
    },
    /// A new sequence number arrived while the in-flight limit was reached.
    #[error("in-flight reassembly limit of {limit} reached")]
    TooManyInFlight { limit: NonZeroUsize },
    /// Buffered fragments exceeded the configured message size.
    #[error("message {sequence_number} would buffer {attempted} bytes, limit is {limit}")]
    MessageTooLarge {
        sequence_number: SequenceNumber,
        attempted: usize,
        limit: NonZeroUsize,
    },
}

impl ReassemblyError {
    /// Short label used for logs and metrics.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::ReassembledDecode { .. } => "reassembled_decode",
            Self::TooManyInFlight { .. } => "too_many_in_flight",
            Self::MessageTooLarge { .. } => "message_too_large",
        }
    }
}

/// Errors returned by [`Defragmenter::submit`](crate::defragmenter::Defragmenter::submit).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// The datagram itself was malformed and has been dropped.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// The datagram decoded but its logical message could not be completed.
    #[error(transparent)]
    Reassembly(#[from] ReassemblyError),
}

/// Errors raised while building a [`ChannelRouter`](crate::channel::ChannelRouter).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// A handler was already registered for the channel.
    #[error("channel {0:?} already has a handler")]
    DuplicateChannel(String),
}
