//! Resource limits applied by the [`Reassembler`](super::Reassembler).

use std::num::NonZeroUsize;

/// Optional caps on reassembly memory.
///
/// Both limits default to unbounded. The expiry timeout is not configurable;
/// see [`REASSEMBLY_TIMEOUT`](super::REASSEMBLY_TIMEOUT).
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use lcmframe::reassembler::ReassemblyConfig;
///
/// let config = ReassemblyConfig::default()
///     .with_max_in_flight(NonZeroUsize::new(64).expect("non-zero"))
///     .with_max_message_size(NonZeroUsize::new(1 << 20).expect("non-zero"));
/// assert_eq!(config.max_in_flight.map(NonZeroUsize::get), Some(64));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReassemblyConfig {
    /// Maximum number of sequence numbers buffered at once.
    pub max_in_flight: Option<NonZeroUsize>,
    /// Maximum number of payload bytes buffered for one sequence number.
    pub max_message_size: Option<NonZeroUsize>,
}

impl ReassemblyConfig {
    /// Configuration without any limits.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_in_flight: None,
            max_message_size: None,
        }
    }

    /// Cap the number of concurrently buffered messages.
    #[must_use]
    pub const fn with_max_in_flight(mut self, limit: NonZeroUsize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }

    /// Cap the payload bytes buffered for a single message.
    #[must_use]
    pub const fn with_max_message_size(mut self, limit: NonZeroUsize) -> Self {
        self.max_message_size = Some(limit);
        self
    }
}
