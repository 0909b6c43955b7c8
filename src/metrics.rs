//! Metric helpers for `lcmframe`.
//!
//! This module defines metric names and helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::header::Magic;

/// Name of the counter tracking decoded datagrams.
pub const DATAGRAMS_TOTAL: &str = "lcmframe_datagrams_total";
/// Name of the counter tracking datagrams dropped by the decoder.
pub const DATAGRAMS_DROPPED: &str = "lcmframe_datagrams_dropped_total";
/// Name of the counter tracking messages returned by the reassembler.
pub const MESSAGES_ASSEMBLED: &str = "lcmframe_messages_assembled_total";
/// Name of the counter tracking partial messages evicted for staleness.
pub const REASSEMBLIES_EXPIRED: &str = "lcmframe_reassemblies_expired_total";
/// Name of the counter tracking logical messages lost during reassembly.
pub const REASSEMBLY_FAILURES: &str = "lcmframe_reassembly_failures_total";

fn kind_label(magic: Magic) -> &'static str {
    match magic {
        Magic::Short => "short",
        Magic::Fragmented => "fragment",
    }
}

/// Record a successfully decoded datagram of the given header kind.
pub fn inc_datagrams(magic: Magic) {
    let kind = kind_label(magic);
    #[cfg(feature = "metrics")]
    counter!(DATAGRAMS_TOTAL, "kind" => kind).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = kind;
}

/// Record a datagram dropped by the decoder.
pub fn inc_dropped(reason: &'static str) {
    #[cfg(feature = "metrics")]
    counter!(DATAGRAMS_DROPPED, "reason" => reason).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = reason;
}

/// Record a message returned complete, whether passed through or reassembled.
pub fn inc_assembled() {
    #[cfg(feature = "metrics")]
    counter!(MESSAGES_ASSEMBLED).increment(1);
}

/// Record partial messages evicted after the reassembly timeout.
pub fn add_expired(count: usize) {
    #[cfg(feature = "metrics")]
    counter!(REASSEMBLIES_EXPIRED).increment(u64::try_from(count).unwrap_or(u64::MAX));
    #[cfg(not(feature = "metrics"))]
    let _ = count;
}

/// Record a logical message lost to a reassembly error.
pub fn inc_reassembly_failures(reason: &'static str) {
    #[cfg(feature = "metrics")]
    counter!(REASSEMBLY_FAILURES, "reason" => reason).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = reason;
}
