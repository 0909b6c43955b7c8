//! LCM datagram headers.
//!
//! Every datagram starts with a four byte magic selecting one of two layouts,
//! both big-endian:
//!
//! ```text
//! short:      [magic u32][sequence u32][channel .. NUL][payload ..]
//! fragmented: [magic u32][sequence u32][payload_size u32][fragment_offset u32]
//!             [fragment_number u16][total_fragments u16][channel .. NUL][payload ..]
//! ```
//!
//! [`decode`] turns one datagram into a [`Datagram`] without keeping any
//! state between calls.

mod datagram;
mod decode;
mod fields;
mod id;
mod magic;

pub use datagram::Datagram;
pub use decode::{decode, decode_slice};
pub use fields::{FragmentInfo, Header};
pub use id::{FragmentIndex, SequenceNumber};
pub use magic::{FRAGMENTED_PREFIX_LEN, MAGIC_LEN, Magic, SHORT_PREFIX_LEN};

/// UDP port LCM publishes on when no other port is configured.
///
/// ```
/// assert_eq!(lcmframe::LCM_DEFAULT_PORT, 7667);
/// ```
pub const LCM_DEFAULT_PORT: u16 = 7667;
