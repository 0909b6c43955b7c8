//! Identifiers carried in every LCM header.
//!
//! [`SequenceNumber`] groups the fragments of one logical message and
//! [`FragmentIndex`] orders them within it.

use derive_more::{Display, From, Into};

/// Sender-assigned number identifying one logical message.
///
/// Fragments sharing a sequence number belong to the same message. Senders
/// only reuse a number once the previous message carrying it has been fully
/// assembled or has expired.
///
/// # Examples
///
/// ```
/// use lcmframe::header::SequenceNumber;
/// let sequence = SequenceNumber::new(42);
/// assert_eq!(sequence.get(), 42);
/// assert_eq!(sequence.to_string(), "42");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("{_0}")]
pub struct SequenceNumber(u32);

impl SequenceNumber {
    /// Wrap a raw sequence number.
    #[must_use]
    pub const fn new(value: u32) -> Self { Self(value) }

    /// Return the raw sequence number.
    #[must_use]
    pub const fn get(self) -> u32 { self.0 }
}

/// Zero-based position of a fragment within its message.
///
/// # Examples
///
/// ```
/// use lcmframe::header::FragmentIndex;
/// let index = FragmentIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert!(FragmentIndex::zero() < index);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("{_0}")]
pub struct FragmentIndex(u16);

impl FragmentIndex {
    /// Construct an index from its wire value.
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    /// Index of the first fragment, which also carries the logical header.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the wire value.
    #[must_use]
    pub const fn get(self) -> u16 { self.0 }
}
