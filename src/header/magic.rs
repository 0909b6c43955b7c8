//! Header magic numbers.

use crate::error::DecodeError;

/// Length of the magic field at the start of every datagram.
pub const MAGIC_LEN: usize = 4;

/// Fixed prefix of a short header: magic and sequence number.
pub const SHORT_PREFIX_LEN: usize = 8;

/// Fixed prefix of a fragmented header: the short prefix followed by payload
/// size, fragment offset, fragment number and fragment count.
pub const FRAGMENTED_PREFIX_LEN: usize = 20;

/// Header variant selected by the leading four bytes of a datagram.
///
/// # Examples
///
/// ```
/// use lcmframe::header::Magic;
/// assert_eq!(Magic::try_from(0x4c43_3032), Ok(Magic::Short));
/// assert_eq!(Magic::Fragmented.prefix_len(), 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Magic {
    /// `"LC02"`: the whole message fits in this datagram.
    Short,
    /// `"LC03"`: this datagram carries one fragment of a larger message.
    Fragmented,
}

impl Magic {
    /// Wire value of the short header magic.
    pub const SHORT: u32 = 0x4c43_3032;
    /// Wire value of the fragmented header magic.
    pub const FRAGMENTED: u32 = 0x4c43_3033;

    /// Return the on-wire value.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Short => Self::SHORT,
            Self::Fragmented => Self::FRAGMENTED,
        }
    }

    /// Number of fixed bytes preceding the channel name.
    #[must_use]
    pub const fn prefix_len(self) -> usize {
        match self {
            Self::Short => SHORT_PREFIX_LEN,
            Self::Fragmented => FRAGMENTED_PREFIX_LEN,
        }
    }

    /// Report whether the header carries fragment fields.
    #[must_use]
    pub const fn is_fragmented(self) -> bool { matches!(self, Self::Fragmented) }
}

impl TryFrom<u32> for Magic {
    type Error = DecodeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            Self::SHORT => Ok(Self::Short),
            Self::FRAGMENTED => Ok(Self::Fragmented),
            magic => Err(DecodeError::InvalidMagic { magic }),
        }
    }
}

impl From<Magic> for u32 {
    fn from(value: Magic) -> Self { value.value() }
}
