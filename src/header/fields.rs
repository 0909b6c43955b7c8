//! Decoded header fields.

use super::{FragmentIndex, Magic, SequenceNumber};

/// Fields present only in fragmented headers.
///
/// # Examples
///
/// ```
/// use lcmframe::header::{FragmentIndex, FragmentInfo};
/// let info = FragmentInfo::new(1024, 512, FragmentIndex::new(1), 2);
/// assert!(info.is_last());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FragmentInfo {
    payload_size: u32,
    fragment_offset: u32,
    fragment_number: FragmentIndex,
    total_fragments: u16,
}

impl FragmentInfo {
    /// Bundle the fragment fields of a header.
    #[must_use]
    pub const fn new(
        payload_size: u32,
        fragment_offset: u32,
        fragment_number: FragmentIndex,
        total_fragments: u16,
    ) -> Self {
        Self {
            payload_size,
            fragment_offset,
            fragment_number,
            total_fragments,
        }
    }

    /// Total length of the reassembled payload as declared by the sender.
    #[must_use]
    pub const fn payload_size(&self) -> u32 { self.payload_size }

    /// Byte offset of this fragment within the reassembled payload.
    ///
    /// Informational only: reassembly orders fragments by
    /// [`fragment_number`](Self::fragment_number).
    #[must_use]
    pub const fn fragment_offset(&self) -> u32 { self.fragment_offset }

    /// Zero-based index of this fragment.
    #[must_use]
    pub const fn fragment_number(&self) -> FragmentIndex { self.fragment_number }

    /// Number of fragments making up the message.
    #[must_use]
    pub const fn total_fragments(&self) -> u16 { self.total_fragments }

    /// Report whether this fragment has the highest index of its message.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.total_fragments.checked_sub(1) == Some(self.fragment_number.get())
    }
}

/// Header decoded from a single datagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    magic: Magic,
    sequence_number: SequenceNumber,
    fragment: Option<FragmentInfo>,
    channel_name: String,
    channel_terminated: bool,
}

impl Header {
    pub(crate) fn new(
        magic: Magic,
        sequence_number: SequenceNumber,
        fragment: Option<FragmentInfo>,
        channel_name: String,
        channel_terminated: bool,
    ) -> Self {
        Self {
            magic,
            sequence_number,
            fragment,
            channel_name,
            channel_terminated,
        }
    }

    /// Header variant read from the first four bytes.
    #[must_use]
    pub const fn magic(&self) -> Magic { self.magic }

    /// Sequence number shared by every fragment of the message.
    #[must_use]
    pub const fn sequence_number(&self) -> SequenceNumber { self.sequence_number }

    /// Report whether the datagram is one fragment of a larger message.
    #[must_use]
    pub const fn is_fragmented(&self) -> bool { self.magic.is_fragmented() }

    /// Fragment fields, present only for fragmented headers.
    #[must_use]
    pub const fn fragment(&self) -> Option<FragmentInfo> { self.fragment }

    /// Fragment index; short headers report the single fragment `0`.
    #[must_use]
    pub fn fragment_number(&self) -> FragmentIndex {
        self.fragment
            .map_or(FragmentIndex::zero(), |info| info.fragment_number())
    }

    /// Fragment count; short headers report `1`.
    #[must_use]
    pub fn total_fragments(&self) -> u16 { self.fragment.map_or(1, |info| info.total_fragments()) }

    /// Channel the message was published on.
    #[must_use]
    pub fn channel_name(&self) -> &str { &self.channel_name }

    /// Report whether the channel name ended with a NUL byte.
    ///
    /// When `false` the name ran to the end of the datagram and the payload
    /// is empty.
    #[must_use]
    pub const fn is_channel_terminated(&self) -> bool { self.channel_terminated }
}
