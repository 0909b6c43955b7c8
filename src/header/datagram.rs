//! Decoded datagrams as zero-copy header and payload slices.

use bytes::Bytes;

use super::Header;

/// A decoded datagram: its header plus the header and payload byte ranges.
///
/// Both ranges are slices of the buffer handed to
/// [`decode`](crate::header::decode), so decoding never copies payload bytes.
/// `header_bytes().len() + payload().len()` always equals the length of the
/// original buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Datagram {
    header: Header,
    header_bytes: Bytes,
    payload: Bytes,
}

impl Datagram {
    pub(crate) fn new(header: Header, header_bytes: Bytes, payload: Bytes) -> Self {
        Self {
            header,
            header_bytes,
            payload,
        }
    }

    /// Borrow the decoded header.
    #[must_use]
    pub const fn header(&self) -> &Header { &self.header }

    /// Raw header bytes, from the magic through the channel terminator.
    #[must_use]
    pub fn header_bytes(&self) -> &[u8] { &self.header_bytes }

    /// Bytes following the header.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Total number of bytes in the original datagram.
    #[must_use]
    pub fn wire_len(&self) -> usize { self.header_bytes.len() + self.payload.len() }

    /// Consume the datagram, returning the payload without copying.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }

    /// Consume the datagram, returning header, header bytes and payload.
    #[must_use]
    pub fn into_parts(self) -> (Header, Bytes, Bytes) {
        (self.header, self.header_bytes, self.payload)
    }
}
