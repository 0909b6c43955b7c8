//! Complete messages handed back by the reassembler.

use bytes::Bytes;

use crate::header::{Datagram, Header};

/// A complete logical message returned by the reassembler.
///
/// Short datagrams pass through unchanged with a `fragment_count` of one.
/// Reassembled messages carry the header decoded from the concatenation of
/// fragment zero's header bytes and every fragment payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledMessage {
    datagram: Datagram,
    fragment_count: u16,
}

impl AssembledMessage {
    pub(crate) fn new(datagram: Datagram, fragment_count: u16) -> Self {
        Self {
            datagram,
            fragment_count,
        }
    }

    /// Logical header of the message.
    #[must_use]
    pub const fn header(&self) -> &Header { self.datagram.header() }

    /// Channel the message was published on.
    #[must_use]
    pub fn channel_name(&self) -> &str { self.datagram.header().channel_name() }

    /// Borrow the message payload.
    #[must_use]
    pub fn payload(&self) -> &[u8] { self.datagram.payload() }

    /// Number of datagrams the message was carried in.
    #[must_use]
    pub const fn fragment_count(&self) -> u16 { self.fragment_count }

    /// Borrow the underlying datagram.
    #[must_use]
    pub const fn datagram(&self) -> &Datagram { &self.datagram }

    /// Consume the message, returning the underlying datagram.
    #[must_use]
    pub fn into_datagram(self) -> Datagram { self.datagram }

    /// Consume the message, returning the owned payload bytes.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.datagram.into_payload() }
}
