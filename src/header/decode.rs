//! Stateless decoding of LCM datagrams.

use bytes::{Buf, Bytes};

use super::{
    Datagram,
    FragmentIndex,
    FragmentInfo,
    Header,
    MAGIC_LEN,
    Magic,
    SequenceNumber,
};
use crate::{
    byte_order::{read_network_u16, read_network_u32},
    error::DecodeError,
};

/// Decode a datagram into its header, header bytes and payload.
///
/// The channel name is read from the end of the fixed prefix up to the first
/// NUL byte. A name running to the end of the buffer is accepted as-is: the
/// header then spans the whole datagram, the payload is empty and
/// [`Header::is_channel_terminated`] reports `false`.
///
/// # Errors
///
/// Returns [`DecodeError::Truncated`] when the buffer ends inside the fixed
/// prefix, [`DecodeError::InvalidMagic`] for an unknown magic and
/// [`DecodeError::FragmentOutOfRange`] when a fragmented header names an
/// index outside its fragment count.
///
/// # Examples
///
/// ```
/// use lcmframe::header::decode;
///
/// let mut wire = Vec::new();
/// wire.extend_from_slice(&0x4c43_3032_u32.to_be_bytes());
/// wire.extend_from_slice(&1_u32.to_be_bytes());
/// wire.extend_from_slice(b"TEST\0hello");
///
/// let datagram = decode(wire).expect("valid short header");
/// assert!(!datagram.header().is_fragmented());
/// assert_eq!(datagram.header().sequence_number().get(), 1);
/// assert_eq!(datagram.header().channel_name(), "TEST");
/// assert_eq!(datagram.payload(), b"hello");
/// ```
pub fn decode(datagram: impl Into<Bytes>) -> Result<Datagram, DecodeError> {
    let bytes = datagram.into();
    let mut cursor: &[u8] = &bytes;

    require(cursor, MAGIC_LEN)?;
    let magic = Magic::try_from(read_network_u32(take(&mut cursor)))?;
    let prefix_len = magic.prefix_len();
    require(&bytes, prefix_len)?;

    let sequence_number = SequenceNumber::new(read_network_u32(take(&mut cursor)));
    let fragment = match magic {
        Magic::Short => None,
        Magic::Fragmented => Some(read_fragment_info(&mut cursor)?),
    };

    let name_bytes = &bytes[prefix_len..];
    let (name_len, header_len, terminated) = match name_bytes.iter().position(|&b| b == 0) {
        Some(nul) => (nul, prefix_len + nul + 1, true),
        None => (name_bytes.len(), bytes.len(), false),
    };
    let channel_name = String::from_utf8_lossy(&name_bytes[..name_len]).into_owned();

    let header = Header::new(magic, sequence_number, fragment, channel_name, terminated);
    Ok(Datagram::new(
        header,
        bytes.slice(..header_len),
        bytes.slice(header_len..),
    ))
}

/// Decode a borrowed buffer, copying it once into an owned [`Bytes`].
///
/// # Errors
///
/// See [`decode`].
pub fn decode_slice(datagram: &[u8]) -> Result<Datagram, DecodeError> {
    decode(Bytes::copy_from_slice(datagram))
}

fn require(buf: &[u8], needed: usize) -> Result<(), DecodeError> {
    if buf.len() < needed {
        return Err(DecodeError::Truncated {
            needed,
            actual: buf.len(),
        });
    }
    Ok(())
}

// Callers check the prefix length with `require` first.
fn take<const N: usize>(cursor: &mut &[u8]) -> [u8; N] {
    let mut field = [0; N];
    cursor.copy_to_slice(&mut field);
    field
}

// Caller guarantees the cursor holds the remaining 12 prefix bytes.
fn read_fragment_info(cursor: &mut &[u8]) -> Result<FragmentInfo, DecodeError> {
    let payload_size = read_network_u32(take(cursor));
    let fragment_offset = read_network_u32(take(cursor));
    let fragment_number = FragmentIndex::new(read_network_u16(take(cursor)));
    let total_fragments = read_network_u16(take(cursor));

    if fragment_number.get() >= total_fragments {
        return Err(DecodeError::FragmentOutOfRange {
            fragment_number,
            total_fragments,
        });
    }

    Ok(FragmentInfo::new(
        payload_size,
        fragment_offset,
        fragment_number,
        total_fragments,
    ))
}
