//! Wire encoders for short and fragmented LCM datagrams.

use std::num::NonZeroUsize;

use bytes::BufMut;
use lcmframe::{
    byte_order::{write_network_u16, write_network_u32},
    header::{FRAGMENTED_PREFIX_LEN, Magic, SHORT_PREFIX_LEN},
};

/// Encode a short (unfragmented) datagram.
pub fn encode_short(sequence: u32, channel: &str, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SHORT_PREFIX_LEN + channel.len() + 1 + payload.len());
    buf.put_slice(&write_network_u32(Magic::SHORT));
    buf.put_slice(&write_network_u32(sequence));
    put_channel(&mut buf, channel);
    buf.put_slice(payload);
    buf
}

/// Field values for one fragmented datagram.
#[derive(Clone, Copy, Debug)]
pub struct FragmentSpec<'a> {
    pub sequence: u32,
    pub payload_size: u32,
    pub fragment_offset: u32,
    pub fragment_number: u16,
    pub total_fragments: u16,
    pub channel: &'a str,
    pub payload: &'a [u8],
}

/// Encode a fragmented datagram exactly as described by `spec`.
///
/// No consistency checks are applied so tests can build malformed
/// fragments.
pub fn encode_fragment(spec: &FragmentSpec<'_>) -> Vec<u8> {
    let mut buf =
        Vec::with_capacity(FRAGMENTED_PREFIX_LEN + spec.channel.len() + 1 + spec.payload.len());
    buf.put_slice(&write_network_u32(Magic::FRAGMENTED));
    buf.put_slice(&write_network_u32(spec.sequence));
    buf.put_slice(&write_network_u32(spec.payload_size));
    buf.put_slice(&write_network_u32(spec.fragment_offset));
    buf.put_slice(&write_network_u16(spec.fragment_number));
    buf.put_slice(&write_network_u16(spec.total_fragments));
    put_channel(&mut buf, spec.channel);
    buf.put_slice(spec.payload);
    buf
}

/// Split `payload` into fragmented datagrams carrying at most `chunk` payload
/// bytes each, in index order.
///
/// An empty payload yields a single empty fragment.
///
/// # Panics
///
/// Panics if the payload needs more than `u16::MAX` fragments or is longer
/// than `u32::MAX` bytes.
pub fn split_message(
    sequence: u32,
    channel: &str,
    payload: &[u8],
    chunk: NonZeroUsize,
) -> Vec<Vec<u8>> {
    let chunks: Vec<&[u8]> = if payload.is_empty() {
        vec![payload]
    } else {
        payload.chunks(chunk.get()).collect()
    };
    let total_fragments = u16::try_from(chunks.len()).expect("fragment count fits in u16");
    let payload_size = u32::try_from(payload.len()).expect("payload length fits in u32");

    let mut offset = 0_u32;
    chunks
        .into_iter()
        .zip(0_u16..)
        .map(|(part, fragment_number)| {
            let wire = encode_fragment(&FragmentSpec {
                sequence,
                payload_size,
                fragment_offset: offset,
                fragment_number,
                total_fragments,
                channel,
                payload: part,
            });
            offset += u32::try_from(part.len()).expect("chunk length fits in u32");
            wire
        })
        .collect()
}

fn put_channel(buf: &mut Vec<u8>, channel: &str) {
    buf.put_slice(channel.as_bytes());
    buf.put_u8(0);
}
