//! Network byte-order conversions for LCM header fields.
//!
//! Every multi-byte LCM header field is big-endian. Keeping the conversions
//! here scopes the Clippy expectation to the only place the crate touches
//! endianness.

/// Serialise a `u16` in network byte order.
///
/// # Examples
///
/// ```
/// use lcmframe::byte_order::write_network_u16;
///
/// assert_eq!(write_network_u16(0x0102), [0x01, 0x02]);
/// ```
#[must_use]
pub fn write_network_u16(value: u16) -> [u8; 2] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "LCM header fields are big-endian on the wire."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u16`.
///
/// # Examples
///
/// ```
/// use lcmframe::byte_order::read_network_u16;
///
/// assert_eq!(read_network_u16([0x01, 0x02]), 0x0102);
/// ```
#[must_use]
pub fn read_network_u16(bytes: [u8; 2]) -> u16 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "LCM header fields are big-endian on the wire."
    )]
    u16::from_be_bytes(bytes)
}

/// Serialise a `u32` in network byte order.
///
/// # Examples
///
/// ```
/// use lcmframe::byte_order::write_network_u32;
///
/// assert_eq!(write_network_u32(0x4c43_3032), *b"LC02");
/// ```
#[must_use]
pub fn write_network_u32(value: u32) -> [u8; 4] {
    #[expect(
        clippy::big_endian_bytes,
        reason = "LCM header fields are big-endian on the wire."
    )]
    value.to_be_bytes()
}

/// Parse a network-order `u32`.
///
/// # Examples
///
/// ```
/// use lcmframe::byte_order::read_network_u32;
///
/// assert_eq!(read_network_u32(*b"LC03"), 0x4c43_3033);
/// ```
#[must_use]
pub fn read_network_u32(bytes: [u8; 4]) -> u32 {
    #[expect(
        clippy::big_endian_bytes,
        reason = "LCM header fields are big-endian on the wire."
    )]
    u32::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::u16(
        u32::from(read_network_u16([0xab, 0xcd])),
        &write_network_u16(0xabcd)[..],
        &[0xab, 0xcd],
        0xabcd
    )]
    #[case::u32(
        read_network_u32([0xde, 0xad, 0xbe, 0xef]),
        &write_network_u32(0xdead_beef)[..],
        &[0xde, 0xad, 0xbe, 0xef],
        0xdead_beef
    )]
    fn network_order_is_most_significant_byte_first(
        #[case] read_back: u32,
        #[case] written: &[u8],
        #[case] expected_bytes: &[u8],
        #[case] value: u32,
    ) {
        assert_eq!(written, expected_bytes);
        assert_eq!(read_back, value);
    }
}
