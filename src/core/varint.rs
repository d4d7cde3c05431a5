//! # Varint Encoding
//!
//! Little-endian base-128 integers: seven payload bits per byte, high bit set
//! on every byte except the last. Encodings are always minimal.
//!
//! Decoding follows the permissive reading rules of the format: at most ten
//! groups are consumed, and payload bits shifted beyond 64 are dropped.

use crate::error::{CodecError, Result};
use bytes::BufMut;

/// Maximum encoded length of a 64-bit varint
pub const MAX_VARINT_LEN: usize = 10;

/// Number of bytes `v` occupies as a varint.
#[inline]
pub const fn varint_len(v: u64) -> usize {
    ((64 - (v | 1).leading_zeros()) as usize + 6) / 7
}

/// Number of bytes `v` occupies as a zigzag varint.
#[inline]
pub const fn zigzag_len(v: i64) -> usize {
    varint_len(zigzag_encode(v))
}

/// Map a signed integer onto the unsigned range so small magnitudes stay short.
#[inline]
pub const fn zigzag_encode(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

/// Inverse of [`zigzag_encode`].
#[inline]
pub const fn zigzag_decode(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}

/// Append the varint encoding of `v` to `buf`.
#[inline]
pub fn put_varint<B: BufMut + ?Sized>(buf: &mut B, mut v: u64) {
    while v >= 0x80 {
        buf.put_u8((v as u8 & 0x7F) | 0x80);
        v >>= 7;
    }
    buf.put_u8(v as u8);
}

/// Encode `v` into a freshly allocated byte vector.
pub fn encode_varint(v: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(varint_len(v));
    put_varint(&mut out, v);
    out
}

/// Decode a varint starting at `offset`.
///
/// Returns the value and the offset of the first byte after it.
///
/// # Errors
/// - `CodecError::IntegerOverflow` if no terminating byte appears within ten bytes
/// - `CodecError::UnexpectedEof` if the buffer ends before the terminating byte
#[inline]
pub fn decode_varint(buf: &[u8], mut offset: usize) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        if shift >= 64 {
            return Err(CodecError::IntegerOverflow);
        }
        let byte = *buf.get(offset).ok_or(CodecError::UnexpectedEof)?;
        offset += 1;
        value |= u64::from(byte & 0x7F) << shift;
        if byte < 0x80 {
            return Ok((value, offset));
        }
        shift += 7;
    }
}

/// Advance past a varint at `offset` without assembling its value.
///
/// # Errors
/// Same as [`decode_varint`].
#[inline]
pub fn skip_varint(buf: &[u8], offset: usize) -> Result<usize> {
    for (i, &byte) in buf.get(offset..).unwrap_or_default().iter().enumerate() {
        if i >= MAX_VARINT_LEN {
            return Err(CodecError::IntegerOverflow);
        }
        if byte < 0x80 {
            return Ok(offset + i + 1);
        }
    }
    if buf.len().saturating_sub(offset) >= MAX_VARINT_LEN {
        return Err(CodecError::IntegerOverflow);
    }
    Err(CodecError::UnexpectedEof)
}

/// Largest declared length; anything above is negative as a signed 64-bit length
pub const MAX_DECLARED_LEN: u64 = i64::MAX as u64;

/// Decode a length-prefixed payload starting at `offset`.
///
/// Returns the payload slice and the offset just past it.
///
/// # Errors
/// - `CodecError::InvalidLength` if the length is negative as a signed value
///   or does not fit the address space
/// - `CodecError::UnexpectedEof` if the payload runs past the end of `buf`
pub fn decode_length_delimited(buf: &[u8], offset: usize) -> Result<(&[u8], usize)> {
    let (len, start) = decode_varint(buf, offset)?;
    if len > MAX_DECLARED_LEN {
        return Err(CodecError::InvalidLength);
    }
    let len = usize::try_from(len).map_err(|_| CodecError::InvalidLength)?;
    let end = start.checked_add(len).ok_or(CodecError::InvalidLength)?;
    let payload = buf.get(start..end).ok_or(CodecError::UnexpectedEof)?;
    Ok((payload, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_single_byte() {
        assert_eq!(encode_varint(0), vec![0x00]);
        assert_eq!(varint_len(0), 1);
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_varint(1), vec![0x01]);
        assert_eq!(encode_varint(127), vec![0x7F]);
        assert_eq!(encode_varint(128), vec![0x80, 0x01]);
        assert_eq!(encode_varint(300), vec![0xAC, 0x02]);
        assert_eq!(encode_varint(16_384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn test_max_value_is_ten_bytes() {
        let bytes = encode_varint(u64::MAX);
        assert_eq!(bytes.len(), MAX_VARINT_LEN);
        assert_eq!(varint_len(u64::MAX), MAX_VARINT_LEN);
        assert_eq!(*bytes.last().unwrap_or(&0xFF), 0x01);
        assert!(bytes[..9].iter().all(|b| b & 0x80 != 0));
    }

    #[test]
    fn test_length_grows_every_seven_bits() {
        for bits in 1..64u32 {
            let v = 1u64 << bits;
            assert_eq!(varint_len(v), (bits as usize) / 7 + 1, "bits={bits}");
            assert_eq!(varint_len(v - 1), ((bits as usize) + 6) / 7, "bits={bits}");
        }
    }

    #[test]
    fn test_varint_len_matches_encoding() {
        for v in [0, 1, 127, 128, 255, 16_383, 16_384, u32::MAX as u64, u64::MAX >> 1, u64::MAX] {
            assert_eq!(varint_len(v), encode_varint(v).len(), "v={v}");
        }
    }

    #[test]
    fn test_decode_reports_new_offset() {
        let buf = [0xFF, 0xAC, 0x02, 0x07];
        assert_eq!(decode_varint(&buf, 1).ok(), Some((300, 3)));
        assert_eq!(decode_varint(&buf, 3).ok(), Some((7, 4)));
    }

    #[test]
    fn test_truncated_varint_is_unexpected_eof() {
        let bytes = encode_varint(u64::MAX);
        for cut in 0..bytes.len() {
            assert!(matches!(
                decode_varint(&bytes[..cut], 0),
                Err(CodecError::UnexpectedEof)
            ));
            assert!(matches!(
                skip_varint(&bytes[..cut], 0),
                Err(CodecError::UnexpectedEof)
            ));
        }
    }

    #[test]
    fn test_eleven_groups_overflow() {
        let mut bytes = vec![0x80; 10];
        bytes.push(0x00);
        assert!(matches!(decode_varint(&bytes, 0), Err(CodecError::IntegerOverflow)));
        assert!(matches!(skip_varint(&bytes, 0), Err(CodecError::IntegerOverflow)));
    }

    #[test]
    fn test_tenth_byte_high_bits_are_dropped() {
        // Bits beyond the 64th are discarded, as every reader of the format does.
        let mut bytes = vec![0xFF; 9];
        bytes.push(0x7F);
        assert_eq!(decode_varint(&bytes, 0).ok(), Some((u64::MAX, 10)));
    }

    #[test]
    fn test_skip_varint_matches_decode() {
        for v in [0u64, 1, 150, 1 << 35, u64::MAX] {
            let mut buf = encode_varint(v);
            buf.push(0x42);
            let (_, end) = decode_varint(&buf, 0).unwrap_or_default();
            assert_eq!(skip_varint(&buf, 0).ok(), Some(end));
        }
    }

    #[test]
    fn test_zigzag() {
        assert_eq!(zigzag_encode(0), 0);
        assert_eq!(zigzag_encode(-1), 1);
        assert_eq!(zigzag_encode(1), 2);
        assert_eq!(zigzag_encode(-2), 3);
        assert_eq!(zigzag_encode(i64::MAX), u64::MAX - 1);
        assert_eq!(zigzag_encode(i64::MIN), u64::MAX);
        for v in [0, 1, -1, 63, -64, 64, i64::MAX, i64::MIN] {
            assert_eq!(zigzag_decode(zigzag_encode(v)), v);
        }
        assert_eq!(zigzag_len(-1), 1);
        assert_eq!(zigzag_len(-64), 1);
        assert_eq!(zigzag_len(-65), 2);
        assert_eq!(zigzag_len(i64::MIN), MAX_VARINT_LEN);
    }

    #[test]
    fn test_length_delimited() {
        let buf = [0x03, b'a', b'b', b'c', 0x09];
        let (payload, end) = decode_length_delimited(&buf, 0).unwrap_or_default();
        assert_eq!(payload, b"abc");
        assert_eq!(end, 4);

        assert!(matches!(
            decode_length_delimited(&[0x05, b'a'], 0),
            Err(CodecError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_negative_declared_length_is_invalid() {
        for len in [MAX_DECLARED_LEN + 1, u64::MAX] {
            let mut buf = encode_varint(len);
            buf.extend_from_slice(b"abc");
            assert!(matches!(
                decode_length_delimited(&buf, 0),
                Err(CodecError::InvalidLength)
            ));
        }

        // Largest non-negative length is a plain overrun
        let buf = encode_varint(MAX_DECLARED_LEN);
        assert!(matches!(
            decode_length_delimited(&buf, 0),
            Err(CodecError::UnexpectedEof)
        ));
    }
}
