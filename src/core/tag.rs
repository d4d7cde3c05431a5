//! # Field Tags
//!
//! Every value on the wire is preceded by a tag varint packing the field
//! number and the wire type: `field_number << 3 | wire_type`.

use crate::core::varint::{decode_varint, varint_len};
use crate::error::{CodecError, Result};
use std::fmt;

/// Largest field number a decoder accepts
pub const MAX_FIELD_NUMBER: u32 = i32::MAX as u32;

/// How the value following a tag is framed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 varint
    Varint = 0,
    /// Eight little-endian bytes
    Fixed64 = 1,
    /// Varint length followed by that many bytes
    LengthDelimited = 2,
    /// Opens a group, closed by a matching `EndGroup`
    StartGroup = 3,
    /// Closes the innermost open group
    EndGroup = 4,
    /// Four little-endian bytes
    Fixed32 = 5,
}

impl WireType {
    /// Raw three-bit value of this wire type
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get human-readable name
    pub const fn name(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        }
    }
}

impl TryFrom<u8> for WireType {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(CodecError::UnsupportedWireType(other)),
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Combine a field number and wire type into a raw tag value.
#[inline]
pub const fn pack_tag(field_number: u32, wire_type: WireType) -> u64 {
    ((field_number as u64) << 3) | wire_type as u64
}

/// Split a raw tag value into its field number and raw wire-type bits.
///
/// The wire type is returned unvalidated; 6 and 7 survive so callers can
/// report them precisely.
#[inline]
pub const fn unpack_tag(raw: u64) -> (u64, u8) {
    (raw >> 3, (raw & 0x7) as u8)
}

/// Encoded length of the tag for `field_number` (independent of wire type).
#[inline]
pub const fn tag_len(field_number: u32) -> usize {
    varint_len(pack_tag(field_number, WireType::Varint))
}

/// Read and validate a top-level field tag at `offset`.
///
/// Returns `(field_number, wire_type, next_offset)`. The wire type is left
/// raw because a known field with wire type 6 or 7 is a wire-type mismatch
/// rather than an unsupported type.
///
/// # Errors
/// - varint errors from [`decode_varint`]
/// - `CodecError::UnexpectedEndGroup` for an end-group marker outside a group
/// - `CodecError::IllegalTag` for field number zero or above [`MAX_FIELD_NUMBER`]
#[inline]
pub fn read_tag(buf: &[u8], offset: usize) -> Result<(u32, u8, usize)> {
    let (raw, next) = decode_varint(buf, offset)?;
    let (field_number, wire_type) = unpack_tag(raw);
    if wire_type == WireType::EndGroup.as_u8() {
        return Err(CodecError::UnexpectedEndGroup);
    }
    match u32::try_from(field_number) {
        Ok(n) if n != 0 && n <= MAX_FIELD_NUMBER => Ok((n, wire_type, next)),
        _ => Err(CodecError::IllegalTag {
            field_number,
            wire_type,
        }),
    }
}
