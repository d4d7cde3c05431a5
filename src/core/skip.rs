//! # Skipping Values
//!
//! Advances a cursor past a value of any wire type without decoding it. This
//! is what lets a reader carry fields it does not understand: the skipped
//! range is copied verbatim into the message's unknown bytes.
//!
//! Groups are tracked with an explicit depth counter, so nesting depth is
//! bounded only by the input size and never by the call stack.

use crate::core::tag::{unpack_tag, WireType};
use crate::core::varint::{decode_varint, skip_varint};
use crate::error::{CodecError, Result};

/// Skip one complete field (tag and value) starting at `offset`.
///
/// Returns the offset just past the field. An end-group tag is a complete
/// field on its own and is consumed without a value.
///
/// # Errors
/// - varint errors while reading the tag
/// - any error from [`skip_value`]
pub fn skip_field(buf: &[u8], offset: usize) -> Result<usize> {
    let (raw, next) = decode_varint(buf, offset)?;
    let (_, wire_type) = unpack_tag(raw);
    skip_value(buf, next, wire_type)
}

/// Skip the value of an already-consumed tag carrying `wire_type`.
///
/// For `StartGroup` everything up to and including the matching `EndGroup`
/// tag is consumed; for `EndGroup` nothing is consumed.
///
/// # Errors
/// - `CodecError::UnsupportedWireType` for wire types 6 and 7
/// - `CodecError::InvalidLength` for a length-delimited value overrunning `buf`
/// - `CodecError::UnexpectedEof` for truncated fixed-width values or tags
/// - `CodecError::IntegerOverflow` for overlong varints
pub fn skip_value(buf: &[u8], mut offset: usize, mut wire_type: u8) -> Result<usize> {
    let mut depth = 0usize;
    loop {
        match WireType::try_from(wire_type)? {
            WireType::Varint => offset = skip_varint(buf, offset)?,
            WireType::Fixed64 => offset = advance(buf, offset, 8)?,
            WireType::Fixed32 => offset = advance(buf, offset, 4)?,
            WireType::LengthDelimited => {
                let (len, start) = decode_varint(buf, offset)?;
                let len = usize::try_from(len).map_err(|_| CodecError::InvalidLength)?;
                if len > buf.len() - start {
                    return Err(CodecError::InvalidLength);
                }
                offset = start + len;
            }
            WireType::StartGroup => depth += 1,
            WireType::EndGroup => depth = depth.saturating_sub(1),
        }
        if depth == 0 {
            return Ok(offset);
        }
        let (raw, next) = decode_varint(buf, offset)?;
        wire_type = unpack_tag(raw).1;
        offset = next;
    }
}

#[inline]
fn advance(buf: &[u8], offset: usize, width: usize) -> Result<usize> {
    let end = offset + width;
    if end > buf.len() {
        return Err(CodecError::UnexpectedEof);
    }
    Ok(end)
}
