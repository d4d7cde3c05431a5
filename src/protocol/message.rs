//! The contract between a message type and its callers.
//!
//! Implementors provide the three schema-specific pieces (size, backward
//! marshal, unmarshal); everything else is derived here so every message
//! marshals with exactly one allocation of exactly the right size.

use crate::error::{CodecError, Result};
use crate::protocol::registry::MessageDescriptor;

/// A message with a tag-length-value wire encoding
pub trait WireMessage: Sized {
    /// Static schema description of this message type
    fn descriptor() -> &'static MessageDescriptor;

    /// Exact number of bytes [`WireMessage::marshal`] will produce.
    ///
    /// Always recomputed; nothing is cached on the message.
    fn encoded_len(&self) -> usize;

    /// Write the message into the tail of `buf`, back to front.
    ///
    /// Returns the number of bytes written, which occupy
    /// `buf[buf.len() - n..]`.
    ///
    /// # Errors
    /// Returns `CodecError::BufferTooSmall` if `buf` cannot hold the message
    fn marshal_to_sized_buffer(&self, buf: &mut [u8]) -> Result<usize>;

    /// Merge the fields encoded in `data` into `self`.
    ///
    /// Present fields overwrite, unrecognized fields are appended verbatim to
    /// the unknown bytes in the order they were encountered.
    ///
    /// Decoding is all-or-nothing: when an error is returned, `self` is
    /// left exactly as it was before the call.
    ///
    /// # Errors
    /// Any decoding error
    fn unmarshal(&mut self, data: &[u8]) -> Result<()>;

    /// Clear every field, known and unknown
    fn reset(&mut self);

    /// Serialize into a freshly allocated buffer of exactly `encoded_len` bytes
    ///
    /// # Errors
    /// Returns `CodecError::SizeMismatch` if the written length disagrees with
    /// the computed one, which indicates a bug in the message implementation
    fn marshal(&self) -> Result<Vec<u8>> {
        let size = self.encoded_len();
        let mut buf = vec![0u8; size];
        let written = self.marshal_to_sized_buffer(&mut buf)?;
        check_written(size, written)?;
        Ok(buf)
    }

    /// Serialize into the front of a caller-supplied buffer
    ///
    /// # Errors
    /// Returns `CodecError::BufferTooSmall` if `buf` is shorter than `encoded_len`
    fn marshal_to(&self, buf: &mut [u8]) -> Result<usize> {
        let size = self.encoded_len();
        if buf.len() < size {
            return Err(CodecError::BufferTooSmall {
                needed: size,
                available: buf.len(),
            });
        }
        let written = self.marshal_to_sized_buffer(&mut buf[..size])?;
        check_written(size, written)?;
        Ok(written)
    }

    /// Parse a complete message from `data`
    ///
    /// # Errors
    /// Any decoding error from [`WireMessage::unmarshal`]
    fn decode(data: &[u8]) -> Result<Self>
    where
        Self: Default,
    {
        let mut msg = Self::default();
        msg.unmarshal(data)?;
        Ok(msg)
    }
}

#[inline]
fn check_written(expected: usize, written: usize) -> Result<()> {
    debug_assert_eq!(expected, written, "encoded_len disagrees with bytes written");
    if expected != written {
        return Err(CodecError::SizeMismatch { expected, written });
    }
    Ok(())
}

/// Compare two possibly absent messages.
///
/// Two absent messages are equal; an absent message never equals a present one.
pub fn equal<M: PartialEq>(this: Option<&M>, that: Option<&M>) -> bool {
    match (this, that) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}
