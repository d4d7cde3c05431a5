//! # Backward Writer
//!
//! Fills an exactly sized buffer from the end toward the start. Writing a
//! length-delimited value payload-first means its length is known by the time
//! the prefix is written, so nothing is measured twice and nothing shifts.
//!
//! Callers write each field as value first, then tag; read forward, the tag
//! precedes its value.

use crate::core::tag::{pack_tag, WireType};
use crate::core::varint::varint_len;
use crate::error::{CodecError, Result};

/// Cursor that writes into a byte slice back to front
#[derive(Debug)]
pub struct ReverseWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> ReverseWriter<'a> {
    /// Start writing at the end of `buf`
    pub fn new(buf: &'a mut [u8]) -> Self {
        let pos = buf.len();
        Self { buf, pos }
    }

    /// Bytes written so far
    #[inline]
    pub fn written(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Bytes still free in front of the cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.pos
    }

    #[inline]
    fn claim(&mut self, n: usize) -> Result<usize> {
        self.pos = self.pos.checked_sub(n).ok_or(CodecError::BufferTooSmall {
            needed: self.written() + n,
            available: self.buf.len(),
        })?;
        Ok(self.pos)
    }

    /// Prepend raw bytes
    #[inline]
    pub fn put_slice(&mut self, src: &[u8]) -> Result<()> {
        let start = self.claim(src.len())?;
        self.buf[start..start + src.len()].copy_from_slice(src);
        Ok(())
    }

    /// Prepend a single byte
    #[inline]
    pub fn put_u8(&mut self, byte: u8) -> Result<()> {
        let at = self.claim(1)?;
        self.buf[at] = byte;
        Ok(())
    }

    /// Prepend the varint encoding of `v`
    #[inline]
    pub fn put_varint(&mut self, mut v: u64) -> Result<()> {
        let mut at = self.claim(varint_len(v))?;
        while v >= 0x80 {
            self.buf[at] = (v as u8 & 0x7F) | 0x80;
            v >>= 7;
            at += 1;
        }
        self.buf[at] = v as u8;
        Ok(())
    }

    /// Prepend the tag for `field_number` with `wire_type`
    #[inline]
    pub fn put_tag(&mut self, field_number: u32, wire_type: WireType) -> Result<()> {
        self.put_varint(pack_tag(field_number, wire_type))
    }

    /// Prepend a length-delimited payload: bytes, then their length
    #[inline]
    pub fn put_length_delimited(&mut self, payload: &[u8]) -> Result<()> {
        self.put_slice(payload)?;
        self.put_varint(payload.len() as u64)
    }
}
