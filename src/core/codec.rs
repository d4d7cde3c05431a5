//! # Delimited Stream Codec
//!
//! Tokio codec carrying a stream of whole messages, each prefixed by its
//! varint-encoded length:
//!
//! ```text
//! [Length varint] [Message(N)] [Length varint] [Message(N)] ...
//! ```
//!
//! The message bytes themselves are the plain wire encoding; the prefix only
//! tells the reader where one message ends. Lengths are checked against the
//! configured maximum before any body bytes are buffered.

use crate::config::{FramingConfig, MAX_FRAME_SIZE};
use crate::core::varint::{decode_varint, put_varint, varint_len};
use crate::error::{CodecError, Result};
use crate::protocol::message::WireMessage;
use bytes::{Buf, BytesMut};
use std::marker::PhantomData;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{trace, warn};

/// Length-delimited framing for messages of type `M`
#[derive(Debug)]
pub struct DelimitedCodec<M> {
    max_frame_size: usize,
    _message: PhantomData<fn() -> M>,
}

impl<M> DelimitedCodec<M> {
    /// Create a codec with the default frame limit
    pub fn new() -> Self {
        Self::with_max_frame_size(MAX_FRAME_SIZE)
    }

    /// Create a codec rejecting frames larger than `max_frame_size` bytes
    pub fn with_max_frame_size(max_frame_size: usize) -> Self {
        Self {
            max_frame_size,
            _message: PhantomData,
        }
    }

    /// Create a codec from framing configuration
    pub fn from_config(config: &FramingConfig) -> Self {
        Self::with_max_frame_size(config.max_frame_size)
    }

    /// Largest accepted frame body in bytes
    pub fn max_frame_size(&self) -> usize {
        self.max_frame_size
    }
}

impl<M> Default for DelimitedCodec<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for DelimitedCodec<M> {
    fn clone(&self) -> Self {
        Self::with_max_frame_size(self.max_frame_size)
    }
}

impl<M: WireMessage + Default> Decoder for DelimitedCodec<M> {
    type Item = M;
    type Error = CodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<M>> {
        if src.is_empty() {
            return Ok(None);
        }

        let (len, header) = match decode_varint(src, 0) {
            Ok(prefix) => prefix,
            // Prefix still arriving
            Err(CodecError::UnexpectedEof) => return Ok(None),
            Err(e) => return Err(e),
        };
        let len = usize::try_from(len).map_err(|_| CodecError::InvalidLength)?;
        if len > self.max_frame_size {
            warn!(len, max = self.max_frame_size, "rejecting oversized frame");
            return Err(CodecError::FrameTooLarge(len));
        }

        let total = header + len;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        src.advance(header);
        let body = src.split_to(len);
        trace!(len, "decoding frame");
        M::decode(&body).map(Some)
    }
}

impl<M: WireMessage> Encoder<M> for DelimitedCodec<M> {
    type Error = CodecError;

    fn encode(&mut self, item: M, dst: &mut BytesMut) -> Result<()> {
        let len = item.encoded_len();
        if len > self.max_frame_size {
            return Err(CodecError::FrameTooLarge(len));
        }

        // A failed frame must leave `dst` exactly as it was, prefix included
        let mark = dst.len();
        dst.reserve(varint_len(len as u64) + len);
        put_varint(dst, len as u64);
        let start = dst.len();
        dst.resize(start + len, 0);
        let written = match item.marshal_to_sized_buffer(&mut dst[start..]) {
            Ok(n) => n,
            Err(e) => {
                dst.truncate(mark);
                return Err(e);
            }
        };
        if written != len {
            dst.truncate(mark);
            return Err(CodecError::SizeMismatch {
                expected: len,
                written,
            });
        }
        trace!(len, "encoded frame");
        Ok(())
    }
}
