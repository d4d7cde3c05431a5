//! # Core Wire Components
//!
//! Low-level primitives of the tag-length-value wire format.
//!
//! Everything a message codec needs to read and write fields lives here; the
//! message layer in [`crate::protocol`] only decides *which* fields to write.
//!
//! ## Components
//! - **Varint**: base-128 integers, zigzag, length-delimited payloads
//! - **Tag**: `(field number, wire type)` packing and validation
//! - **Skip**: advancing past a value of any wire type, groups included
//! - **Writer**: backward-filling writer for exactly sized buffers
//! - **Codec**: Tokio codec framing whole messages over byte streams
//!
//! ## Wire Format
//! ```text
//! [Tag varint] [Value] [Tag varint] [Value] ...
//! tag = field_number << 3 | wire_type
//! ```
//!
//! No header or length prefix wraps a message; a decoder consumes the entire
//! supplied buffer as one message.

pub mod codec;
pub mod skip;
pub mod tag;
pub mod varint;
pub mod writer;
