//! # SizeMessage
//!
//! Message with three optional scalar fields whose schema names collide with
//! the codec's own vocabulary (`size`, `Equal`, `String`):
//!
//! ```text
//! message SizeMessage {
//!     optional int64  size   = 1;
//!     optional bool   Equal  = 2;
//!     optional string String = 3;
//! }
//! ```
//!
//! Presence is explicit: an absent field contributes no bytes, a present one
//! contributes its tag and value even when the value is the type default.
//! Fields this schema does not know are kept byte-for-byte in
//! `unknown_fields` and written back after the known ones.

use crate::core::tag::{read_tag, tag_len};
use crate::core::varint::{decode_length_delimited, decode_varint, varint_len};
use crate::core::skip::skip_field;
use crate::core::writer::ReverseWriter;
use crate::error::{CodecError, Result};
use crate::protocol::message::WireMessage;
use crate::protocol::registry::{FieldDescriptor, FieldKind, MessageDescriptor};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, trace};

/// Field number of `size`
pub const SIZE_FIELD_NUMBER: u32 = 1;
/// Field number of `Equal`
pub const EQUAL_FIELD_NUMBER: u32 = 2;
/// Field number of `String`
pub const STRING_FIELD_NUMBER: u32 = 3;

const SIZE_FIELD: FieldDescriptor = FieldDescriptor {
    number: SIZE_FIELD_NUMBER,
    name: "size",
    json_name: "size",
    kind: FieldKind::Int64,
};

const EQUAL_FIELD: FieldDescriptor = FieldDescriptor {
    number: EQUAL_FIELD_NUMBER,
    name: "Equal",
    json_name: "Equal",
    kind: FieldKind::Bool,
};

const STRING_FIELD: FieldDescriptor = FieldDescriptor {
    number: STRING_FIELD_NUMBER,
    name: "String",
    json_name: "String",
    kind: FieldKind::String,
};

static FIELDS: [FieldDescriptor; 3] = [SIZE_FIELD, EQUAL_FIELD, STRING_FIELD];

/// Descriptor of [`SizeMessage`]
pub static DESCRIPTOR: MessageDescriptor = MessageDescriptor {
    full_name: "sizeunderscore.SizeMessage",
    fields: &FIELDS,
};

/// Optional `int64`, `bool` and `string` fields plus preserved unknown bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeMessage {
    /// Field 1, `size`
    #[serde(rename = "size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,

    /// Field 2, `Equal`
    #[serde(rename = "Equal", default, skip_serializing_if = "Option::is_none")]
    pub equal: Option<bool>,

    /// Field 3, `String`
    #[serde(rename = "String", default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,

    /// Raw tag-value pairs of unrecognized fields, in encounter order
    #[serde(skip)]
    pub unknown_fields: Vec<u8>,
}

impl SizeMessage {
    /// Create a message with every field absent
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `size`, or 0 when absent
    #[inline]
    pub fn size(&self) -> i64 {
        self.size.unwrap_or_default()
    }

    /// Value of `Equal`, or false when absent
    #[inline]
    pub fn equal(&self) -> bool {
        self.equal.unwrap_or_default()
    }

    /// Value of `String`, or "" when absent
    #[inline]
    pub fn string(&self) -> &str {
        self.string.as_deref().unwrap_or_default()
    }

    /// Mark `size` present with `value`
    pub fn set_size(&mut self, value: i64) -> &mut Self {
        self.size = Some(value);
        self
    }

    /// Mark `Equal` present with `value`
    pub fn set_equal(&mut self, value: bool) -> &mut Self {
        self.equal = Some(value);
        self
    }

    /// Mark `String` present with `value`
    pub fn set_string(&mut self, value: impl Into<String>) -> &mut Self {
        self.string = Some(value.into());
        self
    }

    /// Make `size` absent
    pub fn clear_size(&mut self) -> &mut Self {
        self.size = None;
        self
    }

    /// Make `Equal` absent
    pub fn clear_equal(&mut self) -> &mut Self {
        self.equal = None;
        self
    }

    /// Make `String` absent
    pub fn clear_string(&mut self) -> &mut Self {
        self.string = None;
        self
    }

    /// Preserved bytes of unrecognized fields
    #[inline]
    pub fn unknown_fields(&self) -> &[u8] {
        &self.unknown_fields
    }

    /// Drop preserved unknown bytes
    pub fn discard_unknown(&mut self) {
        self.unknown_fields.clear();
    }
}

impl WireMessage for SizeMessage {
    fn descriptor() -> &'static MessageDescriptor {
        &DESCRIPTOR
    }

    fn encoded_len(&self) -> usize {
        let mut n = 0;
        if let Some(v) = self.size {
            n += tag_len(SIZE_FIELD_NUMBER) + varint_len(v as u64);
        }
        if self.equal.is_some() {
            n += tag_len(EQUAL_FIELD_NUMBER) + 1;
        }
        if let Some(s) = &self.string {
            let l = s.len();
            n += tag_len(STRING_FIELD_NUMBER) + varint_len(l as u64) + l;
        }
        n + self.unknown_fields.len()
    }

    fn marshal_to_sized_buffer(&self, buf: &mut [u8]) -> Result<usize> {
        let mut w = ReverseWriter::new(buf);
        // Back to front: unknown bytes land last, known fields ascend before them.
        w.put_slice(&self.unknown_fields)?;
        if let Some(s) = &self.string {
            w.put_length_delimited(s.as_bytes())?;
            w.put_tag(STRING_FIELD_NUMBER, STRING_FIELD.wire_type())?;
        }
        if let Some(b) = self.equal {
            w.put_u8(u8::from(b))?;
            w.put_tag(EQUAL_FIELD_NUMBER, EQUAL_FIELD.wire_type())?;
        }
        if let Some(v) = self.size {
            w.put_varint(v as u64)?;
            w.put_tag(SIZE_FIELD_NUMBER, SIZE_FIELD.wire_type())?;
        }
        Ok(w.written())
    }

    fn unmarshal(&mut self, data: &[u8]) -> Result<()> {
        let mut staged = Self::default();
        staged.merge_fields(data).map_err(|e| {
            debug!(error = %e, len = data.len(), "SizeMessage unmarshal failed");
            e
        })?;
        self.commit(staged);
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SizeMessage {
    /// Fold a fully decoded message into `self`: present fields overwrite,
    /// unknown bytes append.
    fn commit(&mut self, staged: Self) {
        if let Some(v) = staged.size {
            self.size = Some(v);
        }
        if let Some(b) = staged.equal {
            self.equal = Some(b);
        }
        if let Some(s) = staged.string {
            self.string = Some(s);
        }
        self.unknown_fields.extend_from_slice(&staged.unknown_fields);
    }

    fn merge_fields(&mut self, data: &[u8]) -> Result<()> {
        let mut offset = 0;
        while offset < data.len() {
            let start = offset;
            let (field_number, wire_type, next) = read_tag(data, offset)?;
            offset = next;
            match field_number {
                SIZE_FIELD_NUMBER => {
                    SIZE_FIELD.check_wire_type(wire_type)?;
                    let (v, next) = decode_varint(data, offset)?;
                    self.size = Some(v as i64);
                    offset = next;
                }
                EQUAL_FIELD_NUMBER => {
                    EQUAL_FIELD.check_wire_type(wire_type)?;
                    let (v, next) = decode_varint(data, offset)?;
                    self.equal = Some(v != 0);
                    offset = next;
                }
                STRING_FIELD_NUMBER => {
                    STRING_FIELD.check_wire_type(wire_type)?;
                    let (payload, next) = decode_length_delimited(data, offset)?;
                    let text = std::str::from_utf8(payload).map_err(|_| CodecError::InvalidUtf8)?;
                    self.string = Some(text.to_owned());
                    offset = next;
                }
                _ => {
                    let end = skip_field(data, start)?;
                    trace!(
                        field_number,
                        wire_type,
                        bytes = end - start,
                        "preserving unknown field"
                    );
                    self.unknown_fields.extend_from_slice(&data[start..end]);
                    offset = end;
                }
            }
        }
        Ok(())
    }
}

/// Compact text form: present fields in field-number order, space separated.
impl fmt::Display for SizeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(v) = self.size {
            write!(f, "{sep}{}:{v}", SIZE_FIELD.name)?;
            sep = " ";
        }
        if let Some(b) = self.equal {
            write!(f, "{sep}{}:{b}", EQUAL_FIELD.name)?;
            sep = " ";
        }
        if let Some(s) = &self.string {
            write!(f, "{sep}{}:{s:?}", STRING_FIELD.name)?;
            sep = " ";
        }
        if !self.unknown_fields.is_empty() {
            write!(f, "{sep}/* {} unknown bytes */", self.unknown_fields.len())?;
        }
        Ok(())
    }
}
