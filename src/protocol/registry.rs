//! # Schema Registry
//!
//! Static descriptions of message types and an explicitly constructed table
//! mapping fully qualified names to them.
//!
//! There is no process-wide registration: whoever needs name lookups builds a
//! [`Registry`], owns it, and passes it where it is needed.
//!
//! ## Usage
//! ```rust
//! use protowire::protocol::registry::Registry;
//! use protowire::SizeMessage;
//!
//! let mut registry = Registry::new();
//! registry.register::<SizeMessage>();
//! assert!(registry.contains("sizeunderscore.SizeMessage"));
//! ```

use crate::core::tag::WireType;
use crate::error::{CodecError, Result};
use crate::protocol::message::WireMessage;
use crate::protocol::size_message::SizeMessage;
use std::collections::HashMap;

/// Scalar type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Signed 64-bit integer, plain varint
    Int64,
    /// Boolean, single-byte varint
    Bool,
    /// UTF-8 text, length-delimited
    String,
}

impl FieldKind {
    /// Wire type this kind is encoded with
    pub const fn wire_type(self) -> WireType {
        match self {
            FieldKind::Int64 | FieldKind::Bool => WireType::Varint,
            FieldKind::String => WireType::LengthDelimited,
        }
    }
}

/// Static description of one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field number on the wire
    pub number: u32,
    /// Name in the schema
    pub name: &'static str,
    /// Name in the JSON mapping
    pub json_name: &'static str,
    /// Scalar type
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Wire type the field must arrive with
    #[inline]
    pub const fn wire_type(&self) -> WireType {
        self.kind.wire_type()
    }

    /// Verify an encountered wire type against the schema.
    ///
    /// # Errors
    /// Returns `CodecError::WrongWireType` naming this field on mismatch
    #[inline]
    pub fn check_wire_type(&self, wire_type: u8) -> Result<()> {
        if wire_type == self.wire_type().as_u8() {
            Ok(())
        } else {
            Err(CodecError::WrongWireType {
                field: self.name,
                wire_type,
            })
        }
    }
}

/// Static description of a message type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    /// Fully qualified name, `package.Message`
    pub full_name: &'static str,
    /// Known fields in declaration order
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    /// Look up a known field by number
    pub fn field(&self, number: u32) -> Option<&'static FieldDescriptor> {
        let fields: &'static [FieldDescriptor] = self.fields;
        fields.iter().find(|f| f.number == number)
    }

    /// Look up a known field by schema name
    pub fn field_by_name(&self, name: &str) -> Option<&'static FieldDescriptor> {
        let fields: &'static [FieldDescriptor] = self.fields;
        fields.iter().find(|f| f.name == name)
    }

    /// Highest known field number, zero for a message without fields
    pub fn max_field_number(&self) -> u32 {
        self.fields.iter().map(|f| f.number).max().unwrap_or(0)
    }
}

/// Name-indexed table of message descriptors
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: HashMap<&'static str, &'static MessageDescriptor>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every message type this crate defines
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register::<SizeMessage>();
        registry
    }

    /// Add a message type, replacing any earlier entry with the same name
    pub fn register<M: WireMessage>(&mut self) -> &mut Self {
        let descriptor = M::descriptor();
        self.types.insert(descriptor.full_name, descriptor);
        self
    }

    /// Look up a message type by fully qualified name
    ///
    /// # Errors
    /// Returns `CodecError::UnknownMessageType` if nothing is registered under `name`
    pub fn get(&self, name: &str) -> Result<&'static MessageDescriptor> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| CodecError::UnknownMessageType(name.to_string()))
    }

    /// Whether a message type is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.types.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered message types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
