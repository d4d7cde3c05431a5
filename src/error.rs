//! # Error Types
//!
//! Error handling for the wire codec.
//!
//! Decoding is all-or-nothing: the first malformed byte aborts the whole
//! unmarshal and the error is surfaced to the caller unchanged.
//!
//! ## Error Categories
//! - **Varint Errors**: overlong integers, truncated input
//! - **Framing Errors**: invalid lengths, illegal tags, stray end-group markers
//! - **Schema Errors**: a known field carrying the wrong wire type
//! - **Encoding Invariants**: computed size and written size diverging
//! - **Surface Errors**: configuration, stream framing, registry lookups
//!
//! ## Example Usage
//! ```rust
//! use protowire::error::{CodecError, Result};
//! use protowire::{SizeMessage, WireMessage};
//! use tracing::{error, info};
//!
//! fn decode(bytes: &[u8]) -> Result<SizeMessage> {
//!     SizeMessage::decode(bytes)
//! }
//!
//! match decode(&[0x08]) {
//!     Ok(msg) => info!(%msg, "decoded"),
//!     Err(CodecError::UnexpectedEof) => error!("message truncated"),
//!     Err(e) => error!(error = %e, "decode failed"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";

    /// Logging errors
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// CodecError is the primary error type for all codec operations
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("integer overflow: varint longer than 10 bytes")]
    IntegerOverflow,

    #[error("unexpected end of buffer")]
    UnexpectedEof,

    #[error("invalid length found during unmarshaling")]
    InvalidLength,

    #[error("illegal tag {field_number} (wire type {wire_type})")]
    IllegalTag { field_number: u64, wire_type: u8 },

    #[error("wrong wire type {wire_type} for field {field}")]
    WrongWireType { field: &'static str, wire_type: u8 },

    #[error("wire type end group for non-group")]
    UnexpectedEndGroup,

    #[error("illegal wire type {0}")]
    UnsupportedWireType(u8),

    #[error("text field is not valid UTF-8")]
    InvalidUtf8,

    #[error("marshal wrote {written} bytes but size computed {expected}")]
    SizeMismatch { expected: usize, written: usize },

    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("frame too large: {0} bytes")]
    FrameTooLarge(usize),

    #[error("unknown message type: {0}")]
    UnknownMessageType(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Type alias for Results using CodecError
pub type Result<T> = std::result::Result<T, CodecError>;
