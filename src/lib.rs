//! # protowire
//!
//! Tag-length-value wire codec for schema-described messages with explicit
//! field presence.
//!
//! A message is a flat sequence of `(tag, value)` pairs with no header and no
//! overall length prefix. Encoding computes the exact size first and fills a
//! single buffer back to front; decoding merges fields into an existing value
//! and keeps every unrecognized field byte-for-byte, so a message decoded and
//! re-encoded by an older reader loses nothing.
//!
//! ## Layers
//! - [`core`]: varints, tags, value skipping, the backward writer and the
//!   Tokio stream codec
//! - [`protocol`]: the [`WireMessage`] contract, [`SizeMessage`] and the
//!   descriptor [`Registry`]
//! - [`config`]: TOML / environment configuration for framing and logging
//! - [`utils`]: `tracing` subscriber setup
//!
//! ## Example
//! ```rust
//! use protowire::{SizeMessage, WireMessage};
//!
//! let mut msg = SizeMessage::new();
//! msg.set_size(5).set_equal(true).set_string("abc");
//!
//! let bytes = msg.marshal()?;
//! assert_eq!(bytes, [0x08, 0x05, 0x10, 0x01, 0x1A, 0x03, 0x61, 0x62, 0x63]);
//! assert_eq!(SizeMessage::decode(&bytes)?, msg);
//! # Ok::<(), protowire::CodecError>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod core;
pub mod error;
pub mod protocol;
pub mod utils;

pub use crate::core::codec::DelimitedCodec;
pub use crate::core::tag::WireType;
pub use error::{CodecError, Result};
pub use protocol::message::{equal, WireMessage};
pub use protocol::registry::Registry;
pub use protocol::size_message::SizeMessage;
