//! # Message Layer
//!
//! Typed messages on top of the core wire primitives.
//!
//! ## Components
//! - **WireMessage**: the size / marshal / unmarshal contract every message implements
//! - **SizeMessage**: optional `int64`, `bool` and `string` fields plus unknown bytes
//! - **Registry**: explicitly constructed table of message descriptors
//! - **Populate**: seeded random messages for round-trip testing
//!
//! Field dispatch is a compile-time `match` on field numbers; the descriptor
//! tables carry names and expected wire types, never behavior.

pub mod message;
pub mod populate;
pub mod registry;
pub mod size_message;
