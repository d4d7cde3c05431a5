//! # Utility Modules
//!
//! Supporting utilities shared by the codec's outer surfaces.
//!
//! ## Components
//! - **Logging**: structured `tracing` subscriber setup

pub mod logging;
