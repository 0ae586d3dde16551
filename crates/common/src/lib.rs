//! Pinchpoint Common Utilities
//!
//! Shared infrastructure for all Pinchpoint crates:
//! - Error types and result aliases
//! - Frame clock and loop pacing
//! - Tracing/logging initialization
//! - Configuration loading and startup validation

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
