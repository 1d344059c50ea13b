//! Shared runtime helpers: tracing setup and filesystem checks.

/// Target prefix of this crate's tracing events.
pub const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

pub mod env;
pub mod utils;
