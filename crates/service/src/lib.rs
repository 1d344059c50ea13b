//! Service layer providing persistence on top of models.
//! - Implements `models::ObjectStore` with a JSON file backend.
//! - Reuses entity definitions and the class registry from the `models` crate.
//! - Provides clear error types for I/O, parse and model failures.

/// Target prefix of this crate's tracing events.
pub const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

pub mod errors;
pub mod storage;

pub use errors::ServiceError;
pub use storage::FileStorage;
