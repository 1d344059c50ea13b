//! Storage engines for service layer
//!
//! Contains the JSON file-backed object store that entities register with
//! and save through.

pub mod file_storage;

pub use file_storage::FileStorage;
