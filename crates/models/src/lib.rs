//! Entity layer: identity, timestamps and (de)serialization of persisted objects.
//! - `BaseModel` carries the state shared by every entity.
//! - `ClassRegistry` maps `__class__` discriminators back to entity types.
//! - `ObjectStore` is the seam the storage engine implements.

pub mod errors;
pub mod base;
pub mod entity;
pub mod state;
pub mod user;
pub mod registry;
pub mod store;

pub use base::{Attributes, BaseModel, CLASS_KEY};
pub use entity::{storage_key, Entity, Model, Persist, Shared, SharedModel};
pub use errors::ModelError;
pub use registry::ClassRegistry;
pub use state::State;
pub use store::{ObjectStore, Objects};
pub use user::User;

#[cfg(test)]
mod tests;
