//! Discriminator -> constructor table used when reloading serialized records.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::base::{Attributes, BaseModel, CLASS_KEY};
use crate::entity::{Entity, SharedModel};
use crate::errors::ModelError;
use crate::state::State;
use crate::user::User;

pub type Constructor = fn(&Attributes) -> Result<SharedModel, ModelError>;

fn construct<E: Entity>(dict: &Attributes) -> Result<SharedModel, ModelError> {
    let entity = E::from_dict(dict)?;
    Ok(entity.into_shared())
}

#[derive(Clone, Default)]
pub struct ClassRegistry {
    constructors: BTreeMap<&'static str, Constructor>,
}

impl ClassRegistry {
    /// Empty registry; every lookup fails until classes are registered.
    pub fn new() -> Self { Self::default() }

    /// Registry with every entity shipped by this crate.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register::<BaseModel>().register::<State>().register::<User>();
        registry
    }

    pub fn register<E: Entity>(&mut self) -> &mut Self {
        self.constructors.insert(E::CLASS_NAME, construct::<E>);
        self
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.constructors.contains_key(class_name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Rehydrate `dict` as an instance of `class_name`.
    pub fn construct(&self, class_name: &str, dict: &Attributes) -> Result<SharedModel, ModelError> {
        let constructor = self
            .constructors
            .get(class_name)
            .ok_or_else(|| ModelError::UnknownClass(class_name.to_string()))?;
        constructor(dict)
    }

    /// Rehydrate a record, picking the type from its `__class__` entry.
    pub fn rehydrate(&self, dict: &Attributes) -> Result<SharedModel, ModelError> {
        match dict.get(CLASS_KEY) {
            None | Some(Value::Null) => Err(ModelError::MissingClass),
            Some(Value::String(class_name)) => self.construct(class_name, dict),
            Some(other) => Err(ModelError::type_error(format!("`{CLASS_KEY}` must be a string, got {other}"))),
        }
    }
}

impl fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.constructors.keys()).finish()
    }
}
