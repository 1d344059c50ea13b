//! Persistence seam between entities and the storage engine.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::base::Attributes;
use crate::entity::SharedModel;
use crate::errors::ModelError;
use crate::registry::ClassRegistry;

/// Registered objects keyed by `"<ClassName>.<id>"`.
pub type Objects = BTreeMap<String, SharedModel>;

/// Store that entities register with and save through.
/// The file-backed engine lives in the `service` crate.
pub trait ObjectStore {
    type Error: From<ModelError>;

    fn all(&self) -> &Objects;

    /// Register `obj` under its composite key, replacing any previous entry.
    ///
    /// # Panics
    ///
    /// If `obj` is mutably borrowed.
    fn register(&mut self, obj: SharedModel);

    /// Persist every registered object.
    fn save(&mut self) -> Result<(), Self::Error>;

    /// Merge previously persisted objects back into the registry.
    fn reload(&mut self) -> Result<(), Self::Error>;
}

/// Insert `obj` under its current key. An entry the same instance held under
/// an older key (its id was reassigned) is dropped.
pub fn insert(objects: &mut Objects, obj: SharedModel) -> String {
    let key = obj.borrow().key();
    objects.retain(|k, held| k == &key || !Rc::ptr_eq(held, &obj));
    objects.insert(key.clone(), obj);
    key
}

/// Re-key every entry from its object's current id.
pub fn rekey(objects: &mut Objects) -> Result<(), ModelError> {
    let mut current = Objects::new();
    for (key, obj) in objects.iter() {
        let obj_key = obj.try_borrow().map_err(|_| ModelError::Borrowed(key.clone()))?.key();
        current.insert(obj_key, Rc::clone(obj));
    }
    *objects = current;
    Ok(())
}

/// Serialize the current state of every object via `to_dict()`, keyed by
/// composite key.
pub fn snapshot(objects: &Objects) -> Result<Attributes, ModelError> {
    objects
        .iter()
        .map(|(key, obj)| {
            let obj = obj.try_borrow().map_err(|_| ModelError::Borrowed(key.clone()))?;
            Ok((key.clone(), Value::Object(obj.to_dict())))
        })
        .collect()
}

/// Rehydrate a snapshot. Fails on the first bad record; nothing is returned partially.
pub fn restore(classes: &ClassRegistry, snapshot: &Attributes) -> Result<Objects, ModelError> {
    let mut objects = Objects::new();
    for (key, entry) in snapshot {
        let dict = entry
            .as_object()
            .ok_or_else(|| ModelError::type_error(format!("entry `{key}` is not an object")))?;
        let obj = classes.rehydrate(dict)?;
        insert(&mut objects, obj);
    }
    Ok(objects)
}

/// In-memory store for tests and doc examples
pub mod memory {
    use super::*;

    /// Keeps the last saved snapshot in memory instead of a file.
    #[derive(Debug)]
    pub struct MemoryStore {
        objects: Objects,
        classes: ClassRegistry,
        saved: Option<Attributes>,
        pub saves: usize,
    }

    impl Default for MemoryStore {
        fn default() -> Self {
            Self { objects: Objects::new(), classes: ClassRegistry::with_defaults(), saved: None, saves: 0 }
        }
    }

    impl MemoryStore {
        pub fn saved(&self) -> Option<&Attributes> {
            self.saved.as_ref()
        }
    }

    impl ObjectStore for MemoryStore {
        type Error = ModelError;

        fn all(&self) -> &Objects {
            &self.objects
        }

        fn register(&mut self, obj: SharedModel) {
            insert(&mut self.objects, obj);
        }

        fn save(&mut self) -> Result<(), ModelError> {
            rekey(&mut self.objects)?;
            self.saved = Some(snapshot(&self.objects)?);
            self.saves += 1;
            Ok(())
        }

        fn reload(&mut self) -> Result<(), ModelError> {
            if let Some(saved) = &self.saved {
                let restored = restore(&self.classes, saved)?;
                self.objects.extend(restored);
            }
            Ok(())
        }
    }
}
