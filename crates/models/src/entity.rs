use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::base::{Attributes, BaseModel};
use crate::errors::ModelError;
use crate::store::ObjectStore;

/// Live instance shared between its owner and the store it is registered with.
pub type Shared<T> = Rc<RefCell<T>>;

/// Type-erased handle as held by a store.
pub type SharedModel = Shared<dyn Model>;

/// Registry key for an object: `"<ClassName>.<id>"`.
pub fn storage_key(class_name: &str, id: &str) -> String {
    format!("{class_name}.{id}")
}

/// Object-safe view of a persisted entity, as held by a store.
pub trait Model: fmt::Debug {
    fn class_name(&self) -> &'static str;
    fn base(&self) -> &BaseModel;
    fn base_mut(&mut self) -> &mut BaseModel;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn key(&self) -> String {
        storage_key(self.class_name(), self.id())
    }

    /// Serialized copy of every attribute plus `__class__`.
    fn to_dict(&self) -> Attributes {
        self.base().to_dict_as(self.class_name())
    }
}

impl fmt::Display for dyn Model + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.base().fmt_repr(f, self.class_name())
    }
}

/// Concrete entity type with a fixed class discriminator.
pub trait Entity: Model + Sized + 'static {
    const CLASS_NAME: &'static str;

    fn from_base(base: BaseModel) -> Self;

    /// New identity, not registered anywhere.
    fn fresh() -> Self {
        Self::from_base(BaseModel::new())
    }

    /// New identity, registered with `store`. The store keeps the returned
    /// handle, so later changes made through it are seen by every save.
    fn create<S: ObjectStore + ?Sized>(store: &mut S) -> Shared<Self> {
        let entity = Self::fresh().into_shared();
        store.register(entity.clone());
        entity
    }

    /// Rehydrate from a serialized record. Never registers.
    fn from_dict(dict: &Attributes) -> Result<Self, ModelError> {
        BaseModel::from_dict(dict).map(Self::from_base)
    }

    fn into_shared(self) -> Shared<Self> {
        Rc::new(RefCell::new(self))
    }
}

/// `save()` for registered entities.
pub trait Persist {
    /// Refresh `updated_at`, (re)register this instance and write the whole
    /// store. Fails without touching anything if the instance is borrowed.
    fn save<S: ObjectStore + ?Sized>(&self, store: &mut S) -> Result<(), S::Error>;
}

impl<E: Entity> Persist for Shared<E> {
    fn save<S: ObjectStore + ?Sized>(&self, store: &mut S) -> Result<(), S::Error> {
        self.try_borrow_mut()
            .map_err(|_| ModelError::Borrowed(E::CLASS_NAME.to_string()))?
            .base_mut()
            .touch();
        let handle: SharedModel = self.clone();
        store.register(handle);
        store.save()
    }
}

impl Model for BaseModel {
    fn class_name(&self) -> &'static str {
        Self::CLASS_NAME
    }

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }
}

impl Entity for BaseModel {
    const CLASS_NAME: &'static str = "BaseModel";

    fn from_base(base: BaseModel) -> Self {
        base
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_repr(f, Self::CLASS_NAME)
    }
}
