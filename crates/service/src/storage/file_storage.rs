use std::{
    fs, io,
    path::{Path, PathBuf},
};

use models::store::{insert, rekey, restore, snapshot};
use models::{storage_key, Attributes, ClassRegistry, ObjectStore, Objects, SharedModel};
use tracing::debug;

use crate::errors::ServiceError;

/// JSON file-backed object store.
///
/// Keeps a shared handle to every registered object under `"<ClassName>.<id>"`
/// and writes the current state of the whole registry to a single JSON object
/// on [`ObjectStore::save`]. Each value in the file is the object's `to_dict()`
/// output.
///
/// The file is overwritten in place and never locked. A crash mid-write, or a
/// second process saving to the same path, can leave it truncated or drop
/// the other writer's objects.
#[derive(Debug)]
pub struct FileStorage {
    objects: Objects,
    classes: ClassRegistry,
    file_path: PathBuf,
    pretty: bool,
}

impl FileStorage {
    /// Empty store bound to `path`. Nothing is read from disk.
    pub fn new<P: Into<PathBuf>>(path: P, classes: ClassRegistry) -> Self {
        Self { objects: Objects::new(), classes, file_path: path.into(), pretty: false }
    }

    /// Store bound to `path`, populated from the file if it exists.
    pub fn open<P: Into<PathBuf>>(path: P, classes: ClassRegistry) -> Result<Self, ServiceError> {
        let mut storage = Self::new(path, classes);
        storage.reload()?;
        Ok(storage)
    }

    /// Open the configured file with every shipped entity registered.
    pub fn from_config(cfg: &configs::StorageConfig) -> Result<Self, ServiceError> {
        let storage = Self::open(&cfg.file_path, ClassRegistry::with_defaults())?;
        Ok(storage.with_pretty(cfg.pretty))
    }

    /// Pretty-print the JSON written by `save`.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Look up an object by composite key.
    pub fn get(&self, key: &str) -> Option<SharedModel> {
        self.objects.get(key).cloned()
    }

    pub fn find(&self, class_name: &str, id: &str) -> Option<SharedModel> {
        self.get(&storage_key(class_name, id))
    }

    /// Drop an object from the registry; the file changes on the next save.
    pub fn remove(&mut self, key: &str) -> Option<SharedModel> {
        let removed = self.objects.remove(key);
        if removed.is_some() {
            debug!(%key, "object removed from registry");
        }
        removed
    }

    /// Objects of a single class, in key order.
    pub fn all_of<'a>(&'a self, class_name: &'a str) -> impl Iterator<Item = &'a SharedModel> + 'a {
        self.objects
            .iter()
            .filter(move |(key, _)| key.split_once('.').map(|(class, _)| class) == Some(class_name))
            .map(|(_, obj)| obj)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn encode(&self, snap: &Attributes) -> Result<Vec<u8>, serde_json::Error> {
        if self.pretty {
            serde_json::to_vec_pretty(snap)
        } else {
            serde_json::to_vec(snap)
        }
    }
}

impl ObjectStore for FileStorage {
    type Error = ServiceError;

    fn all(&self) -> &Objects {
        &self.objects
    }

    fn register(&mut self, obj: SharedModel) {
        let key = insert(&mut self.objects, obj);
        debug!(%key, "object registered");
    }

    fn save(&mut self) -> Result<(), ServiceError> {
        rekey(&mut self.objects)?;
        let snap = snapshot(&self.objects)?;
        let data = self.encode(&snap).map_err(|e| ServiceError::json(&self.file_path, e))?;
        common::env::ensure_parent_dir(&self.file_path).map_err(|e| ServiceError::io(&self.file_path, e))?;
        fs::write(&self.file_path, data).map_err(|e| ServiceError::io(&self.file_path, e))?;
        debug!(path = %self.file_path.display(), count = snap.len(), "storage saved");
        Ok(())
    }

    fn reload(&mut self) -> Result<(), ServiceError> {
        let bytes = match fs::read(&self.file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "storage file not found; registry unchanged");
                return Ok(());
            }
            Err(e) => return Err(ServiceError::io(&self.file_path, e)),
        };
        let snap: Attributes = serde_json::from_slice(&bytes).map_err(|e| ServiceError::json(&self.file_path, e))?;
        let restored = restore(&self.classes, &snap)?;
        debug!(path = %self.file_path.display(), count = restored.len(), "storage reloaded");
        self.objects.extend(restored);
        Ok(())
    }
}
