use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;

use super::{Attributes, ObjectStore, StorageError, StorageResult};

/// Store operation, used to target injected failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    List,
    Get,
    Put,
    Attributes,
    ReplaceAttributes,
    Delete,
}

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    attributes: Attributes,
}

/// In-memory backend.
///
/// Cloning shares the underlying map. [`MemoryStore::fail`] makes a given operation on a
/// given key report `Unavailable` until [`MemoryStore::heal`] is called, which is how
/// outages are simulated in tests. For `List` the key is the prefix.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<RwLock<BTreeMap<String, StoredObject>>>,
    failures: Arc<RwLock<HashSet<(StoreOp, String)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: StoreOp, key: impl Into<String>) {
        if let Ok(mut failures) = self.failures.write() {
            failures.insert((op, key.into()));
        }
    }

    pub fn heal(&self) {
        if let Ok(mut failures) = self.failures.write() {
            failures.clear();
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .read()
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false)
    }

    fn check(&self, op: StoreOp, key: &str) -> StorageResult<()> {
        let failures = self.failures.read().map_err(|_| poisoned())?;
        if failures.contains(&(op, key.to_string())) {
            return Err(StorageError::Unavailable(format!(
                "injected {op:?} failure for {key}"
            )));
        }
        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".to_string())
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        self.check(StoreOp::List, prefix)?;
        let objects = self.objects.read().map_err(|_| poisoned())?;
        Ok(objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.check(StoreOp::Get, key)?;
        let objects = self.objects.read().map_err(|_| poisoned())?;
        objects
            .get(key)
            .map(|object| object.data.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn put(&self, key: &str, data: Bytes, attributes: Option<Attributes>) -> StorageResult<()> {
        self.check(StoreOp::Put, key)?;
        self.objects.write().map_err(|_| poisoned())?.insert(
            key.to_string(),
            StoredObject {
                data,
                attributes: attributes.unwrap_or_default(),
            },
        );
        Ok(())
    }

    async fn attributes(&self, key: &str) -> StorageResult<Attributes> {
        self.check(StoreOp::Attributes, key)?;
        let objects = self.objects.read().map_err(|_| poisoned())?;
        objects
            .get(key)
            .map(|object| object.attributes.clone())
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn replace_attributes(&self, key: &str, attributes: Attributes) -> StorageResult<()> {
        self.check(StoreOp::ReplaceAttributes, key)?;
        let mut objects = self.objects.write().map_err(|_| poisoned())?;
        let object = objects
            .get_mut(key)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        object.attributes = attributes;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.check(StoreOp::Delete, key)?;
        self.objects.write().map_err(|_| poisoned())?.remove(key);
        Ok(())
    }
}
