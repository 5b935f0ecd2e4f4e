//! In-process document store
//!
//! Collections live in ordered maps behind a single `RwLock`, so a
//! conditional insert is atomic with respect to every other caller.

use crate::error::{Result, StoreError};
use crate::store::{Collection, Document, DocumentKey, DocumentStore, InsertOutcome};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

type Collections = HashMap<Collection, BTreeMap<DocumentKey, Document>>;

/// Document store held entirely in memory; contents vanish on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>> {
        self.collections
            .read()
            .map_err(|_| StoreError::Connectivity("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>> {
        self.collections
            .write()
            .map_err(|_| StoreError::Connectivity("memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count(&self, collection: Collection) -> Result<usize> {
        Ok(self.read()?.get(&collection).map_or(0, BTreeMap::len))
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Document>> {
        Ok(self
            .read()?
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: Collection,
        key: DocumentKey,
        document: Document,
    ) -> Result<InsertOutcome> {
        let mut guard = self.write()?;
        let docs = guard.entry(collection).or_default();
        if docs.contains_key(&key) {
            debug!("{}: key {} already present", collection, key.id());
            return Ok(InsertOutcome::AlreadyPresent);
        }
        docs.insert(key, document);
        Ok(InsertOutcome::Inserted)
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
