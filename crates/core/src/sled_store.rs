//! Disk-backed document store on sled
//!
//! Each collection is a sled `Tree` named after the collection. Keys are
//! `DocumentKey` bytes and values are the document's JSON encoding. Inserts
//! use compare-and-swap against an absent key, so two processes seeding the
//! same database cannot write a record twice.

use crate::error::{Result, StoreError};
use crate::store::{Collection, Document, DocumentKey, DocumentStore, InsertOutcome};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for the sled store
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// Database directory. If `None`, a temporary directory is created and
    /// removed on `Drop`.
    pub db_path: Option<PathBuf>,
    /// sled page cache size in bytes
    pub cache_bytes: u64,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            // Datasets are tens of records
            cache_bytes: 16 * 1024 * 1024,
        }
    }
}

impl SledStoreConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(path.into()),
            ..Default::default()
        }
    }
}

/// Document store persisted in a sled database
pub struct SledStore {
    db: sled::Db,
    /// If we created a temp directory, store its path for cleanup on Drop
    temp_dir: Option<PathBuf>,
}

impl SledStore {
    /// Open (or create) the store described by `config`.
    pub fn open(config: SledStoreConfig) -> Result<Self> {
        let (path, temp_dir) = match config.db_path {
            Some(ref p) => (p.clone(), None),
            None => {
                let dir = Self::make_temp_path();
                (dir.clone(), Some(dir))
            }
        };

        let db = sled::Config::new()
            .path(&path)
            .cache_capacity(config.cache_bytes)
            .open()
            .map_err(|e| {
                StoreError::Connectivity(format!(
                    "Failed to open document store at {:?}: {}",
                    path, e
                ))
            })?;

        info!(
            "SledStore: path={:?}, recovered={}",
            config.db_path.as_deref().unwrap_or(Path::new("<temp>")),
            db.was_recovered(),
        );

        Ok(Self { db, temp_dir })
    }

    /// Open a store in a fresh temporary directory.
    pub fn temporary() -> Result<Self> {
        Self::open(SledStoreConfig::default())
    }

    fn tree(&self, collection: Collection) -> Result<sled::Tree> {
        self.db.open_tree(collection.name()).map_err(read_err)
    }

    fn make_temp_path() -> PathBuf {
        use std::time::{SystemTime, UNIX_EPOCH};
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("marketmood_store_{}_{}", std::process::id(), ts))
    }
}

#[async_trait]
impl DocumentStore for SledStore {
    async fn count(&self, collection: Collection) -> Result<usize> {
        Ok(self.tree(collection)?.len())
    }

    async fn read_all(&self, collection: Collection) -> Result<Vec<Document>> {
        let tree = self.tree(collection)?;
        let mut documents = Vec::with_capacity(tree.len());
        for entry in tree.iter() {
            let (_, bytes) = entry.map_err(read_err)?;
            let document = serde_json::from_slice(&bytes)
                .map_err(|source| StoreError::Decode { collection, source })?;
            documents.push(document);
        }
        Ok(documents)
    }

    async fn insert(
        &self,
        collection: Collection,
        key: DocumentKey,
        document: Document,
    ) -> Result<InsertOutcome> {
        let bytes = serde_json::to_vec(&document)
            .map_err(|source| StoreError::Encode { collection, source })?;
        let tree = self.tree(collection)?;
        let swapped = tree
            .compare_and_swap(key.as_bytes(), None as Option<&[u8]>, Some(bytes))
            .map_err(|e| StoreError::Write {
                collection,
                reason: e.to_string(),
            })?;
        match swapped {
            Ok(()) => Ok(InsertOutcome::Inserted),
            Err(_) => {
                debug!("{}: key {} already present", collection, key.id());
                Ok(InsertOutcome::AlreadyPresent)
            }
        }
    }

    async fn flush(&self) -> Result<()> {
        let bytes = self.db.flush_async().await.map_err(read_err)?;
        debug!("SledStore flushed {} bytes", bytes);
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sled"
    }
}

impl Drop for SledStore {
    fn drop(&mut self) {
        // Flush sled so it shuts down cleanly
        if let Err(e) = self.db.flush() {
            warn!("Failed to flush document store on drop: {}", e);
        }
        let Some(ref dir) = self.temp_dir else {
            return;
        };
        // Drop the sled Db before removing the directory
        if let Ok(placeholder) = sled::Config::new().temporary(true).open() {
            drop(std::mem::replace(&mut self.db, placeholder));
        }
        if let Err(e) = std::fs::remove_dir_all(dir) {
            debug!("Failed to remove temp document store {:?}: {}", dir, e);
        }
    }
}

fn read_err(e: sled::Error) -> StoreError {
    StoreError::Connectivity(format!("Document store error: {}", e))
}
