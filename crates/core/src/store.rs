//! Document store façade
//!
//! The services only ever need three things from a store: how many documents
//! a collection holds, every document in it, and a conditional insert.
//! Anything that can offer those per named collection is a valid backend.

use crate::error::{Result, StoreError};
use crate::model::StoredRecord;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Opaque stored document
pub type Document = Value;

/// Named collections known to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Collection {
    SentimentResults,
    FakeNewsArticles,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::SentimentResults, Collection::FakeNewsArticles];

    /// Store-level collection name
    pub fn name(&self) -> &'static str {
        match self {
            Collection::SentimentResults => "sentimentResults",
            Collection::FakeNewsArticles => "fakeNewsArticles",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Document identifier within a collection.
///
/// Derived from the record id so that two writers offering the same record
/// target the same key. Encoded as 8 big-endian bytes with the sign bit
/// flipped, which keeps byte order equal to numeric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentKey([u8; 8]);

impl DocumentKey {
    pub fn from_id(id: i64) -> Self {
        Self(((id as u64) ^ (1 << 63)).to_be_bytes())
    }

    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    pub fn id(&self) -> i64 {
        (u64::from_be_bytes(self.0) ^ (1 << 63)) as i64
    }

    pub fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

/// Result of a conditional insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The document was written
    Inserted,
    /// A document already held the key; nothing was written
    AlreadyPresent,
}

/// Collection-scoped access to a document database.
///
/// Every call is one round trip; callers await each before issuing the next.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Number of documents in `collection` (0 for a collection never written)
    async fn count(&self, collection: Collection) -> Result<usize>;

    /// Every document in `collection`, in store iteration order
    async fn read_all(&self, collection: Collection) -> Result<Vec<Document>>;

    /// Insert `document` under `key` unless the key is already taken
    async fn insert(
        &self,
        collection: Collection,
        key: DocumentKey,
        document: Document,
    ) -> Result<InsertOutcome>;

    /// Push buffered writes to durable storage
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Short backend label for logs
    fn backend(&self) -> &'static str;
}

/// Encode a typed record as a stored document
pub fn to_document<R: StoredRecord>(record: &R) -> Result<Document> {
    serde_json::to_value(record).map_err(|source| StoreError::Encode {
        collection: R::COLLECTION,
        source,
    })
}

/// Decode a stored document into a typed record
pub fn from_document<R: StoredRecord>(document: Document) -> Result<R> {
    serde_json::from_value(document).map_err(|source| StoreError::Decode {
        collection: R::COLLECTION,
        source,
    })
}

/// Store doubles shared by the service tests
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::memory_store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A store whose every call fails as if the network were down
    pub struct UnreachableStore;

    #[async_trait]
    impl DocumentStore for UnreachableStore {
        async fn count(&self, _collection: Collection) -> Result<usize> {
            Err(StoreError::Connectivity("connection refused".to_string()))
        }

        async fn read_all(&self, _collection: Collection) -> Result<Vec<Document>> {
            Err(StoreError::Connectivity("connection refused".to_string()))
        }

        async fn insert(
            &self,
            _collection: Collection,
            _key: DocumentKey,
            _document: Document,
        ) -> Result<InsertOutcome> {
            Err(StoreError::Connectivity("connection refused".to_string()))
        }

        fn backend(&self) -> &'static str {
            "unreachable"
        }
    }

    /// Wraps a memory store, rejecting inserts after `allowed` have succeeded
    /// and counting every insert attempt.
    pub struct FlakyStore {
        pub inner: MemoryStore,
        allowed: usize,
        pub attempts: AtomicUsize,
        failing: Option<Collection>,
    }

    impl FlakyStore {
        pub fn new(allowed: usize) -> Self {
            Self {
                inner: MemoryStore::new(),
                allowed,
                attempts: AtomicUsize::new(0),
                failing: None,
            }
        }

        /// Only inserts into `collection` are limited
        pub fn failing_only(mut self, collection: Collection) -> Self {
            self.failing = Some(collection);
            self
        }

        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DocumentStore for FlakyStore {
        async fn count(&self, collection: Collection) -> Result<usize> {
            self.inner.count(collection).await
        }

        async fn read_all(&self, collection: Collection) -> Result<Vec<Document>> {
            self.inner.read_all(collection).await
        }

        async fn insert(
            &self,
            collection: Collection,
            key: DocumentKey,
            document: Document,
        ) -> Result<InsertOutcome> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            let limited = self.failing.map_or(true, |c| c == collection);
            if limited && attempt >= self.allowed {
                return Err(StoreError::Write {
                    collection,
                    reason: "quota exceeded".to_string(),
                });
            }
            self.inner.insert(collection, key, document).await
        }

        fn backend(&self) -> &'static str {
            "flaky"
        }
    }
}
