//! Read access to the seeded collections
//!
//! Both query shapes read the whole collection: it is small and bounded, and
//! the store offers no filtering, paging or sorting.

use crate::error::Result;
use crate::model::{FakeNewsArticle, SentimentResult, StoredRecord};
use crate::picker::{IndexPicker, ThreadRngPicker};
use crate::store::{from_document, DocumentStore};
use std::sync::Arc;
use tracing::debug;

/// Full-collection and random-record reads
pub struct QueryService {
    store: Arc<dyn DocumentStore>,
    picker: Arc<dyn IndexPicker>,
}

impl QueryService {
    /// Query service choosing random records from the thread-local generator
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_picker(store, Arc::new(ThreadRngPicker))
    }

    pub fn with_picker(store: Arc<dyn DocumentStore>, picker: Arc<dyn IndexPicker>) -> Self {
        Self { store, picker }
    }

    /// Every record of kind `R`, in store iteration order
    pub async fn list_all<R: StoredRecord>(&self) -> Result<Vec<R>> {
        let documents = self.store.read_all(R::COLLECTION).await?;
        debug!("Read {} documents from {}", documents.len(), R::COLLECTION);
        documents.into_iter().map(from_document).collect()
    }

    /// One record of kind `R` chosen uniformly, or `None` if the collection is empty
    pub async fn get_random<R: StoredRecord>(&self) -> Result<Option<R>> {
        let mut records = self.list_all::<R>().await?;
        if records.is_empty() {
            return Ok(None);
        }
        // Out-of-range picks from a custom picker wrap around
        let index = self.picker.pick(records.len()) % records.len();
        Ok(Some(records.swap_remove(index)))
    }

    pub async fn list_sentiment_results(&self) -> Result<Vec<SentimentResult>> {
        self.list_all().await
    }

    pub async fn list_fake_news_articles(&self) -> Result<Vec<FakeNewsArticle>> {
        self.list_all().await
    }

    pub async fn get_random_sentiment_result(&self) -> Result<Option<SentimentResult>> {
        self.get_random().await
    }

    pub async fn get_random_fake_news_article(&self) -> Result<Option<FakeNewsArticle>> {
        self.get_random().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use crate::model::fixtures::{articles, sentiments};
    use crate::picker::{FnPicker, SeededPicker};
    use crate::seed::{SeedData, SeedService};
    use crate::store::testing::UnreachableStore;
    use crate::store::{Collection, DocumentKey};
    use std::collections::HashSet;

    async fn seeded_store() -> Arc<MemoryStore> {
        let store = Arc::new(MemoryStore::new());
        SeedService::new(
            store.clone(),
            SeedData {
                sentiment_results: sentiments(),
                fake_news_articles: articles(),
            },
        )
        .ensure_seeded()
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn test_empty_collection_reads() {
        let query = QueryService::new(Arc::new(MemoryStore::new()));
        assert!(query.list_sentiment_results().await.unwrap().is_empty());
        assert!(query.get_random_sentiment_result().await.unwrap().is_none());
        assert!(query.get_random_fake_news_article().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_matches_dataset() {
        let query = QueryService::new(seeded_store().await);
        let mut listed = query.list_fake_news_articles().await.unwrap();
        listed.sort_by_key(|a| a.id);
        assert_eq!(listed, articles());
    }

    #[tokio::test]
    async fn test_random_uses_injected_picker() {
        let store = seeded_store().await;
        let first = QueryService::with_picker(store.clone(), Arc::new(FnPicker(|_| 0)));
        let last = QueryService::with_picker(store, Arc::new(FnPicker(|bound: usize| bound - 1)));

        assert_eq!(first.get_random_sentiment_result().await.unwrap().unwrap().id, 1);
        assert_eq!(last.get_random_sentiment_result().await.unwrap().unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_random_reaches_every_record() {
        let query = QueryService::with_picker(seeded_store().await, Arc::new(SeededPicker::new(7)));
        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(query.get_random_sentiment_result().await.unwrap().unwrap().id);
        }
        assert_eq!(seen, HashSet::from([1, 2, 3]));
    }

    #[tokio::test]
    async fn test_out_of_range_pick_wraps() {
        let query = QueryService::with_picker(seeded_store().await, Arc::new(FnPicker(|_| 4)));
        assert_eq!(query.get_random_fake_news_article().await.unwrap().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_unreachable_store_propagates() {
        let query = QueryService::new(Arc::new(UnreachableStore));
        assert!(query.list_sentiment_results().await.unwrap_err().is_connectivity());
        assert!(query
            .get_random_fake_news_article()
            .await
            .unwrap_err()
            .is_connectivity());
    }

    #[tokio::test]
    async fn test_malformed_document_is_decode_error() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert(
                Collection::SentimentResults,
                DocumentKey::from_id(1),
                serde_json::json!({"id": 1, "overall": "ecstatic"}),
            )
            .await
            .unwrap();
        let err = QueryService::new(store)
            .list_sentiment_results()
            .await
            .unwrap_err();
        assert!(!err.is_connectivity());
    }
}
