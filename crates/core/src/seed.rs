//! Seed-and-sync: populate each collection from the shipped datasets once
//!
//! Each collection is checked and seeded on its own. Writes are conditional
//! inserts keyed by record id, so concurrent first loads never duplicate a
//! record, and seeding twice writes nothing the second time.

use crate::error::{Result, StoreError};
use crate::model::{FakeNewsArticle, SentimentResult, StoredRecord};
use crate::store::{to_document, Collection, DocumentKey, DocumentStore, InsertOutcome};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Records to seed, in dataset order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub sentiment_results: Vec<SentimentResult>,
    pub fake_news_articles: Vec<FakeNewsArticle>,
}

/// When to offer dataset records to a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeedPolicy {
    /// Seed only collections that are empty; populated ones are left alone
    #[default]
    IfEmpty,
    /// Offer every record regardless, filling in any that are missing
    Reconcile,
}

/// What seeding did to one collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollectionSeed {
    /// Documents present before seeding
    pub existing: usize,
    /// Records written by this call
    pub written: usize,
    /// Records whose key was already taken when offered
    pub already_present: usize,
    /// Collection was populated and the policy skipped it
    pub skipped: bool,
}

/// Outcome of `SeedService::ensure_seeded`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub sentiment_results: CollectionSeed,
    pub fake_news_articles: CollectionSeed,
}

impl SeedReport {
    /// Total records written across collections
    pub fn written(&self) -> usize {
        self.sentiment_results.written + self.fake_news_articles.written
    }
}

/// Receives per-record seeding progress
pub trait SeedObserver: Send + Sync {
    fn on_start(&self, _collection: Collection, _total: usize) {}
    fn on_record(&self, _collection: Collection, _done: usize) {}
    fn on_finish(&self, _collection: Collection, _seed: &CollectionSeed) {}
}

struct NoopObserver;

impl SeedObserver for NoopObserver {}

/// Ensures the store holds the dataset records
pub struct SeedService {
    store: Arc<dyn DocumentStore>,
    data: SeedData,
    policy: SeedPolicy,
    observer: Arc<dyn SeedObserver>,
}

impl SeedService {
    pub fn new(store: Arc<dyn DocumentStore>, data: SeedData) -> Self {
        Self {
            store,
            data,
            policy: SeedPolicy::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_policy(mut self, policy: SeedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn SeedObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Seed both collections.
    ///
    /// Both collections are always attempted. If either fails, the first
    /// error is returned once the other has been tried.
    pub async fn ensure_seeded(&self) -> Result<SeedReport> {
        let sentiment_results = self
            .seed_collection(&self.data.sentiment_results)
            .await
            .map_err(|e| log_failure(Collection::SentimentResults, e));
        let fake_news_articles = self
            .seed_collection(&self.data.fake_news_articles)
            .await
            .map_err(|e| log_failure(Collection::FakeNewsArticles, e));

        let report = SeedReport {
            sentiment_results: sentiment_results?,
            fake_news_articles: fake_news_articles?,
        };
        info!("Seeding complete: {} records written", report.written());
        Ok(report)
    }

    /// Seed, logging any failure instead of returning it.
    ///
    /// Entry point for readers: a seeding outage must not stop the read path,
    /// so callers proceed to query whatever the result.
    pub async fn ensure_seeded_or_log(&self) -> Option<SeedReport> {
        match self.ensure_seeded().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(
                    "Seeding {} store failed, continuing with existing data: {}",
                    self.store.backend(),
                    e
                );
                None
            }
        }
    }

    async fn seed_collection<R: StoredRecord>(&self, records: &[R]) -> Result<CollectionSeed> {
        let collection = R::COLLECTION;
        let existing = self.store.count(collection).await?;
        let mut seed = CollectionSeed {
            existing,
            ..Default::default()
        };

        if existing > 0 && self.policy == SeedPolicy::IfEmpty {
            info!("{} already holds {} documents, not seeding", collection, existing);
            seed.skipped = true;
            self.observer.on_finish(collection, &seed);
            return Ok(seed);
        }

        info!(
            "Seeding {} with {} records ({} present)",
            collection,
            records.len(),
            existing
        );
        self.observer.on_start(collection, records.len());

        for (done, record) in records.iter().enumerate() {
            let document = to_document(record)?;
            let key = DocumentKey::from_id(record.id());
            match self.store.insert(collection, key, document).await? {
                InsertOutcome::Inserted => seed.written += 1,
                InsertOutcome::AlreadyPresent => seed.already_present += 1,
            }
            self.observer.on_record(collection, done + 1);
        }

        info!(
            "{}: {} written, {} already present",
            collection, seed.written, seed.already_present
        );
        self.observer.on_finish(collection, &seed);
        Ok(seed)
    }
}

fn log_failure(collection: Collection, e: StoreError) -> StoreError {
    warn!("Seeding {} failed: {}", collection, e);
    e
}
