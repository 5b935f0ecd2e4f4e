//! Data layer for the MarketMood dashboard
//!
//! Seeds the canned sentiment and fake-news datasets into a document store
//! once, then serves full-collection and random-record reads from it. The
//! store handle is constructed by the caller and injected into both services.

pub mod error;
pub mod model;
pub mod store;
pub mod memory_store;
pub mod sled_store;
pub mod picker;
pub mod seed;
pub mod query;
pub mod dashboard;

pub use error::{Result, StoreError};
pub use memory_store::MemoryStore;
pub use model::{
    Emotion, Factor, FakeNewsArticle, Impact, InvalidRecord, Sentiment, SentimentResult,
    StoredRecord, Verdict,
};
pub use picker::{FnPicker, IndexPicker, SeededPicker, ThreadRngPicker};
pub use query::QueryService;
pub use seed::{CollectionSeed, SeedData, SeedObserver, SeedPolicy, SeedReport, SeedService};
pub use sled_store::{SledStore, SledStoreConfig};
pub use store::{Collection, Document, DocumentKey, DocumentStore, InsertOutcome};
