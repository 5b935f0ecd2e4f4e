//! Dataset provider: the records each collection is seeded from
//!
//! The shipped datasets are JSON envelopes, `{"results": [...]}` for
//! sentiment and `{"articles": [...]}` for fake news. Replacement files may
//! use the same envelope, a bare JSON array, or one record per JSONL line.

use crate::jsonl::JsonlReader;
use crate::{Error, Result};
use marketmood_core::{FakeNewsArticle, SeedData, SentimentResult, StoredRecord};
use serde_json::Value;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const SENTIMENT_DATA: &str = include_str!("../data/sentimentData.json");
const FAKE_NEWS_DATA: &str = include_str!("../data/fakeNewsData.json");

/// A record kind that can be loaded from a dataset file
pub trait DatasetRecord: StoredRecord {
    /// Array field holding the records in an envelope document
    const ENVELOPE_FIELD: &'static str;
}

impl DatasetRecord for SentimentResult {
    const ENVELOPE_FIELD: &'static str = "results";
}

impl DatasetRecord for FakeNewsArticle {
    const ENVELOPE_FIELD: &'static str = "articles";
}

/// The sample datasets compiled into the binary
pub fn embedded() -> Result<SeedData> {
    Ok(SeedData {
        sentiment_results: parse_json(SENTIMENT_DATA)?,
        fake_news_articles: parse_json(FAKE_NEWS_DATA)?,
    })
}

/// Load datasets, falling back to the embedded data for any path not given
pub fn load(sentiment_path: Option<&Path>, fake_news_path: Option<&Path>) -> Result<SeedData> {
    let sentiment_results = match sentiment_path {
        Some(path) => load_records(path)?,
        None => parse_json(SENTIMENT_DATA)?,
    };
    let fake_news_articles = match fake_news_path {
        Some(path) => load_records(path)?,
        None => parse_json(FAKE_NEWS_DATA)?,
    };
    Ok(SeedData {
        sentiment_results,
        fake_news_articles,
    })
}

/// Load and validate one dataset file, choosing the parser by extension
pub fn load_records<R: DatasetRecord>(path: &Path) -> Result<Vec<R>> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let records = if name.ends_with(".jsonl") || name.ends_with(".jsonl.gz") {
        debug!("Reading {} records from JSONL {:?}", R::COLLECTION, path);
        let reader = JsonlReader::<Box<dyn Read>, R>::open(path)?;
        let records = reader.collect::<Result<Vec<R>>>()?;
        validate(&records)?;
        records
    } else if name.ends_with(".json") {
        debug!("Reading {} records from JSON {:?}", R::COLLECTION, path);
        parse_json(&std::fs::read_to_string(path)?)?
    } else {
        return Err(Error::UnsupportedFormat(format!(
            "{}. Use .json, .jsonl, or .jsonl.gz",
            path.display()
        )));
    };

    info!("Loaded {} {} records from {:?}", records.len(), R::COLLECTION, path);
    Ok(records)
}

/// Parse an envelope document or bare array and validate it
fn parse_json<R: DatasetRecord>(content: &str) -> Result<Vec<R>> {
    let value: Value = serde_json::from_str(content)?;
    let array = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove(R::ENVELOPE_FIELD).ok_or_else(|| {
            Error::InvalidDataset(format!(
                "{} dataset has no '{}' array",
                R::COLLECTION,
                R::ENVELOPE_FIELD
            ))
        })?,
        _ => {
            return Err(Error::InvalidDataset(format!(
                "{} dataset must be an object or an array",
                R::COLLECTION
            )))
        }
    };
    let records: Vec<R> = serde_json::from_value(array)?;
    validate(&records)?;
    Ok(records)
}

/// Check a dataset is non-empty, every record is valid and ids are unique
pub fn validate<R: StoredRecord>(records: &[R]) -> Result<()> {
    if records.is_empty() {
        return Err(Error::InvalidDataset(format!(
            "{} dataset is empty",
            R::COLLECTION
        )));
    }
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        record.validate()?;
        if !seen.insert(record.id()) {
            return Err(Error::InvalidDataset(format!(
                "{} dataset repeats id {}",
                R::COLLECTION,
                record.id()
            )));
        }
    }
    Ok(())
}
