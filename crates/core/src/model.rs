//! Record types stored in the MarketMood collections
//!
//! Field names and enum spellings match the JSON datasets the dashboard
//! ships with, so a stored document is the dataset entry verbatim.

use crate::store::Collection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A record kind that lives in exactly one collection, keyed by its `id`.
pub trait StoredRecord: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection holding records of this kind
    const COLLECTION: Collection;

    /// Identifier, unique within the collection
    fn id(&self) -> i64;

    /// Check the record's field-level invariants
    fn validate(&self) -> Result<(), InvalidRecord>;
}

/// A record that violates one of its field invariants
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{collection} record {id}: {reason}")]
pub struct InvalidRecord {
    pub collection: Collection,
    pub id: i64,
    pub reason: String,
}

impl InvalidRecord {
    fn new<R: StoredRecord>(record: &R, reason: impl Into<String>) -> Self {
        Self {
            collection: R::COLLECTION,
            id: record.id(),
            reason: reason.into(),
        }
    }
}

/// Overall emotional polarity of a sentiment result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Display colour used by the dashboard charts
    pub fn color(&self) -> &'static str {
        match self {
            Sentiment::Positive => "#059669",
            Sentiment::Neutral => "#3B82F6",
            Sentiment::Negative => "#DC2626",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        };
        f.write_str(label)
    }
}

/// One slice of an emotion breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Emotion {
    pub name: String,
    pub value: f64,
    pub color: String,
}

/// Canned market-sentiment analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub id: i64,
    pub overall: Sentiment,
    /// Confidence of the overall polarity, 0.0 to 1.0
    pub score: f64,
    pub emotions: Vec<Emotion>,
    pub summary: String,
}

impl StoredRecord for SentimentResult {
    const COLLECTION: Collection = Collection::SentimentResults;

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> Result<(), InvalidRecord> {
        if !(0.0..=1.0).contains(&self.score) {
            return Err(InvalidRecord::new(
                self,
                format!("score {} outside 0.0..=1.0", self.score),
            ));
        }
        if self.emotions.is_empty() {
            return Err(InvalidRecord::new(self, "emotions must not be empty"));
        }
        if let Some(e) = self
            .emotions
            .iter()
            .find(|e| !e.value.is_finite() || e.value < 0.0)
        {
            return Err(InvalidRecord::new(
                self,
                format!("emotion '{}' has invalid value {}", e.name, e.value),
            ));
        }
        Ok(())
    }
}

/// Fake-news classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verdict::Real => "real",
            Verdict::Fake => "fake",
        })
    }
}

/// How strongly a factor weighed on a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// A factor contributing to a fake-news verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub factor: String,
    pub impact: Impact,
}

/// Canned fake-news detection result for one article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeNewsArticle {
    pub id: i64,
    pub verdict: Verdict,
    /// Percentage, 0 to 100
    pub confidence: u8,
    pub explanation: String,
    pub factors: Vec<Factor>,
}

impl StoredRecord for FakeNewsArticle {
    const COLLECTION: Collection = Collection::FakeNewsArticles;

    fn id(&self) -> i64 {
        self.id
    }

    fn validate(&self) -> Result<(), InvalidRecord> {
        if self.confidence > 100 {
            return Err(InvalidRecord::new(
                self,
                format!("confidence {} above 100", self.confidence),
            ));
        }
        if self.factors.is_empty() {
            return Err(InvalidRecord::new(self, "factors must not be empty"));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentiment_json_shape() {
        let value = serde_json::to_value(sentiment(7, Sentiment::Neutral, 0.5)).unwrap();
        assert_eq!(value["overall"], json!("neutral"));
        assert_eq!(value["emotions"][1]["value"], json!(40.5));
    }

    #[test]
    fn test_article_parses_dataset_entry() {
        let entry = json!({
            "id": 4,
            "verdict": "fake",
            "confidence": 91,
            "explanation": "Recycled image from 2019",
            "factors": [{"factor": "Image provenance", "impact": "high"}]
        });
        let article: FakeNewsArticle = serde_json::from_value(entry).unwrap();
        assert_eq!(article.verdict, Verdict::Fake);
        assert_eq!(article.factors[0].impact, Impact::High);
        assert!(article.validate().is_ok());
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let entry = json!({"id": 1, "overall": "bullish", "score": 0.5, "emotions": [], "summary": ""});
        assert!(serde_json::from_value::<SentimentResult>(entry).is_err());
    }

    #[test]
    fn test_validate_score_range() {
        let bad = sentiment(1, Sentiment::Positive, 1.2);
        let err = bad.validate().unwrap_err();
        assert_eq!(err.id, 1);
        assert_eq!(err.collection, Collection::SentimentResults);
    }

    #[test]
    fn test_validate_empty_sequences() {
        let mut s = sentiment(1, Sentiment::Positive, 0.4);
        s.emotions.clear();
        assert!(s.validate().is_err());

        let mut a = article(2, Verdict::Real);
        a.factors.clear();
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_validate_confidence() {
        let mut a = article(3, Verdict::Real);
        a.confidence = 101;
        assert!(a.validate().is_err());
    }
}
