//! Dashboard summary computed from stored sentiment results

use crate::model::{Sentiment, SentimentResult};
use serde::Serialize;

/// Number of most recent analyses shown on the dashboard
pub const RECENT_LIMIT: usize = 3;

/// Share of results with one overall polarity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarityShare {
    pub sentiment: Sentiment,
    pub count: usize,
    pub percent: f64,
    pub color: &'static str,
}

/// One line of the "recent analysis" panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentAnalysis {
    pub id: i64,
    pub sentiment: Sentiment,
    /// Score as a whole percentage
    pub confidence: u8,
    pub summary: String,
}

/// Aggregate view over a sentiment collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentSummary {
    pub total: usize,
    pub distribution: Vec<PolarityShare>,
    /// Most frequent polarity; ties go to the earlier of positive, neutral, negative
    pub dominant: Option<Sentiment>,
    pub average_score: f64,
    pub recent: Vec<RecentAnalysis>,
}

impl SentimentSummary {
    pub fn from_results(results: &[SentimentResult]) -> Self {
        let total = results.len();

        let distribution: Vec<PolarityShare> = Sentiment::ALL
            .iter()
            .map(|&sentiment| {
                let count = results.iter().filter(|r| r.overall == sentiment).count();
                PolarityShare {
                    sentiment,
                    count,
                    percent: percentage(count, total),
                    color: sentiment.color(),
                }
            })
            .collect();

        let dominant = distribution
            .iter()
            .filter(|share| share.count > 0)
            .fold(None::<&PolarityShare>, |best, share| match best {
                Some(b) if b.count >= share.count => Some(b),
                _ => Some(share),
            })
            .map(|share| share.sentiment);

        let average_score = if total > 0 {
            results.iter().map(|r| r.score).sum::<f64>() / total as f64
        } else {
            0.0
        };

        let mut by_recency: Vec<&SentimentResult> = results.iter().collect();
        by_recency.sort_by(|a, b| b.id.cmp(&a.id));
        let recent = by_recency
            .into_iter()
            .take(RECENT_LIMIT)
            .map(|r| RecentAnalysis {
                id: r.id,
                sentiment: r.overall,
                confidence: (r.score * 100.0).round().clamp(0.0, 100.0) as u8,
                summary: r.summary.clone(),
            })
            .collect();

        Self {
            total,
            distribution,
            dominant,
            average_score,
            recent,
        }
    }
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{sentiment, sentiments};

    #[test]
    fn test_distribution() {
        let mut results = sentiments();
        results.push(sentiment(4, Sentiment::Positive, 0.9));

        let summary = SentimentSummary::from_results(&results);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.distribution[0].count, 2);
        assert_eq!(summary.distribution[0].percent, 50.0);
        assert_eq!(summary.distribution[2].color, "#DC2626");
        assert_eq!(summary.dominant, Some(Sentiment::Positive));
    }

    #[test]
    fn test_tie_prefers_positive() {
        let summary = SentimentSummary::from_results(&sentiments());
        assert_eq!(summary.dominant, Some(Sentiment::Positive));
    }

    #[test]
    fn test_recent_newest_first() {
        let mut results = sentiments();
        results.push(sentiment(9, Sentiment::Negative, 0.444));

        let summary = SentimentSummary::from_results(&results);
        let ids: Vec<_> = summary.recent.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![9, 3, 2]);
        assert_eq!(summary.recent[0].confidence, 44);
    }

    #[test]
    fn test_empty_results() {
        let summary = SentimentSummary::from_results(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.dominant, None);
        assert_eq!(summary.average_score, 0.0);
        assert!(summary.distribution.iter().all(|s| s.percent == 0.0));
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn test_average_score() {
        let summary = SentimentSummary::from_results(&sentiments());
        assert!((summary.average_score - (0.82 + 0.51 + 0.27) / 3.0).abs() < 1e-12);
    }
}
