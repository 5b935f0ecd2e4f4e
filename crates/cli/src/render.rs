//! Plain-text rendering of stored records and the dashboard summary

use marketmood_core::dashboard::SentimentSummary;
use marketmood_core::{FakeNewsArticle, SentimentResult};
use std::fmt::Write;

pub fn sentiment_result(result: &SentimentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} {} (score {:.0}%)",
        result.id,
        result.overall,
        result.score * 100.0
    );
    let _ = writeln!(out, "  {}", result.summary);
    for emotion in &result.emotions {
        let _ = writeln!(
            out,
            "  {:<12} {:>5.1}  {}",
            emotion.name, emotion.value, emotion.color
        );
    }
    out
}

pub fn fake_news_article(article: &FakeNewsArticle) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} {} ({}% confidence)",
        article.id, article.verdict, article.confidence
    );
    let _ = writeln!(out, "  {}", article.explanation);
    for factor in &article.factors {
        let _ = writeln!(out, "  [{:?}] {}", factor.impact, factor.factor);
    }
    out
}

pub fn dashboard(summary: &SentimentSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "═".repeat(60));
    let _ = writeln!(out, "Market Sentiment Dashboard");
    let _ = writeln!(out, "{}", "═".repeat(60));
    let _ = writeln!(out, "Analyses:           {}", summary.total);
    match summary.dominant {
        Some(sentiment) => {
            let _ = writeln!(out, "Dominant sentiment: {}", sentiment);
        }
        None => {
            let _ = writeln!(out, "Dominant sentiment: (no data)");
        }
    }
    let _ = writeln!(
        out,
        "Average score:      {:.1}%",
        summary.average_score * 100.0
    );
    let _ = writeln!(out, "\nDistribution");
    for share in &summary.distribution {
        let _ = writeln!(
            out,
            "  {:<9} {:>3}  {:>5.1}%  {}",
            share.sentiment.to_string(),
            share.count,
            share.percent,
            share.color
        );
    }
    if !summary.recent.is_empty() {
        let _ = writeln!(out, "\nRecent analysis");
        for recent in &summary.recent {
            let _ = writeln!(
                out,
                "  #{} {} {}%: {}",
                recent.id, recent.sentiment, recent.confidence, recent.summary
            );
        }
    }
    let _ = write!(out, "{}", "═".repeat(60));
    out
}
