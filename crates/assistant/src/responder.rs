//! Keyword rules mapping a message to a canned reply

use crate::normalize::MessageNormalizer;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const GREETING: &str = "Hello! I'm the MarketMood Assistant. Ask me about stock markets, \
investment strategies, or market sentiment.";

pub const FALLBACK: &str = "I don't have specific information on that topic yet. For the most \
accurate market insights, check financial news sources such as Bloomberg, CNBC, or the Wall \
Street Journal.";

const DEFAULT_RULES: &[(&str, &str)] = &[
    (
        "market",
        "Overall market sentiment today is cautiously optimistic. Tech stocks are showing \
         strength while energy is more volatile. Weigh your risk tolerance before acting.",
    ),
    (
        "stock",
        "When evaluating a stock, start with fundamentals: P/E ratio, revenue growth and \
         competitive advantage. Technical indicators help with timing, but company quality \
         should drive long-term decisions.",
    ),
    (
        "invest",
        "A balanced approach diversifies across asset classes, reviews the portfolio regularly \
         and matches your time horizon and goals. A financial advisor can tailor this to you.",
    ),
    (
        "sentiment",
        "Market sentiment is the overall attitude of investors toward a security or market, \
         usually described as bullish (expecting prices to rise) or bearish (expecting them \
         to fall).",
    ),
    (
        "strategy",
        "Common trading strategies include trend following, mean reversion, breakout trading \
         and value investing. The right one depends on your horizon, risk tolerance and market \
         conditions.",
    ),
    (
        "etf",
        "ETFs (exchange-traded funds) track indices, sectors or themes, giving cheap \
         diversification. They usually charge lower fees than mutual funds and trade like \
         stocks during market hours.",
    ),
    (
        "risk",
        "Risk management means sizing positions, setting stop losses, diversifying and \
         watching correlation between assets. Never risk more than you can afford to lose.",
    ),
    (
        "trend",
        "Current trends include AI adoption, renewable energy growth, digital transformation \
         and a growing focus on sustainable investing.",
    ),
];

/// Reply given when a normalized message contains `keyword`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub keyword: String,
    pub reply: String,
}

impl Rule {
    pub fn new(keyword: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            reply: reply.into(),
        }
    }
}

/// First-match keyword responder
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    rules: Vec<Rule>,
    fallback: String,
    normalizer: MessageNormalizer,
}

impl KeywordResponder {
    /// Build a responder; rules are tried in order and keywords are normalized
    /// the same way as messages.
    pub fn new(rules: Vec<Rule>, fallback: impl Into<String>) -> Result<Self> {
        let normalizer = MessageNormalizer::default();
        let rules = rules
            .into_iter()
            .map(|rule| {
                let keyword = normalizer.normalize(&rule.keyword);
                if keyword.is_empty() {
                    return Err(Error::InvalidRule(format!(
                        "empty keyword for reply '{}'",
                        rule.reply
                    )));
                }
                Ok(Rule {
                    keyword,
                    reply: rule.reply,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rules,
            fallback: fallback.into(),
            normalizer,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Reply to `message`: the first rule whose keyword occurs in it, else the fallback
    pub fn respond(&self, message: &str) -> Result<&str> {
        let normalized = self.normalizer.normalize(message);
        if normalized.is_empty() {
            return Err(Error::EmptyMessage);
        }

        match self
            .rules
            .iter()
            .find(|rule| normalized.contains(rule.keyword.as_str()))
        {
            Some(rule) => {
                debug!("Matched keyword '{}'", rule.keyword);
                Ok(&rule.reply)
            }
            None => {
                debug!("No keyword matched, using fallback");
                Ok(&self.fallback)
            }
        }
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES
                .iter()
                .map(|&(keyword, reply)| Rule::new(keyword, reply))
                .collect(),
            fallback: FALLBACK.to_string(),
            normalizer: MessageNormalizer::default(),
        }
    }
}
