//! Message normalization before keyword matching

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"))
}

/// Message normalization configuration
#[derive(Debug, Clone)]
pub struct MessageNormalizer {
    /// Apply Unicode NFKC normalization (folds full-width letters and ligatures)
    pub unicode_normalize: bool,
    /// Convert to lowercase
    pub lowercase: bool,
    /// Collapse runs of whitespace and trim
    pub collapse_whitespace: bool,
}

impl MessageNormalizer {
    pub fn new(unicode_normalize: bool, lowercase: bool, collapse_whitespace: bool) -> Self {
        Self {
            unicode_normalize,
            lowercase,
            collapse_whitespace,
        }
    }

    /// Normalize text according to configuration
    ///
    /// Order: Unicode normalization, lowercase, whitespace.
    pub fn normalize(&self, text: &str) -> String {
        let mut result = if self.unicode_normalize {
            text.nfkc().collect::<String>()
        } else {
            text.to_string()
        };

        if self.lowercase {
            result = result.to_lowercase();
        }

        if self.collapse_whitespace {
            result = get_whitespace_regex()
                .replace_all(&result, " ")
                .trim()
                .to_string();
        }

        result
    }
}

impl Default for MessageNormalizer {
    fn default() -> Self {
        Self::new(true, true, true)
    }
}
