//! Seed datasets for the MarketMood collections
//!
//! Ships the sample sentiment and fake-news datasets inside the binary and
//! loads replacements from JSON, JSONL or gzip-compressed JSONL files.

pub mod error;
pub mod jsonl;
pub mod datasets;

pub use datasets::{embedded, load, load_records, DatasetRecord};
pub use error::{Error, Result};
pub use jsonl::JsonlReader;
