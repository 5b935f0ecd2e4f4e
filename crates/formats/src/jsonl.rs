//! Streaming JSONL (JSON Lines) reader
//!
//! Decodes one typed record per line with automatic gzip decompression.
//! A malformed line is an error: a seed dataset is used whole or not at all.

use crate::{Error, Result};
use flate2::read::GzDecoder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

/// Buffer size for BufReader
const BUFFER_SIZE: usize = 64 * 1024;

/// Streaming JSONL reader yielding records of type `T`
pub struct JsonlReader<R: Read, T> {
    reader: BufReader<R>,
    line_number: usize,
    bytes_read: u64,
    _record: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> JsonlReader<Box<dyn Read>, T> {
    /// Open a JSONL file, decompressing when the name ends in `.gz`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        let reader: Box<dyn Read> = match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => {
                debug!("Opening gzip-compressed JSONL file: {:?}", path);
                Box::new(GzDecoder::new(file))
            }
            _ => {
                debug!("Opening plain JSONL file: {:?}", path);
                Box::new(file)
            }
        };
        Ok(Self::new(reader))
    }
}

impl<R: Read, T: DeserializeOwned> JsonlReader<R, T> {
    /// Create a new JSONL reader from any Read source
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(BUFFER_SIZE, reader),
            line_number: 0,
            bytes_read: 0,
            _record: PhantomData,
        }
    }

    /// Get the number of lines processed
    pub fn lines_processed(&self) -> usize {
        self.line_number
    }

    /// Get the number of bytes read
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read, T: DeserializeOwned> Iterator for JsonlReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.line_number += 1;

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    return Some(serde_json::from_str(trimmed).map_err(|source| {
                        Error::LineParse {
                            line: self.line_number,
                            source,
                        }
                    }));
                }
                Err(e) => return Some(Err(Error::Io(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketmood_core::{FakeNewsArticle, Verdict};
    use serde_json::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ARTICLES: &str = r#"{"id": 1, "verdict": "real", "confidence": 90, "explanation": "a", "factors": [{"factor": "x", "impact": "low"}]}
{"id": 2, "verdict": "fake", "confidence": 60, "explanation": "b", "factors": [{"factor": "y", "impact": "high"}]}"#;

    #[test]
    fn test_jsonl_reader_typed() {
        let reader = JsonlReader::<_, FakeNewsArticle>::new(ARTICLES.as_bytes());
        let records = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].verdict, Verdict::Real);
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn test_jsonl_reader_with_empty_lines() {
        let data = "{\"a\": 1}\n\n{\"a\": 2}\n\n";

        let reader = JsonlReader::<_, Value>::new(data.as_bytes());
        let records = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_jsonl_reader_malformed_line_is_error() {
        let data = "{\"a\": 1}\n{invalid json}\n{\"a\": 2}";

        let reader = JsonlReader::<_, Value>::new(data.as_bytes());
        let err = reader.collect::<Result<Vec<_>>>().unwrap_err();

        assert!(matches!(err, Error::LineParse { line: 2, .. }));
    }

    #[test]
    fn test_jsonl_reader_progress_tracking() {
        let mut reader = JsonlReader::<_, Value>::new(ARTICLES.as_bytes());

        assert_eq!(reader.lines_processed(), 0);
        assert_eq!(reader.bytes_processed(), 0);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 1);
        assert!(reader.bytes_processed() > 0);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 2);
    }

    #[test]
    fn test_jsonl_reader_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("jsonl.gz");

        {
            let file = File::create(&temp_path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, "{}", ARTICLES).unwrap();
            encoder.finish().unwrap();
        }

        let reader = JsonlReader::<Box<dyn Read>, FakeNewsArticle>::open(&temp_path).unwrap();
        let records = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].verdict, Verdict::Fake);

        std::fs::remove_file(temp_path).unwrap();
    }
}
