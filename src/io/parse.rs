//! Dataset parser.
//!
//! ## Format
//!
//! ```text
//! N
//! <H|V> <tagCount> <tag1> ... <tagN>     (N lines)
//! ```
//!
//! Records are split on whitespace and normalized in parallel: each record
//! becomes one [`Photo`] whose id is its 0-based record position and whose
//! labels are hashed, sorted and deduplicated into a [`TagSet`]. Lines after
//! the `N`-th record are ignored. An empty input is an empty registry.

use rayon::prelude::*;
use std::path::Path;

use crate::registry::{PhotoRegistry, RegistryError};
use crate::types::{Orientation, Photo, PhotoId, TagSet};

/// Error type for dataset parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The dataset file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// First line is not a photo count.
    #[error("Invalid photo count: {0:?}")]
    InvalidCount(String),
    /// Fewer records than announced.
    #[error("Expected {expected} photo records, found {found}")]
    MissingRecords {
        /// Announced count.
        expected: usize,
        /// Records present.
        found: usize,
    },
    /// A record line has no tokens.
    #[error("Line {line}: empty photo record")]
    EmptyRecord {
        /// 1-based line number.
        line: usize,
    },
    /// Orientation token is not `H` or `V`.
    #[error("Line {line}: unknown orientation {token:?}")]
    InvalidOrientation {
        /// 1-based line number.
        line: usize,
        /// Offending token.
        token: String,
    },
    /// Tag count is missing or not a number.
    #[error("Line {line}: invalid tag count {token:?}")]
    InvalidTagCount {
        /// 1-based line number.
        line: usize,
        /// Offending token (empty when missing).
        token: String,
    },
    /// Number of tags differs from the announced count.
    #[error("Line {line}: expected {expected} tags, found {found}")]
    TagCountMismatch {
        /// 1-based line number.
        line: usize,
        /// Announced tag count.
        expected: usize,
        /// Tags present.
        found: usize,
    },
    /// Parsed photos did not form a valid registry.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Read and parse a dataset file.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<PhotoRegistry, ParseError> {
    let input = std::fs::read_to_string(path)?;
    parse_dataset(&input)
}

/// Parse a dataset from its text.
pub fn parse_dataset(input: &str) -> Result<PhotoRegistry, ParseError> {
    let mut lines = input.lines();
    let header = match lines.next().map(str::trim) {
        None | Some("") => return Ok(PhotoRegistry::default()),
        Some(header) => header,
    };
    let count: usize = header
        .parse()
        .map_err(|_| ParseError::InvalidCount(header.to_string()))?;

    let records: Vec<&str> = lines.take(count).collect();
    if records.len() < count {
        return Err(ParseError::MissingRecords {
            expected: count,
            found: records.len(),
        });
    }

    let photos = records
        .par_iter()
        .enumerate()
        .map(|(index, record)| parse_record(index, record))
        .collect::<Result<Vec<Photo>, ParseError>>()?;

    Ok(PhotoRegistry::new(photos)?)
}

/// Parse record `index` (file line `index + 2`).
fn parse_record(index: usize, record: &str) -> Result<Photo, ParseError> {
    let line = index + 2;
    let mut tokens = record.split_whitespace();

    let orientation_token = tokens.next().ok_or(ParseError::EmptyRecord { line })?;
    let orientation =
        Orientation::from_token(orientation_token).ok_or_else(|| ParseError::InvalidOrientation {
            line,
            token: orientation_token.to_string(),
        })?;

    let count_token = tokens.next().unwrap_or_default();
    let expected: usize = count_token
        .parse()
        .map_err(|_| ParseError::InvalidTagCount {
            line,
            token: count_token.to_string(),
        })?;

    let labels: Vec<&str> = tokens.collect();
    if labels.len() != expected {
        return Err(ParseError::TagCountMismatch {
            line,
            expected,
            found: labels.len(),
        });
    }

    Ok(Photo::new(
        PhotoId::new(index),
        orientation,
        TagSet::from_labels(labels),
    ))
}
