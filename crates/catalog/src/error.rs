//! Error types for stars-catalog.

use std::path::PathBuf;

/// Error type for all fallible operations in the stars-catalog crate.
///
/// Covers missing files, failures reported by the underlying CSV reader, and
/// records that cannot be turned into a valid [`Point`](crate::Point).
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Returned when the catalog file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the CSV reader (including I/O).
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a record cannot be converted into a point.
    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord {
        /// 1-based line number of the offending record.
        line: u64,
        /// What was wrong with it.
        reason: String,
    },

    /// Returned when the configured field delimiter cannot be used.
    #[error("invalid delimiter {delimiter:?}: must be a single ASCII character other than '\"'")]
    InvalidDelimiter {
        /// The rejected delimiter.
        delimiter: char,
    },
}

impl From<csv::Error> for CatalogError {
    fn from(e: csv::Error) -> Self {
        CatalogError::Csv {
            reason: e.to_string(),
        }
    }
}
