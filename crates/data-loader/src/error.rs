//! Error types for the data-loader crate.
//!
//! Every failure while reading or validating the model artifacts maps to one
//! variant here, so callers can tell a missing file from a malformed row.

use thiserror::Error;

/// Errors that can occur while loading the catalog and similarity matrix
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in an artifact couldn't be parsed
    ///
    /// Carries the file and 1-based line number for context
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field or score had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Matrix rows, columns and catalog length disagree
    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
