//! Error types for the data-loader crate.
//!
//! Every variant here is a startup failure: the model artifacts are either
//! missing or inconsistent, and nothing downstream can serve requests.

use thiserror::Error;

/// Errors that can occur while loading or validating the model artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in the movie table couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The similarity matrix file is not valid JSON of the expected shape
    #[error("Malformed similarity matrix in {file}: {source}")]
    MatrixFormat {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A matrix row has the wrong number of columns
    #[error("Similarity row {row} has {found} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Matrix dimension and movie table disagree
    #[error("Dimension mismatch: {movies} movies but matrix dimension is {dimension}")]
    DimensionMismatch { movies: usize, dimension: usize },

    /// Two movies claim the same identifier or the same dense index
    #[error("Duplicate {field}: {value}")]
    Duplicate { field: String, value: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
