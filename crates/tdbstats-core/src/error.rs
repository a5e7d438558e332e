//! Error types for the tdbstats core library
//!
//! Every failure in ingestion, statistics or export is reported through the
//! [`Error`] enum below. [`Error::kind`] folds the variants into the small set
//! of [`ErrorKind`]s callers usually branch on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for tdbstats operations
#[derive(Error, Debug)]
pub enum Error {
    /// A local input file could not be opened
    #[error("File not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors while reading input or writing output
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP/Network related errors while fetching a remote database
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A statistic was requested over an empty input
    #[error("Cannot compute {statistic}: the dataset is empty")]
    EmptyDataset { statistic: &'static str },

    /// A statistic needs more observations than are available
    #[error("Cannot compute {statistic}: requires at least {required} values, found {actual}")]
    InsufficientData {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },

    /// A ratio whose denominator is zero
    #[error("Cannot compute {statistic}: division by zero")]
    DivisionByZero { statistic: &'static str },

    /// A line of the line-oriented input format could not be parsed
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Tabular input is missing a column or is malformed
    #[error("Table error: {message}")]
    Table { message: String },

    /// Invalid load options
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// JSON parsing errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Resource failure inside a computation, with its context chain
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Local input missing or unreadable. Fatal for a load.
    NotFound,
    /// Network failure or output-write failure
    Io,
    /// Statistic requested over zero records or zero periods
    EmptyDataset,
    /// Ratio with a zero-sized dimension
    DivisionByZero,
    /// Malformed input or options
    InvalidInput,
    /// Anything else
    Internal,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Io { .. } | Error::Http { .. } => ErrorKind::Io,
            Error::EmptyDataset { .. } | Error::InsufficientData { .. } => ErrorKind::EmptyDataset,
            Error::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            Error::Parse { .. }
            | Error::Table { .. }
            | Error::Configuration { .. }
            | Error::Json { .. } => ErrorKind::InvalidInput,
            Error::Internal { .. } => ErrorKind::Internal,
        }
    }

    pub(crate) fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            message: message.into(),
            source,
        }
    }

    pub(crate) fn table(message: impl Into<String>) -> Self {
        Error::Table {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not-found"),
            ErrorKind::Io => write!(f, "io"),
            ErrorKind::EmptyDataset => write!(f, "empty-dataset"),
            ErrorKind::DivisionByZero => write!(f, "division-by-zero"),
            ErrorKind::InvalidInput => write!(f, "invalid-input"),
            ErrorKind::Internal => write!(f, "internal"),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: format!("{:#}", err),
            source: err,
        }
    }
}
