//! Error types for trip history persistence.

use std::io;
use std::path::PathBuf;

/// Errors from reading or writing trip history and statistics.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// User names become part of a file name, so only a safe subset is allowed.
    #[error("invalid user name: {0:?}")]
    InvalidUser(String),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed stats file {path}: {source}")]
    MalformedStats {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HistoryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HistoryError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the caller supplied bad input, as opposed to a storage failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HistoryError::InvalidUser(_))
    }
}
