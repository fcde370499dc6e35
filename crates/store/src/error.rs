//! Store errors

use thiserror::Error;

/// Errors raised by a key-value store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupt write log at line {line}: {reason}")]
    CorruptLog { line: usize, reason: String },

    #[error("Store backend failure: {0}")]
    Backend(String),
}
