//! Ledger errors

use thiserror::Error;
use userledger_core::CodecError;
use userledger_store::StoreError;

/// Errors that can occur in ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Failed to access world state: {0}")]
    Store(#[from] StoreError),

    #[error("The {kind} {key} does not exist")]
    NotFound { kind: &'static str, key: String },

    #[error("The {kind} {key} already exists")]
    AlreadyExists { kind: &'static str, key: String },

    #[error("Malformed record at key {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// The user write landed but the index write did not. The transaction
    /// is in the user's history and no index entry exists for its hash.
    #[error("Transaction {hash} appended to user {id_key} but its index entry was not written: {source}")]
    PartialAppend {
        id_key: String,
        hash: String,
        #[source]
        source: StoreError,
    },
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    pub fn not_found(kind: &'static str, key: &str) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    pub fn already_exists(kind: &'static str, key: &str) -> Self {
        Self::AlreadyExists {
            kind,
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// True when the store failed, including a failed index write
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::Store(_) | Self::PartialAppend { .. })
    }
}
