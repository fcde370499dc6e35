//! Codec errors

use thiserror::Error;

/// Errors that can occur while encoding or decoding records
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode {kind}: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to decode {kind}: {source}")]
    Decode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl CodecError {
    /// Record kind the failing operation targeted
    pub fn kind(&self) -> &'static str {
        match self {
            CodecError::Encode { kind, .. } | CodecError::Decode { kind, .. } => kind,
        }
    }
}
