//! Hash index entry - maps a transaction hash to its owner

use serde::{Deserialize, Serialize};

/// Secondary index record stored under a transaction hash.
///
/// Wire format is `{"Id_key":"<owner>"}`; the capitalised field name is part
/// of the persisted layout and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HashIndexEntry {
    /// Identity key of the user owning the transaction
    #[serde(rename = "Id_key")]
    pub id_key: String,
}

impl HashIndexEntry {
    pub fn new(id_key: impl Into<String>) -> Self {
        Self {
            id_key: id_key.into(),
        }
    }
}
