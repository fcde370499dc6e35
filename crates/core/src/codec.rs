//! Record codec - JSON encoding for everything stored in the ledger
//!
//! Two decode modes exist:
//! - [`decode`] is strict: unknown fields and missing required fields fail.
//! - [`decode_user_lenient`] reproduces the permissive user-shape decoding
//!   the ledger has always applied to hash lookups: unknown fields are
//!   ignored, missing fields are zero-valued and the index entry's `Id_key`
//!   is accepted for `id_key`.

use crate::error::CodecError;
use crate::index::HashIndexEntry;
use crate::user::{Transaction, User};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A shape that can be persisted in the ledger keyspace
pub trait Record: Serialize + DeserializeOwned {
    /// Short name used in errors and logs
    const KIND: &'static str;
}

impl Record for User {
    const KIND: &'static str = "user";
}

impl Record for Transaction {
    const KIND: &'static str = "transaction";
}

impl Record for HashIndexEntry {
    const KIND: &'static str = "hash index entry";
}

/// Encode a record into its stored byte representation
pub fn encode<T: Record>(record: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(record).map_err(|source| CodecError::Encode {
        kind: T::KIND,
        source,
    })
}

/// Strictly decode stored bytes into the requested shape
pub fn decode<T: Record>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|source| CodecError::Decode {
        kind: T::KIND,
        source,
    })
}

#[derive(Deserialize)]
struct LenientUser {
    #[serde(default, alias = "Id_key")]
    id_key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    transactions: Option<Vec<Transaction>>,
}

/// Decode any JSON object as a user, zero-filling what is missing.
///
/// Only a non-object payload (or a present field of the wrong JSON type)
/// fails. Decoding a `HashIndexEntry` payload yields a user whose `id_key`
/// is the owner and whose other fields are empty.
///
/// Field names match exactly, plus the `Id_key` spelling used by index
/// entries. Other case variants (`ID_KEY`, `Name`) are treated as unknown
/// fields and ignored, so they leave the matching field empty.
pub fn decode_user_lenient(bytes: &[u8]) -> Result<User, CodecError> {
    let shape: LenientUser = serde_json::from_slice(bytes).map_err(|source| CodecError::Decode {
        kind: User::KIND,
        source,
    })?;

    Ok(User {
        id_key: shape.id_key.unwrap_or_default(),
        name: shape.name.unwrap_or_default(),
        email: shape.email.unwrap_or_default(),
        transactions: shape.transactions.unwrap_or_default(),
    })
}

/// What a stored value turned out to be
#[derive(Debug)]
pub enum StoredRecord {
    User(User),
    HashIndex(HashIndexEntry),
    /// Matches neither shape; carries the user-shape decode error
    Unknown(CodecError),
}

impl StoredRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            StoredRecord::User(_) => User::KIND,
            StoredRecord::HashIndex(_) => HashIndexEntry::KIND,
            StoredRecord::Unknown(_) => "unknown",
        }
    }
}

/// Classify a stored value by strict decoding against each known shape
pub fn classify(bytes: &[u8]) -> StoredRecord {
    match decode::<User>(bytes) {
        Ok(user) => StoredRecord::User(user),
        Err(user_err) => match decode::<HashIndexEntry>(bytes) {
            Ok(entry) => StoredRecord::HashIndex(entry),
            Err(_) => StoredRecord::Unknown(user_err),
        },
    }
}
