//! Store key derivation for each key layout

use crate::config::KeyLayout;

/// Namespace for user records in the prefixed layout
pub const USER_PREFIX: &str = "user/";

/// Namespace for hash index entries in the prefixed layout
pub const INDEX_PREFIX: &str = "txhash/";

impl KeyLayout {
    /// Store key of the user with this identity key
    pub fn user_key(&self, id_key: &str) -> Vec<u8> {
        match self {
            KeyLayout::Flat => id_key.as_bytes().to_vec(),
            KeyLayout::Prefixed => format!("{USER_PREFIX}{id_key}").into_bytes(),
        }
    }

    /// Store key of the index entry for this transaction hash
    pub fn index_key(&self, hash: &str) -> Vec<u8> {
        match self {
            KeyLayout::Flat => hash.as_bytes().to_vec(),
            KeyLayout::Prefixed => format!("{INDEX_PREFIX}{hash}").into_bytes(),
        }
    }

    /// Scan bounds `[start, end)` covering every user record.
    ///
    /// The flat layout has no user namespace, so the whole keyspace is
    /// scanned and index entries have to be filtered out by shape.
    pub fn user_range(&self) -> (Vec<u8>, Vec<u8>) {
        match self {
            KeyLayout::Flat => (Vec::new(), Vec::new()),
            KeyLayout::Prefixed => (USER_PREFIX.as_bytes().to_vec(), prefix_end(USER_PREFIX)),
        }
    }
}

/// Smallest key greater than every key starting with `prefix`
fn prefix_end(prefix: &str) -> Vec<u8> {
    let mut end = prefix.as_bytes().to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return end;
        }
    }
    // All 0xFF: no upper bound
    Vec::new()
}
