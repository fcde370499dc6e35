//! Key-value store capability

use crate::error::StoreError;
use std::collections::BTreeMap;
use std::ops::Bound;

/// A key/value pair returned by a range scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvEntry {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl KvEntry {
    /// Key rendered as text (lossy for non UTF-8 keys)
    pub fn key_str(&self) -> String {
        String::from_utf8_lossy(&self.key).into_owned()
    }
}

/// Ordered byte-key -> byte-value store.
///
/// Every method is one atomic unit of work. Callers that issue several
/// calls must not assume they are atomic together.
pub trait KeyValueStore {
    /// Get the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value
    fn write(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// All entries with `start <= key < end`, in ascending key order.
    ///
    /// An empty `start` or `end` leaves that side unbounded, so
    /// `scan(b"", b"")` walks the whole keyspace.
    fn scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<KvEntry>, StoreError>;

    /// Check whether a value is stored under `key`.
    ///
    /// Default implementation uses `read()`, but backends may optimize this.
    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.read(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).read(key)
    }

    fn write(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        (**self).write(key, value)
    }

    fn scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<KvEntry>, StoreError> {
        (**self).scan(start, end)
    }

    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        (**self).contains(key)
    }
}

/// Range scan over a `BTreeMap`, shared by the map-backed stores
pub(crate) fn scan_map(map: &BTreeMap<Vec<u8>, Vec<u8>>, start: &[u8], end: &[u8]) -> Vec<KvEntry> {
    // BTreeMap::range panics on an inverted range
    if !start.is_empty() && !end.is_empty() && start >= end {
        return Vec::new();
    }

    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start.to_vec())
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end.to_vec())
    };

    map.range((lower, upper))
        .map(|(key, value)| KvEntry {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}
