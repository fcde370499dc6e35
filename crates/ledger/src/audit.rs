//! Index audit - finds transactions whose hash index entry is missing or wrong
//!
//! A failed second write in `append_transaction`, or a hash re-used by
//! another user, leaves an embedded transaction without an index entry
//! pointing back at its owner. The audit walks every user and reports each
//! such transaction.

use crate::error::LedgerResult;
use crate::ledger::Ledger;
use userledger_core::codec;
use userledger_core::HashIndexEntry;
use userledger_store::KeyValueStore;

/// Why an embedded transaction is not correctly indexed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GapKind {
    /// Nothing is stored under the hash
    Missing,
    /// The index entry names a different user
    PointsElsewhere(String),
    /// Something other than an index entry is stored under the hash
    Malformed,
}

/// A transaction whose index entry does not point back at its owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexGap {
    pub id_key: String,
    pub hash: String,
    pub kind: GapKind,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Every embedded transaction without a matching index entry
    pub fn index_gaps(&self) -> LedgerResult<Vec<IndexGap>> {
        let layout = self.config().key_layout;
        let mut gaps = Vec::new();

        for user in self.list_users()? {
            for transaction in &user.transactions {
                let key = layout.index_key(&transaction.hash);
                let kind = match self.store().read(&key)? {
                    None => Some(GapKind::Missing),
                    Some(bytes) => match codec::decode::<HashIndexEntry>(&bytes) {
                        Ok(entry) if entry.id_key == user.id_key => None,
                        Ok(entry) => Some(GapKind::PointsElsewhere(entry.id_key)),
                        Err(_) => Some(GapKind::Malformed),
                    },
                };

                if let Some(kind) = kind {
                    tracing::warn!(id_key = %user.id_key, hash = %transaction.hash, ?kind, "Index gap");
                    gaps.push(IndexGap {
                        id_key: user.id_key.clone(),
                        hash: transaction.hash.clone(),
                        kind,
                    });
                }
            }
        }

        Ok(gaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userledger_core::Transaction;
    use userledger_store::MemoryStore;

    #[test]
    fn test_consistent_ledger_has_no_gaps() {
        let mut ledger = Ledger::new(MemoryStore::new());
        ledger.create_user("A", "a", "a@x").unwrap();
        ledger
            .append_transaction("A", Transaction::new("0x1", "1", "USD", "1"))
            .unwrap();

        assert!(ledger.index_gaps().unwrap().is_empty());
    }

    #[test]
    fn test_reused_hash_points_elsewhere() {
        let mut ledger = Ledger::new(MemoryStore::new());
        ledger.create_user("A", "a", "a@x").unwrap();
        ledger.create_user("B", "b", "b@x").unwrap();
        ledger
            .append_transaction("A", Transaction::new("0x1", "1", "USD", "1"))
            .unwrap();
        ledger
            .append_transaction("B", Transaction::new("0x1", "2", "USD", "2"))
            .unwrap();

        let gaps = ledger.index_gaps().unwrap();
        assert_eq!(
            gaps,
            vec![IndexGap {
                id_key: "A".to_string(),
                hash: "0x1".to_string(),
                kind: GapKind::PointsElsewhere("B".to_string()),
            }]
        );
    }

    #[test]
    fn test_hash_colliding_with_user_key_is_malformed() {
        let mut ledger = Ledger::new(MemoryStore::new());
        ledger.create_user("A", "a", "a@x").unwrap();
        ledger.create_user("B", "b", "b@x").unwrap();
        ledger
            .append_transaction("A", Transaction::new("0x1", "1", "USD", "1"))
            .unwrap();
        // Overwrite the index entry with a user record under the same key
        let user_bytes = codec::encode(&userledger_core::User::new("0x1", "n", "e")).unwrap();
        ledger.store_mut().write(b"0x1", &user_bytes).unwrap();

        let gaps = ledger.index_gaps().unwrap();
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].kind, GapKind::Malformed);
    }
}
