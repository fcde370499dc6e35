//! Ledger access layer - user CRUD, transaction append, hash index
//!
//! The ledger holds no state of its own beyond configuration. Every
//! operation is a short synchronous sequence of store calls; isolation and
//! commit belong to whoever owns the store.

use crate::config::{LedgerConfig, ScanPolicy};
use crate::error::{LedgerError, LedgerResult};
use userledger_core::codec::{self, Record, StoredRecord};
use userledger_core::{HashIndexEntry, Transaction, User};
use userledger_store::KeyValueStore;

/// Ledger access layer over a key-value store
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
    config: LedgerConfig,
}

impl<S: KeyValueStore> Ledger<S> {
    /// Create a ledger with the default (flat, skip non-users) configuration
    pub fn new(store: S) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    pub fn with_config(store: S, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Check whether anything is stored under the user's key.
    ///
    /// Only presence is checked: in the flat layout a transaction hash
    /// also "exists" here.
    pub fn user_exists(&self, id_key: &str) -> LedgerResult<bool> {
        let key = self.config.key_layout.user_key(id_key);
        Ok(self.store.contains(&key)?)
    }

    /// All users, in ascending key order.
    ///
    /// Index entries sharing the keyspace are never returned. Other records
    /// that are not users are skipped or rejected per [`ScanPolicy`].
    pub fn list_users(&self) -> LedgerResult<Vec<User>> {
        let (start, end) = self.config.key_layout.user_range();
        let entries = self.store.scan(&start, &end)?;

        let mut users = Vec::with_capacity(entries.len());
        for entry in entries {
            match codec::classify(&entry.value) {
                StoredRecord::User(user) => users.push(user),
                StoredRecord::HashIndex(_) => {
                    tracing::debug!(key = %entry.key_str(), "Skipping hash index entry");
                }
                StoredRecord::Unknown(source) => match self.config.scan_policy {
                    ScanPolicy::SkipNonUsers => {
                        tracing::warn!(key = %entry.key_str(), error = %source, "Skipping undecodable record");
                    }
                    ScanPolicy::Strict => {
                        return Err(LedgerError::Decode {
                            key: entry.key_str(),
                            source,
                        });
                    }
                },
            }
        }

        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Create a user with an empty transaction history
    pub fn create_user(&mut self, id_key: &str, name: &str, email: &str) -> LedgerResult<User> {
        if self.user_exists(id_key)? {
            return Err(LedgerError::already_exists(User::KIND, id_key));
        }

        let user = User::new(id_key, name, email);
        let key = self.config.key_layout.user_key(id_key);
        self.write_record(&key, &user)?;

        tracing::info!(id_key, "Created user");
        Ok(user)
    }

    /// Read a user and its transaction history
    pub fn get_user(&self, id_key: &str) -> LedgerResult<User> {
        let key = self.config.key_layout.user_key(id_key);
        self.read_record(&key)?
            .ok_or_else(|| LedgerError::not_found(User::KIND, id_key))
    }

    /// Replace a user's name and email. The history is left untouched.
    pub fn update_user(&mut self, id_key: &str, name: &str, email: &str) -> LedgerResult<User> {
        let mut user = self.get_user(id_key)?;
        user.update_profile(name, email);
        let key = self.config.key_layout.user_key(id_key);
        self.write_record(&key, &user)?;

        tracing::info!(id_key, "Updated user");
        Ok(user)
    }

    /// Read the record stored under a transaction hash, decoded as a user.
    ///
    /// This does not follow the index to the owning user. The stored value
    /// is an index entry, so the result carries the owner's identity key
    /// with empty name, email and history. Use
    /// [`resolve_transaction_owner`](Self::resolve_transaction_owner) for
    /// the joined lookup.
    pub fn get_user_by_transaction_hash(&self, hash: &str) -> LedgerResult<User> {
        let key = self.config.key_layout.index_key(hash);
        let bytes = self
            .store
            .read(&key)?
            .ok_or_else(|| LedgerError::not_found("transaction hash", hash))?;

        codec::decode_user_lenient(&bytes).map_err(|source| LedgerError::Decode {
            key: hash.to_string(),
            source,
        })
    }

    /// Follow the hash index to the user that owns the transaction
    pub fn resolve_transaction_owner(&self, hash: &str) -> LedgerResult<User> {
        let key = self.config.key_layout.index_key(hash);
        let entry: HashIndexEntry = self
            .read_record(&key)?
            .ok_or_else(|| LedgerError::not_found("transaction hash", hash))?;

        self.get_user(&entry.id_key)
    }

    /// Append a transaction to a user and index its hash.
    ///
    /// Two writes happen in order: the updated user, then the index entry.
    /// They are not atomic together. A failure of the second write is
    /// reported as [`LedgerError::PartialAppend`]: the user already carries
    /// the transaction but the hash is not indexed.
    ///
    /// No duplicate-hash check is made; re-using a hash re-points its index
    /// entry at the latest owner.
    pub fn append_transaction(&mut self, id_key: &str, transaction: Transaction) -> LedgerResult<User> {
        let mut user = self.get_user(id_key)?;
        let hash = transaction.hash.clone();
        user.append(transaction);

        let user_bytes = codec::encode(&user)?;
        let index_bytes = codec::encode(&HashIndexEntry::new(user.id_key.as_str()))?;

        // Phase 1: user record. Nothing has changed if this fails.
        let user_key = self.config.key_layout.user_key(id_key);
        self.store.write(&user_key, &user_bytes)?;

        // Phase 2: hash index
        let index_key = self.config.key_layout.index_key(&hash);
        if let Err(source) = self.store.write(&index_key, &index_bytes) {
            tracing::warn!(id_key, hash = %hash, error = %source, "Index write failed after user write");
            return Err(LedgerError::PartialAppend {
                id_key: id_key.to_string(),
                hash,
                source,
            });
        }

        tracing::info!(id_key, hash = %hash, count = user.transactions.len(), "Appended transaction");
        Ok(user)
    }

    fn read_record<T: Record>(&self, key: &[u8]) -> LedgerResult<Option<T>> {
        let Some(bytes) = self.store.read(key)? else {
            return Ok(None);
        };

        codec::decode(&bytes)
            .map(Some)
            .map_err(|source| LedgerError::Decode {
                key: String::from_utf8_lossy(key).into_owned(),
                source,
            })
    }

    fn write_record<T: Record>(&mut self, key: &[u8], record: &T) -> LedgerResult<()> {
        let bytes = codec::encode(record)?;
        self.store.write(key, &bytes)?;
        tracing::debug!(key = %String::from_utf8_lossy(key), kind = T::KIND, "Wrote record");
        Ok(())
    }
}
