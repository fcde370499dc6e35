//! Integration tests for the ledger access layer
//!
//! Covers user lifecycle, transaction append, hash index consistency and the
//! behaviour of listing when index entries share the keyspace.

use tempfile::TempDir;
use userledger_core::{HashIndexEntry, Transaction, User};
use userledger_ledger::{
    GapKind, KeyLayout, Ledger, LedgerConfig, LedgerError, ScanPolicy,
};
use userledger_store::{FileStore, KeyValueStore, KvEntry, MemoryStore, StoreError};

fn user1() -> User {
    User::new("A222333444", "New John Lee", "AAAA@bbb.com")
}

fn user2() -> User {
    User::new("B444555666", "Benny Cheng", "CCCCC@bbb.com")
}

fn transaction1() -> Transaction {
    Transaction::new("0x000000001", "200", "USD", "1735349527123456789")
}

fn transaction2() -> Transaction {
    Transaction::new("0x000000002", "300", "NTD", "1735349527123456789")
}

fn transaction3() -> Transaction {
    Transaction::new("0x000000003", "600", "GBP", "1735349527123456789")
}

fn create(ledger: &mut Ledger<impl KeyValueStore>, user: &User) {
    ledger
        .create_user(&user.id_key, &user.name, &user.email)
        .unwrap();
}

/// Store that fails the N-th write (1-based) and counts every write attempt
struct FailingStore {
    inner: MemoryStore,
    fail_on: usize,
    writes: usize,
}

impl FailingStore {
    fn failing_on(fail_on: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on,
            writes: 0,
        }
    }
}

impl KeyValueStore for FailingStore {
    fn read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.writes += 1;
        if self.writes == self.fail_on {
            return Err(StoreError::Backend("injected write failure".to_string()));
        }
        self.inner.write(key, value)
    }

    fn scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<KvEntry>, StoreError> {
        self.inner.scan(start, end)
    }
}

/// Store whose every read fails
struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn read(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }

    fn write(&mut self, _key: &[u8], _value: &[u8]) -> Result<(), StoreError> {
        Ok(())
    }

    fn scan(&self, _start: &[u8], _end: &[u8]) -> Result<Vec<KvEntry>, StoreError> {
        Err(StoreError::Backend("disk on fire".to_string()))
    }
}

#[test]
fn test_never_created_user() {
    let ledger = Ledger::new(MemoryStore::new());

    for key in ["A222333444", "", "0x000000001"] {
        assert!(!ledger.user_exists(key).unwrap());
        assert!(matches!(
            ledger.get_user(key),
            Err(LedgerError::NotFound { kind: "user", .. })
        ));
    }
}

#[test]
fn test_create_user_twice_fails_and_keeps_original() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());

    let err = ledger
        .create_user(&user1().id_key, "Someone Else", "else@bbb.com")
        .unwrap_err();

    assert!(err.is_already_exists());
    assert_eq!(err.to_string(), "The user A222333444 already exists");
    assert_eq!(ledger.get_user(&user1().id_key).unwrap(), user1());
}

#[test]
fn test_update_user_replaces_profile_only() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());
    ledger
        .append_transaction(&user1().id_key, transaction1())
        .unwrap();

    ledger
        .update_user(&user1().id_key, "Ariel AAA", "IhaveChanged@com")
        .unwrap();

    let user = ledger.get_user(&user1().id_key).unwrap();
    assert_eq!(user.id_key, user1().id_key);
    assert_eq!(user.name, "Ariel AAA");
    assert_eq!(user.email, "IhaveChanged@com");
    assert_eq!(user.transactions, vec![transaction1()]);
}

#[test]
fn test_append_grows_history_by_one_at_the_end() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());

    let expected = [transaction1(), transaction2(), transaction3()];
    for (count, transaction) in expected.iter().enumerate() {
        let before = ledger.get_user(&user1().id_key).unwrap().transactions.len();
        ledger
            .append_transaction(&user1().id_key, transaction.clone())
            .unwrap();

        let after = ledger.get_user(&user1().id_key).unwrap();
        assert_eq!(after.transactions.len(), before + 1);
        assert_eq!(after.transactions.last(), Some(transaction));
        assert_eq!(after.transactions.len(), count + 1);
    }

    assert_eq!(ledger.get_user(&user1().id_key).unwrap().transactions, expected.to_vec());
}

#[test]
fn test_append_to_absent_user() {
    let mut ledger = Ledger::new(MemoryStore::new());
    let err = ledger
        .append_transaction("nobody", transaction1())
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(!ledger.store().contains(b"0x000000001").unwrap());
}

#[test]
fn test_every_appended_hash_is_indexed_to_owner() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());
    create(&mut ledger, &user2());
    ledger.append_transaction(&user1().id_key, transaction1()).unwrap();
    ledger.append_transaction(&user2().id_key, transaction2()).unwrap();

    for (hash, owner) in [("0x000000001", user1()), ("0x000000002", user2())] {
        let raw = ledger.store().read(hash.as_bytes()).unwrap().unwrap();
        let entry: HashIndexEntry = userledger_core::decode(&raw).unwrap();
        assert_eq!(entry.id_key, owner.id_key);

        // The hash lookup yields the index entry in user shape
        let by_hash = ledger.get_user_by_transaction_hash(hash).unwrap();
        assert_eq!(by_hash, User::new(owner.id_key.as_str(), "", ""));

        // The joined lookup yields the real owner
        let resolved = ledger.resolve_transaction_owner(hash).unwrap();
        assert_eq!(resolved.name, owner.name);
    }

    assert!(ledger.index_gaps().unwrap().is_empty());
}

#[test]
fn test_unknown_hash_is_not_found() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());
    ledger.append_transaction(&user1().id_key, transaction1()).unwrap();

    let err = ledger.get_user_by_transaction_hash("AABBCCD").unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "The transaction hash AABBCCD does not exist");
}

#[test]
fn test_list_users_skips_index_entries() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());
    create(&mut ledger, &user2());
    for transaction in [transaction1(), transaction2(), transaction3()] {
        ledger.append_transaction(&user1().id_key, transaction).unwrap();
    }

    // 2 users + 3 index entries share the keyspace
    assert_eq!(ledger.store().len(), 5);

    let users = ledger.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id_key, user1().id_key);
    assert_eq!(users[0].transactions.len(), 3);
    assert_eq!(users[1].id_key, user2().id_key);
    assert!(users[1].transactions.is_empty());
}

#[test]
fn test_list_users_is_restartable() {
    let mut ledger = Ledger::new(MemoryStore::new());
    create(&mut ledger, &user1());
    ledger.append_transaction(&user1().id_key, transaction1()).unwrap();

    assert_eq!(ledger.list_users().unwrap(), ledger.list_users().unwrap());
}

#[test]
fn test_scan_policy_on_foreign_record() {
    let mut store = MemoryStore::new();
    store.write(b"zz-garbage", b"not json at all").unwrap();

    let mut lenient = Ledger::new(store.clone());
    create(&mut lenient, &user1());
    assert_eq!(lenient.list_users().unwrap().len(), 1);

    let config = LedgerConfig {
        scan_policy: ScanPolicy::Strict,
        ..LedgerConfig::default()
    };
    let mut strict = Ledger::with_config(store, config);
    create(&mut strict, &user1());
    strict.append_transaction(&user1().id_key, transaction1()).unwrap();

    // Index entries are still tolerated; the foreign record is not
    let err = strict.list_users().unwrap_err();
    assert!(matches!(err, LedgerError::Decode { ref key, .. } if key == "zz-garbage"));
}

#[test]
fn test_index_write_failure_leaves_partial_append() {
    // Write 1: create user. Write 2: user with transaction. Write 3: index entry.
    let mut ledger = Ledger::new(FailingStore::failing_on(3));
    create(&mut ledger, &user1());

    let err = ledger
        .append_transaction(&user1().id_key, transaction1())
        .unwrap_err();

    match &err {
        LedgerError::PartialAppend { id_key, hash, .. } => {
            assert_eq!(id_key, "A222333444");
            assert_eq!(hash, "0x000000001");
        }
        other => panic!("expected PartialAppend, got {other:?}"),
    }
    assert!(err.is_store_failure());

    // The user carries the transaction, the hash is not indexed
    let user = ledger.get_user(&user1().id_key).unwrap();
    assert_eq!(user.transactions, vec![transaction1()]);
    assert!(ledger
        .get_user_by_transaction_hash("0x000000001")
        .unwrap_err()
        .is_not_found());

    let gaps = ledger.index_gaps().unwrap();
    assert_eq!(gaps.len(), 1);
    assert_eq!(gaps[0].hash, "0x000000001");
    assert_eq!(gaps[0].kind, GapKind::Missing);
}

#[test]
fn test_user_write_failure_changes_nothing() {
    let mut ledger = Ledger::new(FailingStore::failing_on(2));
    create(&mut ledger, &user1());

    let err = ledger
        .append_transaction(&user1().id_key, transaction1())
        .unwrap_err();

    assert!(matches!(err, LedgerError::Store(StoreError::Backend(_))));
    assert!(ledger.get_user(&user1().id_key).unwrap().transactions.is_empty());
    assert!(!ledger.store().inner.contains(b"0x000000001").unwrap());
}

#[test]
fn test_store_read_failure_propagates() {
    let mut ledger = Ledger::new(UnreadableStore);

    assert!(matches!(ledger.user_exists("A"), Err(LedgerError::Store(_))));
    assert!(matches!(ledger.list_users(), Err(LedgerError::Store(_))));
    assert!(ledger.create_user("A", "a", "a@x").unwrap_err().is_store_failure());
}

#[test]
fn test_prefixed_layout_lists_only_users() {
    let config = LedgerConfig {
        key_layout: KeyLayout::Prefixed,
        scan_policy: ScanPolicy::Strict,
    };
    let mut ledger = Ledger::with_config(MemoryStore::new(), config);
    create(&mut ledger, &user1());
    create(&mut ledger, &user2());
    for transaction in [transaction1(), transaction2(), transaction3()] {
        ledger.append_transaction(&user1().id_key, transaction).unwrap();
    }

    let users = ledger.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(
        ledger.get_user_by_transaction_hash("0x000000002").unwrap().id_key,
        user1().id_key
    );
}

#[test]
fn test_ledger_state_survives_reopen() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let mut ledger = Ledger::new(FileStore::open(temp_dir.path())?);
        create(&mut ledger, &user1());
        ledger.append_transaction(&user1().id_key, transaction1())?;
    }

    let ledger = Ledger::new(FileStore::open(temp_dir.path())?);
    let user = ledger.get_user(&user1().id_key)?;
    assert_eq!(user.transactions, vec![transaction1()]);
    assert_eq!(ledger.list_users()?.len(), 1);
    assert_eq!(
        ledger.get_user_by_transaction_hash("0x000000001")?.id_key,
        user1().id_key
    );

    Ok(())
}
