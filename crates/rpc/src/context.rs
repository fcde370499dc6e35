//! Application context - wires the file store, config and ledger together

use crate::dispatch;
use crate::error::RpcError;
use crate::response::Response;
use std::path::{Path, PathBuf};
use userledger_ledger::{ConfigError, Ledger, LedgerConfig};
use userledger_store::FileStore;

/// Load ledger configuration: JSON file if given, then environment overrides
pub fn load_config(path: Option<&Path>) -> Result<LedgerConfig, ConfigError> {
    let config = match path {
        Some(path) => LedgerConfig::from_file(path)?,
        None => LedgerConfig::default(),
    };
    config.with_env_overrides()
}

/// Application context - a ledger over the data directory's file store
pub struct AppContext {
    ledger: Ledger<FileStore>,
    data_path: PathBuf,
}

impl AppContext {
    /// Open the ledger stored under `data_path`
    pub fn new(data_path: impl AsRef<Path>, config: LedgerConfig) -> Result<Self, anyhow::Error> {
        let data_path = data_path.as_ref().to_path_buf();
        let store = FileStore::open(&data_path)?;

        tracing::info!(
            path = %data_path.display(),
            log = %store.path().display(),
            replayed = store.replayed(),
            key_layout = %config.key_layout,
            scan_policy = %config.scan_policy,
            "Opened ledger"
        );

        Ok(Self {
            ledger: Ledger::with_config(store, config),
            data_path,
        })
    }

    /// Run one named operation
    pub fn invoke<A: AsRef<str>>(&mut self, name: &str, args: &[A]) -> Result<Response, RpcError> {
        dispatch::invoke(&mut self.ledger, name, args)
    }

    pub fn ledger(&self) -> &Ledger<FileStore> {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger<FileStore> {
        &mut self.ledger
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Number of writes recorded in the store's log
    pub fn last_sequence(&self) -> u64 {
        self.ledger.store().last_seq()
    }
}
