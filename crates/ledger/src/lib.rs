//! UserLedger Ledger - Data access and indexing
//!
//! All reads and writes of ledger state go through [`Ledger`]. It keeps two
//! record families in one ordered keyspace:
//! - users, keyed by identity key, each embedding its transaction history
//! - hash index entries, keyed by transaction hash, naming the owning user
//!
//! # Key Types
//! - `Ledger`: access layer over any `KeyValueStore`
//! - `LedgerConfig`: key layout and list-scan policy
//! - `LedgerError`: NotFound / AlreadyExists / Decode / Store / PartialAppend

pub mod audit;
pub mod config;
pub mod error;
pub mod keys;
pub mod ledger;

pub use audit::{GapKind, IndexGap};
pub use config::{ConfigError, KeyLayout, LedgerConfig, ScanPolicy};
pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
