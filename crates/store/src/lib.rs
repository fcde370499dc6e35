//! UserLedger Store - Ordered key-value capability
//!
//! The ledger never talks to a storage engine directly. It depends on the
//! [`KeyValueStore`] trait, which offers point reads, point writes and
//! lexicographic range scans. Each call is atomic on its own; nothing here
//! makes several calls atomic together.
//!
//! Implementations:
//! - [`MemoryStore`]: `BTreeMap` backed, for tests and embedding
//! - [`FileStore`]: `BTreeMap` rebuilt from an append-only JSONL write log

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, KvEntry};
