//! UserLedger Core - Record types and codec
//!
//! This crate contains the records persisted in the ledger keyspace:
//! - `User`: identity record with its embedded transaction history
//! - `Transaction`: immutable entry appended to a user's history
//! - `HashIndexEntry`: transaction hash -> owning identity key
//!
//! All records travel through the `codec` module, which fixes the JSON wire
//! format shared with existing ledger state.

pub mod codec;
pub mod error;
pub mod index;
pub mod user;

pub use codec::{classify, decode, decode_user_lenient, encode, Record, StoredRecord};
pub use error::CodecError;
pub use index::HashIndexEntry;
pub use user::{Transaction, User};
