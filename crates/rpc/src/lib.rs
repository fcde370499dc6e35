//! UserLedger RPC - Entry point
//!
//! Maps named operations with positional string arguments onto the ledger
//! and serializes results into response payloads. Also provides the
//! `userledger` CLI binary.

pub mod commands;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod operation;
pub mod response;

pub use context::{load_config, AppContext};
pub use dispatch::invoke;
pub use error::RpcError;
pub use operation::Operation;
pub use response::Response;
