//! Entry point errors

use thiserror::Error;
use userledger_ledger::LedgerError;

/// Errors returned to the caller of an operation
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("{op} expects {expected} argument(s), got {actual}")]
    Arity {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
