//! User - Identity record with embedded transaction history
//!
//! A user is stored under its identity key. Transactions are only ever
//! appended; name and email are the only mutable fields.

use serde::{Deserialize, Serialize};

/// A single transaction owned by exactly one user.
///
/// All fields are caller-supplied text. `amount` is a decimal rendered as a
/// string and is never parsed; `create_at` is an opaque timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    /// Hash, unique across the whole ledger
    pub hash: String,

    /// Decimal amount as text
    pub amount: String,

    /// Currency code (free text: USD, NTD, GBP, ...)
    pub currency_type: String,

    /// Creation timestamp supplied by the caller
    pub create_at: String,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        hash: impl Into<String>,
        amount: impl Into<String>,
        currency_type: impl Into<String>,
        create_at: impl Into<String>,
    ) -> Self {
        Self {
            hash: hash.into(),
            amount: amount.into(),
            currency_type: currency_type.into(),
            create_at: create_at.into(),
        }
    }
}

/// A ledger user.
///
/// # Wire format
/// ```json
/// {"id_key":"A222333444","name":"John","email":"a@b.com","transactions":[...]}
/// ```
/// `transactions` is omitted while empty and defaults to empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Identity key, also the user's store key
    pub id_key: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Transactions in insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<Transaction>,
}

impl User {
    /// Create a user with an empty transaction history
    pub fn new(id_key: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id_key: id_key.into(),
            name: name.into(),
            email: email.into(),
            transactions: Vec::new(),
        }
    }

    /// Replace name and email, leaving the history untouched
    pub fn update_profile(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
    }

    /// Append a transaction at the end of the history
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }
}
