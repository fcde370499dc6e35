//! Named operations exposed by the entry point

use crate::error::RpcError;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Operations callable by name. The name is the variant name verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
pub enum Operation {
    /// No-op, kept for callers that initialise the ledger first
    InitLedger,
    /// `identityKey` -> bool
    UserExists,
    /// -> every user
    GetUserList,
    /// `identityKey, name, email`
    CreateUser,
    /// `identityKey` -> user with history
    GetUserAndTransactions,
    /// `identityKey, name, email`
    UpdateUser,
    /// `hash` -> record under the hash, in user shape
    TransactionHashExist,
    /// `identityKey, hash, amount, currencyType, createdAt` -> bool
    CreateTransaction,
}

impl Operation {
    /// Parse an operation name
    pub fn from_name(name: &str) -> Result<Self, RpcError> {
        name.parse()
            .map_err(|_| RpcError::UnknownOperation(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Number of positional arguments the operation takes
    pub fn arity(&self) -> usize {
        match self {
            Operation::InitLedger | Operation::GetUserList => 0,
            Operation::UserExists
            | Operation::GetUserAndTransactions
            | Operation::TransactionHashExist => 1,
            Operation::CreateUser | Operation::UpdateUser => 3,
            Operation::CreateTransaction => 5,
        }
    }

    pub fn check_arity(&self, actual: usize) -> Result<(), RpcError> {
        if actual == self.arity() {
            Ok(())
        } else {
            Err(RpcError::Arity {
                op: self.name(),
                expected: self.arity(),
                actual,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_names() {
        assert_eq!(Operation::from_name("CreateUser").unwrap(), Operation::CreateUser);
        assert_eq!(
            Operation::from_name("TransactionHashExist").unwrap(),
            Operation::TransactionHashExist
        );
        assert_eq!(Operation::CreateTransaction.to_string(), "CreateTransaction");
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(matches!(
            Operation::from_name("createuser"),
            Err(RpcError::UnknownOperation(_))
        ));
    }

    #[test]
    fn test_arity() {
        assert!(Operation::InitLedger.check_arity(0).is_ok());
        assert!(Operation::CreateTransaction.check_arity(5).is_ok());

        let err = Operation::CreateUser.check_arity(2).unwrap_err();
        assert_eq!(err.to_string(), "CreateUser expects 3 argument(s), got 2");
    }

    #[test]
    fn test_every_operation_round_trips_its_name() {
        assert_eq!(Operation::iter().count(), 8);
        for op in Operation::iter() {
            assert_eq!(Operation::from_name(op.name()).unwrap(), op);
        }
    }
}
