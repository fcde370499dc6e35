//! Dispatcher - one named invocation against the ledger

use crate::error::RpcError;
use crate::operation::Operation;
use crate::response::Response;
use userledger_core::Transaction;
use userledger_ledger::Ledger;
use userledger_store::KeyValueStore;
use uuid::Uuid;

/// Run one operation by name with positional string arguments.
///
/// The invocation is synchronous and runs inside a tracing span carrying a
/// fresh invocation id. Errors are returned, never retried.
pub fn invoke<S, A>(ledger: &mut Ledger<S>, name: &str, args: &[A]) -> Result<Response, RpcError>
where
    S: KeyValueStore,
    A: AsRef<str>,
{
    let op = Operation::from_name(name)?;
    op.check_arity(args.len())?;

    let invocation_id = Uuid::new_v4();
    let span = tracing::info_span!("invoke", %invocation_id, op = op.name());
    let _guard = span.enter();

    let arg = |i: usize| args[i].as_ref();

    let result = match op {
        Operation::InitLedger => Ok(Response::Unit),
        Operation::UserExists => ledger.user_exists(arg(0)).map(Response::Bool),
        Operation::GetUserList => ledger.list_users().map(Response::Users),
        Operation::CreateUser => ledger
            .create_user(arg(0), arg(1), arg(2))
            .map(|_| Response::Unit),
        Operation::GetUserAndTransactions => ledger.get_user(arg(0)).map(Response::User),
        Operation::UpdateUser => ledger
            .update_user(arg(0), arg(1), arg(2))
            .map(|_| Response::Unit),
        Operation::TransactionHashExist => ledger
            .get_user_by_transaction_hash(arg(0))
            .map(Response::User),
        Operation::CreateTransaction => {
            let transaction = Transaction::new(arg(1), arg(2), arg(3), arg(4));
            ledger
                .append_transaction(arg(0), transaction)
                .map(|_| Response::Bool(true))
        }
    };

    match result {
        Ok(response) => {
            tracing::debug!("Invocation succeeded");
            Ok(response)
        }
        Err(err) => {
            tracing::debug!(error = %err, "Invocation failed");
            Err(err.into())
        }
    }
}
