//! CLI commands

use userledger_core::{classify, StoredRecord, User};

use crate::context::AppContext;
use crate::response::Response;

/// Invoke a named operation and print its raw payload
pub fn invoke_raw(ctx: &mut AppContext, name: &str, args: &[String]) -> Result<(), anyhow::Error> {
    let response = ctx.invoke(name, args)?;
    let payload = response.payload_string()?;
    if !payload.is_empty() {
        println!("{}", payload);
    }
    Ok(())
}

/// Create a user
pub fn create_user(ctx: &mut AppContext, id_key: &str, name: &str, email: &str) -> Result<(), anyhow::Error> {
    ctx.invoke("CreateUser", &[id_key, name, email])?;
    println!("✅ Created user {}", id_key);
    Ok(())
}

/// Show a user and its transactions
pub fn get_user(ctx: &mut AppContext, id_key: &str) -> Result<(), anyhow::Error> {
    if let Response::User(user) = ctx.invoke("GetUserAndTransactions", &[id_key])? {
        print_user(&user);
    }
    Ok(())
}

/// Replace a user's name and email
pub fn update_user(ctx: &mut AppContext, id_key: &str, name: &str, email: &str) -> Result<(), anyhow::Error> {
    ctx.invoke("UpdateUser", &[id_key, name, email])?;
    println!("✅ Updated user {}", id_key);
    Ok(())
}

/// Check whether a user exists
pub fn user_exists(ctx: &mut AppContext, id_key: &str) -> Result<(), anyhow::Error> {
    if let Response::Bool(exists) = ctx.invoke("UserExists", &[id_key])? {
        println!("{}", exists);
    }
    Ok(())
}

/// List all users
pub fn list_users(ctx: &mut AppContext) -> Result<(), anyhow::Error> {
    let Response::Users(users) = ctx.invoke::<&str>("GetUserList", &[])? else {
        return Ok(());
    };

    if users.is_empty() {
        println!("No users found");
        return Ok(());
    }

    println!("Users ({}):", users.len());
    println!("{:-<72}", "");
    println!("{:<16} | {:<20} | {:<24} | {:>4}", "ID", "Name", "Email", "Txs");
    println!("{:-<72}", "");
    for user in &users {
        println!(
            "{:<16} | {:<20} | {:<24} | {:>4}",
            user.id_key,
            user.name,
            user.email,
            user.transactions.len()
        );
    }

    Ok(())
}

/// Append a transaction to a user
pub fn create_transaction(
    ctx: &mut AppContext,
    id_key: &str,
    hash: &str,
    amount: &str,
    currency_type: &str,
    created_at: &str,
) -> Result<(), anyhow::Error> {
    ctx.invoke(
        "CreateTransaction",
        &[id_key, hash, amount, currency_type, created_at],
    )?;
    println!(
        "✅ Recorded {} {} for {} (hash: {})",
        amount, currency_type, id_key, hash
    );
    Ok(())
}

/// Show the user owning a transaction, following the hash index
pub fn tx_owner(ctx: &AppContext, hash: &str) -> Result<(), anyhow::Error> {
    let user = ctx.ledger().resolve_transaction_owner(hash)?;
    print_user(&user);
    Ok(())
}

/// Report transactions whose hash index entry is missing or wrong
pub fn audit(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let gaps = ctx.ledger().index_gaps()?;

    if gaps.is_empty() {
        println!("✅ Hash index consistent");
        return Ok(());
    }

    println!("❌ {} transaction(s) not correctly indexed:", gaps.len());
    for gap in &gaps {
        println!("   {} / {}: {:?}", gap.id_key, gap.hash, gap.kind);
    }
    Ok(())
}

/// Print every stored key with the shape of its value
pub fn dump(ctx: &AppContext) -> Result<(), anyhow::Error> {
    use userledger_store::KeyValueStore;

    let entries = ctx.ledger().store().scan(b"", b"")?;
    for entry in &entries {
        let detail = match classify(&entry.value) {
            StoredRecord::User(user) => format!("user ({} txs)", user.transactions.len()),
            StoredRecord::HashIndex(index) => format!("hash index -> {}", index.id_key),
            StoredRecord::Unknown(err) => format!("unknown ({})", err),
        };
        println!("{:<24} {}", entry.key_str(), detail);
    }
    println!("{} key(s), {} write(s)", entries.len(), ctx.last_sequence());
    Ok(())
}

fn print_user(user: &User) {
    println!("User {}", user.id_key);
    println!("   Name:  {}", user.name);
    println!("   Email: {}", user.email);
    if user.transactions.is_empty() {
        println!("   No transactions");
        return;
    }
    println!("   Transactions ({}):", user.transactions.len());
    for tx in &user.transactions {
        println!(
            "   {:<20} {:>12} {:<6} {}",
            tx.hash, tx.amount, tx.currency_type, tx.create_at
        );
    }
}
