//! UserLedger CLI - Main entry point

use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use userledger_rpc::{commands, load_config, AppContext};

#[derive(Parser)]
#[command(name = "userledger")]
#[command(about = "UserLedger - users and their transactions over a key-value ledger", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    /// Ledger config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a named operation with positional arguments, printing the payload
    Invoke {
        /// Operation name (e.g. CreateUser, GetUserList)
        operation: String,
        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Create a user
    CreateUser {
        /// Identity key
        id_key: String,
        /// Display name
        name: String,
        /// Email
        email: String,
    },

    /// Show a user and its transactions
    GetUser {
        /// Identity key
        id_key: String,
    },

    /// Replace a user's name and email
    UpdateUser {
        /// Identity key
        id_key: String,
        /// New display name
        name: String,
        /// New email
        email: String,
    },

    /// Check whether a user exists
    UserExists {
        /// Identity key
        id_key: String,
    },

    /// List all users
    ListUsers,

    /// Append a transaction to a user
    CreateTransaction {
        /// Identity key of the owner
        id_key: String,
        /// Transaction hash
        hash: String,
        /// Amount (decimal text)
        amount: String,
        /// Currency code
        currency_type: String,
        /// Creation timestamp (defaults to now, in Unix nanoseconds)
        #[arg(long)]
        created_at: Option<String>,
    },

    /// Show the user owning a transaction hash
    TxOwner {
        /// Transaction hash
        hash: String,
    },

    /// Audit the hash index against users' transactions
    Audit,

    /// Print every stored key and the shape of its value
    Dump,
}

fn now_nanos() -> String {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .map(|nanos| nanos.to_string())
        .unwrap_or_else(|| now.timestamp().to_string())
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so payloads on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let mut ctx = AppContext::new(&cli.data, config)?;

    match cli.command {
        Commands::Invoke { operation, args } => {
            commands::invoke_raw(&mut ctx, &operation, &args)?;
        }

        Commands::CreateUser {
            id_key,
            name,
            email,
        } => {
            commands::create_user(&mut ctx, &id_key, &name, &email)?;
        }

        Commands::GetUser { id_key } => {
            commands::get_user(&mut ctx, &id_key)?;
        }

        Commands::UpdateUser {
            id_key,
            name,
            email,
        } => {
            commands::update_user(&mut ctx, &id_key, &name, &email)?;
        }

        Commands::UserExists { id_key } => {
            commands::user_exists(&mut ctx, &id_key)?;
        }

        Commands::ListUsers => {
            commands::list_users(&mut ctx)?;
        }

        Commands::CreateTransaction {
            id_key,
            hash,
            amount,
            currency_type,
            created_at,
        } => {
            let created_at = created_at.unwrap_or_else(now_nanos);
            commands::create_transaction(
                &mut ctx,
                &id_key,
                &hash,
                &amount,
                &currency_type,
                &created_at,
            )?;
        }

        Commands::TxOwner { hash } => {
            commands::tx_owner(&ctx, &hash)?;
        }

        Commands::Audit => {
            commands::audit(&ctx)?;
        }

        Commands::Dump => {
            commands::dump(&ctx)?;
        }
    }

    Ok(())
}
