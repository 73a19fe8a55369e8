//! Request Pro CLI
//!
//! Non-interactive maintenance commands over the request store:
//! - Inspect accounts and requests
//! - Create and verify accounts
//! - Change request status
//! - Export the stored data

use anyhow::Context;
use clap::{Parser, Subcommand};
use request_pro::storage::{Account, RequestStatus, Role, Store};
use request_pro::view::render_admin;
use request_pro::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "request-pro-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Maintenance commands for the Request Pro store")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory (overrides config and REQUEST_PRO_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show store counters
    Status,

    /// List accounts
    Accounts,

    /// Create an account
    AddAccount {
        first: String,
        last: String,
        email: String,
        password: String,
        /// Give the account the admin role
        #[arg(long)]
        admin: bool,
        /// Mark the account as verified so it can log in
        #[arg(long)]
        verified: bool,
    },

    /// Mark an account as verified
    Verify {
        email: String,
    },

    /// List requests, optionally filtered by owner email
    Requests {
        /// Case-insensitive email substring
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Change the status of a request
    SetStatus {
        id: i64,
        /// Pending, Approved, Rejected or any other label
        status: String,
    },

    /// Export the stored data as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_default();
    if let Some(data_dir) = cli.data_dir.clone() {
        config.storage.data_dir = data_dir;
    }
    request_pro::logging::init(&config.logging);

    if let Commands::Config { output } = &cli.command {
        let content = request_pro::config::generate_default_config();
        match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &content)?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut store = config
        .storage
        .open_store()
        .with_context(|| format!("failed to open store in {}", config.storage.data_dir))?;

    let json = cli.format == "json";

    match cli.command {
        Commands::Status => {
            let stats = store.stats();
            if json {
                let body = serde_json::json!({
                    "store": config.storage.blob_path(),
                    "accounts": stats.accounts,
                    "verified_accounts": stats.verified_accounts,
                    "requests": stats.requests,
                    "by_status": stats.by_status,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("Request Pro v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Store: {:?}", config.storage.blob_path());
                println!("  Accounts: {} ({} verified)", stats.accounts, stats.verified_accounts);
                println!("  Requests: {}", stats.requests);
                for (status, count) in &stats.by_status {
                    println!("    {:<12} {}", status, count);
                }
            }
        }

        Commands::Accounts => print_accounts(&store, json)?,

        Commands::AddAccount {
            first,
            last,
            email,
            password,
            admin,
            verified,
        } => {
            if store.find_account(&email).is_some() {
                eprintln!("Warning: an account with email {} already exists", email);
            }
            let role = if admin { Role::Admin } else { Role::User };
            store.add_account(
                Account::new(first, last, email.clone(), password)
                    .role(role)
                    .verified(verified),
            )?;
            println!("Added {} account {}", role, email);
        }

        Commands::Verify { email } => {
            store.set_verified(&email, true)?;
            println!("Verified {}", email);
        }

        Commands::Requests { query } => {
            let view = render_admin(&store, &query);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if view.rows.is_empty() {
                println!("No matching requests.");
            } else {
                println!(
                    "{:<15} {:<24} {:<14} {:<10} {}",
                    "ID", "Email", "Type", "Status", "Items"
                );
                println!("{}", "-".repeat(90));
                for row in view.rows {
                    println!(
                        "{:<15} {:<24} {:<14} {:<10} {}",
                        row.id, row.email, row.kind, row.badge.label, row.summary
                    );
                }
            }
        }

        Commands::SetStatus { id, status } => {
            let status = RequestStatus::from(status);
            store.set_status(id, status.clone())?;
            println!("Request {} is now {}", id, status);
        }

        Commands::Export { output } => {
            let data = serde_json::to_string_pretty(store.data())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Exported to {:?}", path);
                }
                None => println!("{}", data),
            }
        }

        // Handled before the store is opened
        Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_accounts(store: &Store, json: bool) -> anyhow::Result<()> {
    if json {
        // Passwords stay out of listings
        let accounts: Vec<serde_json::Value> = store
            .accounts()
            .iter()
            .map(|a| {
                serde_json::json!({
                    "first": a.first,
                    "last": a.last,
                    "email": a.email,
                    "role": a.role,
                    "verified": a.verified,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    println!("{:<30} {:<24} {:<6} {}", "Email", "Name", "Role", "Verified");
    println!("{}", "-".repeat(72));
    for account in store.accounts() {
        println!(
            "{:<30} {:<24} {:<6} {}",
            account.email,
            account.full_name(),
            account.role.to_string(),
            if account.verified { "yes" } else { "no" }
        );
    }
    Ok(())
}
