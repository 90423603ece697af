//! Voltio CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the schema (and the database file, if missing)
//! voltio-cli migrate
//!
//! # Load the demo catalog, inventory and staff accounts
//! voltio-cli seed
//!
//! # Create a staff account
//! voltio-cli staff create -u cajero2 -p secret -n "Counter Clerk 2" -r cashier
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with the demo data set
//! - `staff create` - Create staff accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "voltio-cli")]
#[command(author, version, about = "Voltio CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with the demo catalog and staff accounts
    Seed {
        /// Seed products and inventory only, skipping the demo staff
        #[arg(long)]
        skip_staff: bool,
    },
    /// Manage staff accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
}

#[derive(Subcommand)]
enum StaffAction {
    /// Create a new staff account
    Create {
        /// Login name (unique)
        #[arg(short, long)]
        username: String,

        /// Password (hashed with argon2 before storage)
        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Staff role (`admin`, `manager`, `clerk`, `cashier`, `guest`)
        #[arg(short, long, default_value = "clerk")]
        role: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { skip_staff } => commands::seed::run(skip_staff).await?,
        Commands::Staff { action } => match action {
            StaffAction::Create {
                username,
                password,
                name,
                role,
            } => {
                commands::staff::create(&username, &password, &name, &role).await?;
            }
        },
    }
    Ok(())
}
