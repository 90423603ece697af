//! Database operations for the storefront `SQLite` store.
//!
//! # Tables
//!
//! - `product` - Catalog records (name, brand, type, price, availability)
//! - `inventory` - Per-location stock rows; aggregate stock is their sum
//! - `staff` - Back-office accounts and password hashes
//! - `tower_sessions` - Session storage (created by the session store itself)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p voltio-cli -- migrate
//! ```

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub mod filter;
pub mod products;
pub mod staff;

pub use filter::ProductFilter;
pub use products::ProductRepository;
pub use staff::StaffRepository;

/// Errors raised by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A row violated an invariant the schema cannot express.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Unique-constraint conflict on insert.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created on first connection, matching the
/// bootstrap-on-first-run behavior the CLI's `migrate` command relies on.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}
