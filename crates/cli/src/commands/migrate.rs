//! Database migration command.
//!
//! Runs the storefront's embedded migrations against `VOLTIO_DATABASE_URL`,
//! creating the database file on first run.

use sqlx::migrate::Migrator;

use voltio_storefront::db;

static MIGRATOR: Migrator = sqlx::migrate!("../storefront/migrations");

/// Errors raised while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database cannot be opened or a migration
/// fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = super::database_url();

    tracing::info!("Connecting to {database_url}");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
