//! CLI command implementations.

pub mod migrate;
pub mod seed;
pub mod staff;

/// Database URL from the environment, with the same default the server uses.
pub(crate) fn database_url() -> String {
    dotenvy::dotenv().ok();
    std::env::var("VOLTIO_DATABASE_URL").unwrap_or_else(|_| "sqlite://voltio.db".to_string())
}
