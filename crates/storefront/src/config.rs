//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to local-development defaults:
//!
//! - `VOLTIO_DATABASE_URL` - `SQLite` connection string (default: `sqlite://voltio.db`)
//! - `VOLTIO_HOST` - Bind address (default: 127.0.0.1)
//! - `VOLTIO_PORT` - Listen port (default: 3000)
//! - `VOLTIO_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `VOLTIO_MAX_PRICE_FLOOR` - Lower bound, in cents, for the price input
//!   shown on the listing page (default: 5000000, i.e. $50,000.00)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

use voltio_core::Price;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// `SQLite` database connection URL
    pub database_url: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Display floor for the listing page's maximum-price affordance.
    ///
    /// Purely a presentation convenience: when the catalog is empty or its
    /// true maximum is below this floor, the slider still shows the floor.
    pub max_price_floor: Price,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_env_or_default("VOLTIO_DATABASE_URL", "sqlite://voltio.db");
        let host = get_env_or_default("VOLTIO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLTIO_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VOLTIO_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VOLTIO_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("VOLTIO_BASE_URL", "http://localhost:3000");
        let max_price_floor = get_env_or_default("VOLTIO_MAX_PRICE_FLOOR", "5000000")
            .parse::<i64>()
            .map(Price::from_cents)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VOLTIO_MAX_PRICE_FLOOR".to_string(), e.to_string())
            })?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            max_price_floor,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            database_url: "sqlite://voltio.db".to_string(),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            max_price_floor: Price::from_cents(5_000_000),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("VOLTIO_TEST_UNSET_VARIABLE", "fallback"),
            "fallback"
        );
    }
}
