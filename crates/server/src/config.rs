//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KABELINDO_DATABASE_URL` - `PostgreSQL` connection string
//! - `KABELINDO_BASE_URL` - Public URL for the storefront
//!
//! ## Optional
//! - `KABELINDO_HOST` - Bind address (default: 127.0.0.1)
//! - `KABELINDO_PORT` - Listen port (default: 3000)
//! - `KABELINDO_BANK_NAME` - Bank for transfer payments (default: Bank Nusantara)
//! - `KABELINDO_BANK_ACCOUNT_NUMBER` - Transfer destination account
//! - `KABELINDO_BANK_ACCOUNT_NAME` - Transfer destination account holder
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_SECRET_LENGTH: usize = 16;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "fixme",
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Bank transfer destination shown in payment instructions
    pub bank: BankConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. production, staging)
    pub sentry_environment: Option<String>,
}

/// Bank account shown to customers paying by transfer.
#[derive(Debug, Clone)]
pub struct BankConfig {
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if the database URL looks like an unfilled placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_validated_secret("KABELINDO_DATABASE_URL")?;
        let host = get_env_or_default("KABELINDO_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KABELINDO_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("KABELINDO_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("KABELINDO_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("KABELINDO_BASE_URL")?;

        let bank = BankConfig {
            bank_name: get_env_or_default("KABELINDO_BANK_NAME", "Bank Nusantara"),
            account_number: get_env_or_default("KABELINDO_BANK_ACCOUNT_NUMBER", "1234567890"),
            account_name: get_env_or_default("KABELINDO_BANK_ACCOUNT_NAME", "PT Kabelindo Jaya"),
        };

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            bank,
            sentry_dsn,
            sentry_environment,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn get_required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn get_env_or_default(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Read a secret env var and reject obviously unfilled values.
fn get_validated_secret(name: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(name)?;

    if value.len() < MIN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_string(),
            format!("must be at least {MIN_SECRET_LENGTH} characters"),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                name.to_string(),
                format!("contains placeholder pattern '{pattern}'"),
            ));
        }
    }

    Ok(SecretString::from(value))
}

#[cfg(test)]
// set_var is unsafe since Rust 2024; these tests use unique var names and
// never read them concurrently.
#[allow(unsafe_code)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_secret_rejected() {
        unsafe {
            std::env::set_var("TEST_SECRET_PLACEHOLDER", "your-database-url-here");
        }
        assert!(matches!(
            get_validated_secret("TEST_SECRET_PLACEHOLDER"),
            Err(ConfigError::InsecureSecret(..))
        ));
    }

    #[test]
    fn test_short_secret_rejected() {
        unsafe {
            std::env::set_var("TEST_SECRET_SHORT", "abc");
        }
        assert!(matches!(
            get_validated_secret("TEST_SECRET_SHORT"),
            Err(ConfigError::InsecureSecret(..))
        ));
    }

    #[test]
    fn test_missing_env_var() {
        assert!(matches!(
            get_required_env("TEST_DOES_NOT_EXIST"),
            Err(ConfigError::MissingEnvVar(_))
        ));
    }
}
