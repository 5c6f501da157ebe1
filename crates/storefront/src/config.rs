//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_SEED_CATALOG` - Load the bundled catalog at startup (default: true)
//! - `STOREFRONT_ORDER_TRANSITIONS` - `permissive` or `strict` (default: permissive)
//! - `STOREFRONT_ORDER_TOTALS` - `trusted` or `verify` (default: trusted)
//! - `STOREFRONT_TOTAL_TOLERANCE` - Allowed total drift in verify mode (default: 0.01)
//! - `STOREFRONT_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::services::{TotalPolicy, TransitionPolicy};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Load the bundled catalog into the product repository at startup
    pub seed_catalog: bool,
    /// How order status updates are checked
    pub transitions: TransitionPolicy,
    /// Whether submitted order totals are trusted or recomputed
    pub totals: TotalPolicy,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            seed_catalog: true,
            transitions: TransitionPolicy::default(),
            totals: TotalPolicy::default(),
            log_format: LogFormat::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = parse_or("STOREFRONT_HOST", &lookup, defaults.host)?;
        let port = parse_or("STOREFRONT_PORT", &lookup, defaults.port)?;
        let seed_catalog = match lookup("STOREFRONT_SEED_CATALOG") {
            Some(value) => parse_bool("STOREFRONT_SEED_CATALOG", &value)?,
            None => defaults.seed_catalog,
        };

        let transitions = match lookup("STOREFRONT_ORDER_TRANSITIONS").as_deref() {
            None | Some("permissive") => TransitionPolicy::Permissive,
            Some("strict") => TransitionPolicy::Strict,
            Some(other) => {
                return Err(invalid(
                    "STOREFRONT_ORDER_TRANSITIONS",
                    format!("expected 'permissive' or 'strict', got '{other}'"),
                ));
            }
        };

        let totals = match lookup("STOREFRONT_ORDER_TOTALS").as_deref() {
            None | Some("trusted") => TotalPolicy::Trusted,
            Some("verify") => TotalPolicy::Verify {
                tolerance: parse_or(
                    "STOREFRONT_TOTAL_TOLERANCE",
                    &lookup,
                    TotalPolicy::DEFAULT_TOLERANCE,
                )?,
            },
            Some(other) => {
                return Err(invalid(
                    "STOREFRONT_ORDER_TOTALS",
                    format!("expected 'trusted' or 'verify', got '{other}'"),
                ));
            }
        };
        if let TotalPolicy::Verify { tolerance } = totals
            && tolerance < Decimal::ZERO
        {
            return Err(invalid(
                "STOREFRONT_TOTAL_TOLERANCE",
                "must not be negative".to_string(),
            ));
        }

        let log_format = match lookup("STOREFRONT_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(invalid(
                    "STOREFRONT_LOG_FORMAT",
                    format!("expected 'text' or 'json', got '{other}'"),
                ));
            }
        };

        Ok(Self {
            host,
            port,
            seed_catalog,
            transitions,
            totals,
            log_format,
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or(
                "SENTRY_SAMPLE_RATE",
                &lookup,
                defaults.sentry_sample_rate,
            )?,
            sentry_traces_sample_rate: parse_or(
                "SENTRY_TRACES_SAMPLE_RATE",
                &lookup,
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: String) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason)
}

/// Parse a variable if set, otherwise fall back to `default`.
fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value.trim().parse::<T>().map_err(|e| invalid(key, e.to_string()))
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(invalid(key, format!("expected a boolean, got '{other}'"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.seed_catalog);
        assert_eq!(config.transitions, TransitionPolicy::Permissive);
        assert_eq!(config.totals, TotalPolicy::Trusted);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[("STOREFRONT_HOST", "0.0.0.0"), ("STOREFRONT_PORT", "8080")]).unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_strict_verify_mode() {
        let config = load(&[
            ("STOREFRONT_ORDER_TRANSITIONS", "strict"),
            ("STOREFRONT_ORDER_TOTALS", "verify"),
            ("STOREFRONT_TOTAL_TOLERANCE", "0.5"),
        ])
        .unwrap();
        assert_eq!(config.transitions, TransitionPolicy::Strict);
        assert_eq!(
            config.totals,
            TotalPolicy::Verify {
                tolerance: Decimal::new(5, 1)
            }
        );
    }

    #[test]
    fn test_verify_default_tolerance() {
        let config = load(&[("STOREFRONT_ORDER_TOTALS", "verify")]).unwrap();
        assert_eq!(
            config.totals,
            TotalPolicy::Verify {
                tolerance: TotalPolicy::DEFAULT_TOLERANCE
            }
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("STOREFRONT_PORT", "eighty")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "STOREFRONT_PORT"
        ));
        assert!(load(&[("STOREFRONT_ORDER_TRANSITIONS", "lenient")]).is_err());
        assert!(load(&[("STOREFRONT_SEED_CATALOG", "maybe")]).is_err());
        assert!(load(&[
            ("STOREFRONT_ORDER_TOTALS", "verify"),
            ("STOREFRONT_TOTAL_TOLERANCE", "-1")
        ])
        .is_err());
    }

    #[test]
    fn test_seed_flag_and_log_format() {
        let config = load(&[
            ("STOREFRONT_SEED_CATALOG", "false"),
            ("STOREFRONT_LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert!(!config.seed_catalog);
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
