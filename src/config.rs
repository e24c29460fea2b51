//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Default TTL in seconds for memory-tier entries (0 = never expire)
    pub default_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Origin service base URL
    pub origin_base_url: String,
    /// Origin fetch deadline in seconds
    pub origin_timeout: u64,
    /// Durable table service endpoint; memory backend when unset
    pub table_endpoint: Option<String>,
    /// Durable table name
    pub table_name: String,
    /// Durable tier request deadline in seconds
    pub table_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 8080)
    /// - `CACHE_EXPIRATION_SECONDS` - Default TTL in seconds (default: 600)
    /// - `SWEEP_INTERVAL_SECONDS` - Sweep frequency in seconds (default: 300)
    /// - `BACKEND_ENDPOINT` - Origin base URL (default: http://localhost:8081)
    /// - `ORIGIN_TIMEOUT_SECONDS` - Origin fetch deadline (default: 10)
    /// - `TABLE_ENDPOINT` - Table service URL (no default; the in-memory
    ///   durable backend is used when unset)
    /// - `TABLE_NAME` - Table name (default: cache)
    /// - `TABLE_TIMEOUT_SECONDS` - Table request deadline (default: 5)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            default_ttl: env::var("CACHE_EXPIRATION_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
            sweep_interval: env::var("SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            origin_base_url: env::var("BACKEND_ENDPOINT")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            origin_timeout: env::var("ORIGIN_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            table_endpoint: env::var("TABLE_ENDPOINT").ok().filter(|v| !v.is_empty()),
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "cache".to_string()),
            table_timeout: env::var("TABLE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// The default TTL as a Duration; zero disables expiry.
    pub fn default_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            default_ttl: 600,
            sweep_interval: 300,
            origin_base_url: "http://localhost:8081".to_string(),
            origin_timeout: 10,
            table_endpoint: None,
            table_name: "cache".to_string(),
            table_timeout: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_ttl, 600);
        assert_eq!(config.sweep_interval, 300);
        assert_eq!(config.origin_base_url, "http://localhost:8081");
        assert!(config.table_endpoint.is_none());
        assert_eq!(config.table_name, "cache");
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("PORT");
        env::remove_var("CACHE_EXPIRATION_SECONDS");
        env::remove_var("SWEEP_INTERVAL_SECONDS");
        env::remove_var("BACKEND_ENDPOINT");
        env::remove_var("ORIGIN_TIMEOUT_SECONDS");
        env::remove_var("TABLE_ENDPOINT");
        env::remove_var("TABLE_NAME");
        env::remove_var("TABLE_TIMEOUT_SECONDS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.default_ttl, 600);
        assert_eq!(config.origin_timeout, 10);
        assert_eq!(config.table_timeout, 5);
    }

    #[test]
    fn test_default_ttl_duration() {
        let config = Config::default();
        assert_eq!(config.default_ttl_duration(), Duration::from_secs(600));
    }
}
