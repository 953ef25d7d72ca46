//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface the listener binds to
    pub host: String,
    /// HTTP server port
    pub server_port: u16,
    /// Number of pairs returned by List when the request carries no limit
    pub default_list_limit: i32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `KV_HOST` - Bind address (default: 0.0.0.0)
    /// - `KV_PORT` - HTTP server port (default: 9090)
    /// - `KV_DEFAULT_LIST_LIMIT` - List limit when none is given (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("KV_HOST").unwrap_or(defaults.host),
            server_port: env::var("KV_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.server_port),
            default_list_limit: env::var("KV_DEFAULT_LIST_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|limit: &i32| *limit >= 0)
                .unwrap_or(defaults.default_list_limit),
        }
    }

    /// Returns the `host:port` string the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.server_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            server_port: 9090,
            default_list_limit: 1000,
        }
    }
}
