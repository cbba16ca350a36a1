use std::{env, str::FromStr, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "postboard.db")
    pub sqlite_path: String,
    /// Maximum pooled SQLite connections (default: 5)
    pub sqlite_max_connections: u32,
    /// Seconds to wait for a pooled connection (default: 5)
    pub sqlite_acquire_timeout_seconds: u64,
    /// Seconds before an HTTP request is abandoned (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "postboard.db")
    /// - `SQLITE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `SQLITE_ACQUIRE_TIMEOUT_SECONDS` - Pool acquire timeout (default: 5)
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request timeout (default: 10)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "postboard.db".to_string()),
            sqlite_max_connections: parse_or(lookup("SQLITE_MAX_CONNECTIONS"), 5),
            sqlite_acquire_timeout_seconds: parse_or(lookup("SQLITE_ACQUIRE_TIMEOUT_SECONDS"), 5),
            request_timeout_seconds: parse_or(lookup("REQUEST_TIMEOUT_SECONDS"), 10),
        }
    }

    /// Get the pool acquire timeout as a Duration.
    pub fn sqlite_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.sqlite_acquire_timeout_seconds)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}
