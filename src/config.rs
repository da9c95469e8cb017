//! Configuration module
//!
//! Loads the session credential, endpoint URL and cache/refresh timing
//! parameters from environment variables. Every variable has a default; a
//! missing credential is a warning, never a startup failure, because the
//! system is designed to keep running in a degraded (empty-listing) mode.

use std::env;
use std::time::Duration;

use tracing::warn;

/// Default order endpoint of the hosting provider
pub const DEFAULT_API_URL: &str = "https://my.hostyun.com/idcsystem.aspx";

/// Application configuration parameters
#[derive(Debug, Clone)]
pub struct Config {
    /// Session cookie used to authenticate upstream requests
    pub cookie: String,
    /// Base URL of the provider's order endpoint
    pub api_url: String,
    /// Staleness window for cached entries
    pub cache_ttl: Duration,
    /// Period of the region refresh cycle
    pub region_interval: Duration,
    /// Period of the product refresh cycle
    pub product_interval: Duration,
    /// Delay between consecutive per-region product fetches
    pub pacing_delay: Duration,
}

impl Config {
    /// Creates a Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HOSTWATCH_COOKIE` - Session cookie (default: empty, warned at startup)
    /// - `HOSTWATCH_API_URL` - Order endpoint URL (default: provider endpoint)
    /// - `HOSTWATCH_CACHE_TTL_SECS` - Entry staleness window (default: 300)
    /// - `HOSTWATCH_REGION_INTERVAL_SECS` - Region cycle period (default: 600)
    /// - `HOSTWATCH_PRODUCT_INTERVAL_SECS` - Product cycle period (default: 300)
    /// - `HOSTWATCH_PACING_MS` - Inter-region pacing delay (default: 500)
    pub fn from_env() -> Self {
        Self {
            cookie: env::var("HOSTWATCH_COOKIE").unwrap_or_default(),
            api_url: env::var("HOSTWATCH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            cache_ttl: duration_from_env_secs("HOSTWATCH_CACHE_TTL_SECS", 300),
            region_interval: duration_from_env_secs("HOSTWATCH_REGION_INTERVAL_SECS", 600),
            product_interval: duration_from_env_secs("HOSTWATCH_PRODUCT_INTERVAL_SECS", 300),
            pacing_delay: duration_from_env_millis("HOSTWATCH_PACING_MS", 500),
        }
    }

    /// Logs the startup warning for an incomplete configuration.
    ///
    /// Returns true if the configuration carries a credential. Fetches are
    /// attempted either way; without a cookie they will degrade to empty
    /// listings.
    pub fn warn_if_incomplete(&self) -> bool {
        if self.cookie.is_empty() {
            warn!(
                "HOSTWATCH_COOKIE is not set; upstream requests will likely be \
                 rejected and listings will stay empty"
            );
            return false;
        }
        true
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cookie: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            cache_ttl: Duration::from_secs(300),
            region_interval: Duration::from_secs(600),
            product_interval: Duration::from_secs(300),
            pacing_delay: Duration::from_millis(500),
        }
    }
}

/// Reads a duration in whole seconds from an env var, with a default
fn duration_from_env_secs(name: &str, default_secs: u64) -> Duration {
    Duration::from_secs(
        env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_secs),
    )
}

/// Reads a duration in milliseconds from an env var, with a default
fn duration_from_env_millis(name: &str, default_millis: u64) -> Duration {
    Duration::from_millis(
        env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default_millis),
    )
}
