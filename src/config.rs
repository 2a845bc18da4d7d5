//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Capacity of the `heavy` cache (the default route)
    pub heavy_cache_size: usize,
    /// Capacity of the `light` cache
    pub light_cache_size: usize,
    /// Initial freshness window in seconds
    pub cache_ttl: u64,
    /// Whether every cache shares one freshness window
    pub shared_ttl: bool,
    /// Simulated latency of the heavy computation in milliseconds
    pub heavy_delay_ms: u64,
    /// Simulated latency of the light computation in milliseconds
    pub light_delay_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `HEAVY_CACHE_SIZE` - Heavy cache capacity (default: 5)
    /// - `LIGHT_CACHE_SIZE` - Light cache capacity (default: 5)
    /// - `CACHE_TTL_SECS` - Freshness window in seconds (default: 30)
    /// - `SHARED_TTL` - Share one freshness window across caches (default: false)
    /// - `HEAVY_DELAY_MS` - Heavy computation latency (default: 3000)
    /// - `LIGHT_DELAY_MS` - Light computation latency (default: 500)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            heavy_cache_size: env_or("HEAVY_CACHE_SIZE", defaults.heavy_cache_size),
            light_cache_size: env_or("LIGHT_CACHE_SIZE", defaults.light_cache_size),
            cache_ttl: match env_or("CACHE_TTL_SECS", defaults.cache_ttl) {
                0 => defaults.cache_ttl,
                ttl => ttl,
            },
            shared_ttl: env_or("SHARED_TTL", defaults.shared_ttl),
            heavy_delay_ms: env_or("HEAVY_DELAY_MS", defaults.heavy_delay_ms),
            light_delay_ms: env_or("LIGHT_DELAY_MS", defaults.light_delay_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Initial freshness window as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heavy_cache_size: 5,
            light_cache_size: 5,
            cache_ttl: 30,
            shared_ttl: false,
            heavy_delay_ms: 3000,
            light_delay_ms: 500,
            server_port: 8080,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
