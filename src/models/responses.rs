//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, CacheStore, EntrySnapshot};

/// Where a message response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheSource {
    #[serde(rename = "cache")]
    Hit,
    #[serde(rename = "computed and stored in cache")]
    Computed,
}

/// Response body for `GET /heavy` and `GET /light`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// The caller's message key
    pub key: String,
    /// The cached or freshly computed message
    pub message: String,
    pub source: CacheSource,
    /// Wall time spent serving the request, in seconds
    pub duration: f64,
    pub consecutive_hits: u64,
    pub protected: bool,
    /// Name of the cache that served the request
    pub cache: String,
    pub cache_size: usize,
    pub max_size: usize,
}

/// Status of a single cache
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatusResponse {
    pub cache: String,
    /// Entries, most recently used first
    pub entries: Vec<EntrySnapshot>,
    pub cache_size: usize,
    pub max_size: usize,
    pub ttl_seconds: f64,
    pub stats: StatsBody,
}

impl CacheStatusResponse {
    /// Builds the status view of a store.
    pub fn from_store(store: &CacheStore) -> Self {
        let entries = store.status();
        Self {
            cache: store.name().to_string(),
            cache_size: entries.len(),
            entries,
            max_size: store.capacity(),
            ttl_seconds: store.ttl().as_secs_f64(),
            stats: StatsBody::from(store.stats()),
        }
    }
}

/// Counters reported alongside a cache's status
#[derive(Debug, Clone, Serialize)]
pub struct StatsBody {
    #[serde(flatten)]
    pub counters: CacheStats,
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsBody {
    fn from(counters: CacheStats) -> Self {
        Self {
            hit_rate: counters.hit_rate(),
            counters,
        }
    }
}

/// Response body for `GET /status`
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub caches: Vec<CacheStatusResponse>,
}

/// Response body for `/prune`
#[derive(Debug, Clone, Serialize)]
pub struct PruneResponse {
    pub message: String,
    /// Caches that were cleared
    pub caches: Vec<String>,
}

impl PruneResponse {
    pub fn new(caches: Vec<String>) -> Self {
        Self {
            message: "Cache cleaned up successfully".to_string(),
            caches,
        }
    }
}

/// Response body for `PUT /ttl`
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    pub message: String,
    pub ttl_seconds: u64,
    /// Caches whose window changed
    pub caches: Vec<String>,
}

impl TtlResponse {
    pub fn new(ttl_seconds: u64, caches: Vec<String>) -> Self {
        Self {
            message: format!("TTL set to {} seconds", ttl_seconds),
            ttl_seconds,
            caches,
        }
    }
}

/// Response body for `DELETE /entries/:cache/:key`
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    pub cache: String,
    pub key: String,
    /// False when the key was not cached
    pub removed: bool,
}

/// Response body for the health endpoints
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    pub message: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            message: "Yes, I'm working".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
