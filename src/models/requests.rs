//! Request DTOs for the cache server API
//!
//! Defines query strings and bodies accepted by the handlers.

use serde::Deserialize;

use crate::cache::MAX_KEY_LENGTH;

/// Query string for `GET /heavy` and `GET /light`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageQuery {
    /// Caller-chosen message key; `"default"` when omitted
    #[serde(default)]
    pub key: Option<String>,
}

impl MessageQuery {
    pub const DEFAULT_KEY: &'static str = "default";

    /// The message key with the default applied.
    pub fn key(&self) -> &str {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => Self::DEFAULT_KEY,
        }
    }

    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key().len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        None
    }
}

/// Request body for `PUT /ttl`
#[derive(Debug, Clone, Deserialize)]
pub struct TtlRequest {
    /// New freshness window in seconds
    pub seconds: i64,
    /// Restrict the change to one cache; all caches when omitted
    #[serde(default)]
    pub cache: Option<String>,
}

impl TtlRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.seconds <= 0 {
            return Some("TTL must be a positive number of seconds".to_string());
        }
        None
    }
}

/// Optional cache selector for `/prune`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PruneQuery {
    #[serde(default)]
    pub cache: Option<String>,
}
