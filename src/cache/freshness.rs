//! Freshness Policy Module
//!
//! Holds the freshness window (TTL) that decides when an entry's hit history
//! is reset. One policy may govern a single store or be shared by several.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::info;

use crate::error::{CacheError, Result};

// == Freshness Policy ==
/// Shared, runtime-mutable freshness window.
///
/// Cloning yields another handle to the same window. Readers always see either
/// the previous or the new value in full; a `set` applies to every access that
/// starts after it returns.
#[derive(Debug, Clone)]
pub struct FreshnessPolicy {
    ttl: Arc<RwLock<Duration>>,
}

impl FreshnessPolicy {
    /// Creates a policy with the given window. A zero window is rejected.
    pub fn new(ttl: Duration) -> Result<Self> {
        validate(ttl)?;
        Ok(Self {
            ttl: Arc::new(RwLock::new(ttl)),
        })
    }

    /// Convenience constructor for whole seconds.
    pub fn from_secs(secs: u64) -> Result<Self> {
        Self::new(Duration::from_secs(secs))
    }

    /// Returns the current window.
    pub fn get(&self) -> Duration {
        *self.ttl.read()
    }

    /// Replaces the window. A zero window is rejected and the old value kept.
    pub fn set(&self, ttl: Duration) -> Result<()> {
        validate(ttl)?;
        let previous = std::mem::replace(&mut *self.ttl.write(), ttl);
        info!(
            previous_ms = previous.as_millis() as u64,
            ttl_ms = ttl.as_millis() as u64,
            "Freshness window updated"
        );
        Ok(())
    }

    /// Returns true if both handles point at the same window.
    pub fn is_shared_with(&self, other: &FreshnessPolicy) -> bool {
        Arc::ptr_eq(&self.ttl, &other.ttl)
    }
}

fn validate(ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
        return Err(CacheError::InvalidConfiguration(
            "freshness window must be a positive duration".to_string(),
        ));
    }
    Ok(())
}
