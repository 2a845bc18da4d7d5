//! API Handlers
//!
//! HTTP request handlers: the cached message endpoints plus the
//! administrative status, prune, TTL and remove operations.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{OriginalUri, Path, Query, State},
    Json,
};
use tracing::{debug, info};

use crate::cache::{CacheRegistry, CacheStore, FreshnessPolicy, HEAVY_CACHE, LIGHT_CACHE};
use crate::compute::SimulatedComputation;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CacheSource, CacheStatusResponse, HealthResponse, MessageQuery, MessageResponse, PruneQuery,
    PruneResponse, RemoveResponse, StatusResponse, TtlRequest, TtlResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Named caches, resolved by request path
    pub registry: Arc<CacheRegistry>,
    /// Computation run on a miss, keyed by cache name
    pub computations: Arc<HashMap<String, SimulatedComputation>>,
}

impl AppState {
    /// Creates a new AppState from a registry and its computations.
    pub fn new(registry: CacheRegistry, computations: Vec<SimulatedComputation>) -> Self {
        Self {
            registry: Arc::new(registry),
            computations: Arc::new(
                computations
                    .into_iter()
                    .map(|c| (c.label().to_string(), c))
                    .collect(),
            ),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = CacheRegistry::from_config(config)?;
        let computations = vec![
            SimulatedComputation::new(HEAVY_CACHE, Duration::from_millis(config.heavy_delay_ms)),
            SimulatedComputation::new(LIGHT_CACHE, Duration::from_millis(config.light_delay_ms)),
        ];
        Ok(Self::new(registry, computations))
    }

    fn computation_for(&self, cache: &str) -> Result<&SimulatedComputation> {
        self.computations.get(cache).ok_or_else(|| {
            CacheError::Internal(format!("No computation registered for cache '{}'", cache))
        })
    }

    fn store_named(&self, name: &str) -> Result<&Arc<CacheStore>> {
        self.registry
            .get(name)
            .ok_or_else(|| CacheError::NotFound(format!("cache '{}'", name)))
    }

    /// The named store, or every store when no name is given.
    fn targets(&self, name: Option<&str>) -> Result<Vec<&Arc<CacheStore>>> {
        match name {
            Some(name) => Ok(vec![self.store_named(name)?]),
            None => Ok(self.registry.iter().collect()),
        }
    }
}

/// Cache key for a message key within a named cache.
pub fn cache_key(cache: &str, message_key: &str) -> String {
    format!("{}-message-{}", cache, message_key)
}

/// Handler for GET /heavy and GET /light
///
/// The request path picks the cache. A hit is answered from the cache; a miss
/// runs the computation with no lock held and stores the result.
pub async fn message_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<MessageQuery>,
) -> Result<Json<MessageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let start = Instant::now();
    let store = state.registry.resolve(uri.path());
    let message_key = query.key().to_string();
    let key = cache_key(store.name(), &message_key);

    let (message, source, consecutive_hits, protected) = match store.access(&key) {
        Some(hit) => {
            debug!(cache = %store.name(), key = %key, hits = hit.consecutive_hits, "Cache hit");
            (hit.value, CacheSource::Hit, hit.consecutive_hits, hit.protected)
        }
        None => {
            debug!(cache = %store.name(), key = %key, "Cache miss, computing");
            let message = state.computation_for(store.name())?.run(&message_key).await;
            store.insert(key.clone(), message.clone());
            let (hits, protected) = store
                .peek(&key)
                .map_or((1, false), |snap| (snap.consecutive_hits, snap.protected));
            (message, CacheSource::Computed, hits, protected)
        }
    };

    Ok(Json(MessageResponse {
        key: message_key,
        message,
        source,
        duration: start.elapsed().as_secs_f64(),
        consecutive_hits,
        protected,
        cache: store.name().to_string(),
        cache_size: store.len(),
        max_size: store.capacity(),
    }))
}

/// Handler for GET /status
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let caches = state
        .registry
        .iter()
        .map(|store| CacheStatusResponse::from_store(store))
        .collect();

    Json(StatusResponse { caches })
}

/// Handler for GET /status/:cache
pub async fn cache_status_handler(
    State(state): State<AppState>,
    Path(cache): Path<String>,
) -> Result<Json<CacheStatusResponse>> {
    let store = state.store_named(&cache)?;
    Ok(Json(CacheStatusResponse::from_store(store)))
}

/// Handler for GET|POST /prune
///
/// Clears one cache when `?cache=` is given, otherwise every cache.
pub async fn prune_handler(
    State(state): State<AppState>,
    Query(query): Query<PruneQuery>,
) -> Result<Json<PruneResponse>> {
    let targets = state.targets(query.cache.as_deref())?;

    let mut cleared = Vec::with_capacity(targets.len());
    for store in targets {
        store.clear();
        cleared.push(store.name().to_string());
    }
    info!(caches = ?cleared, "Caches pruned");

    Ok(Json(PruneResponse::new(cleared)))
}

/// Handler for PUT /ttl
///
/// Sets the freshness window of one cache or of all caches. Caches sharing a
/// window are updated once.
pub async fn set_ttl_handler(
    State(state): State<AppState>,
    Json(req): Json<TtlRequest>,
) -> Result<Json<TtlResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }
    let seconds = req.seconds.unsigned_abs();
    let ttl = Duration::from_secs(seconds);

    let targets = state.targets(req.cache.as_deref())?;
    let mut applied: Vec<&FreshnessPolicy> = Vec::new();
    let mut names = Vec::with_capacity(targets.len());
    for store in targets {
        let policy = store.freshness();
        if !applied.iter().any(|p| p.is_shared_with(policy)) {
            policy.set(ttl)?;
            applied.push(policy);
        }
        names.push(store.name().to_string());
    }
    info!(ttl_seconds = seconds, caches = ?names, "TTL updated");

    Ok(Json(TtlResponse::new(seconds, names)))
}

/// Handler for DELETE /entries/:cache/:key
pub async fn remove_handler(
    State(state): State<AppState>,
    Path((cache, key)): Path<(String, String)>,
) -> Result<Json<RemoveResponse>> {
    let store = state.store_named(&cache)?;
    let removed = store.remove(&cache_key(store.name(), &key));

    Ok(Json(RemoveResponse {
        cache,
        key,
        removed,
    }))
}

/// Handler for GET / and GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
