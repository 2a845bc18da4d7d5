//! Cache Registry Module
//!
//! Maps routing keys (request paths) onto a fixed set of named stores.

use std::sync::Arc;

use crate::cache::{CacheStore, FreshnessPolicy};
use crate::config::Config;
use crate::error::Result;

/// Name of the store serving `/heavy` and any unmatched route.
pub const HEAVY_CACHE: &str = "heavy";
/// Name of the store serving `/light`.
pub const LIGHT_CACHE: &str = "light";

// == Cache Registry ==
/// Fixed set of independent stores, built once at startup.
#[derive(Debug)]
pub struct CacheRegistry {
    stores: Vec<Arc<CacheStore>>,
    default_index: usize,
}

impl CacheRegistry {
    /// Starts a registry whose fallback is `default`.
    pub fn builder(default: CacheStore) -> CacheRegistryBuilder {
        CacheRegistryBuilder {
            stores: vec![default],
        }
    }

    /// Builds the `heavy` and `light` stores described by the configuration.
    ///
    /// With `shared_ttl` both stores read one freshness window, otherwise each
    /// gets its own.
    pub fn from_config(config: &Config) -> Result<Self> {
        let heavy_policy = FreshnessPolicy::new(config.ttl())?;
        let light_policy = if config.shared_ttl {
            heavy_policy.clone()
        } else {
            FreshnessPolicy::new(config.ttl())?
        };

        Ok(Self::builder(CacheStore::new(
            HEAVY_CACHE,
            config.heavy_cache_size,
            heavy_policy,
        ))
        .with_store(CacheStore::new(
            LIGHT_CACHE,
            config.light_cache_size,
            light_policy,
        ))
        .build())
    }

    // == Resolve ==
    /// Picks the store for a routing key.
    ///
    /// Stores are tried in registration order and the first whose name occurs
    /// in `routing_key` wins; anything else lands on the default store.
    pub fn resolve(&self, routing_key: &str) -> &Arc<CacheStore> {
        self.stores
            .iter()
            .find(|store| routing_key.contains(store.name()))
            .unwrap_or(&self.stores[self.default_index])
    }

    /// Looks a store up by its exact name.
    pub fn get(&self, name: &str) -> Option<&Arc<CacheStore>> {
        self.stores.iter().find(|store| store.name() == name)
    }

    pub fn default_store(&self) -> &Arc<CacheStore> {
        &self.stores[self.default_index]
    }

    /// All stores in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CacheStore>> {
        self.stores.iter()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}

// == Builder ==
pub struct CacheRegistryBuilder {
    stores: Vec<CacheStore>,
}

impl CacheRegistryBuilder {
    /// Registers another store. A store whose name is already taken replaces
    /// the earlier one in place.
    pub fn with_store(mut self, store: CacheStore) -> Self {
        match self.stores.iter().position(|s| s.name() == store.name()) {
            Some(idx) => self.stores[idx] = store,
            None => self.stores.push(store),
        }
        self
    }

    pub fn build(self) -> CacheRegistry {
        CacheRegistry {
            stores: self.stores.into_iter().map(Arc::new).collect(),
            default_index: 0,
        }
    }
}
