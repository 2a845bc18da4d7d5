//! Hotcache - per-key cache in front of slow computations
//!
//! Bounded caches with LRU order, protection of repeatedly hit entries and a
//! freshness window that resets hit history on stale access.

pub mod api;
pub mod cache;
pub mod compute;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use config::Config;
