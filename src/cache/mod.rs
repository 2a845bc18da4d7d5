//! Cache Module
//!
//! Bounded in-memory caches with LRU order, protection of repeatedly hit
//! entries and freshness-window resets.

mod entry;
mod freshness;
mod lru;
mod registry;
mod stats;
mod store;


// Re-export public types
pub use entry::{EntryRecord, EntrySnapshot, PROTECTION_THRESHOLD};
pub use freshness::FreshnessPolicy;
pub use lru::LruTracker;
pub use registry::{CacheRegistry, CacheRegistryBuilder, HEAVY_CACHE, LIGHT_CACHE};
pub use stats::CacheStats;
pub use store::{AccessOutcome, CacheStore};

// == Public Constants ==
/// Maximum allowed key length in bytes, enforced at the HTTP boundary
pub const MAX_KEY_LENGTH: usize = 256;
