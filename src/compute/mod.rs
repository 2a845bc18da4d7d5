//! Compute Module
//!
//! The slow, deterministic-per-key work that the caches sit in front of.

mod simulated;

pub use simulated::SimulatedComputation;
