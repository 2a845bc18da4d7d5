//! LRU Tracker Module
//!
//! Keeps the recency order used for status reporting and eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Tracks access order of cache keys.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
///
/// Caches served here hold a handful of entries, so linear scans are fine.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used, inserting it if it is new.
    pub fn touch(&mut self, key: &str) {
        match self.position(key) {
            Some(0) => {}
            Some(idx) => {
                if let Some(existing) = self.order.remove(idx) {
                    self.order.push_front(existing);
                }
            }
            None => self.order.push_front(key.to_string()),
        }
    }

    // == Remove ==
    /// Removes a key from the tracker. Returns true if it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(idx) => self.order.remove(idx).is_some(),
            None => false,
        }
    }

    // == Oldest Matching ==
    /// Scans from least to most recently used and returns the first key
    /// accepted by `pred`.
    pub fn oldest_matching<F>(&self, mut pred: F) -> Option<&str>
    where
        F: FnMut(&str) -> bool,
    {
        self.order
            .iter()
            .rev()
            .map(String::as_str)
            .find(|key| pred(key))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    /// Iterates keys from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|k| k == key)
    }
}
