//! LRU Module
//!
//! Approximate least-recently-used selection by scanning the tree for the
//! oldest access stamp.

use crate::cache::entry::CacheEntry;
use crate::cache::iter::InOrder;

// == Access Clock ==
/// Logical clock that stamps entries on every touching operation.
///
/// Strictly increasing per cache, so two entries of one cache never share a
/// stamp and eviction does not depend on wall-clock resolution.
#[derive(Debug, Default, Clone)]
pub struct AccessClock {
    now: u64,
}

impl AccessClock {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Tick ==
    /// Advances the clock and returns the new stamp.
    pub fn tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }

    /// Last stamp handed out (0 before the first tick).
    #[cfg(test)]
    pub(crate) fn now(&self) -> u64 {
        self.now
    }
}

// == Least Recently Used ==
/// Full O(n) scan for the entry with the smallest `last_access`.
///
/// Traversal is in key order and only a strictly smaller stamp replaces the
/// current candidate, so on a tie the smallest key wins.
pub fn least_recently_used(root: Option<&CacheEntry>) -> Option<&CacheEntry> {
    InOrder::new(root).min_by_key(|entry| entry.last_access)
}
