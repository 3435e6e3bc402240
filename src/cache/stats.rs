//! Cache Statistics Module
//!
//! Counters maintained by the cache engine as a side effect of its operations.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// `get` calls that found their key
    pub hits: u64,
    /// `get` calls on an absent key
    pub misses: u64,
    /// `put` calls that overwrote an existing key
    pub overwrites: u64,
    /// Entries dropped to stay within capacity
    pub evictions: u64,
    /// Entries dropped by an explicit `remove`
    pub removals: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before the first `get`.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_overwrite(&mut self) {
        self.overwrites += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats, CacheStats::default());
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_hit_rate_all_misses() {
        let mut stats = CacheStats::new();
        stats.record_miss();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_mutation_counters() {
        let mut stats = CacheStats::new();
        stats.record_overwrite();
        stats.record_eviction();
        stats.record_eviction();
        stats.record_removal();
        stats.set_total_entries(4);

        assert_eq!(stats.overwrites, 1);
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.removals, 1);
        assert_eq!(stats.total_entries, 4);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = CacheStats::new();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"evictions\":0"));
        assert!(json.contains("\"total_entries\":0"));
    }
}
