//! Cache Store Module
//!
//! The unsynchronized cache engine: a splay tree keyed by string with a
//! capacity bound and oldest-stamp eviction.

use tracing::debug;

use crate::cache::entry::{drop_tree, CacheEntry, Link};
use crate::cache::iter::InOrder;
use crate::cache::lru::{least_recently_used, AccessClock};
use crate::cache::splay;
use crate::cache::{CacheStats, Snapshot};
use crate::error::{CacheError, Result};

// == Splay Tree Cache ==
/// Bounded key/value cache stored in a splay tree.
///
/// Requires `&mut self` for every operation that can restructure the tree,
/// including `get`. Use [`SharedCache`](crate::cache::SharedCache) to share one
/// between threads.
#[derive(Debug)]
pub struct SplayTreeCache {
    /// Tree root; re-pointed by nearly every operation
    root: Link,
    /// Number of live entries
    len: usize,
    /// Maximum number of entries, always > 0
    capacity: usize,
    /// Source of `last_access` stamps
    clock: AccessClock,
    /// Activity counters
    stats: CacheStats,
}

impl SplayTreeCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is rejected with [`CacheError::InvalidCapacity`].
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            root: None,
            len: 0,
            capacity,
            clock: AccessClock::new(),
            stats: CacheStats::new(),
        })
    }

    // == Get ==
    /// Returns the value for `key`, refreshing its stamp and splaying it to
    /// the root. A miss leaves the tree untouched.
    pub fn get(&mut self, key: &str) -> Option<String> {
        if !self.contains(key) {
            self.stats.record_miss();
            return None;
        }

        let now = self.clock.tick();
        self.root = splay::splay(self.root.take(), key);
        let root = self.root.as_mut()?;
        root.last_access = now;
        self.stats.record_hit();
        Some(root.value.clone())
    }

    // == Put ==
    /// Inserts or overwrites `key`.
    ///
    /// An existing key is updated in place and splayed to the root. A new key
    /// first evicts the oldest entry if the cache is full, then is inserted as
    /// the new root. Returns the evicted key, if any.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        let now = self.clock.tick();

        if self.contains(&key) {
            self.root = splay::splay(self.root.take(), &key);
            if let Some(root) = self.root.as_mut() {
                root.update(value, now);
            }
            self.stats.record_overwrite();
            return None;
        }

        let evicted = if self.len >= self.capacity {
            self.evict_lru()
        } else {
            None
        };

        let entry = CacheEntry::boxed(key, value, now);
        self.root = Some(splay::insert(self.root.take(), entry));
        self.len += 1;
        self.stats.set_total_entries(self.len);

        evicted
    }

    // == Remove ==
    /// Removes `key`, returning its value. Absent keys are a no-op.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        if !self.contains(key) {
            return None;
        }

        let removed = self.detach(key)?;
        self.stats.record_removal();
        debug!(key = %removed.key, "Removed entry");
        Some(removed.value)
    }

    // == Snapshot ==
    /// Copies the contents out in ascending key order.
    pub fn snapshot(&self) -> Snapshot {
        self.iter()
            .map(|entry| (entry.key.clone(), entry.value.clone()))
            .collect()
    }

    /// In-order iterator over the entries.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    // == Queries ==
    /// Membership test by plain search; no stamp refresh, no splay.
    pub fn contains(&self, key: &str) -> bool {
        matches!(splay::find(self.root.as_deref(), key), Some(node) if node.key == key)
    }

    /// Stamp of `key`'s last access, if present.
    pub fn last_access(&self, key: &str) -> Option<u64> {
        splay::find(self.root.as_deref(), key)
            .filter(|node| node.key == key)
            .map(|node| node.last_access)
    }

    /// Key currently at the root of the tree.
    pub fn root_key(&self) -> Option<&str> {
        self.root.as_deref().map(|node| node.key.as_str())
    }

    /// Key the next eviction would pick.
    pub fn peek_lru(&self) -> Option<&str> {
        least_recently_used(self.root.as_deref()).map(|node| node.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a copy of the activity counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.len);
        stats
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&CacheEntry> {
        self.root.as_deref()
    }

    // == Internals ==
    fn evict_lru(&mut self) -> Option<String> {
        let key = least_recently_used(self.root.as_deref())?.key.clone();
        let removed = self.detach(&key)?;
        self.stats.record_eviction();
        debug!(
            key = %removed.key,
            last_access = removed.last_access,
            "Evicted least recently used entry"
        );
        Some(removed.key)
    }

    fn detach(&mut self, key: &str) -> Option<Box<CacheEntry>> {
        let (root, removed) = splay::erase(self.root.take(), key);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
            self.stats.set_total_entries(self.len);
        }
        removed
    }
}

impl Drop for SplayTreeCache {
    fn drop(&mut self) {
        drop_tree(self.root.take());
    }
}
