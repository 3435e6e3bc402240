//! Shared Cache Module
//!
//! Thread-safe handle over [`SplayTreeCache`] plus a completion barrier that
//! lets a coordinator wait for a known set of writers.

use std::sync::Arc;

use parking_lot::{Condvar, Mutex};
use tracing::debug;

use crate::cache::{CacheStats, Snapshot, SplayTreeCache};
use crate::error::Result;

/// State guarded by the single cache lock.
#[derive(Debug)]
struct SharedState {
    cache: SplayTreeCache,
    /// Writers registered but not yet finished
    pending_writers: usize,
}

// == Shared Cache ==
/// Synchronized cache: every operation holds one mutex for its whole body.
///
/// There is no read-only fast path. `get` restructures the tree, so it takes
/// the same lock as `put`. The guard is released on every exit, unwinding
/// included.
#[derive(Debug)]
pub struct SharedCache {
    state: Mutex<SharedState>,
    writers_done: Condvar,
}

impl SharedCache {
    // == Constructor ==
    /// Creates a shared cache with room for `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_cache(SplayTreeCache::new(capacity)?))
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: SplayTreeCache) -> Self {
        Self {
            state: Mutex::new(SharedState {
                cache,
                pending_writers: 0,
            }),
            writers_done: Condvar::new(),
        }
    }

    // == Cache Operations ==
    pub fn get(&self, key: &str) -> Option<String> {
        self.state.lock().cache.get(key)
    }

    /// See [`SplayTreeCache::put`]. Returns the evicted key, if any.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.state.lock().cache.put(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.state.lock().cache.remove(key)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().cache.snapshot()
    }

    pub fn len(&self) -> usize {
        self.state.lock().cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().cache.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.state.lock().cache.capacity()
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().cache.stats()
    }

    /// Runs `f` with exclusive access to the underlying cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut SplayTreeCache) -> R) -> R {
        f(&mut self.state.lock().cache)
    }

    // == Completion Barrier ==
    /// Registers one writer and hands back its completion token.
    ///
    /// Register before starting the writer so the coordinator cannot observe
    /// a zero count while the writer is still pending.
    pub fn register_writer(self: &Arc<Self>) -> WriterToken {
        let mut state = self.state.lock();
        state.pending_writers += 1;
        debug!(pending = state.pending_writers, "Writer registered");
        WriterToken {
            cache: Arc::clone(self),
        }
    }

    /// Number of registered writers that have not finished yet.
    pub fn pending_writers(&self) -> usize {
        self.state.lock().pending_writers
    }

    /// Blocks until every registered writer has finished.
    ///
    /// Returns immediately if no writer is pending. There is no timeout: a
    /// writer that never finishes blocks the caller forever.
    pub fn wait_for_writers(&self) {
        let mut state = self.state.lock();
        while state.pending_writers > 0 {
            self.writers_done.wait(&mut state);
        }
    }

    fn writer_finished(&self) {
        let mut state = self.state.lock();
        state.pending_writers = state.pending_writers.saturating_sub(1);
        debug!(pending = state.pending_writers, "Writer finished");
        if state.pending_writers == 0 {
            self.writers_done.notify_all();
        }
    }
}

// == Writer Token ==
/// Proof of one outstanding writer.
///
/// Finishing or dropping the token signals completion exactly once, so a
/// writer that panics still releases the coordinator.
#[derive(Debug)]
#[must_use = "dropping the token immediately marks the writer as finished"]
pub struct WriterToken {
    cache: Arc<SharedCache>,
}

impl WriterToken {
    /// The cache this writer operates on.
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Marks the writer as finished.
    pub fn finish(self) {}
}

impl Drop for WriterToken {
    fn drop(&mut self) {
        self.cache.writer_finished();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_shared_basic_operations() {
        let cache = SharedCache::new(2).unwrap();
        cache.put("a", "1");
        cache.put("b", "2");
        cache.get("a");
        let evicted = cache.put("c", "3");

        assert_eq!(evicted.as_deref(), Some("b"));
        assert_eq!(cache.snapshot().keys(), vec!["a", "c"]);
        assert_eq!(cache.remove("a"), Some("1".to_string()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 2);
    }

    #[test]
    fn test_shared_rejects_zero_capacity() {
        assert!(SharedCache::new(0).is_err());
    }

    #[test]
    fn test_wait_without_writers_returns() {
        let cache = SharedCache::new(1).unwrap();
        cache.wait_for_writers();
        assert_eq!(cache.pending_writers(), 0);
    }

    #[test]
    fn test_token_counts() {
        let cache = Arc::new(SharedCache::new(4).unwrap());
        let first = cache.register_writer();
        let second = cache.register_writer();
        assert_eq!(cache.pending_writers(), 2);

        first.finish();
        assert_eq!(cache.pending_writers(), 1);
        drop(second);
        assert_eq!(cache.pending_writers(), 0);
    }

    #[test]
    fn test_wait_blocks_until_all_writers_finish() {
        let cache = Arc::new(SharedCache::new(10).unwrap());
        let tokens: Vec<WriterToken> = (0..3).map(|_| cache.register_writer()).collect();

        let handles: Vec<_> = tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| {
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(20 * i as u64));
                    token.cache().put(format!("k{}", i), format!("v{}", i));
                    token.finish();
                })
            })
            .collect();

        cache.wait_for_writers();
        assert_eq!(cache.len(), 3);

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_panicking_writer_still_signals() {
        let cache = Arc::new(SharedCache::new(10).unwrap());
        let token = cache.register_writer();

        let handle = thread::spawn(move || {
            let _token = token;
            panic!("writer failed");
        });

        cache.wait_for_writers();
        assert!(handle.join().is_err());
        assert_eq!(cache.pending_writers(), 0);
    }

    #[test]
    fn test_with_cache_exclusive_access() {
        let cache = SharedCache::new(3).unwrap();
        cache.put("a", "1");
        let root = cache.with_cache(|inner| {
            inner.get("a");
            inner.root_key().map(str::to_string)
        });
        assert_eq!(root.as_deref(), Some("a"));
    }
}
