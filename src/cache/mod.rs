//! Cache Module
//!
//! Bounded in-memory cache backed by a splay tree with approximate LRU
//! eviction, in an unsynchronized and a synchronized flavour.

mod entry;
mod iter;
mod lru;
mod shared;
mod snapshot;
mod splay;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use iter::InOrder;
pub use shared::{SharedCache, WriterToken};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use stats::CacheStats;
pub use store::SplayTreeCache;

// == Public Constants ==
/// Maximum key length in bytes accepted by the HTTP surface
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum value size in bytes accepted by the HTTP surface
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
