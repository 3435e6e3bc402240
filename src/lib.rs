//! Splay Cache - A bounded in-memory cache backed by a splay tree
//!
//! Recently touched keys are splayed to the root; when the cache is full the
//! entry with the oldest access stamp is evicted.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{SharedCache, Snapshot, SplayTreeCache};
pub use config::Config;
pub use error::{CacheError, Result};
