//! Concurrent Demo
//!
//! Two writers fill a shared cache concurrently; the coordinator joins them,
//! waits on the completion barrier and takes the final snapshot.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::cache::{SharedCache, Snapshot};
use crate::error::{CacheError, Result};
use crate::tasks::writer::{spawn_writer, WriterPlan};

/// The two hard-coded writers: `key0..key2` with a pause after each put, and
/// a single `key3`.
pub fn demo_plans(delay: Duration) -> Vec<WriterPlan> {
    let three = (0..3)
        .map(|i| (format!("key{}", i), format!("value{}", i)))
        .collect();
    let one = vec![("key3".to_string(), "value3".to_string())];

    vec![
        WriterPlan::new("writer-three", three, delay),
        WriterPlan::new("writer-one", one, Duration::ZERO),
    ]
}

/// Runs every plan on its own thread and returns the contents once all of
/// them have finished.
///
/// All tokens are registered before any thread starts. A panicking writer is
/// reported as [`CacheError::Internal`] after the others have been joined.
pub fn run_writers(cache: &Arc<SharedCache>, plans: Vec<WriterPlan>) -> Result<Snapshot> {
    let tokens: Vec<_> = plans.iter().map(|_| cache.register_writer()).collect();

    let mut handles = Vec::with_capacity(plans.len());
    for (token, plan) in tokens.into_iter().zip(plans) {
        let name = plan.name.clone();
        handles.push((name, spawn_writer(token, plan)?));
    }

    let mut failed = Vec::new();
    for (name, handle) in handles {
        if handle.join().is_err() {
            failed.push(name);
        }
    }

    cache.wait_for_writers();

    if !failed.is_empty() {
        return Err(CacheError::Internal(format!(
            "writer(s) panicked: {}",
            failed.join(", ")
        )));
    }

    let snapshot = cache.snapshot();
    info!(entries = snapshot.len(), "All writers finished");
    Ok(snapshot)
}

/// Builds a cache of `capacity` and runs the two demo writers against it.
pub fn run_demo(capacity: usize, delay: Duration) -> Result<Snapshot> {
    let cache = Arc::new(SharedCache::new(capacity)?);
    run_writers(&cache, demo_plans(delay))
}
