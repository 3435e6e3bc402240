//! Writer Task
//!
//! A worker thread that issues a fixed sequence of puts against a shared
//! cache and then signals completion.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::cache::WriterToken;
use crate::error::{CacheError, Result};

/// Work assigned to one writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterPlan {
    /// Thread name, also used in logs
    pub name: String,
    /// Puts to issue, in order
    pub entries: Vec<(String, String)>,
    /// Pause after each put to simulate work
    pub delay: Duration,
}

impl WriterPlan {
    pub fn new(name: impl Into<String>, entries: Vec<(String, String)>, delay: Duration) -> Self {
        Self {
            name: name.into(),
            entries,
            delay,
        }
    }
}

/// Spawns a named writer thread.
///
/// The token is moved into the thread and released after the last put, or
/// during unwinding if the thread panics. The handle yields the number of
/// puts issued.
///
/// # Arguments
/// * `token` - Completion token obtained from `SharedCache::register_writer`
/// * `plan` - The puts to issue
pub fn spawn_writer(token: WriterToken, plan: WriterPlan) -> Result<JoinHandle<usize>> {
    let name = plan.name.clone();

    thread::Builder::new()
        .name(name.clone())
        .spawn(move || {
            info!(writer = %plan.name, puts = plan.entries.len(), "Writer started");

            let mut issued = 0;
            for (key, value) in plan.entries {
                let evicted = token.cache().put(key.clone(), value);
                debug!(writer = %plan.name, %key, ?evicted, "put");
                issued += 1;

                if !plan.delay.is_zero() {
                    thread::sleep(plan.delay);
                }
            }

            token.finish();
            info!(writer = %plan.name, issued, "Writer finished");
            issued
        })
        .map_err(|e| CacheError::Internal(format!("failed to spawn writer {}: {}", name, e)))
}
