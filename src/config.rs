//! Configuration Module
//!
//! Loads cache and driver settings from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Runtime configuration.
///
/// All values can be set via environment variables; unparsable values fall
/// back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// HTTP server port for `serve`
    pub server_port: u16,
    /// Pause after each put of the delayed demo writer, in milliseconds
    pub worker_delay_ms: u64,
}

impl Config {
    /// Creates a Config from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `WORKER_DELAY_MS` - Demo writer delay in ms (default: 500)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            worker_delay_ms: parse_var("WORKER_DELAY_MS").unwrap_or(defaults.worker_delay_ms),
        }
    }

    /// Returns the config with `capacity` replaced when one is given.
    pub fn with_capacity(mut self, capacity: Option<usize>) -> Self {
        if let Some(capacity) = capacity {
            self.capacity = capacity;
        }
        self
    }

    /// Rejects settings the cache cannot be built with.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    pub fn worker_delay(&self) -> Duration {
        Duration::from_millis(self.worker_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 5,
            server_port: 3000,
            worker_delay_ms: 500,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
