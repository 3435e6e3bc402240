//! Response DTOs for the cache HTTP surface

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for `GET /get/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub key: String,
    pub value: String,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for `PUT /put`
#[derive(Debug, Clone, Serialize)]
pub struct PutResponse {
    /// The key that was written
    pub key: String,
    /// Key dropped to make room, if the cache was full
    pub evicted: Option<String>,
}

impl PutResponse {
    pub fn new(key: impl Into<String>, evicted: Option<String>) -> Self {
        Self {
            key: key.into(),
            evicted,
        }
    }
}

/// Response body for `DELETE /del/:key`
///
/// Removing an absent key succeeds with `removed: false`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub key: String,
    pub removed: bool,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>, removed: bool) -> Self {
        Self {
            key: key.into(),
            removed,
        }
    }
}

/// Response body for `GET /stats`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Configured capacity
    pub capacity: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: CacheStats, capacity: usize) -> Self {
        let hit_rate = stats.hit_rate();
        Self {
            stats,
            capacity,
            hit_rate,
        }
    }
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
