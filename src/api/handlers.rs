//! API Handlers
//!
//! HTTP request handlers. Each one is a single call into [`SharedCache`].

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::cache::{SharedCache, Snapshot};
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, PutRequest, PutResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The cache carries its own lock, so the state only needs an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SharedCache>,
}

impl AppState {
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates the state from configuration, rejecting a zero capacity.
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        Ok(Self::new(SharedCache::new(config.capacity)?))
    }
}

/// Handler for PUT /put
pub async fn put_handler(
    State(state): State<AppState>,
    Json(req): Json<PutRequest>,
) -> Result<Json<PutResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let evicted = state.cache.put(req.key.clone(), req.value);
    Ok(Json(PutResponse::new(req.key, evicted)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    let removed = state.cache.remove(&key).is_some();
    Json(DeleteResponse::new(key, removed))
}

/// Handler for GET /snapshot
pub async fn snapshot_handler(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.cache.snapshot())
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let (stats, capacity) = state
        .cache
        .with_cache(|cache| (cache.stats(), cache.capacity()));
    Json(StatsResponse::new(stats, capacity))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(capacity: usize) -> AppState {
        AppState::new(SharedCache::new(capacity).unwrap())
    }

    fn put_request(key: &str, value: &str) -> Json<PutRequest> {
        Json(PutRequest {
            key: key.to_string(),
            value: value.to_string(),
        })
    }

    #[tokio::test]
    async fn test_put_and_get_handler() {
        let state = state(10);

        let result = put_handler(State(state.clone()), put_request("k", "v")).await;
        assert!(result.is_ok());

        let response = get_handler(State(state), Path("k".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "v");
    }

    #[tokio::test]
    async fn test_put_reports_eviction() {
        let state = state(1);
        let first = put_handler(State(state.clone()), put_request("a", "1"))
            .await
            .unwrap();
        assert_eq!(first.key, "a");
        assert!(first.evicted.is_none());

        let response = put_handler(State(state), put_request("b", "2"))
            .await
            .unwrap();
        assert_eq!(response.evicted.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let result = get_handler(State(state(10)), Path("nope".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let state = state(10);
        let stored = put_handler(State(state.clone()), put_request("k", "v"))
            .await
            .unwrap();
        assert_eq!(stored.key, "k");

        let first = delete_handler(State(state.clone()), Path("k".to_string())).await;
        let second = delete_handler(State(state), Path("k".to_string())).await;
        assert!(first.removed);
        assert!(!second.removed);
    }

    #[tokio::test]
    async fn test_snapshot_and_stats_handlers() {
        let state = state(4);
        for (key, value) in [("b", "2"), ("a", "1")] {
            let response = put_handler(State(state.clone()), put_request(key, value))
                .await
                .unwrap();
            assert!(response.evicted.is_none());
        }

        let snapshot = snapshot_handler(State(state.clone())).await;
        assert_eq!(snapshot.keys(), vec!["a", "b"]);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.capacity, 4);
        assert_eq!(stats.stats.total_entries, 2);
    }

    #[tokio::test]
    async fn test_put_invalid_request() {
        let result = put_handler(State(state(10)), put_request("", "v")).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_health_handler() {
        assert_eq!(health_handler().await.status, "healthy");
    }
}
