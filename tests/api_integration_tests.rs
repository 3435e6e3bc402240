//! Integration Tests for API Endpoints
//!
//! Full request/response cycle for each endpoint over a shared cache.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use splay_cache::{api::create_router, AppState, SharedCache};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(capacity: usize) -> Router {
    create_router(AppState::new(SharedCache::new(capacity).unwrap()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_request(key: &str, value: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/put")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "key": key, "value": value }).to_string(),
        ))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

// == PUT Endpoint Tests ==

#[tokio::test]
async fn test_put_endpoint_success() {
    let app = create_test_app(10);

    let (status, json) = send(&app, put_request("test_key", "test_value")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "test_key");
    assert!(json["evicted"].is_null());
}

#[tokio::test]
async fn test_put_endpoint_reports_eviction() {
    let app = create_test_app(2);

    send(&app, put_request("a", "1")).await;
    send(&app, put_request("b", "2")).await;
    send(&app, get_request("/get/a")).await;
    let (status, json) = send(&app, put_request("c", "3")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["evicted"], "b");
}

#[tokio::test]
async fn test_put_empty_key_rejected() {
    let app = create_test_app(10);

    let (status, json) = send(&app, put_request("", "value")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app(10);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/put")
                .header("content-type", "application/json")
                .body(Body::from("not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app(10);
    send(&app, put_request("get_key", "get_value")).await;

    let (status, json) = send(&app, get_request("/get/get_key")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "get_key");
    assert_eq!(json["value"], "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app(10);

    let (status, json) = send(&app, get_request("/get/nonexistent_key")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("nonexistent_key"));
}

#[tokio::test]
async fn test_overwrite_via_api() {
    let app = create_test_app(10);
    send(&app, put_request("x", "1")).await;
    send(&app, put_request("x", "2")).await;

    let (_, json) = send(&app, get_request("/get/x")).await;
    assert_eq!(json["value"], "2");

    let (_, stats) = send(&app, get_request("/stats")).await;
    assert_eq!(stats["total_entries"], 1);
    assert_eq!(stats["overwrites"], 1);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app(10);
    send(&app, put_request("to_delete", "value")).await;

    let delete = || {
        Request::builder()
            .method("DELETE")
            .uri("/del/to_delete")
            .body(Body::empty())
            .unwrap()
    };

    let (status, json) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], true);

    let (status, json) = send(&app, delete()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], false);

    let (status, _) = send(&app, get_request("/get/to_delete")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == SNAPSHOT Endpoint Tests ==

#[tokio::test]
async fn test_snapshot_is_key_ordered() {
    let app = create_test_app(10);
    for (k, v) in [("pear", "3"), ("apple", "1"), ("fig", "2")] {
        send(&app, put_request(k, v)).await;
    }

    let (status, json) = send(&app, get_request("/snapshot")).await;

    assert_eq!(status, StatusCode::OK);
    let keys: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["apple", "fig", "pear"]);
}

// == STATS / HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app(10);
    send(&app, put_request("stats_key", "v")).await;
    send(&app, get_request("/get/stats_key")).await;
    send(&app, get_request("/get/missing")).await;

    let (status, json) = send(&app, get_request("/stats")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["capacity"], 10);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(1);

    let (status, json) = send(&app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].is_string());
}
