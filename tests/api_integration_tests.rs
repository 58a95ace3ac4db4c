//! Integration Tests for the Cache Monitor API
//!
//! Tests the full request/response cycle for each endpoint.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use analysis_cache::{api::create_router, cache::CacheStore, AppState};

// == Helper Functions ==

fn create_test_app() -> Router {
    let state = AppState::new(Arc::new(CacheStore::with_defaults()));
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn put_entry(key: &str, value: Value, ttl_ms: Option<u64>) -> Request<Body> {
    let mut body = json!({"key": key, "value": value});
    if let Some(ttl) = ttl_ms {
        body["ttl_ms"] = json!(ttl);
    }
    Request::builder()
        .method("PUT")
        .uri("/cache/entries")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// == Entry Endpoint Tests ==

#[tokio::test]
async fn test_set_entry_success() {
    let app = create_test_app();

    let response = app
        .oneshot(put_entry("test_key", json!({"score": 3}), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_then_get_entry() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(put_entry("get_key", json!(["a", "b"]), None))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/get_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), "get_key");
    assert_eq!(json["value"], json!(["a", "b"]));
}

#[tokio::test]
async fn test_get_entry_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/nonexistent_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_delete_entry() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(put_entry("delete_key", json!(1), None))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let del_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache/entries/delete_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(del_response.status(), StatusCode::OK);

    // Verify it's gone
    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/delete_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_entry_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/cache/entries/nonexistent_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_snapshot_reflects_reads() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(put_entry("stats_key", json!("v"), None))
        .await
        .unwrap();

    // One hit
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/cache/entries/stats_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // One miss
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/cache/entries/nonexistent")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["max_entries"].as_u64().unwrap(), 100);
    assert_eq!(json["utilization_pct"].as_u64().unwrap(), 1);
    assert!(json.get("estimated_kb").is_some());
    assert!(json.get("pending_requests").is_some());
    assert!(json["keys"].as_array().unwrap().contains(&json!("stats_key")));
}

// == Maintenance Endpoint Tests ==

#[tokio::test]
async fn test_clean_endpoint_removes_expired() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(put_entry("short_lived", json!(1), Some(30)))
        .await
        .unwrap();
    let _ = app
        .clone()
        .oneshot(put_entry("long_lived", json!(2), Some(60_000)))
        .await
        .unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(60)).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/clean")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["entries_removed"].as_u64().unwrap(), 1);
    assert_eq!(json["pending_removed"].as_u64().unwrap(), 0);

    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/long_lived")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_clear_endpoint() {
    let app = create_test_app();

    let _ = app
        .clone()
        .oneshot(put_entry("a", json!(1), None))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = app
        .oneshot(
            Request::builder()
                .uri("/cache/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["total_entries"].as_u64().unwrap(), 0);
}

#[tokio::test]
async fn test_invalidate_by_pattern() {
    let app = create_test_app();

    for key in ["analyses:daily", "analyses:ai", "stats:x"] {
        let _ = app
            .clone()
            .oneshot(put_entry(key, json!(1), None))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"pattern":"analyses:*"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"].as_u64().unwrap(), 2);

    // Untouched namespace still resolves
    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/stats:x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_invalidate_analysis_namespaces() {
    let app = create_test_app();

    for key in ["analyses:daily", "stats:analysis", "user:u1"] {
        let _ = app
            .clone()
            .oneshot(put_entry(key, json!(1), None))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/cache/invalidate/analysis")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"].as_u64().unwrap(), 2);

    // User namespace is untouched
    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/user:u1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/cache/entries")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 422 for JSON parsing errors by default
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let response = app
        .oneshot(put_entry("", json!(1), None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(put_entry("ttl_test", json!("expires_soon"), Some(40)))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    // Exists immediately
    let get_response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/cache/entries/ttl_test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    tokio::time::sleep(std::time::Duration::from_millis(80)).await;

    // Expired now
    let get_response = app
        .oneshot(
            Request::builder()
                .uri("/cache/entries/ttl_test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}
