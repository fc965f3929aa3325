//! Router tests: the real axum router over the in-memory accessor.

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use flavors_api::{build_router, AppError, AppState, Flavor, FlavorStore, MemoryFlavorStore, NewFlavor};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

fn seeded_app() -> Router {
    build_router(AppState::new(MemoryFlavorStore::seeded()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: Option<&str>,
    body: String,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    let response = app.clone().oneshot(builder.body(Body::from(body)).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn list_returns_seeded_rows() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/flavors", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Vanilla", "Chocolate", "Strawberry", "Mint"]);
    for row in body.as_array().unwrap() {
        for key in ["id", "name", "is_favorite", "created_at", "updated_at"] {
            assert!(row.get(key).is_some(), "missing {key}");
        }
    }
}

#[tokio::test]
async fn create_returns_created_row_with_next_id() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/flavors",
        Some(json!({"name": "Pistachio", "is_favorite": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 5);
    assert_eq!(body["name"], "Pistachio");
    assert_eq!(body["is_favorite"], true);
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn create_defaults_favorite_to_false() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::POST, "/api/flavors", Some(json!({"name": "Coffee"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["is_favorite"], false);
}

#[tokio::test]
async fn created_ids_are_unique_and_listed_once() {
    let app = build_router(AppState::new(MemoryFlavorStore::new()));
    let mut ids = Vec::new();
    for name in ["Mango", "Peach", "Mango"] {
        let (_, body) = send(&app, Method::POST, "/api/flavors", Some(json!({"name": name}))).await;
        let id = body["id"].as_i64().unwrap();
        assert!(!ids.contains(&id));
        ids.push(id);
    }
    let (_, list) = send(&app, Method::GET, "/api/flavors", None).await;
    for id in ids {
        let hits = list.as_array().unwrap().iter().filter(|r| r["id"] == id).count();
        assert_eq!(hits, 1);
    }
}

#[tokio::test]
async fn get_missing_id_is_not_found() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/flavors/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Flavor not found"}));
}

#[tokio::test]
async fn get_non_numeric_id_is_not_found() {
    let app = seeded_app();
    let (status, _) = send(&app, Method::GET, "/api/flavors/vanilla", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_existing_id_returns_row() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/flavors/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Strawberry");
    assert_eq!(body["is_favorite"], false);
}

#[tokio::test]
async fn create_without_name_is_rejected_and_writes_nothing() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::POST, "/api/flavors", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Name is required"}));

    let (_, list) = send(&app, Method::GET, "/api/flavors", None).await;
    assert_eq!(list.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let app = seeded_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/flavors")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_replaces_both_fields() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/flavors/1",
        Some(json!({"name": "Vanilla", "is_favorite": false})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Vanilla");
    assert_eq!(body["is_favorite"], false);

    let (_, fetched) = send(&app, Method::GET, "/api/flavors/1", None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let app = seeded_app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/flavors/42",
        Some(json!({"name": "Ghost", "is_favorite": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_name_is_rejected() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::PUT, "/api/flavors/2", Some(json!({"is_favorite": true}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name is required");

    let (_, fetched) = send(&app, Method::GET, "/api/flavors/2", None).await;
    assert_eq!(fetched["is_favorite"], false);
}

#[tokio::test]
async fn delete_twice_returns_row_then_not_found() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::DELETE, "/api/flavors/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Vanilla");

    let (status, _) = send(&app, Method::DELETE, "/api/flavors/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn alternate_mount_serves_same_rows() {
    let app = seeded_app();
    let (_, canonical) = send(&app, Method::GET, "/api/flavors", None).await;
    let (status, alternate) = send(&app, Method::GET, "/flavors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(canonical, alternate);

    let (status, _) = send(&app, Method::GET, "/flavors/4", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_ready_and_openapi_respond() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send(&app, Method::GET, "/api/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/flavors/{id}"].is_object());
}

/// Accessor whose every call fails like a dropped connection.
#[derive(Clone, Default)]
struct BrokenStore {
    calls: Arc<AtomicUsize>,
}

impl BrokenStore {
    fn fail<T>(&self) -> Result<T, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

#[async_trait]
impl FlavorStore for BrokenStore {
    async fn list(&self) -> Result<Vec<Flavor>, AppError> {
        self.fail()
    }
    async fn get(&self, _id: i32) -> Result<Option<Flavor>, AppError> {
        self.fail()
    }
    async fn create(&self, _flavor: &NewFlavor) -> Result<Flavor, AppError> {
        self.fail()
    }
    async fn update(&self, _id: i32, _flavor: &NewFlavor) -> Result<Option<Flavor>, AppError> {
        self.fail()
    }
    async fn delete(&self, _id: i32) -> Result<Option<Flavor>, AppError> {
        self.fail()
    }
    async fn ping(&self) -> Result<(), AppError> {
        self.fail()
    }
}

#[tokio::test]
async fn datastore_failures_are_opaque_server_errors() {
    let store = BrokenStore::default();
    let app = build_router(AppState::new(store.clone()));

    let (status, body) = send(&app, Method::GET, "/api/flavors", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server error"}));

    let (status, _) = send(&app, Method::GET, "/api/flavors/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn validation_runs_before_the_accessor() {
    let store = BrokenStore::default();
    let app = build_router(AppState::new(store.clone()));

    let (status, _) = send(&app, Method::POST, "/api/flavors", Some(json!({"is_favorite": true}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, Method::DELETE, "/api/flavors/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrong_field_types_are_bad_requests() {
    let app = seeded_app();
    for body in [json!({"name": 5}), json!({"name": "V", "is_favorite": "yes"})] {
        let (status, reply) = send(&app, Method::POST, "/api/flavors", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(reply["error"].is_string(), "{body}");
    }
    let (_, list) = send(&app, Method::GET, "/api/flavors", None).await;
    assert_eq!(list.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = seeded_app();
    let name = "a".repeat(flavors_api::routes::BODY_LIMIT_BYTES + 1);
    let body = json!({ "name": name }).to_string();
    let (status, reply) = send_raw(&app, Method::POST, "/api/flavors", Some("application/json"), body).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(reply["error"].is_string());
}

#[tokio::test]
async fn body_without_json_content_type_is_unsupported() {
    let app = seeded_app();
    let body = json!({"name": "Mango"}).to_string();
    let (status, reply) = send_raw(&app, Method::POST, "/api/flavors", None, body).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(reply["error"].is_string());
}

#[tokio::test]
async fn update_without_favorite_resets_it_to_false() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::PUT, "/api/flavors/1", Some(json!({"name": "Vanilla"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Vanilla");
    assert_eq!(body["is_favorite"], false);
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/flavors/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Route not found"}));

    let (status, body) = send(&app, Method::GET, "/api/toppings", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unrouted_method_uses_error_envelope() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::PATCH, "/api/flavors/1", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"error": "Method not allowed"}));

    let request = Request::builder()
        .method(Method::PATCH)
        .uri("/api/flavors/1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let allow = response.headers()[header::ALLOW].to_str().unwrap().to_owned();
    assert!(allow.contains("PUT"), "allow header: {allow}");
    assert!(allow.contains("DELETE"), "allow header: {allow}");

    let (_, fetched) = send(&app, Method::GET, "/api/flavors/1", None).await;
    assert_eq!(fetched["name"], "Vanilla");
}
