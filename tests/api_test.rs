//! Integration tests for API endpoints.
//!
//! These tests drive the full router over in-memory storage and a pinned
//! clock, so no database connection is needed.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_registry::api::{create_router, AppState};
use user_registry::infra::MemoryUserStore;
use user_registry::test_support::FixtureClock;

// =============================================================================
// Test Harness
// =============================================================================

/// Router over an empty store; "now" is 2024-06-15T09:30Z and the age requirement is 18.
fn app() -> Router {
    app_with_age_requirement(18)
}

fn app_with_age_requirement(age_requirement: u32) -> Router {
    let state = AppState::with_repository(
        Arc::new(MemoryUserStore::new()),
        FixtureClock::on(2024, 6, 15),
        age_requirement,
    );
    create_router(state)
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is UTF-8")
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        location,
        body: body.to_vec(),
    }
}

fn jane() -> Value {
    json!({
        "email": "jane.doe@example.com",
        "firstName": "Jane",
        "lastName": "Doe",
        "birthDate": "1990-05-17",
        "address": "1 Main St",
        "phoneNumber": "555-0100"
    })
}

fn person(email: &str, birth_date: &str) -> Value {
    json!({
        "email": email,
        "firstName": "Test",
        "lastName": "Person",
        "birthDate": birth_date
    })
}

async fn create(app: &Router, payload: Value) -> String {
    let response = send(app, Method::POST, "/api/users", Some(payload)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.location.expect("Location header")
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_user_returns_location() {
    let app = app();

    let response = send(&app, Method::POST, "/api/users", Some(jane())).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.location.as_deref(), Some("/api/users/1"));
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_created_user_round_trips() {
    let app = app();
    let location = create(&app, jane()).await;

    let response = send(&app, Method::GET, &location, None).await;

    assert_eq!(response.status, StatusCode::OK);
    let mut expected = jane();
    expected["id"] = json!(1);
    assert_eq!(response.json(), expected);
}

#[tokio::test]
async fn test_create_assigns_fresh_ids() {
    let app = app();

    let first = create(&app, person("a@x.com", "1980-01-01")).await;
    let second = create(&app, person("b@x.com", "1981-01-01")).await;

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_create_reports_every_validation_error_in_order() {
    let app = app();

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({ "email": "not-an-email", "firstName": "", "birthDate": "2024-06-16" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!([
            "Invalid email address.",
            "First name is required.",
            "Last name is required.",
            "Invalid birth date or date in the future."
        ])
    );
}

#[tokio::test]
async fn test_create_accepts_birth_date_today() {
    let app = app_with_age_requirement(0);

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(person("newborn@x.com", "2024-06-15")),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_create_rejects_birth_date_tomorrow() {
    let app = app_with_age_requirement(0);

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(person("unborn@x.com", "2024-06-16")),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!(["Invalid birth date or date in the future."])
    );
}

#[tokio::test]
async fn test_create_underage_user() {
    let app = app();

    let response = send(
        &app,
        Method::POST,
        "/api/users",
        Some(person("kid@x.com", "2010-01-01")),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "User must be at least 18 years old.");
}

#[tokio::test]
async fn test_create_malformed_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let errors: Vec<String> = serde_json::from_slice(&body).unwrap();
    assert_eq!(errors.len(), 1);
}

// =============================================================================
// Full update
// =============================================================================

#[tokio::test]
async fn test_update_user_replaces_fields() {
    let app = app();
    let location = create(&app, jane()).await;

    let response = send(
        &app,
        Method::PUT,
        &location,
        Some(person("new@x.com", "1985-03-03")),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "new@x.com");
    assert_eq!(body["birthDate"], "1985-03-03");
    assert!(body["address"].is_null());
    assert!(body["phoneNumber"].is_null());
}

#[tokio::test]
async fn test_update_user_not_found() {
    let app = app();

    let response = send(&app, Method::PUT, "/api/users/99", Some(jane())).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_update_user_invalid_payload() {
    let app = app();
    let location = create(&app, jane()).await;

    let response = send(
        &app,
        Method::PUT,
        &location,
        Some(json!({ "email": "new@x.com", "firstName": "New", "birthDate": "1985-03-03" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json(), json!(["Last name is required."]));
}

// =============================================================================
// Partial update
// =============================================================================

#[tokio::test]
async fn test_patch_merges_provided_fields() {
    let app = app();
    let location = create(&app, jane()).await;

    let response = send(
        &app,
        Method::PATCH,
        &location,
        Some(json!({ "firstName": "Janet", "phoneNumber": "" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["email"], "jane.doe@example.com");
    assert_eq!(body["firstName"], "Janet");
    assert_eq!(body["lastName"], "Doe");
    assert_eq!(body["address"], "1 Main St");
    assert_eq!(body["phoneNumber"], "");
}

#[tokio::test]
async fn test_patch_skips_validation() {
    let app = app();
    let location = create(&app, jane()).await;

    let response = send(
        &app,
        Method::PATCH,
        &location,
        Some(json!({ "email": "not-an-email" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["email"], "not-an-email");
}

#[tokio::test]
async fn test_patch_user_not_found() {
    let app = app();

    let response = send(
        &app,
        Method::PATCH,
        "/api/users/7",
        Some(json!({ "firstName": "Nobody" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_user_then_not_found() {
    let app = app();
    let location = create(&app, jane()).await;

    let deleted = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert!(deleted.body.is_empty());

    let fetched = send(&app, Method::GET, &location, None).await;
    assert_eq!(fetched.status, StatusCode::NOT_FOUND);

    let again = send(&app, Method::DELETE, &location, None).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.text(), "User not found with ID: 1");
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_inclusive_range_in_storage_order() {
    let app = app();
    create(&app, person("late@x.com", "2000-09-27")).await;
    create(&app, person("outside@x.com", "2000-09-28")).await;
    create(&app, person("early@x.com", "2000-09-20")).await;
    create(&app, person("middle@x.com", "2000-09-23")).await;

    let response = send(
        &app,
        Method::GET,
        "/api/users/search?from=2000-09-20&to=2000-09-27",
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let emails: Vec<String> = response
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(emails, ["late@x.com", "early@x.com", "middle@x.com"]);
}

#[tokio::test]
async fn test_search_empty_result() {
    let app = app();

    let response = send(
        &app,
        Method::GET,
        "/api/users/search?from=1900-01-01&to=1900-12-31",
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_search_rejects_inverted_range() {
    let app = app();

    let response = send(
        &app,
        Method::GET,
        "/api/users/search?from=2023-09-27&to=2023-09-20",
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "From date must be before To date.");
}

#[tokio::test]
async fn test_search_requires_both_dates() {
    let app = app();

    let response = send(&app, Method::GET, "/api/users/search?from=2023-09-27", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Operational endpoints
// =============================================================================

#[tokio::test]
async fn test_health_in_memory() {
    let app = app();

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "in-memory");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json()["paths"]["/api/users/search"].is_object());
}
