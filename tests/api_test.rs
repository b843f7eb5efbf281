//! Integration tests for API endpoints.
//!
//! The full router runs against the in-memory credential store, so no
//! database is required.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use kira_api::api::{cors_layer, create_router, AppState};
use kira_api::config::Config;
use kira_api::domain::{School, TokenIssuer};
use kira_api::infra::InMemoryUserStore;

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config() -> Config {
    Config::from_lookup(|key| {
        let value = match key {
            "JWT_SECRET" => TEST_SECRET,
            "ARGON2_MEMORY_KIB" => "64",
            "ARGON2_ITERATIONS" => "1",
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap()
}

fn app_with_store(store: Arc<InMemoryUserStore>) -> Router {
    let state = AppState::from_store(store, None, &test_config()).unwrap();
    create_router(state)
}

fn app() -> Router {
    app_with_store(Arc::new(InMemoryUserStore::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn register_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username={}&password={}",
            username.replace('@', "%40"),
            password
        )))
        .unwrap()
}

fn me_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri("/users/me");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register_and_login(app: &Router, body: Value, password: &str) -> String {
    let email = body["email"].as_str().unwrap().to_string();
    let (status, _) = send(app, register_request(body)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, token) = send(app, login_request(&email, password)).await;
    assert_eq!(status, StatusCode::OK);
    token["access_token"].as_str().unwrap().to_string()
}

// =============================================================================
// Registration and Login
// =============================================================================

#[tokio::test]
async fn test_register_then_login_scenario() {
    let app = app();
    let account = json!({"email": "a@x.com", "first_name": "A", "password": "pw123"});

    let (status, body) = send(&app, register_request(account.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"message": "User created successfully"}));

    let (status, body) = send(&app, register_request(account)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_ACCOUNT");

    let (status, body) = send(&app, login_request("a@x.com", "pw123")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_eq!(body["token_type"], "bearer");

    let (status, body) = send(&app, login_request("a@x.com", "wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Incorrect password");

    let (status, body) = send(&app, login_request("nobody@x.com", "x")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body["error"]["message"],
        "No account found with this email address"
    );
}

#[tokio::test]
async fn test_duplicate_rejected_regardless_of_password() {
    let app = app();

    let (status, _) = send(
        &app,
        register_request(json!({"email": "a@x.com", "first_name": "A", "password": "one"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        register_request(json!({"email": "a@x.com", "first_name": "B", "password": "two"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Original credentials still work
    let (status, _) = send(&app, login_request("a@x.com", "one")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        register_request(json!({"email": "not-an-email", "first_name": "A", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        register_request(json!({"email": "a@x.com", "first_name": "A", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, register_request(json!({"email": "a@x.com"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_requires_form_fields() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=a%40x.com"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Authenticated Profile
// =============================================================================

#[tokio::test]
async fn test_me_returns_profile_with_school() {
    let store = Arc::new(InMemoryUserStore::new());
    let school = School {
        id: Uuid::new_v4(),
        name: "Riverside High".to_string(),
        location: None,
    };
    store.add_school(school.clone()).await;
    let app = app_with_store(store);

    let token = register_and_login(
        &app,
        json!({
            "email": "a@x.com",
            "first_name": "A",
            "last_name": "B",
            "password": "pw123",
            "school_id": school.id,
        }),
        "pw123",
    )
    .await;

    let (status, body) = send(&app, me_request(Some(&format!("Bearer {}", token)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "student");
    assert_eq!(body["school"]["name"], "Riverside High");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_rejects_bad_credentials() {
    let app = app();
    let token = register_and_login(
        &app,
        json!({"email": "a@x.com", "first_name": "A", "password": "pw123"}),
        "pw123",
    )
    .await;

    let (status, body) = send(&app, me_request(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = send(&app, me_request(Some(&format!("Basic {}", token)))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let mut tampered = token.clone();
    tampered.push('x');
    let (status, body) = send(&app, me_request(Some(&format!("Bearer {}", tampered)))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_INVALID");
}

#[tokio::test]
async fn test_me_rejects_expired_token() {
    let app = app();
    let expired = TokenIssuer::new(TEST_SECRET.as_bytes())
        .issue(Uuid::new_v4(), Duration::seconds(-1))
        .unwrap();

    let (status, body) = send(
        &app,
        me_request(Some(&format!("Bearer {}", expired.token))),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_me_for_unknown_subject_is_not_found() {
    let app = app();
    let token = TokenIssuer::new(TEST_SECRET.as_bytes())
        .issue(Uuid::new_v4(), Duration::minutes(5))
        .unwrap();

    let (status, _) = send(&app, me_request(Some(&format!("Bearer {}", token.token)))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Root and Health
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(&app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Hello": "World Static"}));
}

#[tokio::test]
async fn test_health_without_database() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send(&app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "in-memory");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let request = Request::builder()
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/auth/login"].is_object());
}

// =============================================================================
// CORS
// =============================================================================

async fn allowed_origin(origins: &[String], origin: &str) -> Option<String> {
    let app = app().layer(cors_layer(origins));
    let request = Request::builder()
        .uri("/")
        .header(header::ORIGIN, origin)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_cors_without_origins_allows_any() {
    assert_eq!(
        allowed_origin(&[], "https://anywhere.example").await.as_deref(),
        Some("*")
    );
}

#[tokio::test]
async fn test_cors_with_origins_is_restricted() {
    let origins = vec!["https://app.example.com".to_string()];

    assert_eq!(
        allowed_origin(&origins, "https://app.example.com").await.as_deref(),
        Some("https://app.example.com")
    );
    assert_eq!(allowed_origin(&origins, "https://evil.example").await, None);
}

#[tokio::test]
async fn test_cors_wildcard_in_config_means_any() {
    let config = Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "CORS_ALLOWED_ORIGINS" => Some("*".to_string()),
        _ => None,
    })
    .unwrap();
    assert!(config.cors_allowed_origins.is_empty());

    assert_eq!(
        allowed_origin(&config.cors_allowed_origins, "https://anywhere.example")
            .await
            .as_deref(),
        Some("*")
    );
}
