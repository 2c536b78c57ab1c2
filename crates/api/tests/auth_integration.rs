//! Integration tests for admin authentication flows.
//!
//! Run with: cargo test --test auth_integration

mod common;

use axum::http::{header, Method, StatusCode};
use chrono::{Duration, Utc};
use common::{
    authed_request, create_test_app, get_request, json_request, login, send, session_cookie,
    setup_and_login, test_config, TestAdmin, COOKIE_NAME,
};
use domain::models::AdminSession;
use portfolio_cms_api::config::Config;
use serde_json::json;
use shared::crypto::sha256_hex;
use tower::ServiceExt;

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let (app, _) = create_test_app(test_config());
    let admin = TestAdmin::new();

    let (status, _) = send(&app, json_request(Method::POST, "/api/admin/setup", admin.body())).await;
    assert_eq!(status, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/admin/login", admin.body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with(&format!("{}=", COOKIE_NAME)));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=3600"));

    let body = common::parse_response_body(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["admin"]["username"], admin.username.as_str());
    assert!(body["admin"]["id"].is_string());
    assert!(body["admin"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _) = create_test_app(test_config());
    let admin = TestAdmin::new();
    setup_and_login(&app, &admin).await;

    let wrong_password = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": admin.username, "password": "wrong-password" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&wrong_password).is_none());
    let wrong_password_body = common::parse_response_body(wrong_password).await;

    let unknown_user = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": "nobody", "password": "whatever" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&unknown_user).is_none());
    let unknown_user_body = common::parse_response_body(unknown_user).await;

    assert_eq!(wrong_password_body, unknown_user_body);
    assert_eq!(wrong_password_body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields() {
    let (app, _) = create_test_app(test_config());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/admin/login", json!({ "username": "admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username and password required");

    let (status, _) = send(&app, json_request(Method::POST, "/api/admin/login", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let (app, _) = create_test_app(test_config());

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/admin/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_login_rate_limited_per_username() {
    let config = Config::load_for_test(&[("security.login_attempts_per_minute", "2")]).unwrap();
    let (app, _) = create_test_app(config);
    let bad = json!({ "username": "target", "password": "guess" });

    for _ in 0..2 {
        let (status, _) = send(&app, json_request(Method::POST, "/api/admin/login", bad.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/admin/login", bad))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));

    // Other usernames keep their own budget
    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": "someone-else", "password": "guess" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_me_requires_session() {
    let (app, _) = create_test_app(test_config());

    let (status, body) = send(&app, get_request("/api/admin/me")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Admin authentication required");
}

#[tokio::test]
async fn test_me_returns_current_admin() {
    let (app, _) = create_test_app(test_config());
    let admin = TestAdmin::new();
    let cookie = setup_and_login(&app, &admin).await;

    let (status, body) = send(&app, authed_request(Method::GET, "/api/admin/me", &cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"]["username"], admin.username.as_str());
}

#[tokio::test]
async fn test_unknown_token_rejected_and_cleared() {
    let (app, _) = create_test_app(test_config());
    let cookie = format!("{}=not-a-real-token", COOKIE_NAME);

    let response = app
        .clone()
        .oneshot(authed_request(Method::GET, "/api/admin/me", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let (app, _) = create_test_app(test_config());
    let admin = TestAdmin::new();
    let cookie = setup_and_login(&app, &admin).await;

    let response = app
        .clone()
        .oneshot(authed_request(Method::POST, "/api/admin/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cleared.contains("Max-Age=0"));
    let body = common::parse_response_body(response).await;
    assert_eq!(body["message"], "Logout successful");

    // The old token no longer authenticates
    let (status, _) = send(&app, authed_request(Method::GET, "/api/admin/me", &cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Logging in again issues a working session
    let fresh = login(&app, &admin).await;
    assert_ne!(fresh, cookie);
    let (status, _) = send(&app, authed_request(Method::GET, "/api/admin/me", &fresh)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let (app, _) = create_test_app(test_config());

    let (status, body) = send(&app, json_request(Method::POST, "/api/admin/logout", json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn test_orphaned_session_rejected() {
    let (app, stores) = create_test_app(test_config());
    let token = "orphaned-session-token";
    let now = Utc::now();

    stores
        .sessions
        .create(&AdminSession {
            token_hash: sha256_hex(token),
            admin_id: uuid::Uuid::new_v4(),
            created_at: now,
            expires_at: now + Duration::hours(1),
        })
        .await
        .unwrap();

    let cookie = format!("{}={}", COOKIE_NAME, token);
    let (status, body) = send(&app, authed_request(Method::GET, "/api/admin/me", &cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid admin session");

    // The orphan was destroyed along the way
    assert!(stores.sessions.find(&sha256_hex(token)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_session_rejected() {
    let (app, stores) = create_test_app(test_config());
    let admin = TestAdmin::new();
    setup_and_login(&app, &admin).await;

    let stored = stores
        .admins
        .find_by_username(&admin.username)
        .await
        .unwrap()
        .unwrap();
    let token = "expired-session-token";
    let now = Utc::now();
    stores
        .sessions
        .create(&AdminSession {
            token_hash: sha256_hex(token),
            admin_id: stored.id,
            created_at: now - Duration::hours(2),
            expires_at: now - Duration::hours(1),
        })
        .await
        .unwrap();

    let cookie = format!("{}={}", COOKIE_NAME, token);
    let (status, body) = send(&app, authed_request(Method::GET, "/api/admin/me", &cookie)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Admin authentication required");
}

// ============================================================================
// Setup Tests
// ============================================================================

#[tokio::test]
async fn test_setup_creates_admin() {
    let (app, _) = create_test_app(test_config());
    let admin = TestAdmin::new();

    let (status, body) = send(&app, json_request(Method::POST, "/api/admin/setup", admin.body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Admin user created");
    assert_eq!(body["admin"]["username"], admin.username.as_str());
    assert!(body["admin"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_setup_twice_keeps_original_password() {
    let (app, _) = create_test_app(test_config());
    let admin = TestAdmin::new();
    setup_and_login(&app, &admin).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/setup",
            json!({ "username": admin.username, "password": "another-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Admin user already exists");

    // Original password still works, the new one does not
    login(&app, &admin).await;
    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/login",
            json!({ "username": admin.username, "password": "another-password" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_setup_missing_fields() {
    let (app, _) = create_test_app(test_config());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/admin/setup", json!({ "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username and password required");
}
