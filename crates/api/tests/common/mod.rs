//! Common test utilities for integration tests.
//!
//! Every test gets its own router over fresh in-memory stores, so tests run
//! without a database and never share state.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::Word;
use fake::Fake;
use portfolio_cms_api::{app::create_app, config::Config, stores::Stores};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "portfolio_admin_session";

/// Test configuration: memory storage, login limiter disabled.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("test config must load")
}

/// Create a test application router with its backing stores.
///
/// The stores are returned so that tests can seed or inspect state directly.
pub fn create_test_app(config: Config) -> (Router, Stores) {
    let stores = Stores::in_memory();
    (create_app(config, stores.clone()), stores)
}

/// Helper to create a JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Helper to create a JSON request carrying the admin session cookie.
pub fn authed_json_request(method: Method, uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// Helper to create a bodiless request carrying the admin session cookie.
pub fn authed_request(method: Method, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

/// Helper to create an anonymous GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to parse JSON response body.
pub async fn parse_response_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(Value::Null)
}

/// Send a request and return status plus parsed body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, parse_response_body(response).await)
}

/// Returns the `name=value` pair of the session cookie set by a response.
pub fn session_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{}=", COOKIE_NAME)))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

/// Test admin credentials.
pub struct TestAdmin {
    pub username: String,
    pub password: String,
}

impl TestAdmin {
    pub fn new() -> Self {
        Self {
            username: format!("{}_{}", Username().fake::<String>(), uuid::Uuid::new_v4().simple()),
            password: "SecureP@ss123!".to_string(),
        }
    }

    pub fn body(&self) -> Value {
        json!({ "username": self.username, "password": self.password })
    }
}

impl Default for TestAdmin {
    fn default() -> Self {
        Self::new()
    }
}

/// Create an admin through setup and log in, returning the cookie header value.
pub async fn setup_and_login(app: &Router, admin: &TestAdmin) -> String {
    let (status, body) = send(app, json_request(Method::POST, "/api/admin/setup", admin.body())).await;
    assert_eq!(status, StatusCode::OK, "setup failed: {}", body);

    login(app, admin).await
}

/// Log in an existing admin, returning the cookie header value.
pub async fn login(app: &Router, admin: &TestAdmin) -> String {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/admin/login", admin.body()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login failed");
    session_cookie(&response).expect("login must set the session cookie")
}

/// A valid skill payload.
pub fn skill_payload(percentage: i32) -> Value {
    json!({
        "name": Word().fake::<String>(),
        "level": "Advanced",
        "percentage": percentage,
        "category": "Testing"
    })
}

/// A valid project payload with the given slug.
pub fn project_payload(name: &str, slug: Option<&str>) -> Value {
    let mut payload = json!({
        "name": name,
        "problem": "Manual regression took days",
        "organization": CompanyName().fake::<String>(),
        "timeframe": "Nov 2024",
        "platforms": ["Web", "API"],
        "status": "completed",
        "goals": ["Automate smoke suite"],
        "testStrategy": ["Contract tests"],
        "performanceTargets": { "p95": "200ms" },
        "isPublished": true,
        "displayOrder": 0
    });
    if let Some(slug) = slug {
        payload["slug"] = json!(slug);
    }
    payload
}

/// A valid experience payload.
pub fn experience_payload(end_date: Option<&str>) -> Value {
    json!({
        "jobTitle": "QA Engineer",
        "company": CompanyName().fake::<String>(),
        "startDate": "2021-03",
        "endDate": end_date,
        "isCurrent": false,
        "description": "Built the test platform",
        "achievements": ["Cut release time in half"]
    })
}

/// A valid profile payload.
pub fn profile_payload(name: &str) -> Value {
    json!({
        "name": name,
        "title": "QA Engineer",
        "location": "Remote",
        "email": "jane@example.com",
        "phone": "+1 555 0100",
        "linkedin": "https://linkedin.com/in/jane",
        "experienceYears": 8,
        "availability": "Open to offers",
        "responsePromise": "Replies within a day"
    })
}

/// A valid about-section payload.
pub fn about_payload(content: &str) -> Value {
    json!({ "content": content })
}

/// A valid site settings payload.
pub fn settings_payload(hero_title: &str) -> Value {
    json!({
        "heroTitle": hero_title,
        "heroSubtitle": "Test strategy and automation",
        "calendlyUrl": "https://calendly.com/jane",
        "resumeUrl": "https://example.com/cv.pdf",
        "metaTitle": "Jane Doe | QA Engineer",
        "metaDescription": "Portfolio of a QA engineer"
    })
}
