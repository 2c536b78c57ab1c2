//! Admin authentication routes: login, logout, me and setup.

use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use domain::models::{AdminSummary, Credentials};
use serde::Serialize;
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentAdmin, JsonBody};
use crate::middleware::metrics::record_admin_login;
use crate::services::auth::AuthError;

const CREDENTIALS_REQUIRED: &str = "Username and password required";

/// Response body carrying the authenticated admin.
#[derive(Debug, Clone, Serialize)]
pub struct AdminResponse {
    pub admin: AdminSummary,
}

/// Response body for login and setup.
#[derive(Debug, Clone, Serialize)]
pub struct AdminMessageResponse {
    pub message: String,
    pub admin: AdminSummary,
}

/// Response body for logout.
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

fn check_credentials(credentials: &Credentials) -> Result<(), ApiError> {
    credentials
        .validate()
        .map_err(|_| ApiError::invalid_input(CREDENTIALS_REQUIRED))
}

/// Log in with username and password.
///
/// POST /api/admin/login
///
/// Sets the session cookie on success. Unknown usernames and wrong passwords
/// produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Response, ApiError> {
    check_credentials(&credentials)?;

    if let Some(limiter) = &state.login_limiter {
        if let Err(retry_after_secs) = limiter.check(&credentials.username) {
            record_admin_login("rate_limited");
            warn!(username = %credentials.username, "Login rate limit exceeded");
            return Err(ApiError::RateLimited { retry_after_secs });
        }
    }

    let result = match state
        .auth
        .login(&credentials.username, &credentials.password)
        .await
    {
        Ok(result) => result,
        Err(AuthError::InvalidCredentials) => {
            record_admin_login("invalid_credentials");
            info!(username = %credentials.username, "Admin login failed");
            return Err(ApiError::InvalidCredentials);
        }
        Err(e) => return Err(e.into()),
    };

    record_admin_login("success");
    info!(admin_id = %result.admin.id, username = %result.admin.username, "Admin logged in");

    let mut headers = HeaderMap::new();
    state.cookies.add_session_cookie(&mut headers, &result.token);

    Ok((
        headers,
        Json(AdminMessageResponse {
            message: "Login successful".to_string(),
            admin: result.admin,
        }),
    )
        .into_response())
}

/// Log out, destroying the session named by the cookie.
///
/// POST /api/admin/logout
///
/// Always clears the cookie. Succeeds when no session is present.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    if let Some(token) = state.cookies.extract_session_token(&headers) {
        state.auth.logout(token).await.map_err(|e| {
            warn!(error = %e, "Could not destroy admin session");
            ApiError::from(e)
        })?;
        info!("Admin logged out");
    }

    let mut response_headers = HeaderMap::new();
    state.cookies.add_clear_cookie(&mut response_headers);

    Ok((
        response_headers,
        Json(LogoutResponse {
            message: "Logout successful".to_string(),
        }),
    )
        .into_response())
}

/// The admin bound to the current session.
///
/// GET /api/admin/me
pub async fn me(CurrentAdmin(admin): CurrentAdmin) -> Json<AdminResponse> {
    Json(AdminResponse { admin })
}

/// Create an admin account. Refuses a username that already exists.
///
/// POST /api/admin/setup
pub async fn setup(
    State(state): State<AppState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Json<AdminMessageResponse>, ApiError> {
    check_credentials(&credentials)?;

    let admin = state
        .auth
        .setup(&credentials.username, &credentials.password)
        .await?;

    info!(admin_id = %admin.id, username = %admin.username, "Admin user created");

    Ok(Json(AdminMessageResponse {
        message: "Admin user created".to_string(),
        admin,
    }))
}
