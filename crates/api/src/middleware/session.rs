//! Admin session gate.
//!
//! Guards every admin route except login, logout and setup.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use domain::models::AdminSummary;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::CurrentAdmin;
use crate::services::auth::SessionCheck;

/// Rejection message when no usable session accompanies the request.
pub const AUTH_REQUIRED: &str = "Admin authentication required";

/// Rejection message when the session's admin no longer exists.
pub const INVALID_SESSION: &str = "Invalid admin session";

/// Middleware that requires a valid admin session cookie.
///
/// On success the resolved admin is stored in request extensions as
/// [`CurrentAdmin`]. Stale sessions are rejected with a clearing cookie.
pub async fn require_admin_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let token = match state.cookies.extract_session_token(req.headers()) {
        Some(token) => token.to_string(),
        None => return ApiError::Unauthenticated(AUTH_REQUIRED.to_string()).into_response(),
    };

    match state.auth.resolve(&token).await {
        Ok(SessionCheck::Valid(admin)) => {
            req.extensions_mut()
                .insert(CurrentAdmin(AdminSummary::from(&admin)));
            next.run(req).await
        }
        Ok(SessionCheck::Missing) => rejection(&state, AUTH_REQUIRED),
        Ok(SessionCheck::Orphaned) => rejection(&state, INVALID_SESSION),
        Err(err) => ApiError::from(err).into_response(),
    }
}

fn rejection(state: &AppState, message: &str) -> Response {
    let mut response = ApiError::Unauthenticated(message.to_string()).into_response();
    state.cookies.add_clear_cookie(response.headers_mut());
    response
}
