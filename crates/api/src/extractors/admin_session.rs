//! Authenticated admin extractor.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::AdminSummary;

use crate::error::ApiError;
use crate::middleware::session::AUTH_REQUIRED;

/// The admin resolved by the session gate for this request.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AdminSummary);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAdmin>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated(AUTH_REQUIRED.to_string()))
    }
}
