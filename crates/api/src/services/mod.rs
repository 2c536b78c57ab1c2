//! Application services.

pub mod admin_bootstrap;
pub mod auth;
pub mod cookies;

pub use admin_bootstrap::bootstrap_admin;
pub use auth::{AdminAuthService, AuthError};
pub use cookies::CookieHelper;
