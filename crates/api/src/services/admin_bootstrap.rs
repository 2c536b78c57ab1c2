//! Admin bootstrap service for initial setup.
//!
//! Creates an admin account on startup when both bootstrap credentials are
//! configured. Runs the regular setup operation, so an existing username is
//! left untouched.

use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::services::auth::{AdminAuthService, AuthError};

/// Bootstrap admin user if configured and not already done.
///
/// Returns true if a new admin was created.
pub async fn bootstrap_admin(
    auth: &AdminAuthService,
    config: &AdminConfig,
) -> Result<bool, AuthError> {
    let username = config.bootstrap_username.as_deref().unwrap_or_default();
    let password = config.bootstrap_password.as_deref().unwrap_or_default();

    // Skip if not configured
    if username.is_empty() {
        return Ok(false);
    }

    if password.is_empty() {
        warn!(
            "PORTFOLIO__ADMIN__BOOTSTRAP_USERNAME is set but PORTFOLIO__ADMIN__BOOTSTRAP_PASSWORD is empty - skipping bootstrap"
        );
        return Ok(false);
    }

    match auth.setup(username, password).await {
        Ok(admin) => {
            info!(
                username = %admin.username,
                admin_id = %admin.id,
                "Bootstrap admin user created successfully"
            );
            warn!(
                "SECURITY: Remove PORTFOLIO__ADMIN__BOOTSTRAP_PASSWORD from configuration after initial setup"
            );
            Ok(true)
        }
        Err(AuthError::AdminAlreadyExists) => {
            info!(username = %username, "Bootstrap admin already exists - skipping bootstrap");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
