//! Admin authentication: login, logout, session resolution and setup.

use std::sync::Arc;

use chrono::{Duration, Utc};
use domain::errors::StoreError;
use domain::models::{AdminSession, AdminSummary, AdminUser};
use domain::ports::{AdminUserStore, SessionStore};
use shared::crypto::{generate_session_token, sha256_hex};
use shared::password::{burn_verification, hash_password, verify_password, PasswordError};
use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are never distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin user already exists")]
    AdminAlreadyExists,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub admin: AdminSummary,
    /// Raw session token for the cookie. Only its hash is stored.
    pub token: String,
}

/// Outcome of looking up a session token.
#[derive(Debug, Clone)]
pub enum SessionCheck {
    Valid(AdminUser),
    /// No session for this token, or it expired (and has been removed).
    Missing,
    /// The session pointed at an admin that no longer exists. It has been removed.
    Orphaned,
}

/// Admin authentication service.
pub struct AdminAuthService {
    admins: Arc<dyn AdminUserStore>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl AdminAuthService {
    pub fn new(
        admins: Arc<dyn AdminUserStore>,
        sessions: Arc<dyn SessionStore>,
        session_ttl_secs: i64,
    ) -> Self {
        Self {
            admins,
            sessions,
            session_ttl: Duration::seconds(session_ttl_secs),
        }
    }

    /// Verifies credentials and opens a new session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, AuthError> {
        let admin = match self.admins.find_by_username(username).await? {
            Some(admin) => admin,
            None => {
                // Same hashing cost as a real check
                burn_verification(password);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let is_valid = match verify_password(password, &admin.password_hash) {
            Ok(valid) => valid,
            Err(PasswordError::InvalidHashFormat) => {
                tracing::warn!(admin_id = %admin.id, "Stored password hash is malformed");
                false
            }
            Err(e) => return Err(e.into()),
        };
        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let now = Utc::now();
        let purged = self.sessions.purge_expired(now).await?;
        if purged > 0 {
            tracing::debug!(purged = purged, "Purged expired admin sessions");
        }

        let token = generate_session_token();
        let session = AdminSession {
            token_hash: sha256_hex(&token),
            admin_id: admin.id,
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.sessions.create(&session).await?;

        Ok(LoginResult {
            admin: AdminSummary::from(&admin),
            token,
        })
    }

    /// Destroys the session for `token`. Succeeds whether or not it existed.
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let deleted = self.sessions.delete(&sha256_hex(token)).await?;
        if !deleted {
            tracing::debug!("Session not found during logout, may already be logged out");
        }
        Ok(())
    }

    /// Resolves a session token to its admin.
    ///
    /// Expired and orphaned sessions are deleted as a side effect.
    pub async fn resolve(&self, token: &str) -> Result<SessionCheck, AuthError> {
        let token_hash = sha256_hex(token);

        let session = match self.sessions.find(&token_hash).await? {
            Some(session) => session,
            None => return Ok(SessionCheck::Missing),
        };

        if session.is_expired(Utc::now()) {
            self.sessions.delete(&token_hash).await?;
            return Ok(SessionCheck::Missing);
        }

        match self.admins.find_by_id(session.admin_id).await? {
            Some(admin) => Ok(SessionCheck::Valid(admin)),
            None => {
                tracing::warn!(admin_id = %session.admin_id, "Session references a missing admin");
                self.sessions.delete(&token_hash).await?;
                Ok(SessionCheck::Orphaned)
            }
        }
    }

    /// Creates an admin account unless the username is taken.
    pub async fn setup(&self, username: &str, password: &str) -> Result<AdminSummary, AuthError> {
        if self.admins.find_by_username(username).await?.is_some() {
            return Err(AuthError::AdminAlreadyExists);
        }

        let password_hash = hash_password(password)?;

        match self.admins.create(username, &password_hash).await {
            Ok(admin) => Ok(AdminSummary::from(&admin)),
            // Lost a race with a concurrent setup
            Err(StoreError::Conflict(_)) => Err(AuthError::AdminAlreadyExists),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use persistence::memory::{MemoryAdminUsers, MemorySessions};
    use uuid::Uuid;

    fn service() -> (AdminAuthService, Arc<MemorySessions>) {
        let sessions = Arc::new(MemorySessions::new());
        let service =
            AdminAuthService::new(Arc::new(MemoryAdminUsers::new()), sessions.clone(), 3600);
        (service, sessions)
    }

    #[tokio::test]
    async fn test_setup_then_login() {
        let (service, _) = service();
        let admin = service.setup("admin", "admin123").await.unwrap();
        assert_eq!(admin.username, "admin");

        let result = service.login("admin", "admin123").await.unwrap();
        assert_eq!(result.admin, admin);
        assert_eq!(result.token.len(), 43);

        match service.resolve(&result.token).await.unwrap() {
            SessionCheck::Valid(resolved) => assert_eq!(resolved.id, admin.id),
            other => panic!("Expected valid session, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (service, _) = service();
        service.setup("admin", "admin123").await.unwrap();

        let unknown = service.login("x", "y").await.unwrap_err();
        let wrong = service.login("admin", "wrong").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_setup_duplicate_username() {
        let (service, _) = service();
        service.setup("admin", "admin123").await.unwrap();

        let err = service.setup("admin", "other").await.unwrap_err();
        assert!(matches!(err, AuthError::AdminAlreadyExists));

        // Original password still valid
        assert!(service.login("admin", "admin123").await.is_ok());
        assert!(service.login("admin", "other").await.is_err());
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let (service, _) = service();
        service.setup("admin", "admin123").await.unwrap();
        let result = service.login("admin", "admin123").await.unwrap();

        service.logout(&result.token).await.unwrap();
        assert!(matches!(
            service.resolve(&result.token).await.unwrap(),
            SessionCheck::Missing
        ));

        // Second logout is harmless
        service.logout(&result.token).await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let (service, _) = service();
        assert!(matches!(
            service.resolve("not-a-session").await.unwrap(),
            SessionCheck::Missing
        ));
    }

    #[tokio::test]
    async fn test_expired_session_is_removed() {
        let (service, sessions) = service();
        let now = Utc::now();
        let token = "expired-token";
        sessions
            .create(&AdminSession {
                token_hash: sha256_hex(token),
                admin_id: Uuid::new_v4(),
                created_at: now - Duration::hours(2),
                expires_at: now - Duration::hours(1),
            })
            .await
            .unwrap();

        assert!(matches!(
            service.resolve(token).await.unwrap(),
            SessionCheck::Missing
        ));
        assert!(sessions.find(&sha256_hex(token)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orphaned_session_is_removed() {
        let (service, sessions) = service();
        let now = Utc::now();
        let token = "orphan-token";
        sessions
            .create(&AdminSession {
                token_hash: sha256_hex(token),
                admin_id: Uuid::new_v4(),
                created_at: now,
                expires_at: now + Duration::hours(1),
            })
            .await
            .unwrap();

        assert!(matches!(
            service.resolve(token).await.unwrap(),
            SessionCheck::Orphaned
        ));
        assert!(sessions.find(&sha256_hex(token)).await.unwrap().is_none());
    }
}
