//! Admin identity and session domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// The dashboard credential holder.
///
/// `password_hash` is a PHC string and is never serialized.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of an admin, as returned by login, me and setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub id: Uuid,
    pub username: String,
}

impl From<&AdminUser> for AdminSummary {
    fn from(admin: &AdminUser) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
        }
    }
}

/// Request payload for login and setup.
///
/// Missing fields deserialize as empty strings so that they surface as a
/// validation failure rather than a body rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Username and password required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 1024, message = "Username and password required"))]
    pub password: String,
}

/// A server-held login session.
///
/// Only the SHA-256 digest of the token handed to the client is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub token_hash: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Returns true once the session has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_missing_fields_fail_validation() {
        let creds: Credentials = serde_json::from_value(json!({ "username": "admin" })).unwrap();
        let errors = creds.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));

        let creds: Credentials = serde_json::from_value(json!({})).unwrap();
        assert!(creds.validate().is_err());
    }

    #[test]
    fn test_summary_has_no_hash() {
        let admin = AdminUser {
            id: Uuid::new_v4(),
            username: "admin".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(AdminSummary::from(&admin)).unwrap();
        assert_eq!(value["username"], "admin");
        assert!(value.get("passwordHash").is_none());
        assert!(!value.to_string().contains("argon2"));
    }

    #[test]
    fn test_session_expiry() {
        let now = Utc::now();
        let session = AdminSession {
            token_hash: "abc".to_string(),
            admin_id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + Duration::hours(1),
        };
        assert!(!session.is_expired(now));
        assert!(session.is_expired(now + Duration::hours(1)));
        assert!(session.is_expired(now + Duration::hours(2)));
    }
}
