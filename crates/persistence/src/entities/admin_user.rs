//! Admin user and session entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{AdminSession, AdminUser};

/// Database row mapping for the admin_users table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUserEntity {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl From<AdminUserEntity> for AdminUser {
    fn from(entity: AdminUserEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            password_hash: entity.password_hash,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the admin_sessions table.
#[derive(Debug, Clone, FromRow)]
pub struct AdminSessionEntity {
    pub token_hash: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<AdminSessionEntity> for AdminSession {
    fn from(entity: AdminSessionEntity) -> Self {
        Self {
            token_hash: entity.token_hash,
            admin_id: entity.admin_id,
            created_at: entity.created_at,
            expires_at: entity.expires_at,
        }
    }
}
