//! Admin user and session repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{AdminSession, AdminUser};
use domain::ports::{AdminUserStore, SessionStore};

use crate::entities::{AdminSessionEntity, AdminUserEntity};
use crate::metrics::QueryTimer;

/// Repository for admin credentials.
#[derive(Clone)]
pub struct AdminUserRepository {
    pool: PgPool,
}

impl AdminUserRepository {
    /// Creates a new AdminUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserStore for AdminUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreError> {
        let timer = QueryTimer::new("find_admin_by_id");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT * FROM admin_users WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(AdminUser::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, StoreError> {
        let timer = QueryTimer::new("find_admin_by_username");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            SELECT * FROM admin_users WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(AdminUser::from))
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<AdminUser, StoreError> {
        let timer = QueryTimer::new("create_admin");
        let result = sqlx::query_as::<_, AdminUserEntity>(
            r#"
            INSERT INTO admin_users (id, username, password_hash, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }
}

/// Repository for server-side admin sessions.
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new SessionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn create(&self, session: &AdminSession) -> Result<(), StoreError> {
        let timer = QueryTimer::new("create_admin_session");
        let result = sqlx::query(
            r#"
            INSERT INTO admin_sessions (token_hash, admin_id, created_at, expires_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session.token_hash)
        .bind(session.admin_id)
        .bind(session.created_at)
        .bind(session.expires_at)
        .execute(&self.pool)
        .await;
        timer.observe(&result);
        result?;
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<AdminSession>, StoreError> {
        let timer = QueryTimer::new("find_admin_session");
        let result = sqlx::query_as::<_, AdminSessionEntity>(
            r#"
            SELECT * FROM admin_sessions WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(AdminSession::from))
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_admin_session");
        let result = sqlx::query(
            r#"
            DELETE FROM admin_sessions WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let timer = QueryTimer::new("purge_expired_admin_sessions");
        let result = sqlx::query(
            r#"
            DELETE FROM admin_sessions WHERE expires_at <= $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}
