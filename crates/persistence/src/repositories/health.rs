//! Database connectivity probe.

use async_trait::async_trait;
use sqlx::PgPool;

use domain::errors::StoreError;
use domain::ports::StoreHealth;

use crate::metrics::QueryTimer;

/// Runs `SELECT 1` against the pool.
#[derive(Clone)]
pub struct DatabaseHealth {
    pool: PgPool,
}

impl DatabaseHealth {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreHealth for DatabaseHealth {
    async fn ping(&self) -> Result<(), StoreError> {
        let timer = QueryTimer::new("health_ping");
        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        timer.observe(&result);
        result?;
        Ok(())
    }
}
