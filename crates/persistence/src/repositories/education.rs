//! Education repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{CollectionItem, Education, EducationPatch, NewEducation, Visibility};
use domain::ports::CollectionStore;

use crate::entities::EducationEntity;
use crate::metrics::QueryTimer;

/// Repository for education entries.
#[derive(Clone)]
pub struct EducationRepository {
    pool: PgPool,
}

impl EducationRepository {
    /// Creates a new EducationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore<Education> for EducationRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Education>, StoreError> {
        let timer = QueryTimer::new("list_education");
        let result = sqlx::query_as::<_, EducationEntity>(
            r#"
            SELECT * FROM education
            WHERE ($1 OR is_active)
            ORDER BY display_order ASC, created_at ASC
            "#,
        )
        .bind(visibility == Visibility::All)
        .fetch_all(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into_iter().map(Education::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Education>, StoreError> {
        let timer = QueryTimer::new("find_education_by_id");
        let result = sqlx::query_as::<_, EducationEntity>(
            r#"
            SELECT * FROM education WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(Education::from))
    }

    async fn create(&self, new: NewEducation) -> Result<Education, StoreError> {
        let education = Education::create(Uuid::new_v4(), new, Utc::now());

        let timer = QueryTimer::new("create_education");
        let result = sqlx::query_as::<_, EducationEntity>(
            r#"
            INSERT INTO education (id, degree, institution, start_date, end_date, is_current,
                                   description, display_order, is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(education.id)
        .bind(&education.degree)
        .bind(&education.institution)
        .bind(&education.start_date)
        .bind(&education.end_date)
        .bind(education.is_current)
        .bind(&education.description)
        .bind(education.display_order)
        .bind(education.is_active)
        .bind(education.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }

    async fn update(&self, id: Uuid, patch: EducationPatch) -> Result<Education, StoreError> {
        let timer = QueryTimer::new("update_education");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, EducationEntity>(
            r#"
            SELECT * FROM education WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let mut education = Education::from(current);
        education.apply(patch, Utc::now());

        let updated = sqlx::query_as::<_, EducationEntity>(
            r#"
            UPDATE education SET
                degree = $2,
                institution = $3,
                start_date = $4,
                end_date = $5,
                is_current = $6,
                description = $7,
                display_order = $8,
                is_active = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&education.degree)
        .bind(&education.institution)
        .bind(&education.start_date)
        .bind(&education.end_date)
        .bind(education.is_current)
        .bind(&education.description)
        .bind(education.display_order)
        .bind(education.is_active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_education");
        let result = sqlx::query(
            r#"
            DELETE FROM education WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
