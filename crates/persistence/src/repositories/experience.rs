//! Experience repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{CollectionItem, Experience, ExperiencePatch, NewExperience, Visibility};
use domain::ports::CollectionStore;

use crate::entities::ExperienceEntity;
use crate::metrics::QueryTimer;

/// Repository for work experience entries.
#[derive(Clone)]
pub struct ExperienceRepository {
    pool: PgPool,
}

impl ExperienceRepository {
    /// Creates a new ExperienceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore<Experience> for ExperienceRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Experience>, StoreError> {
        let timer = QueryTimer::new("list_experience");
        let result = sqlx::query_as::<_, ExperienceEntity>(
            r#"
            SELECT * FROM experience
            WHERE ($1 OR is_active)
            ORDER BY display_order ASC, created_at ASC
            "#,
        )
        .bind(visibility == Visibility::All)
        .fetch_all(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into_iter().map(Experience::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Experience>, StoreError> {
        let timer = QueryTimer::new("find_experience_by_id");
        let result = sqlx::query_as::<_, ExperienceEntity>(
            r#"
            SELECT * FROM experience WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(Experience::from))
    }

    async fn create(&self, new: NewExperience) -> Result<Experience, StoreError> {
        let experience = Experience::create(Uuid::new_v4(), new, Utc::now());

        let timer = QueryTimer::new("create_experience");
        let result = sqlx::query_as::<_, ExperienceEntity>(
            r#"
            INSERT INTO experience (id, job_title, company, start_date, end_date, is_current,
                                    description, achievements, display_order, is_active,
                                    created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(experience.id)
        .bind(&experience.job_title)
        .bind(&experience.company)
        .bind(&experience.start_date)
        .bind(&experience.end_date)
        .bind(experience.is_current)
        .bind(&experience.description)
        .bind(&experience.achievements)
        .bind(experience.display_order)
        .bind(experience.is_active)
        .bind(experience.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }

    async fn update(&self, id: Uuid, patch: ExperiencePatch) -> Result<Experience, StoreError> {
        let timer = QueryTimer::new("update_experience");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ExperienceEntity>(
            r#"
            SELECT * FROM experience WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let mut experience = Experience::from(current);
        experience.apply(patch, Utc::now());

        let updated = sqlx::query_as::<_, ExperienceEntity>(
            r#"
            UPDATE experience SET
                job_title = $2,
                company = $3,
                start_date = $4,
                end_date = $5,
                is_current = $6,
                description = $7,
                achievements = $8,
                display_order = $9,
                is_active = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&experience.job_title)
        .bind(&experience.company)
        .bind(&experience.start_date)
        .bind(&experience.end_date)
        .bind(experience.is_current)
        .bind(&experience.description)
        .bind(&experience.achievements)
        .bind(experience.display_order)
        .bind(experience.is_active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_experience");
        let result = sqlx::query(
            r#"
            DELETE FROM experience WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
