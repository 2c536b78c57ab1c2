//! Skill repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{CollectionItem, NewSkill, Skill, SkillPatch, Visibility};
use domain::ports::CollectionStore;

use crate::entities::SkillEntity;
use crate::metrics::QueryTimer;

/// Repository for skill-related database operations.
#[derive(Clone)]
pub struct SkillRepository {
    pool: PgPool,
}

impl SkillRepository {
    /// Creates a new SkillRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore<Skill> for SkillRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Skill>, StoreError> {
        let timer = QueryTimer::new("list_skills");
        let result = sqlx::query_as::<_, SkillEntity>(
            r#"
            SELECT * FROM skills
            WHERE ($1 OR is_active)
            ORDER BY display_order ASC, created_at ASC
            "#,
        )
        .bind(visibility == Visibility::All)
        .fetch_all(&self.pool)
        .await;
        timer.observe(&result);
        result?.into_iter().map(Skill::try_from).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Skill>, StoreError> {
        let timer = QueryTimer::new("find_skill_by_id");
        let result = sqlx::query_as::<_, SkillEntity>(
            r#"
            SELECT * FROM skills WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        result?.map(Skill::try_from).transpose()
    }

    async fn create(&self, new: NewSkill) -> Result<Skill, StoreError> {
        let skill = Skill::create(Uuid::new_v4(), new, Utc::now());

        let timer = QueryTimer::new("create_skill");
        let result = sqlx::query_as::<_, SkillEntity>(
            r#"
            INSERT INTO skills (id, name, level, percentage, category, display_order,
                                is_active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(skill.id)
        .bind(&skill.name)
        .bind(skill.level.as_str())
        .bind(skill.percentage)
        .bind(&skill.category)
        .bind(skill.display_order)
        .bind(skill.is_active)
        .bind(skill.created_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Skill::try_from(result?)
    }

    async fn update(&self, id: Uuid, patch: SkillPatch) -> Result<Skill, StoreError> {
        let timer = QueryTimer::new("update_skill");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, SkillEntity>(
            r#"
            SELECT * FROM skills WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let mut skill = Skill::try_from(current)?;
        skill.apply(patch, Utc::now());

        let updated = sqlx::query_as::<_, SkillEntity>(
            r#"
            UPDATE skills SET
                name = $2,
                level = $3,
                percentage = $4,
                category = $5,
                display_order = $6,
                is_active = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&skill.name)
        .bind(skill.level.as_str())
        .bind(skill.percentage)
        .bind(&skill.category)
        .bind(skill.display_order)
        .bind(skill.is_active)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Skill::try_from(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_skill");
        let result = sqlx::query(
            r#"
            DELETE FROM skills WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
