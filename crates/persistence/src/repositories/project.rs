//! Project repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{CollectionItem, NewProject, Project, ProjectPatch, Visibility};
use domain::ports::{CollectionStore, ProjectLookup};

use crate::entities::ProjectEntity;
use crate::metrics::QueryTimer;

/// Repository for project-related database operations.
///
/// Slug uniqueness is enforced by the `projects_slug_key` constraint and
/// surfaces as `StoreError::Conflict`.
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Creates a new ProjectRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore<Project> for ProjectRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<Project>, StoreError> {
        let timer = QueryTimer::new("list_projects");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT * FROM projects
            WHERE ($1 OR is_published)
            ORDER BY display_order ASC, created_at ASC
            "#,
        )
        .bind(visibility == Visibility::All)
        .fetch_all(&self.pool)
        .await;
        timer.observe(&result);
        result?.into_iter().map(Project::try_from).collect()
    }

    async fn find(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let timer = QueryTimer::new("find_project_by_id");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT * FROM projects WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        result?.map(Project::try_from).transpose()
    }

    async fn create(&self, new: NewProject) -> Result<Project, StoreError> {
        let project = Project::create(Uuid::new_v4(), new, Utc::now());

        let timer = QueryTimer::new("create_project");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            INSERT INTO projects (id, name, slug, problem, organization, timeframe, platforms,
                                  status, goals, test_strategy, performance_targets,
                                  is_published, display_order, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(project.id)
        .bind(&project.name)
        .bind(&project.slug)
        .bind(&project.problem)
        .bind(&project.organization)
        .bind(&project.timeframe)
        .bind(&project.platforms)
        .bind(project.status.as_str())
        .bind(&project.goals)
        .bind(&project.test_strategy)
        .bind(&project.performance_targets)
        .bind(project.is_published)
        .bind(project.display_order)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Project::try_from(result?)
    }

    async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Project, StoreError> {
        let timer = QueryTimer::new("update_project");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT * FROM projects WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let mut project = Project::try_from(current)?;
        project.apply(patch, Utc::now());

        let updated = sqlx::query_as::<_, ProjectEntity>(
            r#"
            UPDATE projects SET
                name = $2,
                slug = $3,
                problem = $4,
                organization = $5,
                timeframe = $6,
                platforms = $7,
                status = $8,
                goals = $9,
                test_strategy = $10,
                performance_targets = $11,
                is_published = $12,
                display_order = $13,
                updated_at = $14
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&project.name)
        .bind(&project.slug)
        .bind(&project.problem)
        .bind(&project.organization)
        .bind(&project.timeframe)
        .bind(&project.platforms)
        .bind(project.status.as_str())
        .bind(&project.goals)
        .bind(&project.test_strategy)
        .bind(&project.performance_targets)
        .bind(project.is_published)
        .bind(project.display_order)
        .bind(project.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Project::try_from(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_project");
        let result = sqlx::query(
            r#"
            DELETE FROM projects WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProjectLookup for ProjectRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        let timer = QueryTimer::new("find_project_by_slug");
        let result = sqlx::query_as::<_, ProjectEntity>(
            r#"
            SELECT * FROM projects WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        result?.map(Project::try_from).transpose()
    }
}
