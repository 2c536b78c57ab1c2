//! Project entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{Project, ProjectStatus};

/// Database row mapping for the projects table.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub problem: String,
    pub organization: String,
    pub timeframe: String,
    pub platforms: Vec<String>, // TEXT[]
    pub status: String,
    pub goals: Vec<String>,
    pub test_strategy: Vec<String>,
    pub performance_targets: serde_json::Value,
    pub is_published: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectEntity> for Project {
    type Error = StoreError;

    fn try_from(entity: ProjectEntity) -> Result<Self, Self::Error> {
        let status = ProjectStatus::parse(&entity.status).ok_or_else(|| {
            StoreError::Unavailable(format!("unknown project status '{}'", entity.status))
        })?;
        Ok(Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            problem: entity.problem,
            organization: entity.organization,
            timeframe: entity.timeframe,
            platforms: entity.platforms,
            status,
            goals: entity.goals,
            test_strategy: entity.test_strategy,
            performance_targets: entity.performance_targets,
            is_published: entity.is_published,
            display_order: entity.display_order,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(status: &str) -> ProjectEntity {
        ProjectEntity {
            id: Uuid::new_v4(),
            name: "a-OK".to_string(),
            slug: "a-ok".to_string(),
            problem: "...".to_string(),
            organization: "ankaEK".to_string(),
            timeframe: "Nov 2024".to_string(),
            platforms: vec!["Web".to_string(), "API".to_string()],
            status: status.to_string(),
            goals: vec![],
            test_strategy: vec![],
            performance_targets: serde_json::json!({}),
            is_published: true,
            display_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_conversion_keeps_platform_order() {
        let project = Project::try_from(entity("coming-soon")).unwrap();
        assert_eq!(project.status, ProjectStatus::ComingSoon);
        assert_eq!(project.platforms, vec!["Web", "API"]);
    }

    #[test]
    fn test_unknown_status() {
        assert!(Project::try_from(entity("archived")).is_err());
    }
}
