//! Experience entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Experience;

/// Database row mapping for the experience table.
#[derive(Debug, Clone, FromRow)]
pub struct ExperienceEntity {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: Option<String>,
    pub achievements: Vec<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ExperienceEntity> for Experience {
    fn from(entity: ExperienceEntity) -> Self {
        Self {
            id: entity.id,
            job_title: entity.job_title,
            company: entity.company,
            start_date: entity.start_date,
            end_date: entity.end_date,
            is_current: entity.is_current,
            description: entity.description,
            achievements: entity.achievements,
            display_order: entity.display_order,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
