//! Education entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Education;

/// Database row mapping for the education table.
#[derive(Debug, Clone, FromRow)]
pub struct EducationEntity {
    pub id: Uuid,
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub is_current: bool,
    pub description: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<EducationEntity> for Education {
    fn from(entity: EducationEntity) -> Self {
        Self {
            id: entity.id,
            degree: entity.degree,
            institution: entity.institution,
            start_date: entity.start_date,
            end_date: entity.end_date,
            is_current: entity.is_current,
            description: entity.description,
            display_order: entity.display_order,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
