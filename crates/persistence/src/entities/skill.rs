//! Skill entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{Skill, SkillLevel};

/// Database row mapping for the skills table.
#[derive(Debug, Clone, FromRow)]
pub struct SkillEntity {
    pub id: Uuid,
    pub name: String,
    pub level: String,
    pub percentage: i32,
    pub category: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SkillEntity> for Skill {
    type Error = StoreError;

    fn try_from(entity: SkillEntity) -> Result<Self, Self::Error> {
        let level = SkillLevel::parse(&entity.level).ok_or_else(|| {
            StoreError::Unavailable(format!("unknown skill level '{}'", entity.level))
        })?;
        Ok(Self {
            id: entity.id,
            name: entity.name,
            level,
            percentage: entity.percentage,
            category: entity.category,
            display_order: entity.display_order,
            is_active: entity.is_active,
            created_at: entity.created_at,
        })
    }
}
