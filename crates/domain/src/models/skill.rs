//! Skill domain model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::content::{by_display_order, CollectionItem};

/// Proficiency level of a skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Beginner" => Some(SkillLevel::Beginner),
            "Intermediate" => Some(SkillLevel::Intermediate),
            "Advanced" => Some(SkillLevel::Advanced),
            _ => None,
        }
    }
}

/// One entry of the skills section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
    pub level: SkillLevel,
    pub percentage: i32,
    pub category: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Request payload for creating a skill.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    pub level: SkillLevel,

    #[validate(custom(function = "shared::validation::validate_percentage"))]
    pub percentage: i32,

    pub category: Option<String>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request payload for updating a skill. Only present fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SkillPatch {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: Option<String>,

    pub level: Option<SkillLevel>,

    #[validate(custom(function = "shared::validation::validate_percentage"))]
    pub percentage: Option<i32>,

    #[serde(default, deserialize_with = "shared::patch::nullable")]
    pub category: Option<Option<String>>,

    pub display_order: Option<i32>,

    pub is_active: Option<bool>,
}

impl CollectionItem for Skill {
    type New = NewSkill;
    type Patch = SkillPatch;

    const KIND: &'static str = "Skill";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_public(&self) -> bool {
        self.is_active
    }

    fn create(id: Uuid, new: NewSkill, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            level: new.level,
            percentage: new.percentage,
            category: new.category,
            display_order: new.display_order,
            is_active: new.is_active,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: SkillPatch, _now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(level) = patch.level {
            self.level = level;
        }
        if let Some(percentage) = patch.percentage {
            self.percentage = percentage;
        }
        shared::patch::apply_nullable(&mut self.category, patch.category);
        if let Some(display_order) = patch.display_order {
            self.display_order = display_order;
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        by_display_order(
            (a.display_order, a.created_at),
            (b.display_order, b.created_at),
        )
    }
}
