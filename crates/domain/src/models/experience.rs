//! Work experience domain model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::content::{by_display_order, CollectionItem};

/// One job entry.
///
/// When `is_current` is set, `end_date` is ignored for display even if a
/// stale value remains stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
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

fn default_true() -> bool {
    true
}

/// Request payload for creating an experience entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub job_title: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub company: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub start_date: String,

    pub end_date: Option<String>,

    #[serde(default)]
    pub is_current: bool,

    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub achievements: Vec<String>,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request payload for updating an experience entry.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePatch {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub job_title: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub company: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub start_date: Option<String>,

    #[serde(default, deserialize_with = "shared::patch::nullable")]
    pub end_date: Option<Option<String>>,

    pub is_current: Option<bool>,

    #[serde(default, deserialize_with = "shared::patch::nullable")]
    pub description: Option<Option<String>>,

    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub achievements: Option<Vec<String>>,

    pub display_order: Option<i32>,

    pub is_active: Option<bool>,
}

impl CollectionItem for Experience {
    type New = NewExperience;
    type Patch = ExperiencePatch;

    const KIND: &'static str = "Experience";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_public(&self) -> bool {
        self.is_active
    }

    fn create(id: Uuid, new: NewExperience, now: DateTime<Utc>) -> Self {
        Self {
            id,
            job_title: new.job_title,
            company: new.company,
            start_date: new.start_date,
            end_date: new.end_date,
            is_current: new.is_current,
            description: new.description,
            achievements: new.achievements,
            display_order: new.display_order,
            is_active: new.is_active,
            created_at: now,
        }
    }

    fn apply(&mut self, patch: ExperiencePatch, _now: DateTime<Utc>) {
        if let Some(job_title) = patch.job_title {
            self.job_title = job_title;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = start_date;
        }
        shared::patch::apply_nullable(&mut self.end_date, patch.end_date);
        if let Some(is_current) = patch.is_current {
            self.is_current = is_current;
        }
        shared::patch::apply_nullable(&mut self.description, patch.description);
        if let Some(achievements) = patch.achievements {
            self.achievements = achievements;
        }
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
