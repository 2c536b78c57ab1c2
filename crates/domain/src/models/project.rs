//! Project (case study) domain model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::content::{by_display_order, CollectionItem};
use crate::services::slug::slugify;

/// Delivery status shown on a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    ComingSoon,
    Available,
}

impl ProjectStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Completed => "completed",
            ProjectStatus::ComingSoon => "coming-soon",
            ProjectStatus::Available => "available",
        }
    }

    /// Parses from database string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(ProjectStatus::Completed),
            "coming-soon" => Some(ProjectStatus::ComingSoon),
            "available" => Some(ProjectStatus::Available),
            _ => None,
        }
    }
}

/// A case-study entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub problem: String,
    pub organization: String,
    pub timeframe: String,
    pub platforms: Vec<String>,
    pub status: ProjectStatus,
    pub goals: Vec<String>,
    pub test_strategy: Vec<String>,
    pub performance_targets: serde_json::Value,
    pub is_published: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

fn default_performance_targets() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// Request payload for creating a project.
///
/// `slug` may be omitted, in which case it is derived from `name`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    #[validate(custom(function = "crate::services::slug::validate_slug"))]
    pub slug: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub problem: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub organization: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub timeframe: String,

    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub platforms: Vec<String>,

    pub status: ProjectStatus,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub goals: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub test_strategy: Vec<String>,

    #[serde(default = "default_performance_targets")]
    pub performance_targets: serde_json::Value,

    #[serde(default = "default_true")]
    pub is_published: bool,

    #[serde(default)]
    pub display_order: i32,
}

impl NewProject {
    /// The slug the project will be stored under.
    pub fn effective_slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => slugify(&self.name),
        }
    }
}

/// Request payload for updating a project. Only present fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: Option<String>,

    #[validate(custom(function = "crate::services::slug::validate_slug"))]
    pub slug: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub problem: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub organization: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub timeframe: Option<String>,

    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub platforms: Option<Vec<String>>,

    pub status: Option<ProjectStatus>,

    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub goals: Option<Vec<String>>,

    #[validate(custom(function = "shared::validation::validate_string_list"))]
    pub test_strategy: Option<Vec<String>>,

    pub performance_targets: Option<serde_json::Value>,

    pub is_published: Option<bool>,

    pub display_order: Option<i32>,
}

impl CollectionItem for Project {
    type New = NewProject;
    type Patch = ProjectPatch;

    const KIND: &'static str = "Project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_public(&self) -> bool {
        self.is_published
    }

    fn create(id: Uuid, new: NewProject, now: DateTime<Utc>) -> Self {
        let slug = new.effective_slug();
        Self {
            id,
            name: new.name,
            slug,
            problem: new.problem,
            organization: new.organization,
            timeframe: new.timeframe,
            platforms: new.platforms,
            status: new.status,
            goals: new.goals,
            test_strategy: new.test_strategy,
            performance_targets: new.performance_targets,
            is_published: new.is_published,
            display_order: new.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, patch: ProjectPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(slug) = patch.slug {
            self.slug = slug;
        }
        if let Some(problem) = patch.problem {
            self.problem = problem;
        }
        if let Some(organization) = patch.organization {
            self.organization = organization;
        }
        if let Some(timeframe) = patch.timeframe {
            self.timeframe = timeframe;
        }
        if let Some(platforms) = patch.platforms {
            self.platforms = platforms;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(goals) = patch.goals {
            self.goals = goals;
        }
        if let Some(test_strategy) = patch.test_strategy {
            self.test_strategy = test_strategy;
        }
        if let Some(performance_targets) = patch.performance_targets {
            self.performance_targets = performance_targets;
        }
        if let Some(is_published) = patch.is_published {
            self.is_published = is_published;
        }
        if let Some(display_order) = patch.display_order {
            self.display_order = display_order;
        }
        self.updated_at = now;
    }

    fn list_order(a: &Self, b: &Self) -> Ordering {
        by_display_order(
            (a.display_order, a.created_at),
            (b.display_order, b.created_at),
        )
    }

    fn check_new(new: &NewProject) -> Result<(), ValidationErrors> {
        if new.slug.is_none() && new.effective_slug().is_empty() {
            return Err(shared::validation::single_field_error(
                "slug",
                shared::validation::error(
                    "slug_underivable",
                    "Slug is required when the name contains no letters or digits",
                ),
            ));
        }
        Ok(())
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn a_ok_payload() -> serde_json::Value {
        json!({
            "name": "a-OK",
            "slug": "a-ok",
            "problem": "...",
            "organization": "ankaEK",
            "timeframe": "Nov 2024",
            "platforms": ["Web", "API"],
            "status": "completed",
            "goals": [],
            "testStrategy": [],
            "performanceTargets": {},
            "isPublished": true,
            "displayOrder": 0
        })
    }

    #[test]
    fn test_status_literals() {
        assert_eq!(
            serde_json::to_value(ProjectStatus::ComingSoon).unwrap(),
            json!("coming-soon")
        );
        assert_eq!(ProjectStatus::parse("available"), Some(ProjectStatus::Available));
        assert_eq!(ProjectStatus::parse("done"), None);
        assert!(serde_json::from_value::<ProjectStatus>(json!("archived")).is_err());
    }

    #[test]
    fn test_new_project_valid() {
        let new: NewProject = serde_json::from_value(a_ok_payload()).unwrap();
        assert!(new.validate().is_ok());
        assert!(Project::check_new(&new).is_ok());
    }

    #[test]
    fn test_new_project_slug_derived_when_absent() {
        let mut payload = a_ok_payload();
        payload.as_object_mut().unwrap().remove("slug");
        let new: NewProject = serde_json::from_value(payload).unwrap();

        let project = Project::create(Uuid::new_v4(), new, Utc::now());
        assert_eq!(project.slug, "a-ok");
    }

    #[test]
    fn test_new_project_manual_slug_kept() {
        let mut payload = a_ok_payload();
        payload["slug"] = json!("custom-case-study");
        let new: NewProject = serde_json::from_value(payload).unwrap();

        let project = Project::create(Uuid::new_v4(), new, Utc::now());
        assert_eq!(project.slug, "custom-case-study");
    }

    #[test]
    fn test_new_project_bad_slug_rejected() {
        let mut payload = a_ok_payload();
        payload["slug"] = json!("Not A Slug");
        let new: NewProject = serde_json::from_value(payload).unwrap();

        let errors = new.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn test_new_project_underivable_slug() {
        let mut payload = a_ok_payload();
        payload["name"] = json!("???");
        payload.as_object_mut().unwrap().remove("slug");
        let new: NewProject = serde_json::from_value(payload).unwrap();

        let errors = Project::check_new(&new).unwrap_err();
        assert!(errors.field_errors().contains_key("slug"));
    }

    #[test]
    fn test_new_project_defaults() {
        let new: NewProject = serde_json::from_value(json!({
            "name": "Minimal",
            "problem": "p",
            "organization": "o",
            "timeframe": "2024",
            "platforms": ["Web"],
            "status": "available"
        }))
        .unwrap();

        assert!(new.goals.is_empty());
        assert!(new.test_strategy.is_empty());
        assert_eq!(new.performance_targets, json!({}));
        assert!(new.is_published);
        assert_eq!(new.display_order, 0);
    }

    #[test]
    fn test_new_project_blank_platform_rejected() {
        let mut payload = a_ok_payload();
        payload["platforms"] = json!(["Web", ""]);
        let new: NewProject = serde_json::from_value(payload).unwrap();
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_apply_unpublish_touches_updated_at() {
        let created = Utc::now();
        let new: NewProject = serde_json::from_value(a_ok_payload()).unwrap();
        let mut project = Project::create(Uuid::new_v4(), new, created);
        assert!(project.is_public());

        let later = created + chrono::Duration::seconds(10);
        let patch: ProjectPatch =
            serde_json::from_value(json!({ "isPublished": false })).unwrap();
        project.apply(patch, later);

        assert!(!project.is_public());
        assert_eq!(project.slug, "a-ok");
        assert_eq!(project.created_at, created);
        assert_eq!(project.updated_at, later);
    }

    #[test]
    fn test_unique_key_is_slug() {
        let new: NewProject = serde_json::from_value(a_ok_payload()).unwrap();
        let project = Project::create(Uuid::new_v4(), new, Utc::now());
        assert_eq!(project.unique_key(), Some("a-ok"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let new: NewProject = serde_json::from_value(a_ok_payload()).unwrap();
        let project = Project::create(Uuid::new_v4(), new, Utc::now());
        let value = serde_json::to_value(&project).unwrap();

        assert_eq!(value["testStrategy"], json!([]));
        assert_eq!(value["performanceTargets"], json!({}));
        assert_eq!(value["isPublished"], json!(true));
        assert_eq!(value["status"], json!("completed"));
    }
}
