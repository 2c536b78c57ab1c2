//! Site-wide settings domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::content::SingletonItem;

/// Hero copy, external links and page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub id: Uuid,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub calendly_url: Option<String>,
    pub resume_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for site settings.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsInput {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub hero_title: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub hero_subtitle: String,

    #[validate(url(message = "Calendly URL must be a valid URL"))]
    pub calendly_url: Option<String>,

    #[validate(url(message = "Resume URL must be a valid URL"))]
    pub resume_url: Option<String>,

    pub meta_title: Option<String>,

    pub meta_description: Option<String>,
}

impl SingletonItem for SiteSettings {
    type Input = SiteSettingsInput;

    const KIND: &'static str = "Site settings";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: SiteSettingsInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            hero_title: input.hero_title,
            hero_subtitle: input.hero_subtitle,
            calendly_url: input.calendly_url,
            resume_url: input.resume_url,
            meta_title: input.meta_title,
            meta_description: input.meta_description,
            updated_at: now,
        }
    }

    fn overwrite(&mut self, input: SiteSettingsInput, now: DateTime<Utc>) {
        let id = self.id;
        *self = Self::from_input(id, input, now);
    }
}
