//! Singleton content entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{AboutContent, Profile, SiteSettings};

/// Database row mapping for the profile table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub name: String,
    pub title: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub linkedin: Option<String>,
    pub experience_years: i32,
    pub availability: String,
    pub response_promise: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for Profile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            title: entity.title,
            location: entity.location,
            email: entity.email,
            phone: entity.phone,
            linkedin: entity.linkedin,
            experience_years: entity.experience_years,
            availability: entity.availability,
            response_promise: entity.response_promise,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the about_content table.
#[derive(Debug, Clone, FromRow)]
pub struct AboutContentEntity {
    pub id: Uuid,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

impl From<AboutContentEntity> for AboutContent {
    fn from(entity: AboutContentEntity) -> Self {
        Self {
            id: entity.id,
            content: entity.content,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the site_settings table.
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettingsEntity {
    pub id: Uuid,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub calendly_url: Option<String>,
    pub resume_url: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<SiteSettingsEntity> for SiteSettings {
    fn from(entity: SiteSettingsEntity) -> Self {
        Self {
            id: entity.id,
            hero_title: entity.hero_title,
            hero_subtitle: entity.hero_subtitle,
            calendly_url: entity.calendly_url,
            resume_url: entity.resume_url,
            meta_title: entity.meta_title,
            meta_description: entity.meta_description,
            updated_at: entity.updated_at,
        }
    }
}
