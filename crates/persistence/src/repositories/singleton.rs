//! Repositories for the singleton content kinds.
//!
//! Each table carries a `singleton` column that is always TRUE and unique.
//! Upserts are a single `INSERT ... ON CONFLICT (singleton) DO UPDATE`, so
//! concurrent writers cannot create a second row and the existing row keeps
//! its identifier.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{
    AboutContent, AboutInput, Profile, ProfileInput, SingletonItem, SiteSettings,
    SiteSettingsInput,
};
use domain::ports::SingletonStore;

use crate::entities::{AboutContentEntity, ProfileEntity, SiteSettingsEntity};
use crate::metrics::QueryTimer;

/// Repository for the profile singleton.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SingletonStore<Profile> for ProfileRepository {
    async fn get(&self) -> Result<Option<Profile>, StoreError> {
        let timer = QueryTimer::new("get_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT * FROM profile ORDER BY updated_at DESC LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(Profile::from))
    }

    async fn upsert(&self, input: ProfileInput) -> Result<Profile, StoreError> {
        let profile = Profile::from_input(Uuid::new_v4(), input, Utc::now());

        let timer = QueryTimer::new("upsert_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO profile (id, singleton, name, title, location, email, phone, linkedin,
                                 experience_years, availability, response_promise, updated_at)
            VALUES ($1, TRUE, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (singleton) DO UPDATE SET
                name = EXCLUDED.name,
                title = EXCLUDED.title,
                location = EXCLUDED.location,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                linkedin = EXCLUDED.linkedin,
                experience_years = EXCLUDED.experience_years,
                availability = EXCLUDED.availability,
                response_promise = EXCLUDED.response_promise,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(&profile.name)
        .bind(&profile.title)
        .bind(&profile.location)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.linkedin)
        .bind(profile.experience_years)
        .bind(&profile.availability)
        .bind(&profile.response_promise)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }
}

/// Repository for the about section singleton.
#[derive(Clone)]
pub struct AboutRepository {
    pool: PgPool,
}

impl AboutRepository {
    /// Creates a new AboutRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SingletonStore<AboutContent> for AboutRepository {
    async fn get(&self) -> Result<Option<AboutContent>, StoreError> {
        let timer = QueryTimer::new("get_about_content");
        let result = sqlx::query_as::<_, AboutContentEntity>(
            r#"
            SELECT * FROM about_content ORDER BY updated_at DESC LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(AboutContent::from))
    }

    async fn upsert(&self, input: AboutInput) -> Result<AboutContent, StoreError> {
        let about = AboutContent::from_input(Uuid::new_v4(), input, Utc::now());

        let timer = QueryTimer::new("upsert_about_content");
        let result = sqlx::query_as::<_, AboutContentEntity>(
            r#"
            INSERT INTO about_content (id, singleton, content, updated_at)
            VALUES ($1, TRUE, $2, $3)
            ON CONFLICT (singleton) DO UPDATE SET
                content = EXCLUDED.content,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(about.id)
        .bind(&about.content)
        .bind(about.updated_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }
}

/// Repository for the site settings singleton.
#[derive(Clone)]
pub struct SiteSettingsRepository {
    pool: PgPool,
}

impl SiteSettingsRepository {
    /// Creates a new SiteSettingsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SingletonStore<SiteSettings> for SiteSettingsRepository {
    async fn get(&self) -> Result<Option<SiteSettings>, StoreError> {
        let timer = QueryTimer::new("get_site_settings");
        let result = sqlx::query_as::<_, SiteSettingsEntity>(
            r#"
            SELECT * FROM site_settings ORDER BY updated_at DESC LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(SiteSettings::from))
    }

    async fn upsert(&self, input: SiteSettingsInput) -> Result<SiteSettings, StoreError> {
        let settings = SiteSettings::from_input(Uuid::new_v4(), input, Utc::now());

        let timer = QueryTimer::new("upsert_site_settings");
        let result = sqlx::query_as::<_, SiteSettingsEntity>(
            r#"
            INSERT INTO site_settings (id, singleton, hero_title, hero_subtitle, calendly_url,
                                       resume_url, meta_title, meta_description, updated_at)
            VALUES ($1, TRUE, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (singleton) DO UPDATE SET
                hero_title = EXCLUDED.hero_title,
                hero_subtitle = EXCLUDED.hero_subtitle,
                calendly_url = EXCLUDED.calendly_url,
                resume_url = EXCLUDED.resume_url,
                meta_title = EXCLUDED.meta_title,
                meta_description = EXCLUDED.meta_description,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(settings.id)
        .bind(&settings.hero_title)
        .bind(&settings.hero_subtitle)
        .bind(&settings.calendly_url)
        .bind(&settings.resume_url)
        .bind(&settings.meta_title)
        .bind(&settings.meta_description)
        .bind(settings.updated_at)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }
}
