//! Profile (identity and contact block) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::content::SingletonItem;

/// The site owner's identity and contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
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

/// Upsert payload for the profile.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub location: String,

    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub phone: String,

    pub linkedin: Option<String>,

    #[validate(range(min = 0, message = "Experience years must not be negative"))]
    pub experience_years: i32,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub availability: String,

    pub response_promise: Option<String>,
}

impl SingletonItem for Profile {
    type Input = ProfileInput;

    const KIND: &'static str = "Profile";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: ProfileInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            title: input.title,
            location: input.location,
            email: input.email,
            phone: input.phone,
            linkedin: input.linkedin,
            experience_years: input.experience_years,
            availability: input.availability,
            response_promise: input.response_promise,
            updated_at: now,
        }
    }

    fn overwrite(&mut self, input: ProfileInput, now: DateTime<Utc>) {
        let id = self.id;
        *self = Self::from_input(id, input, now);
    }
}
