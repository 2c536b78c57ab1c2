//! About section domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::content::SingletonItem;

/// Free-text prose for the about section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutContent {
    pub id: Uuid,
    pub content: String,
    pub updated_at: DateTime<Utc>,
}

/// Upsert payload for the about section.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AboutInput {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub content: String,
}

impl SingletonItem for AboutContent {
    type Input = AboutInput;

    const KIND: &'static str = "About content";

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_input(id: Uuid, input: AboutInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            content: input.content,
            updated_at: now,
        }
    }

    fn overwrite(&mut self, input: AboutInput, now: DateTime<Utc>) {
        self.content = input.content;
        self.updated_at = now;
    }
}
