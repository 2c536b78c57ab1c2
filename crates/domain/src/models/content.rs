//! Behaviour shared by every editable content kind.
//!
//! List-type kinds implement [`CollectionItem`]; the three singleton kinds
//! implement [`SingletonItem`]. Storage adapters and HTTP handlers are
//! written once against these traits.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

/// Which rows a list read may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Every stored row, for the admin dashboard.
    All,
    /// Only rows flagged active/published, for the public site.
    PublicOnly,
}

impl Visibility {
    /// Returns true if a row with the given public flag is visible.
    pub fn admits(&self, is_public: bool) -> bool {
        match self {
            Visibility::All => true,
            Visibility::PublicOnly => is_public,
        }
    }
}

/// A list-type content kind (Skill, Project, Experience, Education,
/// ResumeAttachment).
pub trait CollectionItem: Clone + Serialize + Send + Sync + 'static {
    /// Full create payload.
    type New: Validate + DeserializeOwned + Send + Sync + 'static;
    /// Partial update payload; every field optional.
    type Patch: Validate + DeserializeOwned + Send + Sync + 'static;

    /// Human-readable kind name, e.g. `"Skill"`.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Whether the row is shown on the public site.
    fn is_public(&self) -> bool;

    /// Builds a new row from a validated create payload.
    fn create(id: Uuid, new: Self::New, now: DateTime<Utc>) -> Self;

    /// Merges the fields present in `patch` onto this row.
    fn apply(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// List order for this kind.
    fn list_order(a: &Self, b: &Self) -> Ordering;

    /// Checks that go beyond field-level validation. Runs after
    /// [`Validate::validate`] and before the payload reaches a store.
    fn check_new(_new: &Self::New) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Patch counterpart of [`CollectionItem::check_new`].
    fn check_patch(_patch: &Self::Patch) -> Result<(), ValidationErrors> {
        Ok(())
    }

    /// Value that must be unique across the collection, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

/// A singleton content kind (Profile, AboutContent, SiteSettings).
pub trait SingletonItem: Clone + Serialize + Send + Sync + 'static {
    /// Full upsert payload.
    type Input: Validate + DeserializeOwned + Send + Sync + 'static;

    const KIND: &'static str;

    fn id(&self) -> Uuid;

    /// Builds the first row from an upsert payload.
    fn from_input(id: Uuid, input: Self::Input, now: DateTime<Utc>) -> Self;

    /// Replaces every editable field with the payload, keeping the id.
    fn overwrite(&mut self, input: Self::Input, now: DateTime<Utc>);
}

/// Orders by `display_order` ascending, ties broken by creation time.
pub fn by_display_order(
    a: (i32, DateTime<Utc>),
    b: (i32, DateTime<Utc>),
) -> Ordering {
    a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_visibility_admits() {
        assert!(Visibility::All.admits(true));
        assert!(Visibility::All.admits(false));
        assert!(Visibility::PublicOnly.admits(true));
        assert!(!Visibility::PublicOnly.admits(false));
    }

    #[test]
    fn test_by_display_order() {
        let now = Utc::now();
        let later = now + Duration::seconds(5);

        assert_eq!(by_display_order((0, later), (1, now)), Ordering::Less);
        assert_eq!(by_display_order((2, now), (1, now)), Ordering::Greater);
        assert_eq!(by_display_order((1, now), (1, later)), Ordering::Less);
    }
}
