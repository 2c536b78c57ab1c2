//! Resume attachment domain model.
//!
//! Files are referenced by external URL only; nothing is uploaded here.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::content::CollectionItem;

/// A downloadable résumé reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAttachment {
    pub id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub is_active: bool,
    pub uploaded_at: DateTime<Utc>,
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Request payload for registering a résumé attachment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewResumeAttachment {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub file_name: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub file_url: String,

    #[validate(range(min = 0, message = "File size must not be negative"))]
    pub file_size: Option<i64>,

    pub file_type: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    pub description: Option<String>,
}

/// Request payload for updating a résumé attachment.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAttachmentPatch {
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub file_name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub file_url: Option<String>,

    #[serde(default, deserialize_with = "shared::patch::nullable")]
    pub file_size: Option<Option<i64>>,

    #[serde(default, deserialize_with = "shared::patch::nullable")]
    pub file_type: Option<Option<String>>,

    pub is_active: Option<bool>,

    #[serde(default, deserialize_with = "shared::patch::nullable")]
    pub description: Option<Option<String>>,
}

impl ResumeAttachmentPatch {
    fn negative_file_size(&self) -> bool {
        matches!(self.file_size, Some(Some(size)) if size < 0)
    }
}

impl CollectionItem for ResumeAttachment {
    type New = NewResumeAttachment;
    type Patch = ResumeAttachmentPatch;

    const KIND: &'static str = "Resume attachment";

    fn id(&self) -> Uuid {
        self.id
    }

    fn is_public(&self) -> bool {
        self.is_active
    }

    fn create(id: Uuid, new: NewResumeAttachment, now: DateTime<Utc>) -> Self {
        Self {
            id,
            file_name: new.file_name,
            file_url: new.file_url,
            file_size: new.file_size,
            file_type: new.file_type,
            is_active: new.is_active,
            uploaded_at: now,
            description: new.description,
        }
    }

    fn apply(&mut self, patch: ResumeAttachmentPatch, _now: DateTime<Utc>) {
        if let Some(file_name) = patch.file_name {
            self.file_name = file_name;
        }
        if let Some(file_url) = patch.file_url {
            self.file_url = file_url;
        }
        shared::patch::apply_nullable(&mut self.file_size, patch.file_size);
        shared::patch::apply_nullable(&mut self.file_type, patch.file_type);
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        shared::patch::apply_nullable(&mut self.description, patch.description);
    }

    /// Newest upload first.
    fn list_order(a: &Self, b: &Self) -> Ordering {
        b.uploaded_at.cmp(&a.uploaded_at)
    }

    // The nullable wrapper keeps file_size out of reach of the derive.
    fn check_patch(patch: &ResumeAttachmentPatch) -> Result<(), ValidationErrors> {
        if patch.negative_file_size() {
            return Err(shared::validation::single_field_error(
                "file_size",
                shared::validation::error("range", "File size must not be negative"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn new_attachment(name: &str) -> NewResumeAttachment {
        serde_json::from_value(json!({
            "fileName": name,
            "fileUrl": format!("https://cdn.example.com/{}", name),
            "fileSize": 120_000,
            "fileType": "application/pdf"
        }))
        .unwrap()
    }

    #[test]
    fn test_negative_size_rejected() {
        let mut new = new_attachment("cv.pdf");
        new.file_size = Some(-1);
        assert!(new.validate().is_err());
    }

    #[test]
    fn test_patch_negative_size_rejected() {
        let patch: ResumeAttachmentPatch =
            serde_json::from_value(json!({ "fileSize": -10 })).unwrap();
        assert!(ResumeAttachment::check_patch(&patch).is_err());

        let patch: ResumeAttachmentPatch =
            serde_json::from_value(json!({ "fileSize": null })).unwrap();
        assert!(ResumeAttachment::check_patch(&patch).is_ok());
    }

    #[test]
    fn test_list_order_newest_first() {
        let now = Utc::now();
        let older = ResumeAttachment::create(Uuid::new_v4(), new_attachment("old.pdf"), now);
        let newer = ResumeAttachment::create(
            Uuid::new_v4(),
            new_attachment("new.pdf"),
            now + Duration::minutes(1),
        );

        let mut items = vec![older.clone(), newer.clone()];
        items.sort_by(ResumeAttachment::list_order);
        assert_eq!(items[0].id, newer.id);
        assert_eq!(items[1].id, older.id);
    }

    #[test]
    fn test_clear_optional_fields() {
        let mut attachment =
            ResumeAttachment::create(Uuid::new_v4(), new_attachment("cv.pdf"), Utc::now());
        let patch: ResumeAttachmentPatch = serde_json::from_value(json!({
            "fileSize": null,
            "fileType": null,
            "description": "Latest"
        }))
        .unwrap();
        attachment.apply(patch, Utc::now());

        assert!(attachment.file_size.is_none());
        assert!(attachment.file_type.is_none());
        assert_eq!(attachment.description.as_deref(), Some("Latest"));
    }
}
