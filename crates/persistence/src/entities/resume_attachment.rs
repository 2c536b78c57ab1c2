//! Resume attachment entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::ResumeAttachment;

/// Database row mapping for the resume_attachments table.
#[derive(Debug, Clone, FromRow)]
pub struct ResumeAttachmentEntity {
    pub id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub is_active: bool,
    pub uploaded_at: DateTime<Utc>,
    pub description: Option<String>,
}

impl From<ResumeAttachmentEntity> for ResumeAttachment {
    fn from(entity: ResumeAttachmentEntity) -> Self {
        Self {
            id: entity.id,
            file_name: entity.file_name,
            file_url: entity.file_url,
            file_size: entity.file_size,
            file_type: entity.file_type,
            is_active: entity.is_active,
            uploaded_at: entity.uploaded_at,
            description: entity.description,
        }
    }
}
