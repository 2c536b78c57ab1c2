//! Resume attachment repository for database operations.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{
    CollectionItem, NewResumeAttachment, ResumeAttachment, ResumeAttachmentPatch, Visibility,
};
use domain::ports::CollectionStore;

use crate::entities::ResumeAttachmentEntity;
use crate::metrics::QueryTimer;

/// Repository for résumé attachment references.
#[derive(Clone)]
pub struct ResumeAttachmentRepository {
    pool: PgPool,
}

impl ResumeAttachmentRepository {
    /// Creates a new ResumeAttachmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore<ResumeAttachment> for ResumeAttachmentRepository {
    async fn list(&self, visibility: Visibility) -> Result<Vec<ResumeAttachment>, StoreError> {
        let timer = QueryTimer::new("list_resume_attachments");
        let result = sqlx::query_as::<_, ResumeAttachmentEntity>(
            r#"
            SELECT * FROM resume_attachments
            WHERE ($1 OR is_active)
            ORDER BY uploaded_at DESC
            "#,
        )
        .bind(visibility == Visibility::All)
        .fetch_all(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into_iter().map(ResumeAttachment::from).collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ResumeAttachment>, StoreError> {
        let timer = QueryTimer::new("find_resume_attachment_by_id");
        let result = sqlx::query_as::<_, ResumeAttachmentEntity>(
            r#"
            SELECT * FROM resume_attachments WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.map(ResumeAttachment::from))
    }

    async fn create(&self, new: NewResumeAttachment) -> Result<ResumeAttachment, StoreError> {
        let attachment = ResumeAttachment::create(Uuid::new_v4(), new, Utc::now());

        let timer = QueryTimer::new("create_resume_attachment");
        let result = sqlx::query_as::<_, ResumeAttachmentEntity>(
            r#"
            INSERT INTO resume_attachments (id, file_name, file_url, file_size, file_type,
                                            is_active, uploaded_at, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(attachment.id)
        .bind(&attachment.file_name)
        .bind(&attachment.file_url)
        .bind(attachment.file_size)
        .bind(&attachment.file_type)
        .bind(attachment.is_active)
        .bind(attachment.uploaded_at)
        .bind(&attachment.description)
        .fetch_one(&self.pool)
        .await;
        timer.observe(&result);
        Ok(result?.into())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ResumeAttachmentPatch,
    ) -> Result<ResumeAttachment, StoreError> {
        let timer = QueryTimer::new("update_resume_attachment");
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, ResumeAttachmentEntity>(
            r#"
            SELECT * FROM resume_attachments WHERE id = $1 FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        let mut attachment = ResumeAttachment::from(current);
        attachment.apply(patch, Utc::now());

        let updated = sqlx::query_as::<_, ResumeAttachmentEntity>(
            r#"
            UPDATE resume_attachments SET
                file_name = $2,
                file_url = $3,
                file_size = $4,
                file_type = $5,
                is_active = $6,
                description = $7
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&attachment.file_name)
        .bind(&attachment.file_url)
        .bind(attachment.file_size)
        .bind(&attachment.file_type)
        .bind(attachment.is_active)
        .bind(&attachment.description)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(updated.into())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_resume_attachment");
        let result = sqlx::query(
            r#"
            DELETE FROM resume_attachments WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected() > 0)
    }
}
