//! Database entity definitions.

pub mod admin_user;
pub mod education;
pub mod experience;
pub mod project;
pub mod resume_attachment;
pub mod singleton;
pub mod skill;

pub use admin_user::{AdminSessionEntity, AdminUserEntity};
pub use education::EducationEntity;
pub use experience::ExperienceEntity;
pub use project::ProjectEntity;
pub use resume_attachment::ResumeAttachmentEntity;
pub use singleton::{AboutContentEntity, ProfileEntity, SiteSettingsEntity};
pub use skill::SkillEntity;
