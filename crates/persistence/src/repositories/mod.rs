//! Repository implementations for database operations.

pub mod admin_user;
pub mod education;
pub mod experience;
pub mod health;
pub mod project;
pub mod resume_attachment;
pub mod singleton;
pub mod skill;

pub use admin_user::{AdminUserRepository, SessionRepository};
pub use education::EducationRepository;
pub use experience::ExperienceRepository;
pub use health::DatabaseHealth;
pub use project::ProjectRepository;
pub use resume_attachment::ResumeAttachmentRepository;
pub use singleton::{AboutRepository, ProfileRepository, SiteSettingsRepository};
pub use skill::SkillRepository;
