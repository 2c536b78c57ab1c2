//! Domain models for the portfolio CMS.

pub mod about;
pub mod admin_user;
pub mod content;
pub mod education;
pub mod experience;
pub mod profile;
pub mod project;
pub mod resume_attachment;
pub mod site_settings;
pub mod skill;

pub use about::{AboutContent, AboutInput};
pub use admin_user::{AdminSession, AdminSummary, AdminUser, Credentials};
pub use content::{CollectionItem, SingletonItem, Visibility};
pub use education::{Education, EducationPatch, NewEducation};
pub use experience::{Experience, ExperiencePatch, NewExperience};
pub use profile::{Profile, ProfileInput};
pub use project::{NewProject, Project, ProjectPatch, ProjectStatus};
pub use resume_attachment::{NewResumeAttachment, ResumeAttachment, ResumeAttachmentPatch};
pub use site_settings::{SiteSettings, SiteSettingsInput};
pub use skill::{NewSkill, Skill, SkillLevel, SkillPatch};
