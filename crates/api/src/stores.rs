//! Storage wiring.
//!
//! Handlers reach storage only through the port trait objects held here.

use std::sync::Arc;

use domain::models::{
    AboutContent, Education, Experience, Profile, Project, ResumeAttachment, SiteSettings, Skill,
};
use domain::ports::{
    AdminUserStore, CollectionStore, ProjectLookup, SessionStore, SingletonStore, StoreHealth,
};
use persistence::memory::{
    MemoryAdminUsers, MemoryCollection, MemoryHealth, MemorySessions, MemorySingleton,
};
use persistence::repositories::{
    AboutRepository, AdminUserRepository, DatabaseHealth, EducationRepository,
    ExperienceRepository, ProfileRepository, ProjectRepository, ResumeAttachmentRepository,
    SessionRepository, SiteSettingsRepository, SkillRepository,
};
use sqlx::PgPool;

/// One handle per storage port.
#[derive(Clone)]
pub struct Stores {
    pub skills: Arc<dyn CollectionStore<Skill>>,
    pub projects: Arc<dyn CollectionStore<Project>>,
    pub project_lookup: Arc<dyn ProjectLookup>,
    pub experience: Arc<dyn CollectionStore<Experience>>,
    pub education: Arc<dyn CollectionStore<Education>>,
    pub resume_attachments: Arc<dyn CollectionStore<ResumeAttachment>>,
    pub profile: Arc<dyn SingletonStore<Profile>>,
    pub about: Arc<dyn SingletonStore<AboutContent>>,
    pub settings: Arc<dyn SingletonStore<SiteSettings>>,
    pub admins: Arc<dyn AdminUserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub health: Arc<dyn StoreHealth>,
}

impl Stores {
    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        let projects = Arc::new(ProjectRepository::new(pool.clone()));

        Self {
            skills: Arc::new(SkillRepository::new(pool.clone())),
            projects: projects.clone(),
            project_lookup: projects,
            experience: Arc::new(ExperienceRepository::new(pool.clone())),
            education: Arc::new(EducationRepository::new(pool.clone())),
            resume_attachments: Arc::new(ResumeAttachmentRepository::new(pool.clone())),
            profile: Arc::new(ProfileRepository::new(pool.clone())),
            about: Arc::new(AboutRepository::new(pool.clone())),
            settings: Arc::new(SiteSettingsRepository::new(pool.clone())),
            admins: Arc::new(AdminUserRepository::new(pool.clone())),
            sessions: Arc::new(SessionRepository::new(pool.clone())),
            health: Arc::new(DatabaseHealth::new(pool)),
        }
    }

    /// Process-local stores; contents are lost on shutdown.
    pub fn in_memory() -> Self {
        let projects = Arc::new(MemoryCollection::<Project>::new());

        Self {
            skills: Arc::new(MemoryCollection::<Skill>::new()),
            projects: projects.clone(),
            project_lookup: projects,
            experience: Arc::new(MemoryCollection::<Experience>::new()),
            education: Arc::new(MemoryCollection::<Education>::new()),
            resume_attachments: Arc::new(MemoryCollection::<ResumeAttachment>::new()),
            profile: Arc::new(MemorySingleton::<Profile>::new()),
            about: Arc::new(MemorySingleton::<AboutContent>::new()),
            settings: Arc::new(MemorySingleton::<SiteSettings>::new()),
            admins: Arc::new(MemoryAdminUsers::new()),
            sessions: Arc::new(MemorySessions::new()),
            health: Arc::new(MemoryHealth),
        }
    }
}

/// Resolves the store for a collection kind.
pub trait HasCollection<T: domain::models::CollectionItem> {
    fn collection(&self) -> &Arc<dyn CollectionStore<T>>;
}

/// Resolves the store for a singleton kind.
pub trait HasSingleton<T: domain::models::SingletonItem> {
    fn singleton(&self) -> &Arc<dyn SingletonStore<T>>;
}

macro_rules! collection_store {
    ($item:ty, $field:ident) => {
        impl HasCollection<$item> for Stores {
            fn collection(&self) -> &Arc<dyn CollectionStore<$item>> {
                &self.$field
            }
        }
    };
}

macro_rules! singleton_store {
    ($item:ty, $field:ident) => {
        impl HasSingleton<$item> for Stores {
            fn singleton(&self) -> &Arc<dyn SingletonStore<$item>> {
                &self.$field
            }
        }
    };
}

collection_store!(Skill, skills);
collection_store!(Project, projects);
collection_store!(Experience, experience);
collection_store!(Education, education);
collection_store!(ResumeAttachment, resume_attachments);

singleton_store!(Profile, profile);
singleton_store!(AboutContent, about);
singleton_store!(SiteSettings, settings);
