//! In-memory adapters for every storage port.
//!
//! Used for `storage.backend = "memory"` and by the HTTP test suite. They
//! follow the PostgreSQL repositories: same list ordering and visibility
//! filtering, at most one singleton row, unique usernames and unique
//! project slugs. State lives only as long as the process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use domain::errors::StoreError;
use domain::models::{AdminSession, AdminUser, CollectionItem, Project, SingletonItem, Visibility};
use domain::ports::{
    AdminUserStore, CollectionStore, ProjectLookup, SessionStore, SingletonStore, StoreHealth,
};

/// In-memory list-type content store.
pub struct MemoryCollection<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_key_taken<T: CollectionItem>(rows: &[T], candidate: &T) -> bool {
    match candidate.unique_key() {
        Some(key) => rows
            .iter()
            .any(|row| row.id() != candidate.id() && row.unique_key() == Some(key)),
        None => false,
    }
}

#[async_trait]
impl<T: CollectionItem> CollectionStore<T> for MemoryCollection<T> {
    async fn list(&self, visibility: Visibility) -> Result<Vec<T>, StoreError> {
        let rows = self.rows.read().await;
        let mut items: Vec<T> = rows
            .iter()
            .filter(|row| visibility.admits(row.is_public()))
            .cloned()
            .collect();
        items.sort_by(T::list_order);
        Ok(items)
    }

    async fn find(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.id() == id).cloned())
    }

    async fn create(&self, new: T::New) -> Result<T, StoreError> {
        let item = T::create(Uuid::new_v4(), new, Utc::now());

        let mut rows = self.rows.write().await;
        if unique_key_taken(&rows, &item) {
            return Err(StoreError::Conflict(format!(
                "{} with that key already exists",
                T::KIND
            )));
        }
        rows.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: Uuid, patch: T::Patch) -> Result<T, StoreError> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|row| row.id() == id)
            .ok_or(StoreError::NotFound)?;

        let mut item = rows[index].clone();
        item.apply(patch, Utc::now());
        if unique_key_taken(&rows, &item) {
            return Err(StoreError::Conflict(format!(
                "{} with that key already exists",
                T::KIND
            )));
        }
        rows[index] = item.clone();
        Ok(item)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl ProjectLookup for MemoryCollection<Project> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|row| row.slug == slug).cloned())
    }
}

/// In-memory singleton content store.
pub struct MemorySingleton<T> {
    row: RwLock<Option<T>>,
}

impl<T> MemorySingleton<T> {
    pub fn new() -> Self {
        Self {
            row: RwLock::new(None),
        }
    }
}

impl<T> Default for MemorySingleton<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: SingletonItem> SingletonStore<T> for MemorySingleton<T> {
    async fn get(&self) -> Result<Option<T>, StoreError> {
        Ok(self.row.read().await.clone())
    }

    async fn upsert(&self, input: T::Input) -> Result<T, StoreError> {
        let now = Utc::now();
        let mut row = self.row.write().await;
        let item = match row.take() {
            Some(mut existing) => {
                existing.overwrite(input, now);
                existing
            }
            None => T::from_input(Uuid::new_v4(), input, now),
        };
        *row = Some(item.clone());
        Ok(item)
    }
}

/// In-memory admin credential store.
#[derive(Default)]
pub struct MemoryAdminUsers {
    users: RwLock<Vec<AdminUser>>,
}

impl MemoryAdminUsers {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminUserStore for MemoryAdminUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(&self, username: &str, password_hash: &str) -> Result<AdminUser, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already exists",
                username
            )));
        }
        let admin = AdminUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(admin.clone());
        Ok(admin)
    }
}

/// In-memory session store keyed by token hash.
#[derive(Default)]
pub struct MemorySessions {
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn create(&self, session: &AdminSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.token_hash.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<AdminSession>, StoreError> {
        Ok(self.sessions.read().await.get(token_hash).cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, StoreError> {
        Ok(self.sessions.write().await.remove(token_hash).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        Ok((before - sessions.len()) as u64)
    }
}

/// Health probe for the in-memory backend; always reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryHealth;

#[async_trait]
impl StoreHealth for MemoryHealth {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
