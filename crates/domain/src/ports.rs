//! Storage ports.
//!
//! The API layer talks to storage only through these traits. The
//! persistence crate provides a PostgreSQL adapter and an in-memory
//! adapter for each of them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{AdminSession, AdminUser, CollectionItem, Project, SingletonItem, Visibility};

/// CRUD over a list-type content kind.
#[async_trait]
pub trait CollectionStore<T: CollectionItem>: Send + Sync {
    /// Rows admitted by `visibility`, in the kind's list order.
    async fn list(&self, visibility: Visibility) -> Result<Vec<T>, StoreError>;

    /// Fetches a row by identifier.
    async fn find(&self, id: Uuid) -> Result<Option<T>, StoreError>;

    /// Assigns an identifier and timestamps, persists and returns the row.
    async fn create(&self, new: T::New) -> Result<T, StoreError>;

    /// Merges `patch` onto the row. Fails with `NotFound` if it does not exist.
    async fn update(&self, id: Uuid, patch: T::Patch) -> Result<T, StoreError>;

    /// Removes the row. Returns false if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Keyed lookup of projects by slug.
#[async_trait]
pub trait ProjectLookup: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Project>, StoreError>;
}

/// Get/upsert over a singleton content kind.
#[async_trait]
pub trait SingletonStore<T: SingletonItem>: Send + Sync {
    /// The authoritative row, if one has been written.
    async fn get(&self) -> Result<Option<T>, StoreError>;

    /// Updates the row in place, or inserts it when none exists.
    ///
    /// Concurrent callers never produce more than one row.
    async fn upsert(&self, input: T::Input) -> Result<T, StoreError>;
}

/// Admin credential storage.
#[async_trait]
pub trait AdminUserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, StoreError>;

    /// Creates an admin. Fails with `Conflict` if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<AdminUser, StoreError>;
}

/// Server-side session records, keyed by token hash.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &AdminSession) -> Result<(), StoreError>;

    /// Fetches a session regardless of expiry.
    async fn find(&self, token_hash: &str) -> Result<Option<AdminSession>, StoreError>;

    /// Removes a session. Returns false if nothing was deleted.
    async fn delete(&self, token_hash: &str) -> Result<bool, StoreError>;

    /// Removes every session that expired at or before `now`.
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;
}

/// Connectivity probe used by the health endpoints.
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}
