//! Content endpoints, written once per storage shape.
//!
//! Each handler is generic over the content kind and is mounted per kind in
//! `app.rs`. Admin handlers read every row; public handlers only rows
//! flagged active/published.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use domain::errors::StoreError;
use domain::models::{CollectionItem, Project, SingletonItem, Visibility};
use domain::ports::{CollectionStore, SingletonStore};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{CurrentAdmin, ValidatedJson};
use crate::middleware::metrics::record_content_mutation;
use crate::stores::{HasCollection, HasSingleton, Stores};

/// Confirmation body for deletes.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn collection<T>(state: &AppState) -> &Arc<dyn CollectionStore<T>>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    <Stores as HasCollection<T>>::collection(&state.stores)
}

fn singleton<T>(state: &AppState) -> &Arc<dyn SingletonStore<T>>
where
    T: SingletonItem,
    Stores: HasSingleton<T>,
{
    <Stores as HasSingleton<T>>::singleton(&state.stores)
}

fn not_found<T: CollectionItem>() -> ApiError {
    ApiError::NotFound(format!("{} not found", T::KIND))
}

/// A path id that is not a UUID names no row.
fn parse_id<T: CollectionItem>(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| not_found::<T>())
}

fn map_write_error<T: CollectionItem>(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound => not_found::<T>(),
        StoreError::Conflict(detail) => {
            info!(kind = T::KIND, detail = %detail, "Write rejected by uniqueness constraint");
            ApiError::AlreadyExists(format!("{} already exists", T::KIND))
        }
        other => other.into(),
    }
}

// ----------------------------------------------------------------------------
// Collections
// ----------------------------------------------------------------------------

/// GET /api/admin/{kind}
pub async fn list_all<T>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    Ok(Json(collection::<T>(&state).list(Visibility::All).await?))
}

/// GET /api/public/{kind}
pub async fn list_public<T>(State(state): State<AppState>) -> Result<Json<Vec<T>>, ApiError>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    Ok(Json(
        collection::<T>(&state).list(Visibility::PublicOnly).await?,
    ))
}

/// GET /api/admin/{kind}/:id
pub async fn get_by_id<T>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<T>, ApiError>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    let id = parse_id::<T>(&id)?;
    collection::<T>(&state)
        .find(id)
        .await?
        .map(Json)
        .ok_or_else(not_found::<T>)
}

/// POST /api/admin/{kind}
pub async fn create<T>(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    ValidatedJson(new): ValidatedJson<T::New>,
) -> Result<Json<T>, ApiError>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    T::check_new(&new)?;

    let item = collection::<T>(&state)
        .create(new)
        .await
        .map_err(map_write_error::<T>)?;

    record_content_mutation(T::KIND, "create");
    info!(kind = T::KIND, id = %item.id(), admin = %admin.username, "Content created");

    Ok(Json(item))
}

/// PUT /api/admin/{kind}/:id
pub async fn update<T>(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<T::Patch>,
) -> Result<Json<T>, ApiError>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    let id = parse_id::<T>(&id)?;
    T::check_patch(&patch)?;

    let item = collection::<T>(&state)
        .update(id, patch)
        .await
        .map_err(map_write_error::<T>)?;

    record_content_mutation(T::KIND, "update");
    info!(kind = T::KIND, id = %id, admin = %admin.username, "Content updated");

    Ok(Json(item))
}

/// DELETE /api/admin/{kind}/:id
///
/// Succeeds whether or not the row existed.
pub async fn delete<T>(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError>
where
    T: CollectionItem,
    Stores: HasCollection<T>,
{
    let deleted = match Uuid::parse_str(&id) {
        Ok(id) => collection::<T>(&state).delete(id).await?,
        Err(_) => false,
    };

    if deleted {
        record_content_mutation(T::KIND, "delete");
        info!(kind = T::KIND, id = %id, admin = %admin.username, "Content deleted");
    } else {
        info!(kind = T::KIND, id = %id, "Delete of absent row ignored");
    }

    Ok(Json(MessageResponse {
        message: format!("{} deleted", T::KIND),
    }))
}

/// GET /api/public/projects/:slug
pub async fn get_published_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, ApiError> {
    state
        .stores
        .project_lookup
        .find_by_slug(&slug)
        .await?
        .filter(|project| project.is_published)
        .map(Json)
        .ok_or_else(not_found::<Project>)
}

// ----------------------------------------------------------------------------
// Singletons
// ----------------------------------------------------------------------------

/// GET /api/admin/{kind} and GET /api/public/{kind}
///
/// Responds with `null` until the row has been written.
pub async fn get_singleton<T>(State(state): State<AppState>) -> Result<Json<Option<T>>, ApiError>
where
    T: SingletonItem,
    Stores: HasSingleton<T>,
{
    Ok(Json(singleton::<T>(&state).get().await?))
}

/// POST /api/admin/{kind}
pub async fn upsert_singleton<T>(
    State(state): State<AppState>,
    CurrentAdmin(admin): CurrentAdmin,
    ValidatedJson(input): ValidatedJson<T::Input>,
) -> Result<Json<T>, ApiError>
where
    T: SingletonItem,
    Stores: HasSingleton<T>,
{
    let item = singleton::<T>(&state).upsert(input).await?;

    record_content_mutation(T::KIND, "upsert");
    info!(kind = T::KIND, id = %item.id(), admin = %admin.username, "Content saved");

    Ok(Json(item))
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::Skill;

    #[test]
    fn test_parse_id_rejects_malformed() {
        match parse_id::<Skill>("not-a-uuid") {
            Err(ApiError::NotFound(msg)) => assert_eq!(msg, "Skill not found"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
        let id = Uuid::new_v4();
        assert_eq!(parse_id::<Skill>(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_map_write_error() {
        assert!(matches!(
            map_write_error::<Project>(StoreError::Conflict("slug".into())),
            ApiError::AlreadyExists(msg) if msg == "Project already exists"
        ));
        assert!(matches!(
            map_write_error::<Skill>(StoreError::NotFound),
            ApiError::NotFound(msg) if msg == "Skill not found"
        ));
        assert!(matches!(
            map_write_error::<Skill>(StoreError::Unavailable("down".into())),
            ApiError::StorageUnavailable(_)
        ));
    }
}
