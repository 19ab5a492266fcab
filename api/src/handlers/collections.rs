//! Collection handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::extract::{AppJson, AppPath};
use crate::domain::entities::{Collection, CollectionId, NewCollection};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating or renaming a collection
#[derive(Debug, Deserialize)]
pub struct CollectionRequest {
    pub title: String,
}

/// Request body for a partial collection update
#[derive(Debug, Deserialize)]
pub struct PatchCollectionRequest {
    pub title: Option<String>,
}

/// Collection response
#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub id: i64,
    pub title: String,
    pub products_count: i64,
}

impl From<Collection> for CollectionResponse {
    fn from(collection: Collection) -> Self {
        CollectionResponse {
            id: collection.id.0,
            title: collection.title,
            products_count: collection.products_count,
        }
    }
}

/// GET /collections
pub async fn list_collections(
    State(state): State<AppState>,
) -> Result<Json<Vec<CollectionResponse>>, AppError> {
    let collections = state.catalog_service.list_collections().await?;
    Ok(Json(collections.into_iter().map(Into::into).collect()))
}

/// POST /collections
pub async fn create_collection(
    State(state): State<AppState>,
    AppJson(request): AppJson<CollectionRequest>,
) -> Result<(StatusCode, Json<CollectionResponse>), AppError> {
    let collection = state
        .catalog_service
        .create_collection(NewCollection {
            title: request.title,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(collection.into())))
}

/// GET /collections/:id
pub async fn get_collection(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<CollectionResponse>, AppError> {
    let collection = state
        .catalog_service
        .get_collection(&CollectionId(id))
        .await?;
    Ok(Json(collection.into()))
}

/// PUT /collections/:id
pub async fn update_collection(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<CollectionRequest>,
) -> Result<Json<CollectionResponse>, AppError> {
    let collection = state
        .catalog_service
        .update_collection(
            &CollectionId(id),
            NewCollection {
                title: request.title,
            },
        )
        .await?;
    Ok(Json(collection.into()))
}

/// PATCH /collections/:id
///
/// Title is the only editable field, so an empty patch returns the
/// collection unchanged.
pub async fn patch_collection(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<PatchCollectionRequest>,
) -> Result<Json<CollectionResponse>, AppError> {
    let id = CollectionId(id);
    let collection = match request.title {
        Some(title) => {
            state
                .catalog_service
                .update_collection(&id, NewCollection { title })
                .await?
        }
        None => state.catalog_service.get_collection(&id).await?,
    };
    Ok(Json(collection.into()))
}

/// DELETE /collections/:id
///
/// Refused with 405 while any product belongs to the collection.
pub async fn delete_collection(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state
        .catalog_service
        .delete_collection(&CollectionId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
