//! Review handlers
//!
//! Reviews are nested under their product: `/products/:product_id/reviews`.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::extract::{AppJson, AppPath};
use crate::domain::entities::{ProductId, Review, ReviewId, ReviewPatch};
use crate::error::AppError;
use crate::AppState;

/// Request body for writing a review
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub name: String,
    pub description: String,
}

/// Request body for a partial review update
#[derive(Debug, Deserialize)]
pub struct PatchReviewRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Review response
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        ReviewResponse {
            id: review.id.0,
            product_id: review.product_id.0,
            name: review.name,
            description: review.description,
            date: review.date,
        }
    }
}

/// GET /products/:product_id/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<i64>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = state
        .review_service
        .list_for_product(&ProductId(product_id))
        .await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

/// POST /products/:product_id/reviews
pub async fn create_review(
    State(state): State<AppState>,
    AppPath(product_id): AppPath<i64>,
    AppJson(request): AppJson<ReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let review = state
        .review_service
        .create(&ProductId(product_id), request.name, request.description)
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

/// GET /products/:product_id/reviews/:id
pub async fn get_review(
    State(state): State<AppState>,
    AppPath((product_id, id)): AppPath<(i64, i64)>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = state
        .review_service
        .get(&ProductId(product_id), &ReviewId(id))
        .await?;
    Ok(Json(review.into()))
}

/// PUT /products/:product_id/reviews/:id
pub async fn update_review(
    State(state): State<AppState>,
    AppPath((product_id, id)): AppPath<(i64, i64)>,
    AppJson(request): AppJson<ReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = state
        .review_service
        .update(
            &ProductId(product_id),
            &ReviewId(id),
            request.name,
            request.description,
        )
        .await?;
    Ok(Json(review.into()))
}

/// PATCH /products/:product_id/reviews/:id
pub async fn patch_review(
    State(state): State<AppState>,
    AppPath((product_id, id)): AppPath<(i64, i64)>,
    AppJson(request): AppJson<PatchReviewRequest>,
) -> Result<Json<ReviewResponse>, AppError> {
    let review = state
        .review_service
        .patch(
            &ProductId(product_id),
            &ReviewId(id),
            ReviewPatch {
                name: request.name,
                description: request.description,
            },
        )
        .await?;
    Ok(Json(review.into()))
}

/// DELETE /products/:product_id/reviews/:id
pub async fn delete_review(
    State(state): State<AppState>,
    AppPath((product_id, id)): AppPath<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .review_service
        .delete(&ProductId(product_id), &ReviewId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
