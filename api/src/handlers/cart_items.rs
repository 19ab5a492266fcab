//! Cart item handlers
//!
//! Items are nested under their cart: `/carts/:cart_id/items`.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::carts::CartItemResponse;
use super::extract::{AppJson, AppPath};
use crate::app::CartItemWrite;
use crate::domain::entities::{CartId, CartItemId, ProductId};
use crate::error::AppError;
use crate::AppState;

/// Request body for adding a product to a cart
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub product_id: i64,
    pub quantity: i32,
}

/// Request body for changing the quantity of a line
#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// GET /carts/:cart_id/items
pub async fn list_cart_items(
    State(state): State<AppState>,
    AppPath(cart_id): AppPath<Uuid>,
) -> Result<Json<Vec<CartItemResponse>>, AppError> {
    let items = state.cart_service.list_items(&CartId(cart_id)).await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

/// POST /carts/:cart_id/items
///
/// Adds a product to the cart. If the product is already in the cart its
/// quantity grows and the existing line is returned with 200; otherwise the
/// new line is returned with 201.
pub async fn add_cart_item(
    State(state): State<AppState>,
    AppPath(cart_id): AppPath<Uuid>,
    AppJson(request): AppJson<AddCartItemRequest>,
) -> Result<(StatusCode, Json<CartItemResponse>), AppError> {
    let write = state
        .cart_service
        .add_item(
            &CartId(cart_id),
            &ProductId(request.product_id),
            request.quantity,
        )
        .await?;

    let status = match write {
        CartItemWrite::Created(_) => StatusCode::CREATED,
        CartItemWrite::Merged(_) => StatusCode::OK,
    };
    Ok((status, Json(write.into_item().into())))
}

/// GET /carts/:cart_id/items/:id
pub async fn get_cart_item(
    State(state): State<AppState>,
    AppPath((cart_id, id)): AppPath<(Uuid, i64)>,
) -> Result<Json<CartItemResponse>, AppError> {
    let item = state
        .cart_service
        .get_item(&CartId(cart_id), &CartItemId(id))
        .await?;
    Ok(Json(item.into()))
}

/// PATCH /carts/:cart_id/items/:id
pub async fn update_cart_item(
    State(state): State<AppState>,
    AppPath((cart_id, id)): AppPath<(Uuid, i64)>,
    AppJson(request): AppJson<UpdateCartItemRequest>,
) -> Result<Json<CartItemResponse>, AppError> {
    let item = state
        .cart_service
        .update_item(&CartId(cart_id), &CartItemId(id), request.quantity)
        .await?;
    Ok(Json(item.into()))
}

/// DELETE /carts/:cart_id/items/:id
pub async fn remove_cart_item(
    State(state): State<AppState>,
    AppPath((cart_id, id)): AppPath<(Uuid, i64)>,
) -> Result<StatusCode, AppError> {
    state
        .cart_service
        .remove_item(&CartId(cart_id), &CartItemId(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
