//! Cart handlers
//!
//! Carts are anonymous; the UUID returned on creation is the only handle.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::extract::AppPath;
use crate::domain::entities::{Cart, CartId, CartItem, ProductSummary};
use crate::error::AppError;
use crate::AppState;

/// Product fields embedded in a cart item
#[derive(Debug, Serialize)]
pub struct CartProductResponse {
    pub id: i64,
    pub title: String,
    pub unit_price: Decimal,
}

impl From<ProductSummary> for CartProductResponse {
    fn from(product: ProductSummary) -> Self {
        CartProductResponse {
            id: product.id.0,
            title: product.title,
            unit_price: product.unit_price,
        }
    }
}

/// Cart item response
#[derive(Debug, Serialize)]
pub struct CartItemResponse {
    pub id: i64,
    pub product: CartProductResponse,
    pub quantity: i32,
    /// `quantity * product.unit_price`
    pub total_price: Decimal,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            id: item.id.0,
            total_price: item.total_price(),
            quantity: item.quantity,
            product: item.product.into(),
        }
    }
}

/// Cart response
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItemResponse>,
    pub total_price: Decimal,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            id: cart.id.0,
            created_at: cart.created_at,
            total_price: cart.total_price(),
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// POST /carts
///
/// Create an empty cart.
pub async fn create_cart(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CartResponse>), AppError> {
    let cart = state.cart_service.create_cart().await?;
    Ok((StatusCode::CREATED, Json(cart.into())))
}

/// GET /carts/:id
pub async fn get_cart(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = state.cart_service.get_cart(&CartId(id)).await?;
    Ok(Json(cart.into()))
}

/// DELETE /carts/:id
///
/// Removes the cart and every item in it.
pub async fn delete_cart(
    State(state): State<AppState>,
    AppPath(id): AppPath<Uuid>,
) -> Result<StatusCode, AppError> {
    state.cart_service.delete_cart(&CartId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
