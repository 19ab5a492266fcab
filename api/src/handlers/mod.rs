//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod cart_items;
pub mod carts;
pub mod collections;
pub mod extract;
pub mod products;
pub mod reviews;

use axum::http::Uri;

use crate::error::AppError;

pub use cart_items::{
    add_cart_item, get_cart_item, list_cart_items, remove_cart_item, update_cart_item,
};
pub use carts::{create_cart, delete_cart, get_cart};
pub use collections::{
    create_collection, delete_collection, get_collection, list_collections, patch_collection,
    update_collection,
};
pub use products::{
    create_product, delete_product, get_product, list_products, patch_product, update_product,
};
pub use reviews::{
    create_review, delete_review, get_review, list_reviews, patch_review, update_review,
};

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
