//! Cart domain entities
//!
//! A cart is an anonymous collection of prospective purchase line items,
//! identified only by an opaque token. Each product appears at most once
//! per cart; adding it again increases the quantity of the existing line.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::{ProductId, ProductSummary};
use crate::error::DomainError;

/// Largest quantity a single cart line may hold
pub const MAX_ITEM_QUANTITY: i32 = i16::MAX as i32;

/// Unique identifier for a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartId(pub Uuid);

impl CartId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CartId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CartId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a cart item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CartItemId(pub i64);

impl From<i64> for CartItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CartItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cart with its line items
#[derive(Debug, Clone, Serialize)]
pub struct Cart {
    pub id: CartId,
    pub created_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of all line totals
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::total_price).sum()
    }
}

/// Quantity of a single product held in a cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub cart_id: CartId,
    pub product: ProductSummary,
    pub quantity: i32,
}

impl CartItem {
    pub fn total_price(&self) -> Decimal {
        self.product.unit_price * Decimal::from(self.quantity)
    }
}

/// Data needed to create a cart line
#[derive(Debug, Clone)]
pub struct NewCartItem {
    pub cart_id: CartId,
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Check that a quantity is a positive integer that fits a cart line
pub fn validate_quantity(quantity: i32) -> Result<(), DomainError> {
    if quantity < 1 {
        return Err(DomainError::Validation(
            "quantity must be a positive integer".to_string(),
        ));
    }
    if quantity > MAX_ITEM_QUANTITY {
        return Err(DomainError::Validation(format!(
            "quantity must be at most {}",
            MAX_ITEM_QUANTITY
        )));
    }
    Ok(())
}

/// Quantity of a line after adding `delta`, refused past the cap
pub fn merged_quantity(current: i32, delta: i32) -> Result<i32, DomainError> {
    current
        .checked_add(delta)
        .filter(|total| *total <= MAX_ITEM_QUANTITY)
        .ok_or_else(quantity_cap_exceeded)
}

pub fn quantity_cap_exceeded() -> DomainError {
    DomainError::Validation(format!(
        "quantity in cart may not exceed {}",
        MAX_ITEM_QUANTITY
    ))
}
