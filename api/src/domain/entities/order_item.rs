//! Order item domain entity
//!
//! Finalized purchase lines. Orders are managed elsewhere; this service only
//! reads order items to decide whether a product may be deleted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductId;

/// Unique identifier for an order item
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderItemId(pub i64);

/// A purchased line referencing a product
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(dead_code)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: i64,
    pub product_id: ProductId,
    pub quantity: i32,
    /// Price at the time of purchase
    pub unit_price: Decimal,
}
