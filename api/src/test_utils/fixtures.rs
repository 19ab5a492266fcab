//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Each fixture function creates a valid entity that can be customized.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::{
    CollectionId, NewProduct, OrderItem, OrderItemId, Product, ProductId, Review, ReviewId,
};

/// Create a test product with default values
pub fn test_product(id: i64) -> Product {
    Product {
        id: ProductId(id),
        title: format!("Product {}", id),
        description: Some(format!("Description of product {}", id)),
        unit_price: Decimal::new(1000, 2),
        inventory: 10,
        last_update: Utc::now(),
        collection_id: None,
    }
}

/// Create a test product with a specific price
pub fn test_product_priced(id: i64, unit_price: Decimal) -> Product {
    Product {
        unit_price,
        ..test_product(id)
    }
}

/// Create a test product belonging to a collection
pub fn test_product_in(id: i64, collection_id: i64) -> Product {
    Product {
        collection_id: Some(CollectionId(collection_id)),
        ..test_product(id)
    }
}

/// Valid input for creating a product
pub fn new_product(title: &str) -> NewProduct {
    NewProduct {
        title: title.to_string(),
        description: None,
        unit_price: Decimal::new(1999, 2),
        inventory: 5,
        collection_id: None,
    }
}

/// Create a review of a product
pub fn test_review(id: i64, product_id: i64) -> Review {
    Review {
        id: ReviewId(id),
        product_id: ProductId(product_id),
        name: "Reviewer".to_string(),
        description: "Works as described".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

/// Create an order item referencing a product
pub fn test_order_item(id: i64, product_id: i64) -> OrderItem {
    OrderItem {
        id: OrderItemId(id),
        order_id: 1,
        product_id: ProductId(product_id),
        quantity: 1,
        unit_price: Decimal::new(1000, 2),
    }
}
