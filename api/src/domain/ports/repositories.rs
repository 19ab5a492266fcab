//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    Cart, CartId, CartItem, CartItemId, Collection, CollectionId, NewCartItem, NewCollection,
    NewProduct, NewReview, Product, ProductFilter, ProductId, Review, ReviewId,
};
use crate::error::DomainError;

/// Repository for Product entities
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    /// List one page of products matching the filter
    async fn list(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError>;

    /// Count all products matching the filter
    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError>;

    /// Count products that belong to a collection
    async fn count_by_collection(&self, collection_id: &CollectionId) -> Result<u64, DomainError>;

    /// Create a new product
    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError>;

    /// Replace every editable field of a product and refresh `last_update`
    async fn update(&self, id: &ProductId, product: &NewProduct) -> Result<Product, DomainError>;

    /// Delete a product; `NotFound` when it does not exist
    async fn delete(&self, id: &ProductId) -> Result<(), DomainError>;
}

/// Repository for Collection entities
///
/// Every collection returned carries its current `products_count`.
#[async_trait]
pub trait CollectionRepository: Send + Sync {
    /// Find a collection by ID
    async fn find_by_id(&self, id: &CollectionId) -> Result<Option<Collection>, DomainError>;

    /// List all collections in ID order
    async fn list(&self) -> Result<Vec<Collection>, DomainError>;

    /// Create a new collection
    async fn create(&self, collection: &NewCollection) -> Result<Collection, DomainError>;

    /// Rename a collection
    async fn update(
        &self,
        id: &CollectionId,
        collection: &NewCollection,
    ) -> Result<Collection, DomainError>;

    /// Delete a collection; `NotFound` when it does not exist
    async fn delete(&self, id: &CollectionId) -> Result<(), DomainError>;
}

/// Repository for Review entities
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Find a review by ID
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError>;

    /// All reviews of a product in storage order
    async fn find_by_product(&self, product_id: &ProductId) -> Result<Vec<Review>, DomainError>;

    /// Create a new review dated today
    async fn create(&self, review: &NewReview) -> Result<Review, DomainError>;

    /// Replace the name and description of a review
    async fn update(&self, id: &ReviewId, review: &NewReview) -> Result<Review, DomainError>;

    /// Delete a review; `NotFound` when it does not exist
    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError>;
}

/// Repository for Cart and CartItem entities
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Create an empty cart with a fresh token
    async fn create(&self) -> Result<Cart, DomainError>;

    /// Find a cart with all of its items
    async fn find_by_id(&self, id: &CartId) -> Result<Option<Cart>, DomainError>;

    /// Check whether a cart exists without loading its items
    async fn exists(&self, id: &CartId) -> Result<bool, DomainError>;

    /// Delete a cart and its items; `NotFound` when it does not exist
    async fn delete(&self, id: &CartId) -> Result<(), DomainError>;

    /// All items of a cart in storage order
    async fn find_items(&self, cart_id: &CartId) -> Result<Vec<CartItem>, DomainError>;

    /// Find one item of a cart
    async fn find_item(
        &self,
        cart_id: &CartId,
        item_id: &CartItemId,
    ) -> Result<Option<CartItem>, DomainError>;

    /// Find the line holding a product in a cart, if any
    async fn find_item_by_product(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, DomainError>;

    /// Create a new cart line
    async fn create_item(&self, item: &NewCartItem) -> Result<CartItem, DomainError>;

    /// Atomically add `delta` to the quantity of an existing line.
    /// `Validation` when the result would exceed `MAX_ITEM_QUANTITY`.
    async fn increment_quantity(
        &self,
        item_id: &CartItemId,
        delta: i32,
    ) -> Result<CartItem, DomainError>;

    /// Overwrite the quantity of an existing line
    async fn set_quantity(&self, item_id: &CartItemId, quantity: i32)
        -> Result<CartItem, DomainError>;

    /// Delete a cart line; `NotFound` when it does not exist
    async fn delete_item(&self, item_id: &CartItemId) -> Result<(), DomainError>;
}

/// Read-only access to order items
#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    /// Count order items referencing a product
    async fn count_by_product(&self, product_id: &ProductId) -> Result<u64, DomainError>;
}
