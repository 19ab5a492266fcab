//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod cart;
pub mod collection;
pub mod order_item;
pub mod product;
pub mod review;

pub use cart::{
    merged_quantity, quantity_cap_exceeded, validate_quantity, Cart, CartId, CartItem,
    CartItemId, NewCartItem, MAX_ITEM_QUANTITY,
};
pub use collection::{Collection, CollectionId, NewCollection};
#[allow(unused_imports)]
pub use order_item::{OrderItem, OrderItemId};
pub use product::{
    NewProduct, Product, ProductFilter, ProductId, ProductOrdering, ProductPatch,
    ProductSortField, ProductSummary,
};
pub use review::{NewReview, Review, ReviewId, ReviewPatch};
