//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports, and enforce the
//! rules that guard destructive writes.

pub mod cart_service;
pub mod catalog_service;
pub mod pagination;
pub mod review_service;

pub use cart_service::{CartItemWrite, CartService};
pub use catalog_service::CatalogService;
pub use pagination::Page;
pub use review_service::ReviewService;
