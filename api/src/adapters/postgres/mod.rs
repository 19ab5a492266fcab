//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod cart_repo;
pub mod collection_repo;
pub mod order_item_repo;
pub mod product_repo;
pub mod review_repo;


pub use cart_repo::PostgresCartRepository;
pub use collection_repo::PostgresCollectionRepository;
pub use order_item_repo::PostgresOrderItemRepository;
pub use product_repo::PostgresProductRepository;
pub use review_repo::PostgresReviewRepository;
