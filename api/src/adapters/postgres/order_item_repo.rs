//! PostgreSQL adapter for OrderItemRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::domain::entities::ProductId;
use crate::domain::ports::OrderItemRepository;
use crate::entity::order_items;
use crate::error::DomainError;

/// PostgreSQL implementation of OrderItemRepository
pub struct PostgresOrderItemRepository {
    db: DatabaseConnection,
}

impl PostgresOrderItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderItemRepository for PostgresOrderItemRepository {
    async fn count_by_product(&self, product_id: &ProductId) -> Result<u64, DomainError> {
        order_items::Entity::find()
            .filter(order_items::Column::ProductId.eq(product_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
