//! PostgreSQL adapter for CartRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    NotSet, PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::entities::{
    quantity_cap_exceeded, Cart, CartId, CartItem, CartItemId, NewCartItem, Product, ProductId,
    MAX_ITEM_QUANTITY,
};
use crate::domain::ports::CartRepository;
use crate::entity::{cart_items, carts, products};
use crate::error::DomainError;

/// PostgreSQL implementation of CartRepository
pub struct PostgresCartRepository {
    db: DatabaseConnection,
}

impl PostgresCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load a single item with its product
    async fn load_item(&self, id: i64) -> Result<CartItem, DomainError> {
        let result = cart_items::Entity::find_by_id(id)
            .find_also_related(products::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .ok_or_else(|| DomainError::NotFound(format!("Cart item {} not found", id)))?;

        into_cart_item(result)
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn create(&self) -> Result<Cart, DomainError> {
        let model = carts::ActiveModel {
            id: Set(Uuid::new_v4()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Cart {
            id: CartId(result.id),
            created_at: result.created_at.with_timezone(&Utc),
            items: Vec::new(),
        })
    }

    async fn find_by_id(&self, id: &CartId) -> Result<Option<Cart>, DomainError> {
        let result = carts::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(model) = result else {
            return Ok(None);
        };

        Ok(Some(Cart {
            id: CartId(model.id),
            created_at: model.created_at.with_timezone(&Utc),
            items: self.find_items(id).await?,
        }))
    }

    async fn exists(&self, id: &CartId) -> Result<bool, DomainError> {
        let count = carts::Entity::find_by_id(id.0)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    async fn delete(&self, id: &CartId) -> Result<(), DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        cart_items::Entity::delete_many()
            .filter(cart_items::Column::CartId.eq(id.0))
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let result = carts::Entity::delete_by_id(id.0)
            .exec(&txn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            // Dropping the transaction rolls it back
            return Err(DomainError::NotFound(format!("Cart {} not found", id)));
        }

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn find_items(&self, cart_id: &CartId) -> Result<Vec<CartItem>, DomainError> {
        let results = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(cart_id.0))
            .find_also_related(products::Entity)
            .order_by_asc(cart_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        results.into_iter().map(into_cart_item).collect()
    }

    async fn find_item(
        &self,
        cart_id: &CartId,
        item_id: &CartItemId,
    ) -> Result<Option<CartItem>, DomainError> {
        let result = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(cart_id.0))
            .filter(cart_items::Column::Id.eq(item_id.0))
            .find_also_related(products::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(into_cart_item).transpose()
    }

    async fn find_item_by_product(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, DomainError> {
        let result = cart_items::Entity::find()
            .filter(cart_items::Column::CartId.eq(cart_id.0))
            .filter(cart_items::Column::ProductId.eq(product_id.0))
            .find_also_related(products::Entity)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        result.map(into_cart_item).transpose()
    }

    async fn create_item(&self, item: &NewCartItem) -> Result<CartItem, DomainError> {
        let model = cart_items::ActiveModel {
            id: NotSet,
            cart_id: Set(item.cart_id.0),
            product_id: Set(item.product_id.0),
            quantity: Set(item.quantity),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        self.load_item(result.id).await
    }

    async fn increment_quantity(
        &self,
        item_id: &CartItemId,
        delta: i32,
    ) -> Result<CartItem, DomainError> {
        // Use raw SQL for atomic increment; the cap is checked in the same statement
        let stmt = sea_orm::Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE cart_items SET quantity = quantity + $1 \
             WHERE id = $2 AND quantity + $1 <= $3",
            [delta.into(), item_id.0.into(), MAX_ITEM_QUANTITY.into()],
        );

        let result = self
            .db
            .execute(stmt)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            // Either the line is gone or the sum would pass the cap
            self.load_item(item_id.0).await?;
            return Err(quantity_cap_exceeded());
        }

        self.load_item(item_id.0).await
    }

    async fn set_quantity(
        &self,
        item_id: &CartItemId,
        quantity: i32,
    ) -> Result<CartItem, DomainError> {
        cart_items::ActiveModel {
            id: Set(item_id.0),
            quantity: Set(quantity),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Cart item {} not found", item_id))
            }
            e => DomainError::Database(e.to_string()),
        })?;

        self.load_item(item_id.0).await
    }

    async fn delete_item(&self, item_id: &CartItemId) -> Result<(), DomainError> {
        let result = cart_items::Entity::delete_by_id(item_id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!(
                "Cart item {} not found",
                item_id
            )))
        } else {
            Ok(())
        }
    }
}

/// Convert a joined row to a domain cart item
fn into_cart_item(
    (item, product): (cart_items::Model, Option<products::Model>),
) -> Result<CartItem, DomainError> {
    let product: Product = product
        .ok_or_else(|| {
            DomainError::Internal(format!(
                "Cart item {} references missing product {}",
                item.id, item.product_id
            ))
        })?
        .into();

    Ok(CartItem {
        id: CartItemId(item.id),
        cart_id: CartId(item.cart_id),
        product: product.summary(),
        quantity: item.quantity,
    })
}
