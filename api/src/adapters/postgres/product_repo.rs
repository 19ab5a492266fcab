//! PostgreSQL adapter for ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, NotSet,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use crate::domain::entities::{
    CollectionId, NewProduct, Product, ProductFilter, ProductId, ProductSortField,
};
use crate::domain::ports::ProductRepository;
use crate::entity::products;
use crate::error::DomainError;

/// PostgreSQL implementation of ProductRepository
pub struct PostgresProductRepository {
    db: DatabaseConnection,
}

impl PostgresProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Build the WHERE clause shared by listing and counting
fn filtered(filter: &ProductFilter) -> Select<products::Entity> {
    let mut query = products::Entity::find();

    if let Some(collection_id) = filter.collection_id {
        query = query.filter(products::Column::CollectionId.eq(collection_id.0));
    }
    if let Some(gt) = filter.unit_price_gt {
        query = query.filter(products::Column::UnitPrice.gt(gt));
    }
    if let Some(lt) = filter.unit_price_lt {
        query = query.filter(products::Column::UnitPrice.lt(lt));
    }
    if let Some(term) = filter.search_term() {
        let pattern = contains_pattern(&term.to_lowercase());
        query = query.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col(products::Column::Title)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col(products::Column::Description)))
                        .like(LikeExpr::new(pattern).escape('\\')),
                ),
        );
    }

    query
}

/// LIKE pattern matching `term` literally anywhere in the value
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let result = products::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let mut query = filtered(filter);

        if let Some(ordering) = filter.ordering {
            let column = match ordering.field {
                ProductSortField::UnitPrice => products::Column::UnitPrice,
                ProductSortField::LastUpdate => products::Column::LastUpdate,
            };
            let order = if ordering.descending {
                Order::Desc
            } else {
                Order::Asc
            };
            query = query.order_by(column, order);
        }

        // Id breaks ties so pages are stable
        let results = query
            .order_by_asc(products::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        filtered(filter)
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn count_by_collection(&self, collection_id: &CollectionId) -> Result<u64, DomainError> {
        products::Entity::find()
            .filter(products::Column::CollectionId.eq(collection_id.0))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = products::ActiveModel {
            id: NotSet,
            title: Set(product.title.clone()),
            description: Set(product.description.clone()),
            unit_price: Set(product.unit_price),
            inventory: Set(product.inventory),
            last_update: Set(now),
            collection_id: Set(product.collection_id.map(|c| c.0)),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &ProductId, product: &NewProduct) -> Result<Product, DomainError> {
        let now = Utc::now().fixed_offset();

        let result = products::ActiveModel {
            id: Set(id.0),
            title: Set(product.title.clone()),
            description: Set(product.description.clone()),
            unit_price: Set(product.unit_price),
            inventory: Set(product.inventory),
            last_update: Set(now),
            collection_id: Set(product.collection_id.map(|c| c.0)),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Product {} not found", id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = products::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!("Product {} not found", id)))
        } else {
            Ok(())
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Product {
            id: ProductId(model.id),
            title: model.title,
            description: model.description,
            unit_price: model.unit_price,
            inventory: model.inventory,
            last_update: model.last_update.with_timezone(&Utc),
            collection_id: model.collection_id.map(CollectionId),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait, Value};

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("tea"), "%tea%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }

    #[test]
    fn search_binds_escaped_pattern() {
        let filter = ProductFilter {
            search: Some("50%_OFF".to_string()),
            ..Default::default()
        };

        let statement = filtered(&filter).build(DbBackend::Postgres);
        assert!(statement.sql.contains("ESCAPE"));

        let values = statement.values.unwrap().0;
        assert!(values.contains(&Value::from(r"%50\%\_off%")));
        assert!(!values.contains(&Value::from("%50%_off%")));
    }
}
