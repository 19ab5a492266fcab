//! PostgreSQL adapter for CollectionRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    JoinType, NotSet, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
    SelectModel, Selector, Set,
};

use crate::domain::entities::{Collection, CollectionId, NewCollection};
use crate::domain::ports::CollectionRepository;
use crate::entity::{collections, products};
use crate::error::DomainError;

/// Row shape of a collection joined with its product count
#[derive(Debug, FromQueryResult)]
struct CollectionWithCount {
    id: i64,
    title: String,
    products_count: i64,
}

/// PostgreSQL implementation of CollectionRepository
pub struct PostgresCollectionRepository {
    db: DatabaseConnection,
}

impl PostgresCollectionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn products_count(&self, id: i64) -> Result<i64, DomainError> {
        let count = products::Entity::find()
            .filter(products::Column::CollectionId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }
}

/// Annotate a collection query with `COUNT(products.id) AS products_count`
fn with_products_count(
    query: Select<collections::Entity>,
) -> Selector<SelectModel<CollectionWithCount>> {
    let products_count: SimpleExpr =
        Func::count(Expr::col((products::Entity, products::Column::Id))).into();

    query
        .select_only()
        .column(collections::Column::Id)
        .column(collections::Column::Title)
        .column_as(products_count, "products_count")
        .join(JoinType::LeftJoin, collections::Relation::Products.def())
        .group_by(collections::Column::Id)
        .group_by(collections::Column::Title)
        .into_model::<CollectionWithCount>()
}

#[async_trait]
impl CollectionRepository for PostgresCollectionRepository {
    async fn find_by_id(&self, id: &CollectionId) -> Result<Option<Collection>, DomainError> {
        let result = with_products_count(
            collections::Entity::find().filter(collections::Column::Id.eq(id.0)),
        )
        .one(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|row| row.into()))
    }

    async fn list(&self) -> Result<Vec<Collection>, DomainError> {
        let results = with_products_count(
            collections::Entity::find().order_by_asc(collections::Column::Id),
        )
        .all(&self.db)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|row| row.into()).collect())
    }

    async fn create(&self, collection: &NewCollection) -> Result<Collection, DomainError> {
        let model = collections::ActiveModel {
            id: NotSet,
            title: Set(collection.title.clone()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Collection {
            id: CollectionId(result.id),
            title: result.title,
            products_count: 0,
        })
    }

    async fn update(
        &self,
        id: &CollectionId,
        collection: &NewCollection,
    ) -> Result<Collection, DomainError> {
        let result = collections::ActiveModel {
            id: Set(id.0),
            title: Set(collection.title.clone()),
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Collection {} not found", id))
            }
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(Collection {
            id: CollectionId(result.id),
            title: result.title,
            products_count: self.products_count(result.id).await?,
        })
    }

    async fn delete(&self, id: &CollectionId) -> Result<(), DomainError> {
        let result = collections::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!("Collection {} not found", id)))
        } else {
            Ok(())
        }
    }
}

impl From<CollectionWithCount> for Collection {
    fn from(row: CollectionWithCount) -> Self {
        Collection {
            id: CollectionId(row.id),
            title: row.title,
            products_count: row.products_count,
        }
    }
}
