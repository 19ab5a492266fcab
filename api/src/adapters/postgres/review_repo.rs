//! PostgreSQL adapter for ReviewRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::entities::{NewReview, ProductId, Review, ReviewId};
use crate::domain::ports::ReviewRepository;
use crate::entity::reviews;
use crate::error::DomainError;

/// PostgreSQL implementation of ReviewRepository
pub struct PostgresReviewRepository {
    db: DatabaseConnection,
}

impl PostgresReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        let result = reviews::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_product(&self, product_id: &ProductId) -> Result<Vec<Review>, DomainError> {
        let results = reviews::Entity::find()
            .filter(reviews::Column::ProductId.eq(product_id.0))
            .order_by_asc(reviews::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn create(&self, review: &NewReview) -> Result<Review, DomainError> {
        let model = reviews::ActiveModel {
            id: NotSet,
            product_id: Set(review.product_id.0),
            name: Set(review.name.clone()),
            description: Set(review.description.clone()),
            date: Set(Utc::now().date_naive()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn update(&self, id: &ReviewId, review: &NewReview) -> Result<Review, DomainError> {
        let result = reviews::ActiveModel {
            id: Set(id.0),
            name: Set(review.name.clone()),
            description: Set(review.description.clone()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => DomainError::NotFound(format!("Review {} not found", id)),
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError> {
        let result = reviews::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            Err(DomainError::NotFound(format!("Review {} not found", id)))
        } else {
            Ok(())
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Review {
            id: ReviewId(model.id),
            product_id: ProductId(model.product_id),
            name: model.name,
            description: model.description,
            date: model.date,
        }
    }
}
