//! Review service
//!
//! Reviews are always addressed through their product; a review reached
//! through another product's path does not exist.

use std::sync::Arc;

use crate::domain::entities::{NewReview, ProductId, Review, ReviewId, ReviewPatch};
use crate::domain::ports::{ProductRepository, ReviewRepository};
use crate::error::{AppError, DomainError};

/// Service for managing product reviews
pub struct ReviewService<RR, PR>
where
    RR: ReviewRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    reviews: Arc<RR>,
    products: Arc<PR>,
}

impl<RR, PR> ReviewService<RR, PR>
where
    RR: ReviewRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    pub fn new(reviews: Arc<RR>, products: Arc<PR>) -> Self {
        Self { reviews, products }
    }

    /// All reviews of a product, in the order they were written
    pub async fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, AppError> {
        Ok(self.reviews.find_by_product(product_id).await?)
    }

    pub async fn create(
        &self,
        product_id: &ProductId,
        name: String,
        description: String,
    ) -> Result<Review, AppError> {
        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::Domain(DomainError::NotFound(format!(
                "Product {} not found",
                product_id
            ))));
        }

        let review = NewReview {
            product_id: *product_id,
            name,
            description,
        };
        review.validate()?;

        let review = self.reviews.create(&review).await?;
        tracing::debug!(review_id = %review.id, product_id = %product_id, "Created review");
        Ok(review)
    }

    pub async fn get(&self, product_id: &ProductId, id: &ReviewId) -> Result<Review, AppError> {
        match self.reviews.find_by_id(id).await? {
            Some(review) if review.belongs_to(*product_id) => Ok(review),
            _ => Err(AppError::Domain(DomainError::NotFound(format!(
                "Review {} not found for product {}",
                id, product_id
            )))),
        }
    }

    /// Replace the name and description of a review
    pub async fn update(
        &self,
        product_id: &ProductId,
        id: &ReviewId,
        name: String,
        description: String,
    ) -> Result<Review, AppError> {
        self.patch(
            product_id,
            id,
            ReviewPatch {
                name: Some(name),
                description: Some(description),
            },
        )
        .await
    }

    pub async fn patch(
        &self,
        product_id: &ProductId,
        id: &ReviewId,
        patch: ReviewPatch,
    ) -> Result<Review, AppError> {
        let current = self.get(product_id, id).await?;
        let review = patch.apply_to(&current);
        review.validate()?;
        Ok(self.reviews.update(id, &review).await?)
    }

    pub async fn delete(&self, product_id: &ProductId, id: &ReviewId) -> Result<(), AppError> {
        self.get(product_id, id).await?;
        Ok(self.reviews.delete(id).await?)
    }
}
