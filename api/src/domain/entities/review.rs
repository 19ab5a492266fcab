//! Review domain entity
//!
//! Customer reviews always belong to exactly one product.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::product::ProductId;
use crate::error::DomainError;

/// Maximum length of a reviewer name
pub const MAX_REVIEWER_NAME_LEN: usize = 255;

/// Unique identifier for a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReviewId(pub i64);

impl From<i64> for ReviewId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review of a product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Author name
    pub name: String,
    pub description: String,
    /// Day the review was written
    pub date: NaiveDate,
}

impl Review {
    pub fn belongs_to(&self, product_id: ProductId) -> bool {
        self.product_id == product_id
    }
}

/// Data needed to create a review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("name may not be blank".to_string()));
        }
        if self.name.chars().count() > MAX_REVIEWER_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "name must be at most {} characters",
                MAX_REVIEWER_NAME_LEN
            )));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::Validation(
                "description may not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Editable review fields
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ReviewPatch {
    pub fn apply_to(self, review: &Review) -> NewReview {
        NewReview {
            product_id: review.product_id,
            name: self.name.unwrap_or_else(|| review.name.clone()),
            description: self
                .description
                .unwrap_or_else(|| review.description.clone()),
        }
    }
}
