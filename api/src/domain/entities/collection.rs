//! Collection domain entity
//!
//! A category grouping of products. The product count is aggregated at
//! query time and never stored.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum length of a collection title
pub const MAX_COLLECTION_TITLE_LEN: usize = 255;

/// Unique identifier for a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub i64);

impl From<i64> for CollectionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CollectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A collection together with the number of products referencing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    pub products_count: i64,
}

/// Data needed to create or rename a collection
#[derive(Debug, Clone)]
pub struct NewCollection {
    pub title: String,
}

impl NewCollection {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title, MAX_COLLECTION_TITLE_LEN)
    }
}

/// Shared title check for catalog records
pub(crate) fn validate_title(title: &str, max_len: usize) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::Validation("title may not be blank".to_string()));
    }
    if title.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "title must be at most {} characters",
            max_len
        )));
    }
    Ok(())
}
