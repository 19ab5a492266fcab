//! Product domain entity
//!
//! Products are the leaf records of the catalog. A product may belong to a
//! collection and may be referenced by reviews, cart items and order items.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::collection::{validate_title, CollectionId};
use crate::error::DomainError;

/// Maximum length of a product title
pub const MAX_PRODUCT_TITLE_LEN: usize = 255;

/// Lowest accepted unit price
pub const MIN_UNIT_PRICE: Decimal = Decimal::ONE;

/// Unique identifier for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub inventory: i32,
    /// Refreshed on every write
    pub last_update: DateTime<Utc>,
    pub collection_id: Option<CollectionId>,
}

impl Product {
    /// Unit price including 10% sales tax, rounded to cents
    pub fn price_with_tax(&self) -> Decimal {
        (self.unit_price * Decimal::new(11, 1)).round_dp(2)
    }

    /// Short form used when embedding a product in cart items
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id,
            title: self.title.clone(),
            unit_price: self.unit_price,
        }
    }
}

/// The fields of a product that other records embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub title: String,
    pub unit_price: Decimal,
}

/// Data needed to create a product, or to replace all of its fields
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub title: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub inventory: i32,
    pub collection_id: Option<CollectionId>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_title(&self.title, MAX_PRODUCT_TITLE_LEN)?;

        if self.unit_price < MIN_UNIT_PRICE {
            return Err(DomainError::Validation(format!(
                "unit_price must be at least {}",
                MIN_UNIT_PRICE
            )));
        }
        if self.unit_price.scale() > 2 {
            return Err(DomainError::Validation(
                "unit_price may have at most 2 decimal places".to_string(),
            ));
        }
        if self.inventory < 0 {
            return Err(DomainError::Validation(
                "inventory may not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// A partial update; absent fields keep their current value
///
/// The nullable fields are doubly optional: `Some(None)` clears the field.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub unit_price: Option<Decimal>,
    pub inventory: Option<i32>,
    pub collection_id: Option<Option<CollectionId>>,
}

impl ProductPatch {
    /// Merge the patch over an existing product
    pub fn apply_to(self, product: &Product) -> NewProduct {
        NewProduct {
            title: self.title.unwrap_or_else(|| product.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| product.description.clone()),
            unit_price: self.unit_price.unwrap_or(product.unit_price),
            inventory: self.inventory.unwrap_or(product.inventory),
            collection_id: self.collection_id.unwrap_or(product.collection_id),
        }
    }
}

/// Columns a product listing may be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    UnitPrice,
    LastUpdate,
}

/// Sort order for product listings, written `unit_price` or `-unit_price`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductOrdering {
    pub field: ProductSortField,
    pub descending: bool,
}

impl std::fmt::Display for ProductOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = if self.descending { "-" } else { "" };
        let field = match self.field {
            ProductSortField::UnitPrice => "unit_price",
            ProductSortField::LastUpdate => "last_update",
        };
        write!(f, "{}{}", prefix, field)
    }
}

impl std::str::FromStr for ProductOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (descending, name) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let field = match name {
            "unit_price" => ProductSortField::UnitPrice,
            "last_update" => ProductSortField::LastUpdate,
            _ => return Err(format!("Unknown ordering field: {}", s)),
        };
        Ok(Self { field, descending })
    }
}

/// Criteria for listing products
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub collection_id: Option<CollectionId>,
    pub unit_price_gt: Option<Decimal>,
    pub unit_price_lt: Option<Decimal>,
    /// Case-insensitive match against title or description
    pub search: Option<String>,
    pub ordering: Option<ProductOrdering>,
}

impl ProductFilter {
    /// Whether a product satisfies every criterion except ordering
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(collection_id) = self.collection_id {
            if product.collection_id != Some(collection_id) {
                return false;
            }
        }
        if let Some(gt) = self.unit_price_gt {
            if product.unit_price <= gt {
                return false;
            }
        }
        if let Some(lt) = self.unit_price_lt {
            if product.unit_price >= lt {
                return false;
            }
        }
        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let in_title = product.title.to_lowercase().contains(&term);
            let in_description = product
                .description
                .as_deref()
                .map(|d| d.to_lowercase().contains(&term))
                .unwrap_or(false);
            if !in_title && !in_description {
                return false;
            }
        }
        true
    }

    /// The search term, ignoring blank input
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
