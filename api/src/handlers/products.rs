//! Product handlers
//!
//! Catalog endpoints for products, with filtering, search, ordering and
//! page-number pagination on the listing.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::extract::{AppJson, AppPath, AppQuery};
use crate::app::Page;
use crate::domain::entities::{
    CollectionId, NewProduct, Product, ProductFilter, ProductId, ProductOrdering, ProductPatch,
};
use crate::error::AppError;
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing products
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub collection_id: Option<i64>,
    #[serde(rename = "unit_price__gt")]
    pub unit_price_gt: Option<Decimal>,
    #[serde(rename = "unit_price__lt")]
    pub unit_price_lt: Option<Decimal>,
    /// Matched against title and description
    pub search: Option<String>,
    /// `unit_price`, `last_update`, or either prefixed with `-`
    pub ordering: Option<String>,
    pub page: Option<u64>,
}

impl ListProductsQuery {
    fn into_filter(self) -> Result<(ProductFilter, Option<u64>), AppError> {
        let ordering = self
            .ordering
            .filter(|o| !o.is_empty())
            .map(|o| o.parse::<ProductOrdering>())
            .transpose()
            .map_err(AppError::BadRequest)?;

        let filter = ProductFilter {
            collection_id: self.collection_id.map(CollectionId),
            unit_price_gt: self.unit_price_gt,
            unit_price_lt: self.unit_price_lt,
            search: self.search,
            ordering,
        };
        Ok((filter, self.page))
    }
}

/// Request body for creating or replacing a product
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub inventory: i32,
    #[serde(default)]
    pub collection_id: Option<i64>,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            title: request.title,
            description: request.description,
            unit_price: request.unit_price,
            inventory: request.inventory,
            collection_id: request.collection_id.map(CollectionId),
        }
    }
}

/// Request body for a partial product update
///
/// An absent field is left alone; `null` clears `description` or
/// `collection_id`.
#[derive(Debug, Default, Deserialize)]
pub struct PatchProductRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub unit_price: Option<Decimal>,
    pub inventory: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub collection_id: Option<Option<i64>>,
}

/// Wrap a field that appeared in the body, `null` included, in `Some`
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<PatchProductRequest> for ProductPatch {
    fn from(request: PatchProductRequest) -> Self {
        ProductPatch {
            title: request.title,
            description: request.description,
            unit_price: request.unit_price,
            inventory: request.inventory,
            collection_id: request.collection_id.map(|c| c.map(CollectionId)),
        }
    }
}

/// Product response
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub unit_price: Decimal,
    pub price_with_tax: Decimal,
    pub inventory: i32,
    pub last_update: DateTime<Utc>,
    pub collection_id: Option<i64>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.0,
            price_with_tax: product.price_with_tax(),
            title: product.title,
            description: product.description,
            unit_price: product.unit_price,
            inventory: product.inventory,
            last_update: product.last_update,
            collection_id: product.collection_id.map(|c| c.0),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /products
///
/// One page of products. Supports `collection_id`, `unit_price__gt`,
/// `unit_price__lt`, `search`, `ordering` and `page`.
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListProductsQuery>,
) -> Result<Json<Page<ProductResponse>>, AppError> {
    let (filter, page) = query.into_filter()?;
    let page = state.catalog_service.list_products(&filter, page).await?;
    Ok(Json(page.map(ProductResponse::from)))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(request): AppJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = state.catalog_service.create_product(request.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state.catalog_service.get_product(&ProductId(id)).await?;
    Ok(Json(product.into()))
}

/// PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<ProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .catalog_service
        .update_product(&ProductId(id), request.into())
        .await?;
    Ok(Json(product.into()))
}

/// PATCH /products/:id
pub async fn patch_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(request): AppJson<PatchProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .catalog_service
        .patch_product(&ProductId(id), request.into())
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /products/:id
///
/// Refused with 405 while any order item references the product.
pub async fn delete_product(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode, AppError> {
    state.catalog_service.delete_product(&ProductId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductSortField;

    #[test]
    fn parse_product_request_with_string_price() {
        let json = r#"{"title": "Mug", "unit_price": "12.50", "inventory": 3}"#;
        let request: ProductRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.unit_price, Decimal::new(1250, 2));
        assert_eq!(request.description, None);
        assert_eq!(request.collection_id, None);
    }

    #[test]
    fn parse_product_request_missing_price() {
        let json = r#"{"title": "Mug", "inventory": 3}"#;
        let result: Result<ProductRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn patch_request_distinguishes_null_from_absent() {
        let absent: PatchProductRequest = serde_json::from_str(r#"{"inventory": 2}"#).unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(absent.collection_id, None);

        let cleared: PatchProductRequest =
            serde_json::from_str(r#"{"description": null, "collection_id": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert_eq!(cleared.collection_id, Some(None));

        let moved: PatchProductRequest =
            serde_json::from_str(r#"{"collection_id": 4}"#).unwrap();
        let patch = ProductPatch::from(moved);
        assert_eq!(patch.collection_id, Some(Some(CollectionId(4))));
    }

    #[test]
    fn list_query_builds_filter() {
        let query = ListProductsQuery {
            collection_id: Some(3),
            unit_price_gt: Some(Decimal::new(10, 0)),
            ordering: Some("-last_update".to_string()),
            page: Some(2),
            ..Default::default()
        };

        let (filter, page) = query.into_filter().unwrap();
        assert_eq!(filter.collection_id, Some(CollectionId(3)));
        assert_eq!(filter.unit_price_gt, Some(Decimal::new(10, 0)));
        let ordering = filter.ordering.unwrap();
        assert_eq!(ordering.field, ProductSortField::LastUpdate);
        assert!(ordering.descending);
        assert_eq!(page, Some(2));
    }

    #[test]
    fn list_query_rejects_unknown_ordering() {
        let query = ListProductsQuery {
            ordering: Some("title".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.into_filter(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn product_response_includes_price_with_tax() {
        let product = Product {
            id: ProductId(1),
            title: "Mug".to_string(),
            description: None,
            unit_price: Decimal::new(1000, 2),
            inventory: 1,
            last_update: Utc::now(),
            collection_id: Some(CollectionId(2)),
        };

        let json = serde_json::to_value(ProductResponse::from(product)).unwrap();
        assert_eq!(json["unit_price"], "10.00");
        assert_eq!(json["price_with_tax"], "11.00");
        assert_eq!(json["collection_id"], 2);
    }
}
