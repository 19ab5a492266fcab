//! Catalog service
//!
//! Products and collections, including the guards that refuse to delete
//! records still referenced elsewhere.

use std::sync::Arc;

use crate::app::pagination::{Page, PageNumber};
use crate::domain::entities::{
    Collection, CollectionId, NewCollection, NewProduct, Product, ProductFilter, ProductId,
    ProductPatch,
};
use crate::domain::ports::{CollectionRepository, OrderItemRepository, ProductRepository};
use crate::error::{AppError, DomainError};

/// Service for managing products and collections
pub struct CatalogService<PR, CR, OR>
where
    PR: ProductRepository + ?Sized,
    CR: CollectionRepository + ?Sized,
    OR: OrderItemRepository + ?Sized,
{
    products: Arc<PR>,
    collections: Arc<CR>,
    order_items: Arc<OR>,
}

impl<PR, CR, OR> CatalogService<PR, CR, OR>
where
    PR: ProductRepository + ?Sized,
    CR: CollectionRepository + ?Sized,
    OR: OrderItemRepository + ?Sized,
{
    pub fn new(products: Arc<PR>, collections: Arc<CR>, order_items: Arc<OR>) -> Self {
        Self {
            products,
            collections,
            order_items,
        }
    }

    // ------------------------------------------------------------------
    // Products
    // ------------------------------------------------------------------

    /// List one page of products matching the filter
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: Option<u64>,
    ) -> Result<Page<Product>, AppError> {
        let page = PageNumber::new(page)?;
        let count = self.products.count(filter).await?;
        page.check_in_range(count)?;

        let results = self
            .products
            .list(filter, page.limit(), page.offset())
            .await?;

        Ok(Page::new(page, count, results))
    }

    pub async fn get_product(&self, id: &ProductId) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| product_not_found(id))
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, AppError> {
        self.check_product(&product).await?;
        Ok(self.products.create(&product).await?)
    }

    /// Replace every editable field of a product
    pub async fn update_product(
        &self,
        id: &ProductId,
        product: NewProduct,
    ) -> Result<Product, AppError> {
        self.get_product(id).await?;
        self.check_product(&product).await?;
        Ok(self.products.update(id, &product).await?)
    }

    /// Update only the fields present in the patch
    pub async fn patch_product(
        &self,
        id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Product, AppError> {
        let current = self.get_product(id).await?;
        let product = patch.apply_to(&current);
        self.check_product(&product).await?;
        Ok(self.products.update(id, &product).await?)
    }

    /// Delete a product unless an order item still references it
    pub async fn delete_product(&self, id: &ProductId) -> Result<(), AppError> {
        self.get_product(id).await?;

        let order_items = self.order_items.count_by_product(id).await?;
        if order_items > 0 {
            tracing::info!(
                product_id = %id,
                order_items,
                "Refusing to delete product referenced by order items"
            );
            return Err(AppError::Domain(DomainError::Conflict(
                "Product cannot be deleted because it is associated with an order item."
                    .to_string(),
            )));
        }

        self.products.delete(id).await?;
        tracing::debug!(product_id = %id, "Deleted product");
        Ok(())
    }

    async fn check_product(&self, product: &NewProduct) -> Result<(), AppError> {
        product.validate()?;

        if let Some(collection_id) = product.collection_id {
            if self.collections.find_by_id(&collection_id).await?.is_none() {
                return Err(AppError::Domain(DomainError::Validation(format!(
                    "Invalid collection {} - object does not exist.",
                    collection_id
                ))));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Collections
    // ------------------------------------------------------------------

    pub async fn list_collections(&self) -> Result<Vec<Collection>, AppError> {
        Ok(self.collections.list().await?)
    }

    pub async fn get_collection(&self, id: &CollectionId) -> Result<Collection, AppError> {
        self.collections
            .find_by_id(id)
            .await?
            .ok_or_else(|| collection_not_found(id))
    }

    pub async fn create_collection(
        &self,
        collection: NewCollection,
    ) -> Result<Collection, AppError> {
        collection.validate()?;
        Ok(self.collections.create(&collection).await?)
    }

    pub async fn update_collection(
        &self,
        id: &CollectionId,
        collection: NewCollection,
    ) -> Result<Collection, AppError> {
        self.get_collection(id).await?;
        collection.validate()?;
        Ok(self.collections.update(id, &collection).await?)
    }

    /// Delete a collection unless one of its products still references it
    pub async fn delete_collection(&self, id: &CollectionId) -> Result<(), AppError> {
        self.get_collection(id).await?;

        let products = self.products.count_by_collection(id).await?;
        if products > 0 {
            tracing::info!(
                collection_id = %id,
                products,
                "Refusing to delete collection that still has products"
            );
            return Err(AppError::Domain(DomainError::Conflict(
                "Collection cannot be deleted because it includes one or more products."
                    .to_string(),
            )));
        }

        self.collections.delete(id).await?;
        tracing::debug!(collection_id = %id, "Deleted collection");
        Ok(())
    }
}

fn product_not_found(id: &ProductId) -> AppError {
    AppError::Domain(DomainError::NotFound(format!("Product {} not found", id)))
}

fn collection_not_found(id: &CollectionId) -> AppError {
    AppError::Domain(DomainError::NotFound(format!(
        "Collection {} not found",
        id
    )))
}
