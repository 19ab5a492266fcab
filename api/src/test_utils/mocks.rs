//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.
//! Repositories that need product data (collection counts, cart item
//! summaries) share the product map of an `InMemoryProductRepository`.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::{
    merged_quantity, Cart, CartId, CartItem, CartItemId, Collection, CollectionId, NewCartItem,
    NewCollection, NewProduct, NewReview, OrderItem, Product, ProductFilter, ProductId,
    ProductSortField, Review, ReviewId,
};
use crate::domain::ports::{
    CartRepository, CollectionRepository, OrderItemRepository, ProductRepository,
    ReviewRepository,
};
use crate::error::DomainError;

type ProductMap = Arc<RwLock<BTreeMap<ProductId, Product>>>;

// ============================================================================
// In-Memory Product Repository
// ============================================================================

pub struct InMemoryProductRepository {
    products: ProductMap,
    next_id: AtomicI64,
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self {
            products: Arc::default(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a product for testing
    pub fn with_product(self, product: Product) -> Self {
        self.next_id.fetch_max(product.id.0 + 1, Ordering::SeqCst);
        self.products.write().unwrap().insert(product.id, product);
        self
    }

    fn shared(&self) -> ProductMap {
        self.products.clone()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.products.read().unwrap().get(id).cloned())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Product>, DomainError> {
        let products = self.products.read().unwrap();
        let mut matching: Vec<Product> = products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        if let Some(ordering) = filter.ordering {
            matching.sort_by(|a, b| {
                let cmp = match ordering.field {
                    ProductSortField::UnitPrice => a.unit_price.cmp(&b.unit_price),
                    ProductSortField::LastUpdate => a.last_update.cmp(&b.last_update),
                };
                let cmp = if ordering.descending { cmp.reverse() } else { cmp };
                cmp.then(a.id.cmp(&b.id))
            });
        }

        Ok(matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn count_by_collection(&self, collection_id: &CollectionId) -> Result<u64, DomainError> {
        let products = self.products.read().unwrap();
        Ok(products
            .values()
            .filter(|p| p.collection_id == Some(*collection_id))
            .count() as u64)
    }

    async fn create(&self, new_product: &NewProduct) -> Result<Product, DomainError> {
        let product = Product {
            id: ProductId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            title: new_product.title.clone(),
            description: new_product.description.clone(),
            unit_price: new_product.unit_price,
            inventory: new_product.inventory,
            last_update: Utc::now(),
            collection_id: new_product.collection_id,
        };

        self.products
            .write()
            .unwrap()
            .insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(&self, id: &ProductId, update: &NewProduct) -> Result<Product, DomainError> {
        let mut products = self.products.write().unwrap();
        let product = products
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Product {} not found", id)))?;

        product.title = update.title.clone();
        product.description = update.description.clone();
        product.unit_price = update.unit_price;
        product.inventory = update.inventory;
        product.collection_id = update.collection_id;
        product.last_update = Utc::now();

        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        match self.products.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Product {} not found", id))),
        }
    }
}

// ============================================================================
// In-Memory Collection Repository
// ============================================================================

pub struct InMemoryCollectionRepository {
    titles: Arc<RwLock<BTreeMap<CollectionId, String>>>,
    products: ProductMap,
    next_id: AtomicI64,
}

impl Default for InMemoryCollectionRepository {
    fn default() -> Self {
        Self {
            titles: Arc::default(),
            products: Arc::default(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryCollectionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count products from the given product repository
    pub fn with_products_from(mut self, products: &InMemoryProductRepository) -> Self {
        self.products = products.shared();
        self
    }

    /// Pre-populate with a collection for testing; its count is derived
    pub fn with_collection(self, id: CollectionId, title: &str) -> Self {
        self.next_id.fetch_max(id.0 + 1, Ordering::SeqCst);
        self.titles.write().unwrap().insert(id, title.to_string());
        self
    }

    fn products_count(&self, id: &CollectionId) -> i64 {
        self.products
            .read()
            .unwrap()
            .values()
            .filter(|p| p.collection_id == Some(*id))
            .count() as i64
    }

    fn collection(&self, id: CollectionId, title: String) -> Collection {
        Collection {
            id,
            title,
            products_count: self.products_count(&id),
        }
    }
}

#[async_trait]
impl CollectionRepository for InMemoryCollectionRepository {
    async fn find_by_id(&self, id: &CollectionId) -> Result<Option<Collection>, DomainError> {
        let title = self.titles.read().unwrap().get(id).cloned();
        Ok(title.map(|t| self.collection(*id, t)))
    }

    async fn list(&self) -> Result<Vec<Collection>, DomainError> {
        let titles = self.titles.read().unwrap().clone();
        Ok(titles
            .into_iter()
            .map(|(id, title)| self.collection(id, title))
            .collect())
    }

    async fn create(&self, new: &NewCollection) -> Result<Collection, DomainError> {
        let id = CollectionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.titles.write().unwrap().insert(id, new.title.clone());
        Ok(self.collection(id, new.title.clone()))
    }

    async fn update(
        &self,
        id: &CollectionId,
        update: &NewCollection,
    ) -> Result<Collection, DomainError> {
        {
            let mut titles = self.titles.write().unwrap();
            let title = titles
                .get_mut(id)
                .ok_or_else(|| DomainError::NotFound(format!("Collection {} not found", id)))?;
            *title = update.title.clone();
        }
        Ok(self.collection(*id, update.title.clone()))
    }

    async fn delete(&self, id: &CollectionId) -> Result<(), DomainError> {
        match self.titles.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Collection {} not found", id))),
        }
    }
}

// ============================================================================
// In-Memory Review Repository
// ============================================================================

pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<BTreeMap<ReviewId, Review>>>,
    next_id: AtomicI64,
}

impl Default for InMemoryReviewRepository {
    fn default() -> Self {
        Self {
            reviews: Arc::default(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a review for testing
    pub fn with_review(self, review: Review) -> Self {
        self.next_id.fetch_max(review.id.0 + 1, Ordering::SeqCst);
        self.reviews.write().unwrap().insert(review.id, review);
        self
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        Ok(self.reviews.read().unwrap().get(id).cloned())
    }

    async fn find_by_product(&self, product_id: &ProductId) -> Result<Vec<Review>, DomainError> {
        let reviews = self.reviews.read().unwrap();
        Ok(reviews
            .values()
            .filter(|r| r.product_id == *product_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new: &NewReview) -> Result<Review, DomainError> {
        let review = Review {
            id: ReviewId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            product_id: new.product_id,
            name: new.name.clone(),
            description: new.description.clone(),
            date: Utc::now().date_naive(),
        };
        self.reviews
            .write()
            .unwrap()
            .insert(review.id, review.clone());
        Ok(review)
    }

    async fn update(&self, id: &ReviewId, update: &NewReview) -> Result<Review, DomainError> {
        let mut reviews = self.reviews.write().unwrap();
        let review = reviews
            .get_mut(id)
            .ok_or_else(|| DomainError::NotFound(format!("Review {} not found", id)))?;
        review.name = update.name.clone();
        review.description = update.description.clone();
        Ok(review.clone())
    }

    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError> {
        match self.reviews.write().unwrap().remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!("Review {} not found", id))),
        }
    }
}

// ============================================================================
// In-Memory Cart Repository
// ============================================================================

/// Stored form of a cart line; product data is joined on read
#[derive(Clone)]
struct StoredItem {
    cart_id: CartId,
    product_id: ProductId,
    quantity: i32,
}

pub struct InMemoryCartRepository {
    carts: Arc<RwLock<BTreeMap<CartId, chrono::DateTime<Utc>>>>,
    items: Arc<RwLock<BTreeMap<CartItemId, StoredItem>>>,
    products: ProductMap,
    next_item_id: AtomicI64,
}

impl Default for InMemoryCartRepository {
    fn default() -> Self {
        Self {
            carts: Arc::default(),
            items: Arc::default(),
            products: Arc::default(),
            next_item_id: AtomicI64::new(1),
        }
    }
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join cart items against the given product repository
    pub fn with_products_from(mut self, products: &InMemoryProductRepository) -> Self {
        self.products = products.shared();
        self
    }

    /// Total number of stored cart lines across all carts
    pub fn item_count(&self) -> usize {
        self.items.read().unwrap().len()
    }

    fn join(&self, id: CartItemId, stored: &StoredItem) -> Result<CartItem, DomainError> {
        let products = self.products.read().unwrap();
        let product = products.get(&stored.product_id).ok_or_else(|| {
            DomainError::Internal(format!(
                "Cart item {} references missing product {}",
                id, stored.product_id
            ))
        })?;
        Ok(CartItem {
            id,
            cart_id: stored.cart_id,
            product: product.summary(),
            quantity: stored.quantity,
        })
    }

    fn find_where<F>(&self, predicate: F) -> Result<Vec<CartItem>, DomainError>
    where
        F: Fn(&StoredItem) -> bool,
    {
        let items = self.items.read().unwrap().clone();
        items
            .iter()
            .filter(|(_, stored)| predicate(stored))
            .map(|(id, stored)| self.join(*id, stored))
            .collect()
    }

    fn load(&self, id: &CartItemId) -> Result<CartItem, DomainError> {
        let stored = self
            .items
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Cart item {} not found", id)))?;
        self.join(*id, &stored)
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn create(&self) -> Result<Cart, DomainError> {
        let cart = Cart {
            id: CartId::new(),
            created_at: Utc::now(),
            items: Vec::new(),
        };
        self.carts.write().unwrap().insert(cart.id, cart.created_at);
        Ok(cart)
    }

    async fn find_by_id(&self, id: &CartId) -> Result<Option<Cart>, DomainError> {
        let created_at = self.carts.read().unwrap().get(id).copied();
        match created_at {
            Some(created_at) => Ok(Some(Cart {
                id: *id,
                created_at,
                items: self.find_items(id).await?,
            })),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: &CartId) -> Result<bool, DomainError> {
        Ok(self.carts.read().unwrap().contains_key(id))
    }

    async fn delete(&self, id: &CartId) -> Result<(), DomainError> {
        if self.carts.write().unwrap().remove(id).is_none() {
            return Err(DomainError::NotFound(format!("Cart {} not found", id)));
        }
        self.items
            .write()
            .unwrap()
            .retain(|_, stored| stored.cart_id != *id);
        Ok(())
    }

    async fn find_items(&self, cart_id: &CartId) -> Result<Vec<CartItem>, DomainError> {
        self.find_where(|stored| stored.cart_id == *cart_id)
    }

    async fn find_item(
        &self,
        cart_id: &CartId,
        item_id: &CartItemId,
    ) -> Result<Option<CartItem>, DomainError> {
        let stored = self.items.read().unwrap().get(item_id).cloned();
        match stored {
            Some(stored) if stored.cart_id == *cart_id => Ok(Some(self.join(*item_id, &stored)?)),
            _ => Ok(None),
        }
    }

    async fn find_item_by_product(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
    ) -> Result<Option<CartItem>, DomainError> {
        let found =
            self.find_where(|stored| stored.cart_id == *cart_id && stored.product_id == *product_id)?;
        Ok(found.into_iter().next())
    }

    async fn create_item(&self, item: &NewCartItem) -> Result<CartItem, DomainError> {
        let id = CartItemId(self.next_item_id.fetch_add(1, Ordering::SeqCst));
        self.items.write().unwrap().insert(
            id,
            StoredItem {
                cart_id: item.cart_id,
                product_id: item.product_id,
                quantity: item.quantity,
            },
        );
        self.load(&id)
    }

    async fn increment_quantity(
        &self,
        item_id: &CartItemId,
        delta: i32,
    ) -> Result<CartItem, DomainError> {
        {
            let mut items = self.items.write().unwrap();
            let stored = items
                .get_mut(item_id)
                .ok_or_else(|| DomainError::NotFound(format!("Cart item {} not found", item_id)))?;
            stored.quantity = merged_quantity(stored.quantity, delta)?;
        }
        self.load(item_id)
    }

    async fn set_quantity(
        &self,
        item_id: &CartItemId,
        quantity: i32,
    ) -> Result<CartItem, DomainError> {
        {
            let mut items = self.items.write().unwrap();
            let stored = items
                .get_mut(item_id)
                .ok_or_else(|| DomainError::NotFound(format!("Cart item {} not found", item_id)))?;
            stored.quantity = quantity;
        }
        self.load(item_id)
    }

    async fn delete_item(&self, item_id: &CartItemId) -> Result<(), DomainError> {
        match self.items.write().unwrap().remove(item_id) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!(
                "Cart item {} not found",
                item_id
            ))),
        }
    }
}

// ============================================================================
// In-Memory Order Item Repository
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderItemRepository {
    order_items: Arc<RwLock<Vec<OrderItem>>>,
}

impl InMemoryOrderItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with an order item for testing
    pub fn with_order_item(self, item: OrderItem) -> Self {
        self.order_items.write().unwrap().push(item);
        self
    }
}

#[async_trait]
impl OrderItemRepository for InMemoryOrderItemRepository {
    async fn count_by_product(&self, product_id: &ProductId) -> Result<u64, DomainError> {
        let items = self.order_items.read().unwrap();
        Ok(items.iter().filter(|i| i.product_id == *product_id).count() as u64)
    }
}
