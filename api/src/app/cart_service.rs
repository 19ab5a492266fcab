//! Cart service
//!
//! Anonymous carts addressed by token. Adding a product that is already in
//! the cart grows the existing line instead of creating a second one.

use std::sync::Arc;

use crate::domain::entities::{
    merged_quantity, validate_quantity, Cart, CartId, CartItem, CartItemId, NewCartItem,
    ProductId,
};
use crate::domain::ports::{CartRepository, ProductRepository};
use crate::error::{AppError, DomainError};

/// Outcome of adding a product to a cart
#[derive(Debug, Clone, PartialEq)]
pub enum CartItemWrite {
    /// A new line was inserted
    Created(CartItem),
    /// An existing line for the same product was incremented
    Merged(CartItem),
}

impl CartItemWrite {
    pub fn into_item(self) -> CartItem {
        match self {
            CartItemWrite::Created(item) | CartItemWrite::Merged(item) => item,
        }
    }
}

/// Service for managing carts and their items
pub struct CartService<CaR, PR>
where
    CaR: CartRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    carts: Arc<CaR>,
    products: Arc<PR>,
}

impl<CaR, PR> CartService<CaR, PR>
where
    CaR: CartRepository + ?Sized,
    PR: ProductRepository + ?Sized,
{
    pub fn new(carts: Arc<CaR>, products: Arc<PR>) -> Self {
        Self { carts, products }
    }

    pub async fn create_cart(&self) -> Result<Cart, AppError> {
        let cart = self.carts.create().await?;
        tracing::debug!(cart_id = %cart.id, "Created cart");
        Ok(cart)
    }

    /// Cart with all of its items
    pub async fn get_cart(&self, id: &CartId) -> Result<Cart, AppError> {
        self.carts
            .find_by_id(id)
            .await?
            .ok_or_else(|| cart_not_found(id))
    }

    /// Delete a cart together with its items
    pub async fn delete_cart(&self, id: &CartId) -> Result<(), AppError> {
        self.carts.delete(id).await?;
        tracing::debug!(cart_id = %id, "Deleted cart");
        Ok(())
    }

    pub async fn list_items(&self, cart_id: &CartId) -> Result<Vec<CartItem>, AppError> {
        self.ensure_cart(cart_id).await?;
        Ok(self.carts.find_items(cart_id).await?)
    }

    pub async fn get_item(
        &self,
        cart_id: &CartId,
        item_id: &CartItemId,
    ) -> Result<CartItem, AppError> {
        self.carts
            .find_item(cart_id, item_id)
            .await?
            .ok_or_else(|| item_not_found(cart_id, item_id))
    }

    /// Add a product to a cart, merging with an existing line for it
    pub async fn add_item(
        &self,
        cart_id: &CartId,
        product_id: &ProductId,
        quantity: i32,
    ) -> Result<CartItemWrite, AppError> {
        validate_quantity(quantity)?;
        self.ensure_cart(cart_id).await?;

        if self.products.find_by_id(product_id).await?.is_none() {
            return Err(AppError::Domain(DomainError::Validation(
                "No product with the given ID was found.".to_string(),
            )));
        }

        if let Some(existing) = self.carts.find_item_by_product(cart_id, product_id).await? {
            // Checked again by the repository against the stored quantity
            merged_quantity(existing.quantity, quantity)?;
            let item = self.carts.increment_quantity(&existing.id, quantity).await?;
            tracing::debug!(
                cart_id = %cart_id,
                item_id = %item.id,
                quantity = item.quantity,
                "Merged cart item"
            );
            return Ok(CartItemWrite::Merged(item));
        }

        let item = self
            .carts
            .create_item(&NewCartItem {
                cart_id: *cart_id,
                product_id: *product_id,
                quantity,
            })
            .await?;
        tracing::debug!(cart_id = %cart_id, item_id = %item.id, "Created cart item");
        Ok(CartItemWrite::Created(item))
    }

    /// Overwrite the quantity of a line
    pub async fn update_item(
        &self,
        cart_id: &CartId,
        item_id: &CartItemId,
        quantity: i32,
    ) -> Result<CartItem, AppError> {
        validate_quantity(quantity)?;
        self.get_item(cart_id, item_id).await?;
        Ok(self.carts.set_quantity(item_id, quantity).await?)
    }

    pub async fn remove_item(
        &self,
        cart_id: &CartId,
        item_id: &CartItemId,
    ) -> Result<(), AppError> {
        self.get_item(cart_id, item_id).await?;
        Ok(self.carts.delete_item(item_id).await?)
    }

    async fn ensure_cart(&self, id: &CartId) -> Result<(), AppError> {
        if self.carts.exists(id).await? {
            Ok(())
        } else {
            Err(cart_not_found(id))
        }
    }
}

fn cart_not_found(id: &CartId) -> AppError {
    AppError::Domain(DomainError::NotFound(format!("Cart {} not found", id)))
}

fn item_not_found(cart_id: &CartId, item_id: &CartItemId) -> AppError {
    AppError::Domain(DomainError::NotFound(format!(
        "Cart item {} not found in cart {}",
        item_id, cart_id
    )))
}
