//! Ephemeral per-session cart state and total computation.
//!
//! The cart is owned by the checkout flow: it holds product snapshots,
//! never live references, and is cleared once an order is submitted.

use thiserror::Error;

use crate::domain::{CartItem, Product, PromoCode};

#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    discount: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Session discount percentage; zero until a promo is applied.
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Adds one unit of `product`, holding every line at or below the
    /// listed stock.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            if item.quantity + 1 > product.stock {
                return Err(CartError::InsufficientStock);
            }
            item.quantity += 1;
        } else {
            if product.stock < 1 {
                return Err(CartError::InsufficientStock);
            }
            self.items.push(CartItem {
                product: product.clone(),
                quantity: 1,
            });
        }
        Ok(())
    }

    /// Adjusts a line by `delta` against `stock`, the live quantity known to
    /// the caller. A delta that would empty the line is rejected; removal is
    /// explicit via [`Cart::remove`].
    pub fn update_quantity(&mut self, id: &str, delta: i32, stock: i32) -> Result<(), CartError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.product.id == id)
            .ok_or(CartError::ItemNotFound)?;
        let quantity = item.quantity + delta;
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }
        if quantity > stock {
            return Err(CartError::InsufficientStock);
        }
        item.quantity = quantity;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.product.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = 0.0;
    }

    /// `Σ price × quantity`, scaled by the session discount.
    pub fn total(&self) -> f64 {
        let subtotal: f64 = self.items.iter().map(CartItem::line_total).sum();
        subtotal * (1.0 - self.discount / 100.0)
    }

    /// Case-insensitive lookup. On a match the session discount is set and
    /// returned; otherwise it is left untouched.
    pub fn apply_promo(&mut self, promos: &[PromoCode], input: &str) -> Result<f64, CartError> {
        let promo = promos
            .iter()
            .find(|p| p.matches(input))
            .ok_or(CartError::InvalidPromo)?;
        self.discount = promo.discount;
        Ok(promo.discount)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("item not found in cart")]
    ItemNotFound,
    #[error("insufficient stock")]
    InsufficientStock,
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("invalid promo code")]
    InvalidPromo,
}
