//! Domain model for the boutique storefront.

pub mod order;
pub mod product;
pub mod promo;

pub use order::{CartItem, Location, Order, OrderStatus, OrderType, UserInfo};
pub use product::{DraftError, Product, ProductDraft, ProductType};
pub use promo::{PromoCode, PromoError};

use thiserror::Error;

/// Raised when a TEXT column or wire field holds no known enum variant.
#[derive(Debug, Error)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    field: &'static str,
    value: String,
}

impl UnknownVariant {
    fn new(field: &'static str, value: String) -> Self {
        Self { field, value }
    }
}
