//! Products and the draft type they are committed from.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::UnknownVariant;

/// A product carries at most this many image payloads.
pub const MAX_IMAGES: usize = 4;

/// Transaction mode. The `price` field means total price for a sale item
/// and hourly rate for a rental.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductType {
    #[default]
    Sale,
    Rent,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Rent => "RENT",
        }
    }
}

impl TryFrom<String> for ProductType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "SALE" => Ok(Self::Sale),
            "RENT" => Ok(Self::Rent),
            _ => Err(UnknownVariant::new("product type", value)),
        }
    }
}

/// A committed catalog item. `id` is system-generated and immutable; `code`
/// is the human-entered display/search key and is not guaranteed unique.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub code: String,
    pub images: Vec<String>,
    pub description: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub kind: ProductType,
    pub size: String,
    pub price: f64,
    pub stock: i32,
    /// Per-product percentage, reserved; checkout pricing ignores it.
    #[serde(default)]
    pub discount: f64,
}

/// In-progress product in the multi-step admin creation flow. All fields are
/// open until [`ProductDraft::commit`] validates them and mints a
/// [`Product`]; the two types are never interchangeable.
#[derive(Clone, Debug, Default)]
pub struct ProductDraft {
    pub code: Option<String>,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub kind: Option<ProductType>,
    pub size: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl ProductDraft {
    pub fn add_image(&mut self, image: impl Into<String>) -> Result<(), DraftError> {
        if self.images.len() >= MAX_IMAGES {
            return Err(DraftError::TooManyImages);
        }
        self.images.push(image.into());
        Ok(())
    }

    /// Validates the draft and commits it with a fresh id. Code and price
    /// are required; mode defaults to sale, stock to a single unit.
    pub fn commit(self) -> Result<Product, DraftError> {
        let code = self
            .code
            .filter(|c| !c.trim().is_empty())
            .ok_or(DraftError::Missing("code"))?;
        let price = self.price.ok_or(DraftError::Missing("price"))?;
        if price < 0.0 {
            return Err(DraftError::NegativePrice);
        }
        let stock = self.stock.unwrap_or(1);
        if stock < 0 {
            return Err(DraftError::NegativeStock);
        }
        if self.images.len() > MAX_IMAGES {
            return Err(DraftError::TooManyImages);
        }
        Ok(Product {
            id: Uuid::new_v4().to_string(),
            code,
            images: self.images,
            description: self.description.unwrap_or_default(),
            kind: self.kind.unwrap_or_default(),
            size: self.size.unwrap_or_default(),
            price,
            stock,
            discount: 0.0,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("price must be non-negative")]
    NegativePrice,
    #[error("stock must be non-negative")]
    NegativeStock,
    #[error("a product carries at most {MAX_IMAGES} images")]
    TooManyImages,
}
