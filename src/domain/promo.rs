//! Promo codes: flat percentage discounts matched case-insensitively.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// No expiry, no usage count, no per-user restriction; any matching code
/// applies uniformly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromoCode {
    pub code: String,
    pub discount: f64,
}

impl PromoCode {
    pub fn new(code: impl Into<String>, discount: f64) -> Result<Self, PromoError> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(PromoError::EmptyCode);
        }
        if !(0.0..=100.0).contains(&discount) {
            return Err(PromoError::DiscountRange(discount));
        }
        Ok(Self { code, discount })
    }

    pub fn matches(&self, input: &str) -> bool {
        self.code.eq_ignore_ascii_case(input.trim())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PromoError {
    #[error("promo code must not be empty")]
    EmptyCode,
    #[error("discount must be a percentage between 0 and 100, got {0}")]
    DiscountRange(f64),
}
