//! Orders and the snapshots they freeze at checkout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::product::Product;
use super::UnknownVariant;

/// Fulfillment mode chosen at checkout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    Delivery,
    Booking,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "DELIVERY",
            Self::Booking => "BOOKING",
        }
    }
}

impl TryFrom<String> for OrderType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "DELIVERY" => Ok(Self::Delivery),
            "BOOKING" => Ok(Self::Booking),
            _ => Err(UnknownVariant::new("order type", value)),
        }
    }
}

/// Lifecycle state. PENDING is the sole initial state; transitions are
/// one-way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(UnknownVariant::new("order status", value)),
        }
    }
}

/// A cart line: a full product snapshot plus the quantity taken. On the
/// wire the product fields sit flattened next to `quantity`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: i32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UserInfo {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub location: Location,
}

/// A placed order. Items and total are frozen copies taken at submission;
/// later product edits never alter them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    #[sqlx(json)]
    pub items: Vec<CartItem>,
    #[sqlx(rename = "user_info", json)]
    pub user: UserInfo,
    #[serde(rename = "type")]
    #[sqlx(rename = "type", try_from = "String")]
    pub kind: OrderType,
    pub total: f64,
    #[sqlx(try_from = "String")]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// PENDING -> CONFIRMED. Safe to repeat; the status never returns to
    /// PENDING.
    pub fn confirm(&mut self) {
        if self.status == OrderStatus::Pending {
            self.status = OrderStatus::Confirmed;
        }
    }
}
