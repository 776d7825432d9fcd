//! Storage backends behind the data access layer.

pub mod local;
pub mod remote;

pub use local::{LocalStore, DEFAULT_ADMIN_PASSWORD};
pub use remote::RemoteStore;

use thiserror::Error;

use crate::domain::{Order, Product};

/// The CRUD capability both physical backends expose. [`crate::db::Db`]
/// composes two of these; a reconciliation task could later sync them
/// through the same surface.
pub trait Backend {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError>;
    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError>;
    async fn delete_product(&self, id: &str) -> Result<(), StoreError>;
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;
    /// Persists the order and settles this backend's own stock view, as one
    /// logical unit.
    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("http transport: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}
