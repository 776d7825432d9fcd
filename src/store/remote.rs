//! HTTP client for the remote boutique backend.

use std::time::Duration;

use reqwest::{Client, Response};

use super::{Backend, StoreError};
use crate::domain::{Order, Product};

/// Talks to the canonical backend (`boutique-server`). Any transport
/// error, timeout or non-2xx status surfaces as [`StoreError`], which the
/// data access layer treats as "use the fallback".
#[derive(Clone, Debug)]
pub struct RemoteStore {
    base_url: String,
    http: Client,
}

impl RemoteStore {
    /// A hung call must still trigger the fallback path, so every request
    /// carries `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StoreError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn check(response: Response) -> Result<Response, StoreError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(StoreError::Status(response.status()))
        }
    }
}

impl Backend for RemoteStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        let response = self.http.get(self.url("/products")).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        let response = self.http.post(self.url("/products")).json(product).send().await?;
        Self::check(response).map(drop)
    }

    async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        let response = self.http.delete(self.url(&format!("/products/{id}"))).send().await?;
        Self::check(response).map(drop)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        let response = self.http.get(self.url("/orders")).send().await?;
        Ok(Self::check(response)?.json().await?)
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        // The server decrements stock inside the same transaction.
        let response = self.http.post(self.url("/orders")).json(order).send().await?;
        Self::check(response).map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let store = RemoteStore::new("http://localhost:3001/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:3001");
        assert_eq!(store.url("/products/p1"), "http://localhost:3001/products/p1");
    }
}
