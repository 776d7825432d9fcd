//! File-backed fallback store: four named JSON records in a data directory.
//!
//! This is the only store available when the remote backend is down or the
//! deployment is fully local, so it mirrors the entities the backend holds
//! plus the local-only ones (promo codes, admin password).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Backend, StoreError};
use crate::domain::{Order, Product, PromoCode};

/// Credential returned before any explicit save.
pub const DEFAULT_ADMIN_PASSWORD: &str = "netlify1";

const PRODUCTS_KEY: &str = "boutique_products";
const ORDERS_KEY: &str = "boutique_orders";
const PROMOS_KEY: &str = "boutique_promos";
const PASSWORD_KEY: &str = "boutique_admin_password";

#[derive(Debug)]
pub struct LocalStore {
    dir: PathBuf,
    // serializes read-modify-write cycles between tasks sharing one store
    guard: Mutex<()>,
}

impl LocalStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            guard: Mutex::new(()),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn read_record<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn write_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value)?;
        fs::write(self.record_path(key), text)?;
        Ok(())
    }

    pub fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.read_record(PRODUCTS_KEY)?.unwrap_or_default())
    }

    /// Replace by id when present, append otherwise.
    pub fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut products = self.products()?;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(existing) => *existing = product.clone(),
            None => products.push(product.clone()),
        }
        self.write_record(PRODUCTS_KEY, &products)
    }

    /// Missing ids are a no-op.
    pub fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut products = self.products()?;
        products.retain(|p| p.id != id);
        self.write_record(PRODUCTS_KEY, &products)
    }

    pub fn orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.read_record(ORDERS_KEY)?.unwrap_or_default())
    }

    /// Appends the order to the log and decrements the local stock for every
    /// line item, clamped at zero. The two mutations are one unit: once the
    /// log records a sale the local inventory reflects it.
    pub fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut products = self.products()?;
        for item in &order.items {
            if let Some(product) = products.iter_mut().find(|p| p.id == item.product.id) {
                product.stock = (product.stock - item.quantity).max(0);
            }
        }
        let mut orders = self.orders()?;
        orders.push(order.clone());
        self.write_record(PRODUCTS_KEY, &products)?;
        self.write_record(ORDERS_KEY, &orders)
    }

    /// PENDING -> CONFIRMED on the logged order; a missing id is a no-op.
    pub fn confirm_order(&self, id: &str) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut orders = self.orders()?;
        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Ok(());
        };
        order.confirm();
        self.write_record(ORDERS_KEY, &orders)
    }

    pub fn promos(&self) -> Result<Vec<PromoCode>, StoreError> {
        Ok(self.read_record(PROMOS_KEY)?.unwrap_or_default())
    }

    /// Append-only; duplicates are kept as-is.
    pub fn append_promo(&self, promo: &PromoCode) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut promos = self.promos()?;
        promos.push(promo.clone());
        self.write_record(PROMOS_KEY, &promos)
    }

    pub fn admin_password(&self) -> Result<String, StoreError> {
        Ok(self
            .read_record(PASSWORD_KEY)?
            .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()))
    }

    pub fn save_admin_password(&self, password: &str) -> Result<(), StoreError> {
        self.write_record(PASSWORD_KEY, &password)
    }
}

impl Backend for LocalStore {
    async fn fetch_products(&self) -> Result<Vec<Product>, StoreError> {
        self.products()
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), StoreError> {
        LocalStore::upsert_product(self, product)
    }

    async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        LocalStore::delete_product(self, id)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        self.orders()
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        LocalStore::insert_order(self, order)
    }
}
