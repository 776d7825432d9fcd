//! The data access layer: one CRUD contract over whichever backend is up.
//!
//! Callers never learn which store served them. Every remote failure,
//! timeout included, downgrades to the local path with a warning in the
//! log; reads degrade further to an empty result rather than erroring.
//! The two stores can diverge until the remote becomes reachable again;
//! no sync-back runs today, but both sit behind [`Backend`] so one could.

use tracing::warn;

use crate::config::Config;
use crate::domain::{Order, Product, PromoCode};
use crate::store::{Backend, LocalStore, RemoteStore, StoreError, DEFAULT_ADMIN_PASSWORD};

#[derive(Debug)]
pub struct Db<R = RemoteStore> {
    remote: Option<R>,
    local: LocalStore,
}

impl Db<RemoteStore> {
    /// Builds the layer from configuration; an unset API URL selects the
    /// fully local variant.
    pub fn open(config: &Config) -> Result<Self, StoreError> {
        let remote = match &config.api_base_url {
            Some(url) => Some(RemoteStore::new(url.clone(), config.request_timeout)?),
            None => None,
        };
        Ok(Self {
            remote,
            local: LocalStore::open(&config.data_dir)?,
        })
    }
}

impl<R: Backend> Db<R> {
    pub fn new(remote: Option<R>, local: LocalStore) -> Self {
        Self { remote, local }
    }

    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    pub async fn get_products(&self) -> Vec<Product> {
        if let Some(remote) = &self.remote {
            match remote.fetch_products().await {
                Ok(products) => return products,
                Err(e) => warn!(error = %e, "remote unavailable, serving local products"),
            }
        }
        self.local.products().unwrap_or_else(|e| {
            warn!(error = %e, "local products unreadable");
            Vec::new()
        })
    }

    /// Upsert by id. Remote first; on failure the product is written through
    /// to the local copy only.
    pub async fn save_product(&self, product: &Product) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.upsert_product(product).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(error = %e, id = %product.id, "remote upsert failed, writing product locally");
                }
            }
        }
        self.local.upsert_product(product)
    }

    /// The local copy is deleted regardless of the remote outcome so a stale
    /// product cannot reappear from the fallback.
    pub async fn delete_product(&self, id: &str) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.delete_product(id).await {
                warn!(error = %e, id, "remote delete failed");
            }
        }
        self.local.delete_product(id)
    }

    /// Remote insert first. On failure the order lands in the local log and
    /// the local stock is decremented per line item (clamped at zero) in the
    /// same unit of work, keeping the local inventory consistent with an
    /// order the remote database never saw.
    pub async fn save_order(&self, order: &Order) -> Result<(), StoreError> {
        if let Some(remote) = &self.remote {
            match remote.insert_order(order).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(error = %e, id = %order.id, "remote order insert failed, falling back to local log");
                }
            }
        }
        self.local.insert_order(order)
    }

    pub async fn get_orders(&self) -> Vec<Order> {
        if let Some(remote) = &self.remote {
            match remote.fetch_orders().await {
                Ok(orders) => return orders,
                Err(e) => warn!(error = %e, "remote unavailable, serving local orders"),
            }
        }
        self.local.orders().unwrap_or_else(|e| {
            warn!(error = %e, "local orders unreadable");
            Vec::new()
        })
    }

    /// Promo codes are local-only in every variant.
    pub fn get_promos(&self) -> Vec<PromoCode> {
        self.local.promos().unwrap_or_else(|e| {
            warn!(error = %e, "local promos unreadable");
            Vec::new()
        })
    }

    pub fn save_promo(&self, promo: &PromoCode) -> Result<(), StoreError> {
        self.local.append_promo(promo)
    }

    pub fn admin_password(&self) -> String {
        self.local.admin_password().unwrap_or_else(|e| {
            warn!(error = %e, "stored admin password unreadable, using default");
            DEFAULT_ADMIN_PASSWORD.to_string()
        })
    }

    pub fn save_admin_password(&self, password: &str) -> Result<(), StoreError> {
        self.local.save_admin_password(password)
    }

    /// Confirmation lives on the local order log; a missing id is a no-op.
    pub fn confirm_order(&self, id: &str) -> Result<(), StoreError> {
        self.local.confirm_order(id)
    }

    /// First product whose `code` exactly equals the query.
    pub async fn find_product_by_code(&self, code: &str) -> Option<Product> {
        self.get_products().await.into_iter().find(|p| p.code == code)
    }
}
