//! Admin console operations behind the password gate.

use thiserror::Error;

use crate::db::Db;
use crate::domain::{PromoCode, PromoError};
use crate::store::{Backend, StoreError};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Promo(#[from] PromoError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Plaintext comparison against the stored credential. This is a UI gate,
/// not an authorization boundary.
pub fn login<R: Backend>(db: &Db<R>, input: &str) -> bool {
    input == db.admin_password()
}

pub fn change_password<R: Backend>(db: &Db<R>, new_password: &str) -> Result<(), StoreError> {
    db.save_admin_password(new_password)
}

/// Validates the discount range before the code enters the append-only log.
pub fn create_promo<R: Backend>(db: &Db<R>, code: &str, discount: f64) -> Result<PromoCode, AdminError> {
    let promo = PromoCode::new(code, discount)?;
    db.save_promo(&promo)?;
    Ok(promo)
}

pub fn confirm_order<R: Backend>(db: &Db<R>, id: &str) -> Result<(), StoreError> {
    db.confirm_order(id)
}
