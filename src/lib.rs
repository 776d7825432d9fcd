//! Boutique storefront core.
//!
//! A small e-commerce storefront and admin backbone for a boutique that
//! sells and rents clothing. All persistence goes through [`db::Db`],
//! which fronts the remote HTTP backend while it is reachable and a
//! file-backed local store when it is not; carts, checkout, catalog
//! filtering and the admin operations sit on top of that layer. The
//! `boutique-server` binary is the remote backend itself.

pub mod admin;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod db;
pub mod domain;
pub mod notify;
pub mod store;
