//! Order submission: the only place an [`Order`] is created.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::cart::Cart;
use crate::db::Db;
use crate::domain::{Order, OrderStatus, OrderType, UserInfo};
use crate::notify::AdminNotifier;
use crate::store::{Backend, StoreError};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("invalid customer details: {0}")]
    Invalid(#[from] validator::ValidationErrors),
    #[error("cart is empty")]
    EmptyCart,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Validates the customer details, freezes the order snapshot and submits
/// it. Items and total are copies taken here; later product edits never
/// touch a placed order. On success the cart is cleared.
pub async fn place_order<R: Backend>(
    db: &Db<R>,
    notifier: &AdminNotifier,
    cart: &mut Cart,
    user: UserInfo,
    kind: OrderType,
) -> Result<Order, CheckoutError> {
    user.validate()?;
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = Order {
        id: Uuid::new_v4().to_string(),
        items: cart.items().to_vec(),
        user,
        kind,
        total: cart.total(),
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    };

    db.save_order(&order).await?;
    notifier.order_placed(&order).await;
    cart.clear();
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Location, Product, ProductType};
    use crate::store::LocalStore;

    fn local_db() -> (tempfile::TempDir, Db) {
        let dir = tempfile::tempdir().unwrap();
        let local = LocalStore::open(dir.path()).unwrap();
        (dir, Db::new(None, local))
    }

    fn customer() -> UserInfo {
        UserInfo {
            name: "Aziza".into(),
            phone: "+998901234567".into(),
            location: Location {
                lat: 41.31,
                lng: 69.28,
                address: None,
            },
        }
    }

    fn product(stock: i32) -> Product {
        Product {
            id: "p1".into(),
            code: "001".into(),
            images: vec![],
            description: "Gown".into(),
            kind: ProductType::Sale,
            size: "M".into(),
            price: 90_000.0,
            stock,
            discount: 0.0,
        }
    }

    #[tokio::test]
    async fn missing_contact_details_abort_before_submission() {
        let (_dir, db) = local_db();
        let mut cart = Cart::new();
        cart.add(&product(3)).unwrap();

        let user = UserInfo {
            name: String::new(),
            ..customer()
        };
        let err = place_order(&db, &AdminNotifier::disabled(), &mut cart, user, OrderType::Delivery)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Invalid(_)));
        assert!(db.get_orders().await.is_empty(), "nothing was submitted");
        assert!(!cart.is_empty(), "cart survives a failed checkout");
    }

    #[tokio::test]
    async fn empty_cart_cannot_be_checked_out() {
        let (_dir, db) = local_db();
        let mut cart = Cart::new();
        let err = place_order(&db, &AdminNotifier::disabled(), &mut cart, customer(), OrderType::Booking)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn successful_checkout_freezes_the_snapshot_and_clears_the_cart() {
        let (_dir, db) = local_db();
        let p = product(5);
        db.save_product(&p).await.unwrap();

        let mut cart = Cart::new();
        cart.add(&p).unwrap();
        let order = place_order(&db, &AdminNotifier::disabled(), &mut cart, customer(), OrderType::Delivery)
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total, 90_000.0);
        assert!(cart.is_empty());

        // editing the product afterwards leaves the placed order untouched
        let mut edited = p.clone();
        edited.price = 10.0;
        db.save_product(&edited).await.unwrap();
        let stored = db.get_orders().await;
        assert_eq!(stored[0].items[0].product.price, 90_000.0);
    }
}
