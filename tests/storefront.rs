//! End-to-end storefront scenario against the local backend.

use boutique::admin;
use boutique::cart::Cart;
use boutique::catalog;
use boutique::checkout::place_order;
use boutique::db::Db;
use boutique::domain::{Location, OrderStatus, OrderType, Product, ProductDraft, ProductType, UserInfo};
use boutique::notify::AdminNotifier;
use boutique::store::LocalStore;

fn local_db(dir: &tempfile::TempDir) -> Db {
    Db::new(None, LocalStore::open(dir.path()).unwrap())
}

fn dress(id: &str, price: f64, stock: i32) -> Product {
    Product {
        id: id.into(),
        code: format!("C-{id}"),
        images: vec![],
        description: "Evening dress".into(),
        kind: ProductType::Sale,
        size: "S-M".into(),
        price,
        stock,
        discount: 0.0,
    }
}

fn customer() -> UserInfo {
    UserInfo {
        name: "Aziza".into(),
        phone: "+998901234567".into(),
        location: Location {
            lat: 41.31,
            lng: 69.28,
            address: Some("Tashkent".into()),
        },
    }
}

#[tokio::test]
async fn browsing_to_checkout_updates_stock_and_freezes_the_total() {
    let dir = tempfile::tempdir().unwrap();
    let db = local_db(&dir);

    let product = dress("p1", 100_000.0, 5);
    db.save_product(&product).await.unwrap();
    db.save_product(&dress("p2", 60_000.0, 0)).await.unwrap();

    // sold-out items never reach the storefront grid
    let products = db.get_products().await;
    let listed = catalog::storefront(&products, ProductType::Sale, "");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, "p1");

    let mut cart = Cart::new();
    cart.add(&product).unwrap();
    cart.update_quantity("p1", 1, product.stock).unwrap();

    let order = place_order(
        &db,
        &AdminNotifier::disabled(),
        &mut cart,
        customer(),
        OrderType::Delivery,
    )
    .await
    .unwrap();

    assert_eq!(order.total, 200_000.0);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(cart.is_empty());

    let products = db.get_products().await;
    let p1 = products.iter().find(|p| p.id == "p1").unwrap();
    assert_eq!(p1.stock, 3);

    let orders = db.get_orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items.len(), 1);
    assert_eq!(orders[0].items[0].quantity, 2);
}

#[tokio::test]
async fn promo_discount_is_baked_into_the_submitted_total() {
    let dir = tempfile::tempdir().unwrap();
    let db = local_db(&dir);

    let product = dress("p1", 100_000.0, 5);
    db.save_product(&product).await.unwrap();
    admin::create_promo(&db, "SPRING20", 20.0).unwrap();

    let mut cart = Cart::new();
    cart.add(&product).unwrap();
    cart.apply_promo(&db.get_promos(), "spring20").unwrap();

    let order = place_order(
        &db,
        &AdminNotifier::disabled(),
        &mut cart,
        customer(),
        OrderType::Booking,
    )
    .await
    .unwrap();
    assert_eq!(order.total, 80_000.0);
}

#[tokio::test]
async fn admin_flow_from_draft_to_confirmed_order() {
    let dir = tempfile::tempdir().unwrap();
    let db = local_db(&dir);
    assert!(admin::login(&db, "netlify1"));

    // multi-step creation: identity, images, details
    let mut draft = ProductDraft {
        code: Some("001".into()),
        description: Some("Silk gown".into()),
        ..Default::default()
    };
    draft.add_image("data:image/jpeg;base64,AAAA").unwrap();
    draft.kind = Some(ProductType::Rent);
    draft.size = Some("L".into());
    draft.price = Some(15_000.0);
    draft.stock = Some(2);
    let product = draft.commit().unwrap();
    db.save_product(&product).await.unwrap();

    let found = db.find_product_by_code("001").await.unwrap();
    assert_eq!(found.id, product.id);

    let mut cart = Cart::new();
    cart.add(&found).unwrap();
    let order = place_order(
        &db,
        &AdminNotifier::disabled(),
        &mut cart,
        customer(),
        OrderType::Booking,
    )
    .await
    .unwrap();

    admin::confirm_order(&db, &order.id).unwrap();
    let orders = db.get_orders().await;
    assert_eq!(orders[0].status, OrderStatus::Confirmed);

    // deletion keeps the local view consistent
    db.delete_product(&product.id).await.unwrap();
    assert!(db.find_product_by_code("001").await.is_none());
}

#[tokio::test]
async fn saved_products_round_trip_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let db = local_db(&dir);

    let mut product = dress("p1", 75_500.0, 7);
    product.images = vec!["a".into(), "b".into()];
    product.discount = 5.0;
    product.kind = ProductType::Rent;
    db.save_product(&product).await.unwrap();

    let fetched = db.get_products().await;
    assert_eq!(fetched, vec![product]);
}
