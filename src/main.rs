//! Boutique remote backend: the authoritative HTTP + Postgres store.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boutique::domain::{Order, Product};

#[derive(Clone)]
struct AppState {
    db: sqlx::PgPool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = PgPoolOptions::new()
        .max_connections(10)
        .connect(&std::env::var("DATABASE_URL")?)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    let state = AppState { db };

    let app = Router::new()
        .route(
            "/health",
            get(|| async { Json(serde_json::json!({"status": "healthy", "service": "boutique-server"})) }),
        )
        .route("/products", get(list_products).post(upsert_product))
        .route("/products/:id", delete(delete_product))
        .route("/orders", get(list_orders).post(create_order))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    tracing::info!("boutique backend listening on 0.0.0.0:{}", port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?, app).await?;
    Ok(())
}

type HandlerError = (StatusCode, String);

fn internal(e: impl std::fmt::Display) -> HandlerError {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Storefront listing: only rows still in stock.
async fn list_products(State(s): State<AppState>) -> Result<Json<Vec<Product>>, HandlerError> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE stock > 0")
        .fetch_all(&s.db)
        .await
        .map_err(internal)?;
    Ok(Json(products))
}

/// Upsert by id; the full row is replaced on conflict.
async fn upsert_product(State(s): State<AppState>, Json(p): Json<Product>) -> Result<StatusCode, HandlerError> {
    sqlx::query(
        "INSERT INTO products (id, code, images, description, type, size, price, stock, discount) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         ON CONFLICT (id) DO UPDATE SET code = EXCLUDED.code, images = EXCLUDED.images, \
         description = EXCLUDED.description, type = EXCLUDED.type, size = EXCLUDED.size, \
         price = EXCLUDED.price, stock = EXCLUDED.stock, discount = EXCLUDED.discount",
    )
    .bind(&p.id)
    .bind(&p.code)
    .bind(&p.images)
    .bind(&p.description)
    .bind(p.kind.as_str())
    .bind(&p.size)
    .bind(p.price)
    .bind(p.stock.max(0))
    .bind(p.discount)
    .execute(&s.db)
    .await
    .map_err(internal)?;
    Ok(StatusCode::OK)
}

async fn delete_product(State(s): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, HandlerError> {
    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(&id)
        .execute(&s.db)
        .await
        .map_err(internal)?;
    Ok(StatusCode::OK)
}

async fn list_orders(State(s): State<AppState>) -> Result<Json<Vec<Order>>, HandlerError> {
    let orders = sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
        .fetch_all(&s.db)
        .await
        .map_err(internal)?;
    Ok(Json(orders))
}

/// Order insert and the per-item stock decrement run in one transaction.
/// The decrement clamps at zero: contention can oversell, stock never
/// goes negative.
async fn create_order(State(s): State<AppState>, Json(o): Json<Order>) -> Result<StatusCode, HandlerError> {
    let mut tx = s.db.begin().await.map_err(internal)?;
    sqlx::query(
        "INSERT INTO orders (id, items, user_info, type, total, status, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(&o.id)
    .bind(sqlx::types::Json(&o.items))
    .bind(sqlx::types::Json(&o.user))
    .bind(o.kind.as_str())
    .bind(o.total)
    .bind(o.status.as_str())
    .bind(o.created_at)
    .execute(&mut *tx)
    .await
    .map_err(internal)?;

    for item in &o.items {
        sqlx::query("UPDATE products SET stock = GREATEST(stock - $1, 0) WHERE id = $2")
            .bind(item.quantity)
            .bind(&item.product.id)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;
    }
    tx.commit().await.map_err(internal)?;
    Ok(StatusCode::OK)
}
