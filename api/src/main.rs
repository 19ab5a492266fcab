//! Storefront API Server
//!
//! REST backend for a small store: products, collections, reviews, carts and
//! cart items. Uses hexagonal (ports & adapters) architecture for clean
//! separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;
mod middleware;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresCartRepository, PostgresCollectionRepository, PostgresOrderItemRepository,
    PostgresProductRepository, PostgresReviewRepository,
};
use app::{CartService, CatalogService, ReviewService};
use config::Config;
use domain::ports::{
    CartRepository, CollectionRepository, OrderItemRepository, ProductRepository,
    ReviewRepository,
};
use middleware::{allowed_hosts_middleware, AllowedHosts};

pub type SharedCatalogService =
    CatalogService<dyn ProductRepository, dyn CollectionRepository, dyn OrderItemRepository>;
pub type SharedReviewService = ReviewService<dyn ReviewRepository, dyn ProductRepository>;
pub type SharedCartService = CartService<dyn CartRepository, dyn ProductRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<SharedCatalogService>,
    pub review_service: Arc<SharedReviewService>,
    pub cart_service: Arc<SharedCartService>,
}

impl AppState {
    /// Wire every service to the given repositories
    pub fn new(
        products: Arc<dyn ProductRepository>,
        collections: Arc<dyn CollectionRepository>,
        reviews: Arc<dyn ReviewRepository>,
        carts: Arc<dyn CartRepository>,
        order_items: Arc<dyn OrderItemRepository>,
    ) -> Self {
        Self {
            catalog_service: Arc::new(CatalogService::new(
                products.clone(),
                collections,
                order_items,
            )),
            review_service: Arc::new(ReviewService::new(reviews, products.clone())),
            cart_service: Arc::new(CartService::new(carts, products)),
        }
    }

    /// State backed by PostgreSQL repositories sharing one connection pool
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self::new(
            Arc::new(PostgresProductRepository::new(db.clone())),
            Arc::new(PostgresCollectionRepository::new(db.clone())),
            Arc::new(PostgresReviewRepository::new(db.clone())),
            Arc::new(PostgresCartRepository::new(db.clone())),
            Arc::new(PostgresOrderItemRepository::new(db)),
        )
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// CORS policy: the trusted origins when configured, otherwise any origin
fn cors_layer(trusted_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = trusted_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable trusted origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the router with every endpoint and middleware
pub fn build_router(
    state: AppState,
    allowed_hosts: AllowedHosts,
    trusted_origins: &[String],
) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Catalog
        .route(
            "/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::get_product)
                .put(handlers::update_product)
                .patch(handlers::patch_product)
                .delete(handlers::delete_product),
        )
        .route(
            "/products/:product_id/reviews",
            get(handlers::list_reviews).post(handlers::create_review),
        )
        .route(
            "/products/:product_id/reviews/:id",
            get(handlers::get_review)
                .put(handlers::update_review)
                .patch(handlers::patch_review)
                .delete(handlers::delete_review),
        )
        .route(
            "/collections",
            get(handlers::list_collections).post(handlers::create_collection),
        )
        .route(
            "/collections/:id",
            get(handlers::get_collection)
                .put(handlers::update_collection)
                .patch(handlers::patch_collection)
                .delete(handlers::delete_collection),
        )
        // Carts
        .route("/carts", post(handlers::create_cart))
        .route(
            "/carts/:id",
            get(handlers::get_cart).delete(handlers::delete_cart),
        )
        .route(
            "/carts/:cart_id/items",
            get(handlers::list_cart_items).post(handlers::add_cart_item),
        )
        .route(
            "/carts/:cart_id/items/:id",
            get(handlers::get_cart_item)
                .patch(handlers::update_cart_item)
                .delete(handlers::remove_cart_item),
        )
        .fallback(handlers::not_found)
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            allowed_hosts,
            allowed_hosts_middleware,
        ))
        .layer(cors_layer(trusted_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,storefront_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Storefront API...");

    // Load configuration
    let config = Config::from_env().context("Invalid configuration")?;
    tracing::debug!(allowed_hosts = ?config.allowed_hosts, "Configuration loaded");

    // Connect to PostgreSQL
    tracing::info!(
        host = %config.database.host,
        database = %config.database.name,
        "Connecting to database..."
    );
    let db = Database::connect(config.database.url())
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    let state = AppState::postgres(db);
    let app = build_router(
        state,
        AllowedHosts::new(config.allowed_hosts.clone()),
        &config.csrf_trusted_origins,
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
