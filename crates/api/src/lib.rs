//! HTTP API server for the checkout service.
//!
//! Exposes checkout and order query endpoints, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use checkout::{
    CheckoutOrchestrator, InMemoryAddressBook, InMemoryCartStore, InMemoryCatalog,
    InMemoryOrderFinalizer,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health))
        .route(
            "/checkout/orders",
            get(routes::orders::list).post(routes::orders::checkout),
        )
        .route("/checkout/orders/last", get(routes::orders::last))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state backed by in-memory collaborators.
pub fn create_default_state() -> Arc<AppState> {
    let carts = InMemoryCartStore::new();
    let catalog = InMemoryCatalog::new();
    let addresses = InMemoryAddressBook::new();
    let finalizer = InMemoryOrderFinalizer::new();

    let orchestrator = CheckoutOrchestrator::new(
        carts.clone(),
        catalog.clone(),
        addresses.clone(),
        finalizer.clone(),
    );

    Arc::new(AppState {
        orchestrator,
        carts,
        catalog,
        addresses,
        finalizer,
    })
}
