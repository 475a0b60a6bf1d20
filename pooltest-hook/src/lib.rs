//! pooltest-hook library - webhook ingestion service
//!
//! Receives water-test measurements on `POST /webhook`, persists them through
//! the configured storage backend and, when the backend can read back,
//! serves them on `GET /readings`.

use axum::{middleware, routing::any, Router};
use pooltest_common::MeasurementStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod config;
pub mod error;

pub use error::ApiError;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The one storage backend, built at startup
    pub store: Arc<dyn MeasurementStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn MeasurementStore>) -> Self {
        Self { store }
    }
}

/// Build application router
///
/// `/readings` is only mounted for backends that can list what they stored.
pub fn build_router(state: AppState) -> Router {
    let mut hooks: Router<AppState> = Router::new().route("/webhook", any(api::receive_webhook));

    if state.store.supports_listing() {
        hooks = hooks.route("/readings", any(api::list_readings));
    }

    let hooks = hooks.layer(middleware::from_fn(api::cors));

    Router::new()
        .merge(hooks)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
