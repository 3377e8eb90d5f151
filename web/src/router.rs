//! HTTP router.
//!
//! Composes the health checks and every API controller into a single Axum
//! router.

use crate::api;
use crate::handlers::{health_check, readiness_check};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// # Routes
///
/// - `GET /health` - Liveness
/// - `GET /health/ready` - Readiness
/// - `/api/v1/...` - Catalog, discount and order controllers
///
/// Every response carries an `X-Correlation-ID` header and every request
/// gets a `tower-http` trace span. CORS is left to the binary.
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::from_services(Arc::new(services));
/// let app = api_router(state).layer(CorsLayer::permissive());
/// ```
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .nest("/api/v1", api::routes())
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
