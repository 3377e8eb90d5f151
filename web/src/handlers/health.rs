//! Health check endpoints.
//!
//! These endpoints are used by load balancers and monitoring systems
//! to verify service health.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Services behind the API, reported by the readiness check.
pub const SERVICES: [&str; 3] = ["catalog", "discounts", "orders"];

/// Simple health check endpoint (for basic liveness).
///
/// Returns 200 OK to indicate the service is running.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Status of one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Service name
    pub name: String,
    /// `"healthy"` or `"unhealthy"`
    pub status: String,
}

/// Readiness check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall status
    pub status: String,
    /// Per-service status
    pub services: Vec<ServiceHealth>,
}

/// Readiness check endpoint.
///
/// The services run in-process, so once the router is serving they are
/// ready.
///
/// # Endpoint
///
/// ```text
/// GET /health/ready
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "services": [{"name": "catalog", "status": "healthy"}, ...]
/// }
/// ```
#[allow(clippy::unused_async)]
pub async fn readiness_check() -> (StatusCode, Json<ReadinessResponse>) {
    let services = SERVICES
        .iter()
        .map(|name| ServiceHealth {
            name: (*name).to_string(),
            status: "healthy".to_string(),
        })
        .collect();

    (
        StatusCode::OK,
        Json(ReadinessResponse {
            status: "healthy".to_string(),
            services,
        }),
    )
}
