//! Shared setup for the HTTP integration tests.

#![allow(clippy::unwrap_used)]

use axum_test::TestServer;
use commerce_api_testing::{test_clock, InMemoryCommerce};
use commerce_api_web::{api_router, AppState};
use serde_json::Value;
use std::sync::Arc;

/// A server over a freshly seeded in-memory store.
pub fn server() -> TestServer {
    let services = InMemoryCommerce::with_demo_data(Arc::new(test_clock())).unwrap();
    let app = api_router(AppState::from_services(Arc::new(services)));
    TestServer::new(app).unwrap()
}

/// The `message` field of an error body.
pub fn error_message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
