//! Versioned API controllers, one module per subsystem.

pub mod catalog;
pub mod discounts;
pub mod orders;

use crate::state::AppState;
use axum::Router;

/// Every `/api/v1` route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog::routes())
        .merge(discounts::routes())
        .merge(orders::routes())
}
