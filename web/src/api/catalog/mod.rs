//! Catalog controllers.

pub mod categories;
pub mod manufacturers;
pub mod product_attributes;
pub mod products;

use crate::state::AppState;
use axum::Router;
use serde::Deserialize;

/// Query parameters shared by the category and manufacturer lists.
#[derive(Debug, Default, Deserialize)]
pub struct NameFilterQuery {
    /// Name filter (substring, case-insensitive)
    pub name: Option<String>,
    /// Include unpublished rows
    #[serde(default)]
    pub show_hidden: bool,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

/// `?show_hidden=true`
#[derive(Debug, Default, Deserialize)]
pub struct ShowHiddenQuery {
    /// Include unpublished rows
    #[serde(default)]
    pub show_hidden: bool,
    /// Page number (0-indexed), for paged endpoints
    pub page_index: Option<u32>,
    /// Page size, for paged endpoints
    pub page_size: Option<u32>,
}

/// Every catalog route, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(categories::routes())
        .merge(products::routes())
        .merge(manufacturers::routes())
        .merge(product_attributes::routes())
}
