//! HTTP façade over the catalog, discount and order services.
//!
//! Controllers are thin: they validate identifiers and request bodies, call
//! one service operation and map the result to a DTO.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract data** from request (path id, query, JSON body)
//! 3. **Validate** ids and required fields (400 on failure)
//! 4. **Delegate** to the service held in [`AppState`]
//! 5. **Map result** to a DTO, or to 404 when the service returns nothing
//! 6. **Return response** to client
//!
//! # Example
//!
//! ```ignore
//! use commerce_api_web::{api_router, AppState};
//! use commerce_api_testing::InMemoryCommerce;
//! use std::sync::Arc;
//!
//! let services = Arc::new(InMemoryCommerce::new());
//! let app = api_router(AppState::from_services(services));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{CorrelationId, EntityId};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::api_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
