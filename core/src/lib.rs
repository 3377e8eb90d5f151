//! # Commerce API Core
//!
//! Domain entities and service contracts behind the Commerce API.
//!
//! The HTTP layer never computes prices, validates discounts or moves orders
//! between states. It calls the service traits defined here and maps what
//! they return. This crate therefore only contains:
//!
//! - **Entities** for the catalog, discount and order subsystems
//! - **Service traits** (`ProductService`, `OrderProcessingService`, ...)
//!   implemented by the platform
//! - **Glue types** shared by every endpoint: [`PagedList`], [`PageRequest`],
//!   [`Money`] and `;`-delimited id list parsing
//!
//! ## Example
//!
//! ```ignore
//! use commerce_api_core::catalog::ProductService;
//! use std::sync::Arc;
//!
//! async fn product_name(products: Arc<dyn ProductService>, id: i32) -> Option<String> {
//!     products.get_product_by_id(id).await.ok().flatten().map(|p| p.name)
//! }
//! ```

pub mod catalog;
pub mod discounts;
pub mod environment;
pub mod error;
pub mod id_list;
pub mod money;
pub mod orders;
pub mod paging;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{Result, ServiceError};
pub use id_list::{parse_id_list, IdListError};
pub use money::Money;
pub use paging::{PageRequest, PagedList};
