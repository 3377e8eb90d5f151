//! Custom Axum extractors.
//!
//! - `CorrelationId`: extract or generate the request correlation id
//! - `EntityId`: a positive `i32` path segment, 400 otherwise
//! - `ApiJson` / `ApiQuery`: `Json` and `Query` whose rejections are
//!   reported through [`AppError`] so every error body has the same shape
//! - `IdsQuery` / `PageQuery`: the `?ids=1;2;3` and paging query strings
//!
//! # Examples
//!
//! ```ignore
//! use commerce_api_web::extractors::{ApiQuery, EntityId, PageQuery};
//!
//! async fn handler(
//!     State(state): State<AppState>,
//!     id: EntityId,
//!     ApiQuery(paging): ApiQuery<PageQuery>,
//! ) -> Result<Json<PagedListDto<ProductCategoryDto>>, AppError> {
//!     // id.get() is known to be > 0 here
//! }
//! ```

use crate::error::AppError;
use crate::middleware::correlation_id_from_headers;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query},
    http::request::Parts,
    Json,
};
use commerce_api_core::{parse_id_list, PageRequest};
use serde::Deserialize;
use std::fmt;
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Extracts the correlation ID from the `X-Correlation-ID` header,
/// or generates a new UUID v4 if not present.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The middleware stores the id it settled on; fall back to the header
        let correlation_id = parts
            .extensions
            .get::<Uuid>()
            .copied()
            .or_else(|| correlation_id_from_headers(&parts.headers))
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// Identifier taken from the single path parameter of a route.
///
/// Rejects anything that is not an integer greater than zero with
/// `400 Bad Request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i32);

impl EntityId {
    /// The validated id.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_entity_id(&raw).map(Self)
    }
}

/// Parse a path segment as an entity id.
///
/// # Errors
///
/// Returns a 400 error if `raw` is not an integer or is not greater than zero.
pub fn parse_entity_id(raw: &str) -> Result<i32, AppError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id <= i64::from(i32::MAX))
        .ok_or_else(|| AppError::bad_request(format!("'{raw}' is not a valid id")))?;
    if id <= 0 {
        return Err(AppError::bad_request("id must be greater than zero"));
    }
    i32::try_from(id).map_err(|_| AppError::bad_request(format!("'{raw}' is not a valid id")))
}

/// Reject `value` unless it is greater than zero.
///
/// # Errors
///
/// Returns a 400 error naming `field`.
pub fn require_positive(field: &str, value: i32) -> Result<i32, AppError> {
    if value > 0 {
        Ok(value)
    } else {
        Err(AppError::bad_request(format!("{field} must be greater than zero")))
    }
}

/// Reject `value` if it is empty or whitespace only.
///
/// # Errors
///
/// Returns a 400 error naming `field`.
pub fn require_non_blank<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AppError::bad_request(format!("{field} is required")))
    } else {
        Ok(trimmed)
    }
}

/// JSON body extractor that rejects with [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor that rejects with [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `?ids=1;2;3`
#[derive(Debug, Default, Deserialize)]
pub struct IdsQuery {
    /// `;`-separated ids
    #[serde(default)]
    pub ids: String,
}

impl IdsQuery {
    /// Parse the id list.
    ///
    /// # Errors
    ///
    /// Returns a 400 error if the list is empty or holds an invalid id.
    pub fn parse(&self) -> Result<Vec<i32>, AppError> {
        Ok(parse_id_list(&self.ids)?)
    }
}

/// `?page_index=0&page_size=20`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// Zero-based page index
    pub page_index: Option<u32>,
    /// Items per page
    pub page_size: Option<u32>,
}

impl PageQuery {
    /// The requested page, with defaults and clamping applied.
    #[must_use]
    pub fn page(self) -> PageRequest {
        page_request(self.page_index, self.page_size)
    }
}

/// Build a [`PageRequest`] from optional query parameters.
#[must_use]
pub fn page_request(page_index: Option<u32>, page_size: Option<u32>) -> PageRequest {
    let default = PageRequest::default();
    PageRequest::new(
        page_index.unwrap_or(default.page_index),
        page_size.unwrap_or(default.page_size),
    )
}

/// `?notify_customer=true`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NotifyQuery {
    /// Whether the customer should be notified
    #[serde(default)]
    pub notify_customer: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    #[tokio::test]
    async fn test_correlation_id_from_header() {
        let uuid = Uuid::new_v4();
        let req = Request::builder()
            .header("X-Correlation-ID", uuid.to_string())
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, uuid);
    }

    #[tokio::test]
    async fn test_correlation_id_prefers_extension() {
        let stored = Uuid::new_v4();
        let req = Request::builder()
            .header("X-Correlation-ID", Uuid::new_v4().to_string())
            .extension(stored)
            .body(())
            .expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_eq!(correlation_id.0, stored);
    }

    #[tokio::test]
    async fn test_correlation_id_generates_new() {
        let req = Request::builder().body(()).expect("Valid request");

        let (mut parts, _) = req.into_parts();
        let correlation_id = CorrelationId::from_request_parts(&mut parts, &())
            .await
            .expect("Should extract");

        assert_ne!(correlation_id.0, Uuid::nil());
    }

    #[test]
    fn test_parse_entity_id() {
        assert_eq!(parse_entity_id("42").unwrap(), 42);
        assert_eq!(parse_entity_id(" 7 ").unwrap(), 7);

        let zero = parse_entity_id("0").unwrap_err();
        assert_eq!(zero.status(), StatusCode::BAD_REQUEST);
        assert_eq!(zero.message(), "id must be greater than zero");

        assert_eq!(parse_entity_id("-3").unwrap_err().status(), StatusCode::BAD_REQUEST);
        assert_eq!(parse_entity_id("abc").unwrap_err().message(), "'abc' is not a valid id");
        assert!(parse_entity_id("2147483648").is_err());
    }

    #[test]
    fn test_require_helpers() {
        assert_eq!(require_positive("customer_id", 3).unwrap(), 3);
        assert_eq!(
            require_positive("customer_id", 0).unwrap_err().message(),
            "customer_id must be greater than zero"
        );
        assert_eq!(require_non_blank("name", "  Books ").unwrap(), "Books");
        assert_eq!(require_non_blank("name", "   ").unwrap_err().message(), "name is required");
    }

    #[test]
    fn test_ids_query() {
        let query = IdsQuery { ids: "3; 1;;3".to_string() };
        assert_eq!(query.parse().unwrap(), vec![3, 1]);

        let empty = IdsQuery::default();
        assert_eq!(empty.parse().unwrap_err().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_page_query_defaults_and_clamps() {
        assert_eq!(PageQuery::default().page(), PageRequest::new(0, 20));
        let big = PageQuery { page_index: Some(2), page_size: Some(1000) };
        assert_eq!(big.page(), PageRequest::new(2, 100));
    }
}
