//! Error types for web handlers.
//!
//! This module bridges [`ServiceError`] and request validation failures to
//! HTTP responses, implementing Axum's `IntoResponse` trait.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use commerce_api_core::{IdListError, ServiceError};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Every handler returns `Result<_, AppError>`. Client errors carry a message
/// meant for the caller; server errors carry a generic message and keep the
/// underlying cause in `source` for logging only.
///
/// # Examples
///
/// ```ignore
/// async fn handler(id: EntityId) -> Result<Json<CategoryDto>, AppError> {
///     let category = categories
///         .get_category_by_id(id.get())
///         .await?
///         .ok_or_else(|| AppError::not_found("Category", id))?;
///     Ok(Json(CategoryDto::from(&category)))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// User-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 404 Not Found error for a lookup by id.
    #[must_use]
    pub fn not_found(resource: impl fmt::Display, id: impl fmt::Display) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with id {id} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 404 Not Found error for a lookup by some other key.
    ///
    /// `AppError::not_found_by("Product", "sku", "ABC")` reads
    /// "Product with sku ABC not found".
    #[must_use]
    pub fn not_found_by(
        resource: impl fmt::Display,
        key: impl fmt::Display,
        value: impl fmt::Display,
    ) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("{resource} with {key} {value} not found"),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            message.into(),
            "CONFLICT".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE".to_string(),
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        metrics::counter!("http_errors_total", "code" => self.code.clone()).increment(1);

        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        } else {
            tracing::debug!(status = %self.status, code = %self.code, message = %self.message, "Request rejected");
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Rejected(message) => Self::bad_request(message),
            ServiceError::Conflict(message) => Self::conflict(message),
            ServiceError::Unavailable(message) => {
                Self::unavailable("The service is temporarily unavailable")
                    .with_source(anyhow::anyhow!(message))
            }
            ServiceError::Internal(source) => Self::from(source),
        }
    }
}

impl From<IdListError> for AppError {
    fn from(err: IdListError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::not_found("Category", 123);
        assert_eq!(err.to_string(), "[NOT_FOUND] Category with id 123 not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_by_key() {
        let err = AppError::not_found_by("Product", "sku", "MBA-13");
        assert_eq!(err.message(), "Product with sku MBA-13 not found");
    }

    #[test]
    fn test_rejected_service_error_is_bad_request() {
        let err = AppError::from(ServiceError::rejected("Cannot cancel order"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Cannot cancel order");
    }

    #[test]
    fn test_internal_service_error_is_not_leaked() {
        let err = AppError::from(ServiceError::Internal(anyhow::anyhow!("connection refused")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "An internal error occurred");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_conflict_and_unavailable() {
        assert_eq!(
            AppError::from(ServiceError::conflict("duplicate sku")).status(),
            StatusCode::CONFLICT
        );
        let err = AppError::from(ServiceError::Unavailable("db down".to_string()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!err.message().contains("db down"));
    }

    #[test]
    fn test_id_list_error() {
        let err = AppError::from(IdListError::Malformed("x".to_string()));
        assert_eq!(err.code(), "BAD_REQUEST");
        assert_eq!(err.message(), "'x' is not a valid id");
    }
}
