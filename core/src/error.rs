//! Errors reported by domain services.
//!
//! A missing entity is not an error: lookups return `Ok(None)` and the HTTP
//! layer decides how to present it. `ServiceError` covers everything else a
//! service can report back to its caller.

/// Error type returned by every domain service operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The service refused the operation because of a business rule
    /// (e.g. cancelling an order that is already complete).
    #[error("{0}")]
    Rejected(String),

    /// The operation conflicts with existing data (e.g. a duplicate SKU).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A backing resource is temporarily unavailable.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    /// Any other failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    /// Create a business rule rejection.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    /// Create a conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Result type alias for domain service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_is_bare_message() {
        let err = ServiceError::rejected("Order is already cancelled");
        assert_eq!(err.to_string(), "Order is already cancelled");
    }

    #[test]
    fn test_internal_from_anyhow() {
        let err: ServiceError = anyhow::anyhow!("disk on fire").into();
        assert!(matches!(err, ServiceError::Internal(_)));
        assert_eq!(err.to_string(), "disk on fire");
    }
}
