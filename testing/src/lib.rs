//! # Commerce API Testing
//!
//! In-memory implementations of every Commerce API service trait, plus
//! fixtures for tests and local runs.
//!
//! The in-memory services store and look up data. They do not try to
//! reproduce the platform's pricing, discount or order rules beyond the bare
//! minimum needed to exercise the HTTP layer.
//!
//! ## Example
//!
//! ```
//! use commerce_api_testing::{InMemoryCommerce, test_clock};
//! use commerce_api_core::catalog::CategoryService;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let commerce = InMemoryCommerce::with_demo_data(Arc::new(test_clock()))?;
//! let electronics = commerce.get_category_by_id(1).await?;
//! assert!(electronics.is_some());
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use commerce_api_core::environment::Clock;

mod fixtures;
mod in_memory;

pub use in_memory::{InMemoryCommerce, StockChange};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use commerce_api_testing::mocks::FixedClock;
    /// use commerce_api_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
