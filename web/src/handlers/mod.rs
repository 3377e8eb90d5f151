//! Handlers that live outside `/api/v1`.

pub mod health;

pub use health::{health_check, readiness_check};
