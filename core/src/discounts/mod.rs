//! Discount subsystem.

mod services;
mod types;

pub use services::DiscountService;
pub use types::{
    Discount, DiscountFilter, DiscountLimitation, DiscountRequirement, DiscountType,
    DiscountUsageHistory, DiscountValidationResult, RequirementGroupInteraction,
};
