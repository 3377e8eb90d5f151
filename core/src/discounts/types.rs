//! Discount entities.

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a discount is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountType {
    /// Whole order total
    #[default]
    AssignedToOrderTotal,
    /// Specific products
    AssignedToSkus,
    /// Products in specific categories
    AssignedToCategories,
    /// Products of specific manufacturers
    AssignedToManufacturers,
    /// Shipping charge
    AssignedToShipping,
    /// Order subtotal
    AssignedToOrderSubTotal,
}

/// How often a discount may be used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountLimitation {
    /// No limit
    #[default]
    Unlimited,
    /// N uses in total
    NTimesOnly,
    /// N uses per customer
    NTimesPerCustomer,
}

/// A discount definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Name
    pub name: String,
    /// Admin comment
    pub admin_comment: Option<String>,
    /// Target of the discount
    pub discount_type: DiscountType,
    /// Percentage-based instead of fixed amount
    pub use_percentage: bool,
    /// Percentage (0-100) when `use_percentage`
    pub discount_percentage: f64,
    /// Fixed amount when not `use_percentage`
    pub discount_amount: Money,
    /// Cap on a percentage discount
    pub maximum_discount_amount: Option<Money>,
    /// Start of validity
    pub start_date_utc: Option<DateTime<Utc>>,
    /// End of validity
    pub end_date_utc: Option<DateTime<Utc>>,
    /// Needs a coupon code to apply
    pub requires_coupon_code: bool,
    /// Coupon code
    pub coupon_code: Option<String>,
    /// Combines with other discounts
    pub is_cumulative: bool,
    /// Usage limitation
    pub discount_limitation: DiscountLimitation,
    /// N for the limitation
    pub limitation_times: i32,
    /// Maximum discounted quantity per line
    pub maximum_discounted_quantity: Option<i32>,
    /// Also applies to sub-categories
    pub applied_to_sub_categories: bool,
    /// Enabled
    pub is_active: bool,
}

/// Filter for listing discounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscountFilter {
    /// Restrict to a discount type
    pub discount_type: Option<DiscountType>,
    /// Exact coupon code match (case-insensitive)
    pub coupon_code: Option<String>,
    /// Substring match on the name
    pub name: Option<String>,
    /// Include inactive and expired discounts
    pub show_hidden: bool,
}

/// How child requirements of a group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementGroupInteraction {
    /// All children must hold
    And,
    /// Any child must hold
    Or,
}

/// A requirement node; groups nest other requirements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRequirement {
    /// Identifier
    pub id: i32,
    /// Owning discount
    pub discount_id: i32,
    /// Rule plugin system name (absent for groups)
    pub discount_requirement_rule_system_name: Option<String>,
    /// Parent group, absent for top-level requirements
    pub parent_id: Option<i32>,
    /// Interaction when this is a group
    pub interaction_type: Option<RequirementGroupInteraction>,
    /// This node is a group
    pub is_group: bool,
}

/// A recorded use of a discount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountUsageHistory {
    /// Identifier
    pub id: i32,
    /// Discount used
    pub discount_id: i32,
    /// Order it was used on
    pub order_id: i32,
    /// Time of use
    pub created_on_utc: DateTime<Utc>,
}

/// Outcome of validating a discount for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountValidationResult {
    /// The discount can be applied
    pub is_valid: bool,
    /// Reasons it cannot
    pub errors: Vec<String>,
}

impl DiscountValidationResult {
    /// A passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result with one reason.
    #[must_use]
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
        }
    }
}
