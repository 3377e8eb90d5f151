//! Discount DTOs.

// Fields mirror the entity fields one-to-one
#![allow(missing_docs)]

use commerce_api_core::discounts::{
    Discount, DiscountLimitation, DiscountRequirement, DiscountType, DiscountUsageHistory,
    DiscountValidationResult, RequirementGroupInteraction,
};
use commerce_api_core::{DateTime, Money, Utc};
use serde::{Deserialize, Serialize};

/// Discount.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountDto {
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

impl From<&Discount> for DiscountDto {
    fn from(d: &Discount) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            admin_comment: d.admin_comment.clone(),
            discount_type: d.discount_type,
            use_percentage: d.use_percentage,
            discount_percentage: d.discount_percentage,
            discount_amount: d.discount_amount,
            maximum_discount_amount: d.maximum_discount_amount,
            start_date_utc: d.start_date_utc,
            end_date_utc: d.end_date_utc,
            requires_coupon_code: d.requires_coupon_code,
            coupon_code: d.coupon_code.clone(),
            is_cumulative: d.is_cumulative,
            discount_limitation: d.discount_limitation,
            limitation_times: d.limitation_times,
            maximum_discounted_quantity: d.maximum_discounted_quantity,
            applied_to_sub_categories: d.applied_to_sub_categories,
            is_active: d.is_active,
        }
    }
}

impl From<DiscountDto> for Discount {
    fn from(dto: DiscountDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            admin_comment: dto.admin_comment,
            discount_type: dto.discount_type,
            use_percentage: dto.use_percentage,
            discount_percentage: dto.discount_percentage,
            discount_amount: dto.discount_amount,
            maximum_discount_amount: dto.maximum_discount_amount,
            start_date_utc: dto.start_date_utc,
            end_date_utc: dto.end_date_utc,
            requires_coupon_code: dto.requires_coupon_code,
            coupon_code: dto.coupon_code,
            is_cumulative: dto.is_cumulative,
            discount_limitation: dto.discount_limitation,
            limitation_times: dto.limitation_times,
            maximum_discounted_quantity: dto.maximum_discounted_quantity,
            applied_to_sub_categories: dto.applied_to_sub_categories,
            is_active: dto.is_active,
        }
    }
}

/// Discount requirement or requirement group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRequirementDto {
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

impl From<&DiscountRequirement> for DiscountRequirementDto {
    fn from(r: &DiscountRequirement) -> Self {
        Self {
            id: r.id,
            discount_id: r.discount_id,
            discount_requirement_rule_system_name: r.discount_requirement_rule_system_name.clone(),
            parent_id: r.parent_id,
            interaction_type: r.interaction_type,
            is_group: r.is_group,
        }
    }
}

/// A discount applied to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountUsageHistoryDto {
    /// Identifier
    pub id: i32,
    /// Discount used
    pub discount_id: i32,
    /// Order it was used on
    pub order_id: i32,
    /// Time of use
    pub created_on_utc: DateTime<Utc>,
}

impl From<&DiscountUsageHistory> for DiscountUsageHistoryDto {
    fn from(u: &DiscountUsageHistory) -> Self {
        Self {
            id: u.id,
            discount_id: u.discount_id,
            order_id: u.order_id,
            created_on_utc: u.created_on_utc,
        }
    }
}

/// Outcome of validating a discount for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountValidationDto {
    /// Discount that was validated
    pub discount_id: i32,
    /// Customer it was validated for
    pub customer_id: i32,
    /// The discount can be applied
    pub is_valid: bool,
    /// Why the discount cannot be applied, empty when valid
    pub errors: Vec<String>,
}

impl DiscountValidationDto {
    /// Attach the request coordinates to a validation result.
    #[must_use]
    pub fn new(discount_id: i32, customer_id: i32, result: &DiscountValidationResult) -> Self {
        Self {
            discount_id,
            customer_id,
            is_valid: result.is_valid,
            errors: result.errors.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_mapping() {
        let discount = Discount {
            id: 4,
            name: "Spring sale".to_string(),
            discount_type: DiscountType::AssignedToCategories,
            use_percentage: true,
            discount_percentage: 15.0,
            requires_coupon_code: true,
            coupon_code: Some("SPRING".to_string()),
            ..Discount::default()
        };

        let dto = DiscountDto::from(&discount);
        assert_eq!(dto.coupon_code.as_deref(), Some("SPRING"));
        assert_eq!(Discount::from(dto), discount);
    }

    #[test]
    fn test_validation_dto() {
        let dto = DiscountValidationDto::new(1, 7, &DiscountValidationResult::invalid("Expired"));
        assert!(!dto.is_valid);
        assert_eq!(dto.errors, vec!["Expired".to_string()]);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["customer_id"], 7);
    }
}
