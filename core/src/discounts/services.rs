//! Discount service contract.

use super::types::{
    Discount, DiscountFilter, DiscountRequirement, DiscountUsageHistory, DiscountValidationResult,
};
use crate::error::Result;
use crate::paging::{PageRequest, PagedList};
use async_trait::async_trait;

/// Discount management and validation.
#[async_trait]
pub trait DiscountService: Send + Sync {
    /// List discounts matching the filter.
    async fn get_all_discounts(&self, filter: &DiscountFilter) -> Result<Vec<Discount>>;

    /// Fetch one discount.
    async fn get_discount_by_id(&self, id: i32) -> Result<Option<Discount>>;

    /// Insert a discount and return it with its assigned id.
    async fn insert_discount(&self, discount: Discount) -> Result<Discount>;

    /// Replace a stored discount.
    async fn update_discount(&self, discount: Discount) -> Result<Discount>;

    /// Delete a discount.
    async fn delete_discount(&self, discount: &Discount) -> Result<()>;

    /// Requirements of a discount, optionally only the top-level ones.
    async fn get_all_discount_requirements(
        &self,
        discount_id: i32,
        top_level_only: bool,
    ) -> Result<Vec<DiscountRequirement>>;

    /// Usage history, filtered by discount and/or order.
    async fn get_all_discount_usage_history(
        &self,
        discount_id: Option<i32>,
        order_id: Option<i32>,
        page: PageRequest,
    ) -> Result<PagedList<DiscountUsageHistory>>;

    /// Check whether `discount` applies for a customer holding `coupon_codes`.
    async fn validate_discount(
        &self,
        discount: &Discount,
        customer_id: i32,
        coupon_codes: &[String],
    ) -> Result<DiscountValidationResult>;
}
