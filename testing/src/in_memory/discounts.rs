//! Discount service over the in-memory tables.

use super::{InMemoryCommerce, contains_ci, eq_ci, missing};
use async_trait::async_trait;
use commerce_api_core::discounts::{
    Discount, DiscountFilter, DiscountLimitation, DiscountRequirement, DiscountService,
    DiscountUsageHistory, DiscountValidationResult,
};
use commerce_api_core::{DateTime, PageRequest, PagedList, Result, Utc};

fn in_date_range(discount: &Discount, now: DateTime<Utc>) -> bool {
    discount.start_date_utc.is_none_or(|start| start <= now)
        && discount.end_date_utc.is_none_or(|end| end >= now)
}

#[async_trait]
impl DiscountService for InMemoryCommerce {
    async fn get_all_discounts(&self, filter: &DiscountFilter) -> Result<Vec<Discount>> {
        let now = self.now();
        let tables = self.read()?;
        Ok(tables
            .discounts
            .values()
            .filter(|d| filter.show_hidden || (d.is_active && in_date_range(d, now)))
            .filter(|d| filter.discount_type.is_none_or(|t| d.discount_type == t))
            .filter(|d| {
                filter.coupon_code.as_deref().is_none_or(|code| {
                    d.coupon_code.as_deref().is_some_and(|c| eq_ci(c, code))
                })
            })
            .filter(|d| contains_ci(&d.name, filter.name.as_deref()))
            .cloned()
            .collect())
    }

    async fn get_discount_by_id(&self, id: i32) -> Result<Option<Discount>> {
        Ok(self.read()?.discounts.get(id))
    }

    async fn insert_discount(&self, mut discount: Discount) -> Result<Discount> {
        let mut tables = self.write()?;
        discount.id = tables.discounts.next_id();
        tables.discounts.put(discount.id, discount.clone());
        Ok(discount)
    }

    async fn update_discount(&self, discount: Discount) -> Result<Discount> {
        let mut tables = self.write()?;
        if !tables.discounts.contains(discount.id) {
            return Err(missing("Discount", discount.id));
        }
        tables.discounts.put(discount.id, discount.clone());
        Ok(discount)
    }

    async fn delete_discount(&self, discount: &Discount) -> Result<()> {
        let mut tables = self.write()?;
        tables.discounts.remove(discount.id);
        tables
            .discount_requirements
            .retain(|r| r.discount_id != discount.id);
        Ok(())
    }

    async fn get_all_discount_requirements(
        &self,
        discount_id: i32,
        top_level_only: bool,
    ) -> Result<Vec<DiscountRequirement>> {
        let tables = self.read()?;
        Ok(tables
            .discount_requirements
            .values()
            .filter(|r| r.discount_id == discount_id)
            .filter(|r| !top_level_only || r.parent_id.is_none())
            .cloned()
            .collect())
    }

    async fn get_all_discount_usage_history(
        &self,
        discount_id: Option<i32>,
        order_id: Option<i32>,
        page: PageRequest,
    ) -> Result<PagedList<DiscountUsageHistory>> {
        let tables = self.read()?;
        let mut history: Vec<DiscountUsageHistory> = tables
            .discount_usage
            .values()
            .filter(|h| discount_id.is_none_or(|id| h.discount_id == id))
            .filter(|h| order_id.is_none_or(|id| h.order_id == id))
            .cloned()
            .collect();
        history.sort_by_key(|h| std::cmp::Reverse((h.created_on_utc, h.id)));
        Ok(PagedList::paginate(history, page))
    }

    async fn validate_discount(
        &self,
        discount: &Discount,
        customer_id: i32,
        coupon_codes: &[String],
    ) -> Result<DiscountValidationResult> {
        let now = self.now();
        let tables = self.read()?;

        if !discount.is_active {
            return Ok(DiscountValidationResult::invalid("Discount is not active"));
        }
        if discount.start_date_utc.is_some_and(|start| start > now) {
            return Ok(DiscountValidationResult::invalid("Discount has not started yet"));
        }
        if discount.end_date_utc.is_some_and(|end| end < now) {
            return Ok(DiscountValidationResult::invalid("Discount has expired"));
        }
        if discount.requires_coupon_code {
            let applied = discount
                .coupon_code
                .as_deref()
                .is_some_and(|code| coupon_codes.iter().any(|c| eq_ci(c, code)));
            if !applied {
                return Ok(DiscountValidationResult::invalid(
                    "The coupon code is missing or wrong",
                ));
            }
        }

        let usages = tables
            .discount_usage
            .values()
            .filter(|h| h.discount_id == discount.id);
        let used = match discount.discount_limitation {
            DiscountLimitation::Unlimited => 0,
            DiscountLimitation::NTimesOnly => usages.count(),
            DiscountLimitation::NTimesPerCustomer => usages
                .filter(|h| {
                    tables
                        .orders
                        .get(h.order_id)
                        .is_some_and(|o| o.customer_id == customer_id)
                })
                .count(),
        };
        let limit = usize::try_from(discount.limitation_times).unwrap_or(0);
        if discount.discount_limitation != DiscountLimitation::Unlimited && used >= limit {
            return Ok(DiscountValidationResult::invalid(
                "The discount usage limit has been reached",
            ));
        }

        Ok(DiscountValidationResult::valid())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_clock;
    use commerce_api_core::orders::Order;
    use std::sync::Arc;

    fn commerce() -> InMemoryCommerce {
        InMemoryCommerce::with_clock(Arc::new(test_clock()))
    }

    fn coupon_discount() -> Discount {
        Discount {
            name: "Spring sale".to_string(),
            is_active: true,
            requires_coupon_code: true,
            coupon_code: Some("SPRING".to_string()),
            ..Discount::default()
        }
    }

    #[tokio::test]
    async fn test_coupon_required() {
        let store = commerce();
        let discount = store.insert_discount(coupon_discount()).await.unwrap();

        let missing = store.validate_discount(&discount, 1, &[]).await.unwrap();
        assert!(!missing.is_valid);

        let ok = store
            .validate_discount(&discount, 1, &["spring".to_string()])
            .await
            .unwrap();
        assert!(ok.is_valid);
    }

    #[tokio::test]
    async fn test_per_customer_limit() {
        let store = commerce();
        let discount = store
            .insert_discount(Discount {
                discount_limitation: DiscountLimitation::NTimesPerCustomer,
                limitation_times: 1,
                requires_coupon_code: false,
                ..coupon_discount()
            })
            .await
            .unwrap();
        let order = store
            .seed_order(
                Order {
                    customer_id: 7,
                    ..Order::default()
                },
                Vec::new(),
            )
            .unwrap();
        store
            .seed_discount_usage(DiscountUsageHistory {
                discount_id: discount.id,
                order_id: order.id,
                ..DiscountUsageHistory::default()
            })
            .unwrap();

        assert!(!store.validate_discount(&discount, 7, &[]).await.unwrap().is_valid);
        assert!(store.validate_discount(&discount, 8, &[]).await.unwrap().is_valid);
    }

    #[tokio::test]
    async fn test_hidden_discounts_excluded() {
        let store = commerce();
        store
            .insert_discount(Discount {
                is_active: false,
                ..coupon_discount()
            })
            .await
            .unwrap();

        let visible = store.get_all_discounts(&DiscountFilter::default()).await.unwrap();
        assert!(visible.is_empty());

        let all = store
            .get_all_discounts(&DiscountFilter {
                show_hidden: true,
                ..DiscountFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }
}
