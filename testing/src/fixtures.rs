//! Demo data set used by the server binary and the HTTP tests.
//!
//! Ids are fixed so tests can address rows directly:
//!
//! | table | ids |
//! |---|---|
//! | categories | 1 Electronics, 2 Computers (child of 1), 3 Notebooks (child of 2), 4 Apparel, 5 Clearance (unpublished) |
//! | manufacturers | 1 Apple, 2 HP |
//! | products | 1 `MacBook` Air, 2 `HP` Spectre, 3 USB-C Cable (low stock), 4 Gift Card |
//! | discounts | 1 SAVE10 (coupon), 2 Free shipping (expired) |
//! | orders | 1 (customer 1, pending), 2 (customer 2, complete and paid) |
//! | shipments | 1 (order 2, delivered), 2 (order 1, not shipped) |
//! | gift cards | 1 GIFT-0001 |
//! | return requests | 1 (order 2 item) |
//! | cart items | customer 1: product 3 x2 |

use crate::in_memory::InMemoryCommerce;
use chrono::Duration;
use commerce_api_core::catalog::{
    AttributeControlType, Category, Manufacturer, Product, ProductAttribute,
    ProductAttributeMapping, ProductCategory, ProductManufacturer, TierPrice,
};
use commerce_api_core::discounts::{
    Discount, DiscountLimitation, DiscountRequirement, DiscountType, DiscountUsageHistory,
    RequirementGroupInteraction,
};
use commerce_api_core::environment::Clock;
use commerce_api_core::orders::{
    GiftCard, GiftCardType, GiftCardUsageHistory, Order, OrderItem, OrderStatus, PaymentStatus,
    ReturnRequest, ReturnRequestStatus, Shipment, ShipmentItem, ShippingStatus, ShoppingCartItem,
    ShoppingCartType,
};
use commerce_api_core::{Money, Result};
use std::sync::Arc;

fn category(id: i32, name: &str, parent: i32, display_order: i32) -> Category {
    Category {
        id,
        name: name.to_string(),
        parent_category_id: parent,
        page_size: 6,
        include_in_top_menu: parent == 0,
        published: true,
        display_order,
        ..Category::default()
    }
}

fn product(id: i32, name: &str, sku: &str, price_cents: i64, stock: i32) -> Product {
    Product {
        id,
        name: name.to_string(),
        sku: Some(sku.to_string()),
        price: Money::from_cents(price_cents),
        stock_quantity: stock,
        manage_inventory: true,
        min_stock_quantity: 5,
        is_shipping_enabled: true,
        published: true,
        display_order: id,
        ..Product::default()
    }
}

impl InMemoryCommerce {
    /// Create a store pre-loaded with the demo data set.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn with_demo_data(clock: Arc<dyn Clock>) -> Result<Self> {
        let store = Self::with_clock(clock);
        store.seed_demo_data()?;
        Ok(store)
    }

    /// Load the demo data set into this store.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    #[allow(clippy::too_many_lines)] // Flat list of rows
    pub fn seed_demo_data(&self) -> Result<()> {
        let now = self.now();
        let last_week = now - Duration::days(7);
        let last_month = now - Duration::days(30);

        {
            let mut tables = self.write()?;

            for mut c in [
                category(1, "Electronics", 0, 1),
                category(2, "Computers", 1, 1),
                category(3, "Notebooks", 2, 1),
                category(4, "Apparel", 0, 2),
                Category {
                    published: false,
                    ..category(5, "Clearance", 0, 3)
                },
            ] {
                c.created_on_utc = last_month;
                c.updated_on_utc = last_month;
                tables.categories.put(c.id, c);
            }

            for (id, name) in [(1, "Apple"), (2, "HP")] {
                tables.manufacturers.put(
                    id,
                    Manufacturer {
                        id,
                        name: name.to_string(),
                        published: true,
                        display_order: id,
                        created_on_utc: last_month,
                        updated_on_utc: last_month,
                        ..Manufacturer::default()
                    },
                );
            }

            for mut p in [
                product(1, "MacBook Air", "MBA-13", 119_900, 25),
                product(2, "HP Spectre x360", "HP-SPX360", 139_900, 8),
                product(3, "USB-C Cable", "CBL-USBC", 1_999, 3),
                Product {
                    is_gift_card: true,
                    is_shipping_enabled: false,
                    manage_inventory: false,
                    ..product(4, "Gift Card $50", "GC-50", 5_000, 0)
                },
            ] {
                p.created_on_utc = last_month;
                p.updated_on_utc = last_month;
                tables.products.put(p.id, p);
            }

            for (id, product_id, category_id, featured) in
                [(1, 1, 3, true), (2, 2, 3, false), (3, 3, 2, false), (4, 1, 1, false)]
            {
                tables.product_categories.put(
                    id,
                    ProductCategory {
                        id,
                        product_id,
                        category_id,
                        is_featured_product: featured,
                        display_order: id,
                    },
                );
            }

            for (id, product_id, manufacturer_id) in [(1, 1, 1), (2, 2, 2)] {
                tables.product_manufacturers.put(
                    id,
                    ProductManufacturer {
                        id,
                        product_id,
                        manufacturer_id,
                        is_featured_product: false,
                        display_order: 0,
                    },
                );
            }

            for (id, name) in [(1, "Color"), (2, "Memory")] {
                tables.product_attributes.put(
                    id,
                    ProductAttribute {
                        id,
                        name: name.to_string(),
                        description: None,
                    },
                );
            }
            tables.attribute_mappings.put(
                1,
                ProductAttributeMapping {
                    id: 1,
                    product_id: 1,
                    product_attribute_id: 1,
                    text_prompt: Some("Choose a color".to_string()),
                    is_required: true,
                    attribute_control_type: AttributeControlType::ColorSquares,
                    display_order: 1,
                },
            );
            tables.attribute_mappings.put(
                2,
                ProductAttributeMapping {
                    id: 2,
                    product_id: 1,
                    product_attribute_id: 2,
                    text_prompt: None,
                    is_required: true,
                    attribute_control_type: AttributeControlType::DropdownList,
                    display_order: 2,
                },
            );

            tables.tier_prices.put(
                1,
                TierPrice {
                    id: 1,
                    product_id: 3,
                    quantity: 10,
                    price: Money::from_cents(1_499),
                    ..TierPrice::default()
                },
            );

            tables.discounts.put(
                1,
                Discount {
                    id: 1,
                    name: "10% off order total".to_string(),
                    discount_type: DiscountType::AssignedToOrderTotal,
                    use_percentage: true,
                    discount_percentage: 10.0,
                    maximum_discount_amount: Some(Money::from_units(100)),
                    requires_coupon_code: true,
                    coupon_code: Some("SAVE10".to_string()),
                    discount_limitation: DiscountLimitation::NTimesPerCustomer,
                    limitation_times: 1,
                    is_active: true,
                    ..Discount::default()
                },
            );
            tables.discounts.put(
                2,
                Discount {
                    id: 2,
                    name: "Free shipping weekend".to_string(),
                    discount_type: DiscountType::AssignedToShipping,
                    use_percentage: true,
                    discount_percentage: 100.0,
                    start_date_utc: Some(last_month),
                    end_date_utc: Some(last_week),
                    is_active: true,
                    ..Discount::default()
                },
            );
            tables.discount_requirements.put(
                1,
                DiscountRequirement {
                    id: 1,
                    discount_id: 1,
                    discount_requirement_rule_system_name: None,
                    parent_id: None,
                    interaction_type: Some(RequirementGroupInteraction::And),
                    is_group: true,
                },
            );
            tables.discount_requirements.put(
                2,
                DiscountRequirement {
                    id: 2,
                    discount_id: 1,
                    discount_requirement_rule_system_name: Some(
                        "DiscountRequirement.MustBeAssignedToCustomerRole".to_string(),
                    ),
                    parent_id: Some(1),
                    interaction_type: None,
                    is_group: false,
                },
            );

            tables.cart_items.put(
                1,
                ShoppingCartItem {
                    id: 1,
                    store_id: 1,
                    shopping_cart_type: ShoppingCartType::ShoppingCart,
                    customer_id: 1,
                    product_id: 3,
                    attributes: None,
                    customer_entered_price: Money::ZERO,
                    quantity: 2,
                    created_on_utc: now,
                    updated_on_utc: now,
                },
            );
        }

        let pending = self.seed_order(
            Order {
                customer_id: 1,
                store_id: 1,
                customer_currency_code: "USD".to_string(),
                order_subtotal_incl_tax: Money::from_cents(119_900),
                order_subtotal_excl_tax: Money::from_cents(119_900),
                order_total: Money::from_cents(119_900),
                payment_method_system_name: Some("Payments.CheckMoneyOrder".to_string()),
                created_on_utc: last_week,
                ..Order::default()
            },
            vec![OrderItem {
                product_id: 1,
                quantity: 1,
                unit_price_incl_tax: Money::from_cents(119_900),
                unit_price_excl_tax: Money::from_cents(119_900),
                price_incl_tax: Money::from_cents(119_900),
                price_excl_tax: Money::from_cents(119_900),
                ..OrderItem::default()
            }],
        )?;

        let complete = self.seed_order(
            Order {
                customer_id: 2,
                store_id: 1,
                order_status: OrderStatus::Complete,
                payment_status: PaymentStatus::Paid,
                shipping_status: ShippingStatus::Delivered,
                customer_currency_code: "USD".to_string(),
                order_subtotal_incl_tax: Money::from_cents(8_998),
                order_subtotal_excl_tax: Money::from_cents(8_998),
                order_discount: Money::from_cents(900),
                order_total: Money::from_cents(8_098),
                paid_date_utc: Some(last_month),
                shipping_method: Some("Ground".to_string()),
                created_on_utc: last_month,
                ..Order::default()
            },
            vec![
                OrderItem {
                    product_id: 3,
                    quantity: 2,
                    unit_price_incl_tax: Money::from_cents(1_999),
                    unit_price_excl_tax: Money::from_cents(1_999),
                    price_incl_tax: Money::from_cents(3_998),
                    price_excl_tax: Money::from_cents(3_998),
                    ..OrderItem::default()
                },
                OrderItem {
                    product_id: 4,
                    quantity: 1,
                    unit_price_incl_tax: Money::from_cents(5_000),
                    unit_price_excl_tax: Money::from_cents(5_000),
                    price_incl_tax: Money::from_cents(5_000),
                    price_excl_tax: Money::from_cents(5_000),
                    ..OrderItem::default()
                },
            ],
        )?;

        self.seed_shipment(
            Shipment {
                order_id: complete.id,
                tracking_number: Some("1Z999AA10123456784".to_string()),
                total_weight: Some(0.4),
                shipped_date_utc: Some(last_month + Duration::days(1)),
                delivery_date_utc: Some(last_month + Duration::days(3)),
                created_on_utc: last_month,
                ..Shipment::default()
            },
            vec![ShipmentItem {
                order_item_id: 2,
                quantity: 2,
                warehouse_id: 1,
                ..ShipmentItem::default()
            }],
        )?;
        self.seed_shipment(
            Shipment {
                order_id: pending.id,
                created_on_utc: last_week,
                ..Shipment::default()
            },
            vec![ShipmentItem {
                order_item_id: 1,
                quantity: 1,
                warehouse_id: 1,
                ..ShipmentItem::default()
            }],
        )?;

        self.seed_discount_usage(DiscountUsageHistory {
            discount_id: 1,
            order_id: complete.id,
            created_on_utc: last_month,
            ..DiscountUsageHistory::default()
        })?;

        {
            let mut tables = self.write()?;
            tables.gift_cards.put(
                1,
                GiftCard {
                    id: 1,
                    purchased_with_order_item_id: Some(3),
                    gift_card_type: GiftCardType::Virtual,
                    amount: Money::from_cents(5_000),
                    is_gift_card_activated: true,
                    gift_card_coupon_code: "GIFT-0001".to_string(),
                    recipient_name: Some("Jordan Lee".to_string()),
                    recipient_email: Some("jordan@example.com".to_string()),
                    sender_name: Some("Sam Rivera".to_string()),
                    sender_email: Some("sam@example.com".to_string()),
                    message: Some("Enjoy!".to_string()),
                    is_recipient_notified: true,
                    created_on_utc: last_month,
                },
            );
        }
        self.seed_gift_card_usage(GiftCardUsageHistory {
            gift_card_id: 1,
            used_with_order_id: pending.id,
            used_value: Money::from_cents(1_500),
            created_on_utc: last_week,
            ..GiftCardUsageHistory::default()
        })?;

        self.seed_return_request(ReturnRequest {
            id: 1,
            custom_number: "RR-1".to_string(),
            store_id: 1,
            order_item_id: 2,
            customer_id: complete.customer_id,
            quantity: 1,
            returned_quantity: 0,
            reason_for_return: "Received wrong product".to_string(),
            requested_action: "Replacement".to_string(),
            return_request_status: ReturnRequestStatus::Pending,
            created_on_utc: last_week,
            updated_on_utc: last_week,
            ..ReturnRequest::default()
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_clock;
    use commerce_api_core::catalog::{CategoryService, ProductService};
    use commerce_api_core::orders::OrderService;

    #[tokio::test]
    async fn test_demo_data_loads() {
        let store = InMemoryCommerce::with_demo_data(Arc::new(test_clock())).unwrap();

        let notebooks = store.get_category_by_id(3).await.unwrap().unwrap();
        let crumbs = store.get_category_breadcrumb(&notebooks).await.unwrap();
        assert_eq!(crumbs.len(), 3);

        assert!(store.get_product_by_sku("cbl-usbc").await.unwrap().is_some());
        assert_eq!(store.get_order_items(2).await.unwrap().len(), 2);
    }
}
