//! Direct inserts for rows the service traits have no create operation for.
//!
//! Rows with `id == 0` get the next id of their table; unset creation times
//! are stamped with the store's clock.

use super::InMemoryCommerce;
use commerce_api_core::catalog::{
    ProductAttributeMapping, ProductCategory, ProductManufacturer, TierPrice,
};
use commerce_api_core::discounts::{DiscountRequirement, DiscountUsageHistory};
use commerce_api_core::orders::{
    GiftCardUsageHistory, Order, OrderItem, ReturnRequest, Shipment, ShipmentItem,
};
use commerce_api_core::{DateTime, Result, Utc};
use uuid::Uuid;

fn stamp(time: &mut DateTime<Utc>, now: DateTime<Utc>) {
    if *time == DateTime::<Utc>::default() {
        *time = now;
    }
}

macro_rules! seed_row {
    ($self:ident, $table:ident, $row:ident) => {{
        let mut tables = $self.write()?;
        if $row.id == 0 {
            $row.id = tables.$table.next_id();
        }
        tables.$table.put($row.id, $row.clone());
        Ok($row)
    }};
}

impl InMemoryCommerce {
    /// Insert an order together with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_order(&self, mut order: Order, items: Vec<OrderItem>) -> Result<Order> {
        let now = self.now();
        let mut tables = self.write()?;
        if order.id == 0 {
            order.id = tables.orders.next_id();
        }
        if order.order_guid.is_nil() {
            order.order_guid = Uuid::new_v4();
        }
        if order.custom_order_number.is_empty() {
            order.custom_order_number = order.id.to_string();
        }
        stamp(&mut order.created_on_utc, now);
        tables.orders.put(order.id, order.clone());

        for mut item in items {
            item.order_id = order.id;
            if item.id == 0 {
                item.id = tables.order_items.next_id();
            }
            if item.order_item_guid.is_nil() {
                item.order_item_guid = Uuid::new_v4();
            }
            tables.order_items.put(item.id, item);
        }
        Ok(order)
    }

    /// Insert a shipment together with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_shipment(&self, mut shipment: Shipment, items: Vec<ShipmentItem>) -> Result<Shipment> {
        let now = self.now();
        let mut tables = self.write()?;
        if shipment.id == 0 {
            shipment.id = tables.shipments.next_id();
        }
        stamp(&mut shipment.created_on_utc, now);
        tables.shipments.put(shipment.id, shipment.clone());

        for mut item in items {
            item.shipment_id = shipment.id;
            if item.id == 0 {
                item.id = tables.shipment_items.next_id();
            }
            tables.shipment_items.put(item.id, item);
        }
        Ok(shipment)
    }

    /// Insert a product-to-category mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_product_category(&self, mut mapping: ProductCategory) -> Result<ProductCategory> {
        seed_row!(self, product_categories, mapping)
    }

    /// Insert a product-to-manufacturer mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_product_manufacturer(&self, mut mapping: ProductManufacturer) -> Result<ProductManufacturer> {
        seed_row!(self, product_manufacturers, mapping)
    }

    /// Insert a product attribute mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_attribute_mapping(&self, mut mapping: ProductAttributeMapping) -> Result<ProductAttributeMapping> {
        seed_row!(self, attribute_mappings, mapping)
    }

    /// Insert a tier price.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_tier_price(&self, mut tier: TierPrice) -> Result<TierPrice> {
        seed_row!(self, tier_prices, tier)
    }

    /// Insert a discount requirement.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_discount_requirement(&self, mut requirement: DiscountRequirement) -> Result<DiscountRequirement> {
        seed_row!(self, discount_requirements, requirement)
    }

    /// Insert a discount usage record.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_discount_usage(&self, mut usage: DiscountUsageHistory) -> Result<DiscountUsageHistory> {
        stamp(&mut usage.created_on_utc, self.now());
        seed_row!(self, discount_usage, usage)
    }

    /// Insert a gift card redemption.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_gift_card_usage(&self, mut usage: GiftCardUsageHistory) -> Result<GiftCardUsageHistory> {
        stamp(&mut usage.created_on_utc, self.now());
        seed_row!(self, gift_card_usage, usage)
    }

    /// Insert a return request.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn seed_return_request(&self, mut request: ReturnRequest) -> Result<ReturnRequest> {
        let now = self.now();
        stamp(&mut request.created_on_utc, now);
        stamp(&mut request.updated_on_utc, now);
        if request.custom_number.is_empty() && request.id != 0 {
            request.custom_number = request.id.to_string();
        }
        seed_row!(self, return_requests, request)
    }
}
