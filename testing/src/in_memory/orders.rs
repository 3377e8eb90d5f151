//! Order services over the in-memory tables.

use super::cart::add_to_cart_locked;
use super::{InMemoryCommerce, Tables, contains_ci, eq_ci, missing};
use async_trait::async_trait;
use commerce_api_core::orders::{
    GiftCard, GiftCardFilter, GiftCardService, GiftCardUsageHistory, Order, OrderItem, OrderNote,
    OrderProcessingService, OrderSearch, OrderService, OrderStatus, PaymentStatus,
    PlaceOrderRequest, PlaceOrderResult, ReturnRequest, ReturnRequestFilter, ReturnRequestService,
    Shipment, ShipmentItem, ShipmentService, ShippingStatus, ShoppingCartType,
};
use commerce_api_core::{DateTime, Money, PageRequest, PagedList, Result, ServiceError, Utc};
use uuid::Uuid;

fn matches_order_search(order: &Order, search: &OrderSearch) -> bool {
    !order.deleted
        && search.customer_id.is_none_or(|id| order.customer_id == id)
        && search.store_id.is_none_or(|id| order.store_id == id)
        && (search.order_statuses.is_empty() || search.order_statuses.contains(&order.order_status))
        && (search.payment_statuses.is_empty()
            || search.payment_statuses.contains(&order.payment_status))
        && (search.shipping_statuses.is_empty()
            || search.shipping_statuses.contains(&order.shipping_status))
        && search.created_from_utc.is_none_or(|from| order.created_on_utc >= from)
        && search.created_to_utc.is_none_or(|to| order.created_on_utc <= to)
}

/// Append a system note. Does nothing when the order is gone.
fn add_note(tables: &mut Tables, order_id: i32, note: &str, now: DateTime<Utc>) {
    if !tables.orders.contains(order_id) {
        return;
    }
    let id = tables.order_notes.next_id();
    tables.order_notes.put(
        id,
        OrderNote {
            id,
            order_id,
            note: note.to_string(),
            display_to_customer: false,
            created_on_utc: now,
        },
    );
}

/// Reject a coupon code held by another gift card.
fn ensure_unique_coupon(tables: &Tables, gift_card: &GiftCard) -> Result<()> {
    let code = &gift_card.gift_card_coupon_code;
    if tables
        .gift_cards
        .values()
        .any(|g| g.id != gift_card.id && eq_ci(&g.gift_card_coupon_code, code))
    {
        return Err(ServiceError::conflict(format!("Gift card code '{code}' is already in use")));
    }
    Ok(())
}

/// Recompute the order's shipping status from its shipments.
fn refresh_shipping_status(tables: &mut Tables, order_id: i32) {
    let shipments: Vec<&Shipment> = tables
        .shipments
        .values()
        .filter(|s| s.order_id == order_id)
        .collect();
    if shipments.is_empty() {
        return;
    }
    let all_delivered = shipments.iter().all(|s| s.delivery_date_utc.is_some());
    let all_shipped = shipments.iter().all(|s| s.shipped_date_utc.is_some());
    let any_shipped = shipments.iter().any(|s| s.shipped_date_utc.is_some());
    let status = if all_delivered {
        ShippingStatus::Delivered
    } else if all_shipped {
        ShippingStatus::Shipped
    } else if any_shipped {
        ShippingStatus::PartiallyShipped
    } else {
        ShippingStatus::NotYetShipped
    };
    if let Some(order) = tables.orders.get_mut(order_id) {
        order.shipping_status = status;
    }
}

#[async_trait]
impl OrderService for InMemoryCommerce {
    async fn search_orders(&self, search: &OrderSearch, page: PageRequest) -> Result<PagedList<Order>> {
        let tables = self.read()?;
        let mut orders: Vec<Order> = tables
            .orders
            .values()
            .filter(|o| matches_order_search(o, search))
            .cloned()
            .collect();
        orders.sort_by_key(|o| std::cmp::Reverse((o.created_on_utc, o.id)));
        Ok(PagedList::paginate(orders, page))
    }

    async fn get_order_by_id(&self, id: i32) -> Result<Option<Order>> {
        Ok(self.read()?.orders.get(id))
    }

    async fn get_order_by_guid(&self, guid: Uuid) -> Result<Option<Order>> {
        Ok(self
            .read()?
            .orders
            .values()
            .find(|o| o.order_guid == guid)
            .cloned())
    }

    async fn get_order_by_custom_order_number(&self, number: &str) -> Result<Option<Order>> {
        Ok(self
            .read()?
            .orders
            .values()
            .find(|o| eq_ci(&o.custom_order_number, number))
            .cloned())
    }

    async fn get_orders_by_ids(&self, ids: &[i32]) -> Result<Vec<Order>> {
        Ok(self.read()?.orders.pick(ids))
    }

    async fn get_order_items(&self, order_id: i32) -> Result<Vec<OrderItem>> {
        Ok(self
            .read()?
            .order_items
            .values()
            .filter(|i| i.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn delete_order(&self, order: &Order) -> Result<()> {
        let mut tables = self.write()?;
        tables.orders.remove(order.id);
        tables.order_notes.retain(|n| n.order_id != order.id);
        tables.order_items.retain(|i| i.order_id != order.id);
        let shipment_ids: Vec<i32> = tables
            .shipments
            .values()
            .filter(|s| s.order_id == order.id)
            .map(|s| s.id)
            .collect();
        tables.shipments.retain(|s| s.order_id != order.id);
        tables
            .shipment_items
            .retain(|i| !shipment_ids.contains(&i.shipment_id));
        Ok(())
    }

    async fn get_order_notes(&self, order_id: i32) -> Result<Vec<OrderNote>> {
        let tables = self.read()?;
        let mut notes: Vec<OrderNote> = tables
            .order_notes
            .values()
            .filter(|n| n.order_id == order_id)
            .cloned()
            .collect();
        notes.sort_by_key(|n| (n.created_on_utc, n.id));
        Ok(notes)
    }

    async fn get_order_note_by_id(&self, id: i32) -> Result<Option<OrderNote>> {
        Ok(self.read()?.order_notes.get(id))
    }

    async fn insert_order_note(&self, mut note: OrderNote) -> Result<OrderNote> {
        let now = self.now();
        let mut tables = self.write()?;
        if !tables.orders.contains(note.order_id) {
            return Err(missing("Order", note.order_id));
        }
        note.id = tables.order_notes.next_id();
        note.created_on_utc = now;
        tables.order_notes.put(note.id, note.clone());
        Ok(note)
    }

    async fn delete_order_note(&self, note: &OrderNote) -> Result<()> {
        self.write()?.order_notes.remove(note.id);
        Ok(())
    }
}

#[async_trait]
impl ShipmentService for InMemoryCommerce {
    async fn get_shipments_by_order_id(&self, order_id: i32) -> Result<Vec<Shipment>> {
        Ok(self
            .read()?
            .shipments
            .values()
            .filter(|s| s.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn get_shipment_by_id(&self, id: i32) -> Result<Option<Shipment>> {
        Ok(self.read()?.shipments.get(id))
    }

    async fn get_shipment_items_by_shipment_id(&self, shipment_id: i32) -> Result<Vec<ShipmentItem>> {
        Ok(self
            .read()?
            .shipment_items
            .values()
            .filter(|i| i.shipment_id == shipment_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderProcessingService for InMemoryCommerce {
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlaceOrderResult> {
        let now = self.now();
        let mut tables = self.write()?;

        let cart: Vec<_> = tables
            .cart_items
            .values()
            .filter(|i| {
                i.customer_id == request.customer_id
                    && i.shopping_cart_type == ShoppingCartType::ShoppingCart
            })
            .cloned()
            .collect();
        if cart.is_empty() {
            return Ok(PlaceOrderResult {
                placed_order: None,
                errors: vec!["Cart is empty".to_string()],
            });
        }

        let mut errors = Vec::new();
        let mut lines = Vec::new();
        for item in &cart {
            let Some(product) = tables.products.get(item.product_id).filter(|p| !p.deleted) else {
                errors.push(format!("Product {} no longer exists", item.product_id));
                continue;
            };
            match product.price.checked_mul(item.quantity) {
                Some(line_total) => lines.push((item.clone(), product.price, line_total)),
                None => errors.push(format!("Line total for product {} is too large", item.product_id)),
            }
        }
        let subtotal = Money::checked_sum(lines.iter().map(|(_, _, line_total)| *line_total));
        let subtotal = match subtotal {
            Some(subtotal) if errors.is_empty() => subtotal,
            _ => {
                if errors.is_empty() {
                    errors.push("Order total is too large".to_string());
                }
                return Ok(PlaceOrderResult {
                    placed_order: None,
                    errors,
                });
            }
        };

        let order_id = tables.orders.next_id();
        for (item, price, line_total) in &lines {
            let line_id = tables.order_items.next_id();
            tables.order_items.put(
                line_id,
                OrderItem {
                    id: line_id,
                    order_item_guid: Uuid::new_v4(),
                    order_id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price_incl_tax: *price,
                    unit_price_excl_tax: *price,
                    price_incl_tax: *line_total,
                    price_excl_tax: *line_total,
                    discount_amount_incl_tax: Money::ZERO,
                    attribute_description: item.attributes.clone(),
                },
            );
        }

        let order = Order {
            id: order_id,
            order_guid: Uuid::new_v4(),
            custom_order_number: order_id.to_string(),
            store_id: request.store_id,
            customer_id: request.customer_id,
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            shipping_status: ShippingStatus::NotYetShipped,
            payment_method_system_name: request.payment_method_system_name.clone(),
            customer_currency_code: "USD".to_string(),
            order_subtotal_incl_tax: subtotal,
            order_subtotal_excl_tax: subtotal,
            order_total: subtotal,
            created_on_utc: now,
            ..Order::default()
        };
        tables.orders.put(order_id, order.clone());
        add_note(&mut tables, order_id, "Order placed", now);
        tables.cart_items.retain(|i| {
            !(i.customer_id == request.customer_id
                && i.shopping_cart_type == ShoppingCartType::ShoppingCart)
        });

        Ok(PlaceOrderResult {
            placed_order: Some(order),
            errors: Vec::new(),
        })
    }

    fn can_cancel_order(&self, order: &Order) -> bool {
        !matches!(order.order_status, OrderStatus::Cancelled | OrderStatus::Complete)
    }

    async fn cancel_order(&self, order: &Order, notify_customer: bool) -> Result<()> {
        if !self.can_cancel_order(order) {
            return Err(ServiceError::rejected("Cannot cancel order"));
        }
        let now = self.now();
        let mut tables = self.write()?;
        let Some(stored) = tables.orders.get_mut(order.id) else {
            return Err(missing("Order", order.id));
        };
        stored.order_status = OrderStatus::Cancelled;
        let note = if notify_customer {
            "Order has been cancelled. Customer notified"
        } else {
            "Order has been cancelled"
        };
        add_note(&mut tables, order.id, note, now);
        Ok(())
    }

    fn can_mark_order_as_paid(&self, order: &Order) -> bool {
        order.order_status != OrderStatus::Cancelled
            && !matches!(
                order.payment_status,
                PaymentStatus::Paid
                    | PaymentStatus::Refunded
                    | PaymentStatus::PartiallyRefunded
                    | PaymentStatus::Voided
            )
    }

    async fn mark_order_as_paid(&self, order: &Order) -> Result<()> {
        if !self.can_mark_order_as_paid(order) {
            return Err(ServiceError::rejected("You can't mark this order as paid"));
        }
        let now = self.now();
        let mut tables = self.write()?;
        let Some(stored) = tables.orders.get_mut(order.id) else {
            return Err(missing("Order", order.id));
        };
        stored.payment_status = PaymentStatus::Paid;
        stored.paid_date_utc = Some(now);
        if stored.order_status == OrderStatus::Pending {
            stored.order_status = OrderStatus::Processing;
        }
        add_note(&mut tables, order.id, "Order has been marked as paid", now);
        Ok(())
    }

    async fn reorder(&self, order: &Order) -> Result<Vec<String>> {
        let now = self.now();
        let mut tables = self.write()?;
        let items: Vec<OrderItem> = tables
            .order_items
            .values()
            .filter(|i| i.order_id == order.id)
            .cloned()
            .collect();
        let mut warnings = Vec::new();
        for item in items {
            warnings.extend(add_to_cart_locked(
                &mut tables,
                now,
                order.customer_id,
                item.product_id,
                ShoppingCartType::ShoppingCart,
                item.quantity,
                Money::ZERO,
            ));
        }
        Ok(warnings)
    }

    async fn ship(&self, shipment: &Shipment, notify_customer: bool) -> Result<()> {
        let now = self.now();
        let mut tables = self.write()?;
        let Some(stored) = tables.shipments.get_mut(shipment.id) else {
            return Err(missing("Shipment", shipment.id));
        };
        if stored.shipped_date_utc.is_some() {
            return Err(ServiceError::rejected("This shipment is already shipped"));
        }
        stored.shipped_date_utc = Some(now);
        let order_id = stored.order_id;
        refresh_shipping_status(&mut tables, order_id);
        let note = if notify_customer {
            format!("Shipment #{} has been sent. Customer notified", shipment.id)
        } else {
            format!("Shipment #{} has been sent", shipment.id)
        };
        add_note(&mut tables, order_id, &note, now);
        Ok(())
    }

    async fn deliver(&self, shipment: &Shipment, notify_customer: bool) -> Result<()> {
        let now = self.now();
        let mut tables = self.write()?;
        let Some(stored) = tables.shipments.get_mut(shipment.id) else {
            return Err(missing("Shipment", shipment.id));
        };
        if stored.shipped_date_utc.is_none() {
            return Err(ServiceError::rejected("This shipment is not shipped yet"));
        }
        if stored.delivery_date_utc.is_some() {
            return Err(ServiceError::rejected("This shipment is already delivered"));
        }
        stored.delivery_date_utc = Some(now);
        let order_id = stored.order_id;
        refresh_shipping_status(&mut tables, order_id);
        let note = if notify_customer {
            format!("Shipment #{} has been delivered. Customer notified", shipment.id)
        } else {
            format!("Shipment #{} has been delivered", shipment.id)
        };
        add_note(&mut tables, order_id, &note, now);
        Ok(())
    }
}

#[async_trait]
impl GiftCardService for InMemoryCommerce {
    async fn get_all_gift_cards(&self, filter: &GiftCardFilter, page: PageRequest) -> Result<PagedList<GiftCard>> {
        let tables = self.read()?;
        let mut cards: Vec<GiftCard> = tables
            .gift_cards
            .values()
            .filter(|g| filter.is_activated.is_none_or(|a| g.is_gift_card_activated == a))
            .filter(|g| {
                filter
                    .coupon_code
                    .as_deref()
                    .is_none_or(|code| eq_ci(&g.gift_card_coupon_code, code))
            })
            .filter(|g| {
                filter.recipient_name.is_none()
                    || g
                        .recipient_name
                        .as_deref()
                        .is_some_and(|n| contains_ci(n, filter.recipient_name.as_deref()))
            })
            .filter(|g| {
                filter.purchased_with_order_id.is_none_or(|order_id| {
                    g.purchased_with_order_item_id
                        .and_then(|item_id| tables.order_items.get(item_id))
                        .is_some_and(|item| item.order_id == order_id)
                })
            })
            .cloned()
            .collect();
        cards.sort_by_key(|g| std::cmp::Reverse((g.created_on_utc, g.id)));
        Ok(PagedList::paginate(cards, page))
    }

    async fn get_gift_card_by_id(&self, id: i32) -> Result<Option<GiftCard>> {
        Ok(self.read()?.gift_cards.get(id))
    }

    async fn insert_gift_card(&self, mut gift_card: GiftCard) -> Result<GiftCard> {
        let now = self.now();
        let mut tables = self.write()?;
        ensure_unique_coupon(&tables, &gift_card)?;
        gift_card.id = tables.gift_cards.next_id();
        gift_card.created_on_utc = now;
        tables.gift_cards.put(gift_card.id, gift_card.clone());
        Ok(gift_card)
    }

    async fn update_gift_card(&self, mut gift_card: GiftCard) -> Result<GiftCard> {
        let mut tables = self.write()?;
        if !tables.gift_cards.contains(gift_card.id) {
            return Err(missing("Gift card", gift_card.id));
        }
        ensure_unique_coupon(&tables, &gift_card)?;
        let Some(existing) = tables.gift_cards.get_mut(gift_card.id) else {
            return Err(missing("Gift card", gift_card.id));
        };
        gift_card.created_on_utc = existing.created_on_utc;
        *existing = gift_card.clone();
        Ok(gift_card)
    }

    async fn delete_gift_card(&self, gift_card: &GiftCard) -> Result<()> {
        let mut tables = self.write()?;
        tables.gift_cards.remove(gift_card.id);
        tables.gift_card_usage.retain(|u| u.gift_card_id != gift_card.id);
        Ok(())
    }

    async fn get_gift_card_remaining_amount(&self, gift_card: &GiftCard) -> Result<Money> {
        let tables = self.read()?;
        let used: Money = tables
            .gift_card_usage
            .values()
            .filter(|u| u.gift_card_id == gift_card.id)
            .map(|u| u.used_value)
            .sum();
        Ok(gift_card.amount.saturating_sub_to_zero(used))
    }

    async fn get_gift_card_usage_history(&self, gift_card: &GiftCard) -> Result<Vec<GiftCardUsageHistory>> {
        Ok(self
            .read()?
            .gift_card_usage
            .values()
            .filter(|u| u.gift_card_id == gift_card.id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReturnRequestService for InMemoryCommerce {
    async fn search_return_requests(
        &self,
        filter: &ReturnRequestFilter,
        page: PageRequest,
    ) -> Result<PagedList<ReturnRequest>> {
        let tables = self.read()?;
        let mut requests: Vec<ReturnRequest> = tables
            .return_requests
            .values()
            .filter(|r| filter.customer_id.is_none_or(|id| r.customer_id == id))
            .filter(|r| filter.order_item_id.is_none_or(|id| r.order_item_id == id))
            .filter(|r| filter.status.is_none_or(|s| r.return_request_status == s))
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse((r.created_on_utc, r.id)));
        Ok(PagedList::paginate(requests, page))
    }

    async fn get_return_request_by_id(&self, id: i32) -> Result<Option<ReturnRequest>> {
        Ok(self.read()?.return_requests.get(id))
    }

    async fn update_return_request(&self, mut request: ReturnRequest) -> Result<ReturnRequest> {
        let now = self.now();
        let mut tables = self.write()?;
        if !tables.return_requests.contains(request.id) {
            return Err(missing("Return request", request.id));
        }
        request.updated_on_utc = now;
        tables.return_requests.put(request.id, request.clone());
        Ok(request)
    }

    async fn delete_return_request(&self, request: &ReturnRequest) -> Result<()> {
        self.write()?.return_requests.remove(request.id);
        Ok(())
    }
}
