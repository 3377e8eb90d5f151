//! Order service contracts.

use super::types::{
    GiftCard, GiftCardFilter, GiftCardUsageHistory, Order, OrderItem, OrderNote, OrderSearch,
    PlaceOrderRequest, PlaceOrderResult, ReturnRequest, ReturnRequestFilter, Shipment,
    ShipmentItem, ShoppingCartItem, ShoppingCartType,
};
use crate::error::Result;
use crate::money::Money;
use crate::paging::{PageRequest, PagedList};
use async_trait::async_trait;
use uuid::Uuid;

/// Order storage and lookup.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Search orders.
    async fn search_orders(&self, search: &OrderSearch, page: PageRequest) -> Result<PagedList<Order>>;

    /// Fetch one order.
    async fn get_order_by_id(&self, id: i32) -> Result<Option<Order>>;

    /// Fetch an order by its GUID.
    async fn get_order_by_guid(&self, guid: Uuid) -> Result<Option<Order>>;

    /// Fetch an order by its custom number.
    async fn get_order_by_custom_order_number(&self, number: &str) -> Result<Option<Order>>;

    /// Fetch several orders; unknown ids are skipped.
    async fn get_orders_by_ids(&self, ids: &[i32]) -> Result<Vec<Order>>;

    /// Lines of an order.
    async fn get_order_items(&self, order_id: i32) -> Result<Vec<OrderItem>>;

    /// Delete an order.
    async fn delete_order(&self, order: &Order) -> Result<()>;

    /// Notes of an order, oldest first.
    async fn get_order_notes(&self, order_id: i32) -> Result<Vec<OrderNote>>;

    /// Fetch one note.
    async fn get_order_note_by_id(&self, id: i32) -> Result<Option<OrderNote>>;

    /// Insert a note.
    async fn insert_order_note(&self, note: OrderNote) -> Result<OrderNote>;

    /// Delete a note.
    async fn delete_order_note(&self, note: &OrderNote) -> Result<()>;
}

/// Shipment lookup.
#[async_trait]
pub trait ShipmentService: Send + Sync {
    /// Shipments of an order.
    async fn get_shipments_by_order_id(&self, order_id: i32) -> Result<Vec<Shipment>>;

    /// Fetch one shipment.
    async fn get_shipment_by_id(&self, id: i32) -> Result<Option<Shipment>>;

    /// Items of a shipment.
    async fn get_shipment_items_by_shipment_id(&self, shipment_id: i32) -> Result<Vec<ShipmentItem>>;
}

/// Order state transitions. All rules live in the implementation.
#[async_trait]
pub trait OrderProcessingService: Send + Sync {
    /// Convert a customer's cart into an order.
    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<PlaceOrderResult>;

    /// Whether `order` may be cancelled.
    fn can_cancel_order(&self, order: &Order) -> bool;

    /// Cancel an order.
    async fn cancel_order(&self, order: &Order, notify_customer: bool) -> Result<()>;

    /// Whether `order` may be marked as paid.
    fn can_mark_order_as_paid(&self, order: &Order) -> bool;

    /// Mark an order as paid.
    async fn mark_order_as_paid(&self, order: &Order) -> Result<()>;

    /// Put the items of `order` back into the customer's cart; returns warnings.
    async fn reorder(&self, order: &Order) -> Result<Vec<String>>;

    /// Mark a shipment as shipped.
    async fn ship(&self, shipment: &Shipment, notify_customer: bool) -> Result<()>;

    /// Mark a shipment as delivered.
    async fn deliver(&self, shipment: &Shipment, notify_customer: bool) -> Result<()>;
}

/// Gift card management.
#[async_trait]
pub trait GiftCardService: Send + Sync {
    /// List gift cards matching the filter.
    async fn get_all_gift_cards(&self, filter: &GiftCardFilter, page: PageRequest) -> Result<PagedList<GiftCard>>;

    /// Fetch one gift card.
    async fn get_gift_card_by_id(&self, id: i32) -> Result<Option<GiftCard>>;

    /// Insert a gift card.
    async fn insert_gift_card(&self, gift_card: GiftCard) -> Result<GiftCard>;

    /// Replace a stored gift card.
    async fn update_gift_card(&self, gift_card: GiftCard) -> Result<GiftCard>;

    /// Delete a gift card.
    async fn delete_gift_card(&self, gift_card: &GiftCard) -> Result<()>;

    /// Value left on the card.
    async fn get_gift_card_remaining_amount(&self, gift_card: &GiftCard) -> Result<Money>;

    /// Redemptions of the card.
    async fn get_gift_card_usage_history(&self, gift_card: &GiftCard) -> Result<Vec<GiftCardUsageHistory>>;
}

/// Return request management.
#[async_trait]
pub trait ReturnRequestService: Send + Sync {
    /// Search return requests.
    async fn search_return_requests(
        &self,
        filter: &ReturnRequestFilter,
        page: PageRequest,
    ) -> Result<PagedList<ReturnRequest>>;

    /// Fetch one return request.
    async fn get_return_request_by_id(&self, id: i32) -> Result<Option<ReturnRequest>>;

    /// Replace a stored return request.
    async fn update_return_request(&self, request: ReturnRequest) -> Result<ReturnRequest>;

    /// Delete a return request.
    async fn delete_return_request(&self, request: &ReturnRequest) -> Result<()>;
}

/// Shopping carts and wishlists. Mutations return warnings; empty means success.
#[async_trait]
pub trait ShoppingCartService: Send + Sync {
    /// Items in a customer's cart of the given type.
    async fn get_shopping_cart(
        &self,
        customer_id: i32,
        cart_type: ShoppingCartType,
    ) -> Result<Vec<ShoppingCartItem>>;

    /// Fetch one cart item.
    async fn get_shopping_cart_item_by_id(&self, id: i32) -> Result<Option<ShoppingCartItem>>;

    /// Add a product to a cart.
    async fn add_to_cart(
        &self,
        customer_id: i32,
        product_id: i32,
        cart_type: ShoppingCartType,
        quantity: i32,
        customer_entered_price: Money,
    ) -> Result<Vec<String>>;

    /// Change the quantity of a cart item.
    async fn update_shopping_cart_item(&self, item: &ShoppingCartItem, quantity: i32) -> Result<Vec<String>>;

    /// Remove a cart item.
    async fn delete_shopping_cart_item(&self, item: &ShoppingCartItem) -> Result<()>;

    /// Remove every item of a customer's cart of the given type.
    async fn clear_shopping_cart(&self, customer_id: i32, cart_type: ShoppingCartType) -> Result<()>;
}
