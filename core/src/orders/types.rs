//! Order entities.

use super::status::{OrderStatus, PaymentStatus, ReturnRequestStatus, ShippingStatus};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier
    pub id: i32,
    /// Globally unique identifier
    pub order_guid: Uuid,
    /// Human-facing order number
    pub custom_order_number: String,
    /// Store the order was placed in
    pub store_id: i32,
    /// Customer who placed it
    pub customer_id: i32,
    /// Order lifecycle
    pub order_status: OrderStatus,
    /// Payment lifecycle
    pub payment_status: PaymentStatus,
    /// Shipping lifecycle
    pub shipping_status: ShippingStatus,
    /// Payment plugin used
    pub payment_method_system_name: Option<String>,
    /// Currency shown to the customer
    pub customer_currency_code: String,
    /// Subtotal including tax
    pub order_subtotal_incl_tax: Money,
    /// Subtotal excluding tax
    pub order_subtotal_excl_tax: Money,
    /// Shipping including tax
    pub order_shipping_incl_tax: Money,
    /// Tax
    pub order_tax: Money,
    /// Order-level discount
    pub order_discount: Money,
    /// Grand total
    pub order_total: Money,
    /// Refunded so far
    pub refunded_amount: Money,
    /// Shipping method name
    pub shipping_method: Option<String>,
    /// When payment was captured
    pub paid_date_utc: Option<DateTime<Utc>>,
    /// Soft-delete flag
    pub deleted: bool,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
}

/// Order search criteria. Empty status lists match every status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSearch {
    /// Restrict to a customer
    pub customer_id: Option<i32>,
    /// Restrict to a store
    pub store_id: Option<i32>,
    /// Any of these order statuses
    pub order_statuses: Vec<OrderStatus>,
    /// Any of these payment statuses
    pub payment_statuses: Vec<PaymentStatus>,
    /// Any of these shipping statuses
    pub shipping_statuses: Vec<ShippingStatus>,
    /// Created at or after
    pub created_from_utc: Option<DateTime<Utc>>,
    /// Created at or before
    pub created_to_utc: Option<DateTime<Utc>>,
}

/// A line of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Identifier
    pub id: i32,
    /// Globally unique identifier
    pub order_item_guid: Uuid,
    /// Owning order
    pub order_id: i32,
    /// Product ordered
    pub product_id: i32,
    /// Quantity
    pub quantity: i32,
    /// Unit price including tax
    pub unit_price_incl_tax: Money,
    /// Unit price excluding tax
    pub unit_price_excl_tax: Money,
    /// Line price including tax
    pub price_incl_tax: Money,
    /// Line price excluding tax
    pub price_excl_tax: Money,
    /// Line discount including tax
    pub discount_amount_incl_tax: Money,
    /// Rendered attribute selection
    pub attribute_description: Option<String>,
}

/// A note attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNote {
    /// Identifier
    pub id: i32,
    /// Owning order
    pub order_id: i32,
    /// Note text
    pub note: String,
    /// Customer can see the note
    pub display_to_customer: bool,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
}

/// A shipment of some order items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Identifier
    pub id: i32,
    /// Owning order
    pub order_id: i32,
    /// Carrier tracking number
    pub tracking_number: Option<String>,
    /// Total weight
    pub total_weight: Option<f64>,
    /// When it was shipped
    pub shipped_date_utc: Option<DateTime<Utc>>,
    /// When it was delivered
    pub delivery_date_utc: Option<DateTime<Utc>>,
    /// Admin comment
    pub admin_comment: Option<String>,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
}

/// Quantity of one order item inside a shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentItem {
    /// Identifier
    pub id: i32,
    /// Owning shipment
    pub shipment_id: i32,
    /// Order item shipped
    pub order_item_id: i32,
    /// Quantity shipped
    pub quantity: i32,
    /// Warehouse shipped from
    pub warehouse_id: i32,
}

/// Physical or virtual gift card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftCardType {
    /// Delivered by email
    #[default]
    Virtual,
    /// Shipped
    Physical,
}

/// A gift card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCard {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Order item the card was bought with
    pub purchased_with_order_item_id: Option<i32>,
    /// Card type
    pub gift_card_type: GiftCardType,
    /// Initial value
    pub amount: Money,
    /// Card can be redeemed
    pub is_gift_card_activated: bool,
    /// Redemption code
    pub gift_card_coupon_code: String,
    /// Recipient name
    pub recipient_name: Option<String>,
    /// Recipient email
    pub recipient_email: Option<String>,
    /// Sender name
    pub sender_name: Option<String>,
    /// Sender email
    pub sender_email: Option<String>,
    /// Message to the recipient
    pub message: Option<String>,
    /// Recipient was notified
    pub is_recipient_notified: bool,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
}

/// Filter for listing gift cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftCardFilter {
    /// Bought with this order
    pub purchased_with_order_id: Option<i32>,
    /// Exact coupon code (case-insensitive)
    pub coupon_code: Option<String>,
    /// Activation state
    pub is_activated: Option<bool>,
    /// Substring match on the recipient name
    pub recipient_name: Option<String>,
}

/// A redemption of a gift card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCardUsageHistory {
    /// Identifier
    pub id: i32,
    /// Gift card used
    pub gift_card_id: i32,
    /// Order it was used on
    pub used_with_order_id: i32,
    /// Value consumed
    pub used_value: Money,
    /// Time of use
    pub created_on_utc: DateTime<Utc>,
}

/// A customer's request to return an order item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequest {
    /// Identifier
    pub id: i32,
    /// Human-facing number
    pub custom_number: String,
    /// Store
    pub store_id: i32,
    /// Item being returned
    pub order_item_id: i32,
    /// Customer
    pub customer_id: i32,
    /// Quantity requested
    pub quantity: i32,
    /// Quantity received back
    pub returned_quantity: i32,
    /// Reason chosen by the customer
    pub reason_for_return: String,
    /// Action requested by the customer
    pub requested_action: String,
    /// Customer comments
    pub customer_comments: Option<String>,
    /// Staff notes
    pub staff_notes: Option<String>,
    /// Lifecycle
    pub return_request_status: ReturnRequestStatus,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

/// Filter for listing return requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnRequestFilter {
    /// Restrict to a customer
    pub customer_id: Option<i32>,
    /// Restrict to an order item
    pub order_item_id: Option<i32>,
    /// Restrict to a status
    pub status: Option<ReturnRequestStatus>,
}

/// Shopping cart or wishlist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShoppingCartType {
    /// Items to buy
    #[default]
    ShoppingCart,
    /// Items saved for later
    Wishlist,
}

/// An item in a customer's cart or wishlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCartItem {
    /// Identifier
    pub id: i32,
    /// Store
    pub store_id: i32,
    /// Cart or wishlist
    pub shopping_cart_type: ShoppingCartType,
    /// Owner
    pub customer_id: i32,
    /// Product
    pub product_id: i32,
    /// Selected attributes, serialized by the cart service
    pub attributes: Option<String>,
    /// Price entered by the customer (for "enter your price" products)
    pub customer_entered_price: Money,
    /// Quantity
    pub quantity: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

/// Input to order placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Customer whose cart is converted
    pub customer_id: i32,
    /// Store
    pub store_id: i32,
    /// Payment plugin
    pub payment_method_system_name: Option<String>,
}

/// Outcome of order placement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderResult {
    /// The new order when placement succeeded
    pub placed_order: Option<Order>,
    /// Reasons placement failed
    pub errors: Vec<String>,
}

impl PlaceOrderResult {
    /// Placement succeeded.
    #[must_use]
    pub fn success(&self) -> bool {
        self.errors.is_empty() && self.placed_order.is_some()
    }
}
