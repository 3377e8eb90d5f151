//! Order DTOs.
//!
//! Status enums are sent both by name and by their numeric code
//! (`order_status` / `order_status_id`), since the numeric codes are what the
//! search endpoints filter on.

// Fields mirror the entity fields one-to-one
#![allow(missing_docs)]

use commerce_api_core::orders::{
    GiftCard, GiftCardType, GiftCardUsageHistory, Order, OrderItem, OrderNote, OrderStatus,
    PaymentStatus, ReturnRequest, ReturnRequestStatus, Shipment, ShipmentItem, ShippingStatus,
    ShoppingCartItem, ShoppingCartType,
};
use commerce_api_core::{DateTime, Money, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
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
    /// Numeric code of `order_status`
    pub order_status_id: i32,
    /// Payment lifecycle
    pub payment_status: PaymentStatus,
    /// Numeric code of `payment_status`
    pub payment_status_id: i32,
    /// Shipping lifecycle
    pub shipping_status: ShippingStatus,
    /// Numeric code of `shipping_status`
    pub shipping_status_id: i32,
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
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
}

impl From<&Order> for OrderDto {
    fn from(o: &Order) -> Self {
        Self {
            id: o.id,
            order_guid: o.order_guid,
            custom_order_number: o.custom_order_number.clone(),
            store_id: o.store_id,
            customer_id: o.customer_id,
            order_status: o.order_status,
            order_status_id: o.order_status.code(),
            payment_status: o.payment_status,
            payment_status_id: o.payment_status.code(),
            shipping_status: o.shipping_status,
            shipping_status_id: o.shipping_status.code(),
            payment_method_system_name: o.payment_method_system_name.clone(),
            customer_currency_code: o.customer_currency_code.clone(),
            order_subtotal_incl_tax: o.order_subtotal_incl_tax,
            order_subtotal_excl_tax: o.order_subtotal_excl_tax,
            order_shipping_incl_tax: o.order_shipping_incl_tax,
            order_tax: o.order_tax,
            order_discount: o.order_discount,
            order_total: o.order_total,
            refunded_amount: o.refunded_amount,
            shipping_method: o.shipping_method.clone(),
            paid_date_utc: o.paid_date_utc,
            created_on_utc: o.created_on_utc,
        }
    }
}

/// Order line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDto {
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

impl From<&OrderItem> for OrderItemDto {
    fn from(i: &OrderItem) -> Self {
        Self {
            id: i.id,
            order_item_guid: i.order_item_guid,
            order_id: i.order_id,
            product_id: i.product_id,
            quantity: i.quantity,
            unit_price_incl_tax: i.unit_price_incl_tax,
            unit_price_excl_tax: i.unit_price_excl_tax,
            price_incl_tax: i.price_incl_tax,
            price_excl_tax: i.price_excl_tax,
            discount_amount_incl_tax: i.discount_amount_incl_tax,
            attribute_description: i.attribute_description.clone(),
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequestDto {
    /// Customer whose cart is converted
    pub customer_id: i32,
    /// Store
    #[serde(default)]
    pub store_id: i32,
    /// Payment plugin
    #[serde(default)]
    pub payment_method_system_name: Option<String>,
}

/// Order note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNoteDto {
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

impl From<&OrderNote> for OrderNoteDto {
    fn from(n: &OrderNote) -> Self {
        Self {
            id: n.id,
            order_id: n.order_id,
            note: n.note.clone(),
            display_to_customer: n.display_to_customer,
            created_on_utc: n.created_on_utc,
        }
    }
}

/// Body of `POST /orders/{id}/notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderNoteRequest {
    /// Note text
    pub note: String,
    /// Customer can see the note
    #[serde(default)]
    pub display_to_customer: bool,
}

/// Shipment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipmentDto {
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

impl From<&Shipment> for ShipmentDto {
    fn from(s: &Shipment) -> Self {
        Self {
            id: s.id,
            order_id: s.order_id,
            tracking_number: s.tracking_number.clone(),
            total_weight: s.total_weight,
            shipped_date_utc: s.shipped_date_utc,
            delivery_date_utc: s.delivery_date_utc,
            admin_comment: s.admin_comment.clone(),
            created_on_utc: s.created_on_utc,
        }
    }
}

/// Shipment line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentItemDto {
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

impl From<&ShipmentItem> for ShipmentItemDto {
    fn from(i: &ShipmentItem) -> Self {
        Self {
            id: i.id,
            shipment_id: i.shipment_id,
            order_item_id: i.order_item_id,
            quantity: i.quantity,
            warehouse_id: i.warehouse_id,
        }
    }
}

/// Gift card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftCardDto {
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

impl From<&GiftCard> for GiftCardDto {
    fn from(g: &GiftCard) -> Self {
        Self {
            id: g.id,
            purchased_with_order_item_id: g.purchased_with_order_item_id,
            gift_card_type: g.gift_card_type,
            amount: g.amount,
            is_gift_card_activated: g.is_gift_card_activated,
            gift_card_coupon_code: g.gift_card_coupon_code.clone(),
            recipient_name: g.recipient_name.clone(),
            recipient_email: g.recipient_email.clone(),
            sender_name: g.sender_name.clone(),
            sender_email: g.sender_email.clone(),
            message: g.message.clone(),
            is_recipient_notified: g.is_recipient_notified,
            created_on_utc: g.created_on_utc,
        }
    }
}

impl From<GiftCardDto> for GiftCard {
    fn from(dto: GiftCardDto) -> Self {
        Self {
            id: dto.id,
            purchased_with_order_item_id: dto.purchased_with_order_item_id,
            gift_card_type: dto.gift_card_type,
            amount: dto.amount,
            is_gift_card_activated: dto.is_gift_card_activated,
            gift_card_coupon_code: dto.gift_card_coupon_code,
            recipient_name: dto.recipient_name,
            recipient_email: dto.recipient_email,
            sender_name: dto.sender_name,
            sender_email: dto.sender_email,
            message: dto.message,
            is_recipient_notified: dto.is_recipient_notified,
            created_on_utc: dto.created_on_utc,
        }
    }
}

/// Gift card redemption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftCardUsageHistoryDto {
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

impl From<&GiftCardUsageHistory> for GiftCardUsageHistoryDto {
    fn from(u: &GiftCardUsageHistory) -> Self {
        Self {
            id: u.id,
            gift_card_id: u.gift_card_id,
            used_with_order_id: u.used_with_order_id,
            used_value: u.used_value,
            created_on_utc: u.created_on_utc,
        }
    }
}

/// Balance left on a gift card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingAmountDto {
    /// Gift card
    pub gift_card_id: i32,
    /// Amount minus all recorded usage
    pub remaining_amount: Money,
}

/// Return request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnRequestDto {
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
    /// Numeric code of `return_request_status`
    pub return_request_status_id: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

impl From<&ReturnRequest> for ReturnRequestDto {
    fn from(r: &ReturnRequest) -> Self {
        Self {
            id: r.id,
            custom_number: r.custom_number.clone(),
            store_id: r.store_id,
            order_item_id: r.order_item_id,
            customer_id: r.customer_id,
            quantity: r.quantity,
            returned_quantity: r.returned_quantity,
            reason_for_return: r.reason_for_return.clone(),
            requested_action: r.requested_action.clone(),
            customer_comments: r.customer_comments.clone(),
            staff_notes: r.staff_notes.clone(),
            return_request_status: r.return_request_status,
            return_request_status_id: r.return_request_status.code(),
            created_on_utc: r.created_on_utc,
            updated_on_utc: r.updated_on_utc,
        }
    }
}

/// Body of `PUT /return-requests/{id}/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReturnRequestStatusRequest {
    /// Numeric status code
    pub status_id: i32,
    /// Quantity received back
    #[serde(default)]
    pub returned_quantity: Option<i32>,
    /// Staff notes
    #[serde(default)]
    pub staff_notes: Option<String>,
}

/// Cart line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCartItemDto {
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

impl From<&ShoppingCartItem> for ShoppingCartItemDto {
    fn from(i: &ShoppingCartItem) -> Self {
        Self {
            id: i.id,
            store_id: i.store_id,
            shopping_cart_type: i.shopping_cart_type,
            customer_id: i.customer_id,
            product_id: i.product_id,
            attributes: i.attributes.clone(),
            customer_entered_price: i.customer_entered_price,
            quantity: i.quantity,
            created_on_utc: i.created_on_utc,
            updated_on_utc: i.updated_on_utc,
        }
    }
}

/// A cart plus the warnings of the mutation that produced it.
///
/// Empty `warnings` means the mutation succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingCartDto {
    /// Cart owner
    pub customer_id: i32,
    /// Cart or wishlist
    pub cart_type: ShoppingCartType,
    /// Lines after the mutation
    pub items: Vec<ShoppingCartItemDto>,
    /// Why the mutation was refused, empty on success
    pub warnings: Vec<String>,
}

/// Body of `POST /shopping-carts/{customer_id}/items`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    /// Product
    pub product_id: i32,
    /// Units to add, merged into an existing line for the same product
    pub quantity: i32,
    /// Cart or wishlist, the cart by default
    #[serde(default)]
    pub cart_type: ShoppingCartType,
    /// Price entered by the customer (for "enter your price" products)
    #[serde(default)]
    pub customer_entered_price: Money,
}

/// Body of `PUT /shopping-cart-items/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    /// New quantity for the line
    pub quantity: i32,
}

/// Warnings returned by a reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarningsDto {
    /// Lines that could not be re-added, empty when all were
    pub warnings: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_dto_carries_status_codes() {
        let order = Order {
            id: 12,
            order_status: OrderStatus::Processing,
            payment_status: PaymentStatus::Paid,
            shipping_status: ShippingStatus::Shipped,
            order_total: Money::from_cents(4_200),
            ..Order::default()
        };

        let dto = OrderDto::from(&order);
        assert_eq!(dto.order_status_id, 20);
        assert_eq!(dto.payment_status_id, 30);
        assert_eq!(dto.shipping_status_id, 30);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["order_status"], "Processing");
        assert_eq!(json["order_total"], 4_200);
    }

    #[test]
    fn test_add_to_cart_defaults() {
        let request: AddToCartRequest =
            serde_json::from_str(r#"{"product_id":3,"quantity":2}"#).unwrap();
        assert_eq!(request.cart_type, ShoppingCartType::ShoppingCart);
        assert_eq!(request.customer_entered_price, Money::ZERO);
    }

    #[test]
    fn test_return_request_status_id() {
        let request = ReturnRequest {
            return_request_status: ReturnRequestStatus::ReturnAuthorized,
            ..ReturnRequest::default()
        };
        assert_eq!(ReturnRequestDto::from(&request).return_request_status_id, 20);
    }
}
