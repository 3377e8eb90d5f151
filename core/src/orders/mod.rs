//! Order subsystem: orders, notes, shipments, gift cards, returns and carts.

mod services;
mod status;
mod types;

pub use services::{
    GiftCardService, OrderProcessingService, OrderService, ReturnRequestService,
    ShipmentService, ShoppingCartService,
};
pub use status::{
    OrderStatus, PaymentStatus, ReturnRequestStatus, ShippingStatus, UnknownStatus,
};
pub use types::{
    GiftCard, GiftCardFilter, GiftCardType, GiftCardUsageHistory, Order, OrderItem, OrderNote,
    OrderSearch, PlaceOrderRequest, PlaceOrderResult, ReturnRequest, ReturnRequestFilter,
    Shipment, ShipmentItem, ShoppingCartItem, ShoppingCartType,
};
