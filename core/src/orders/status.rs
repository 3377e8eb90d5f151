//! Lifecycle status codes.
//!
//! The numeric codes are the ones persisted by the order services and used in
//! query strings (`?order_status_ids=10;20`).

use serde::{Deserialize, Serialize};

/// A numeric code that matches no status variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownStatus {
    /// Status family
    pub kind: &'static str,
    /// Offending code
    pub code: i32,
}

macro_rules! status_codes {
    ($name:ident, $kind:literal, { $($variant:ident = $code:literal),+ $(,)? }) => {
        impl $name {
            /// Persisted numeric code.
            #[must_use]
            pub const fn code(self) -> i32 {
                match self {
                    $(Self::$variant => $code,)+
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = UnknownStatus;

            fn try_from(code: i32) -> Result<Self, Self::Error> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(UnknownStatus { kind: $kind, code }),
                }
            }
        }
    };
}

/// Order lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet processed
    #[default]
    Pending,
    /// Being fulfilled
    Processing,
    /// Fulfilled
    Complete,
    /// Cancelled
    Cancelled,
}

status_codes!(OrderStatus, "order status", {
    Pending = 10,
    Processing = 20,
    Complete = 30,
    Cancelled = 40,
});

/// Payment lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Not paid
    #[default]
    Pending,
    /// Authorized, not captured
    Authorized,
    /// Paid
    Paid,
    /// Partially refunded
    PartiallyRefunded,
    /// Refunded
    Refunded,
    /// Voided
    Voided,
}

status_codes!(PaymentStatus, "payment status", {
    Pending = 10,
    Authorized = 20,
    Paid = 30,
    PartiallyRefunded = 35,
    Refunded = 40,
    Voided = 50,
});

/// Shipping lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingStatus {
    /// Nothing to ship
    ShippingNotRequired,
    /// Awaiting shipment
    #[default]
    NotYetShipped,
    /// Some shipments sent
    PartiallyShipped,
    /// Everything sent
    Shipped,
    /// Everything delivered
    Delivered,
}

status_codes!(ShippingStatus, "shipping status", {
    ShippingNotRequired = 10,
    NotYetShipped = 20,
    PartiallyShipped = 25,
    Shipped = 30,
    Delivered = 40,
});

/// Return request lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnRequestStatus {
    /// Submitted
    #[default]
    Pending,
    /// Goods received
    Received,
    /// Return authorized
    ReturnAuthorized,
    /// Items repaired
    ItemsRepaired,
    /// Items refunded
    ItemsRefunded,
    /// Rejected
    RequestRejected,
    /// Cancelled by the customer
    Cancelled,
}

status_codes!(ReturnRequestStatus, "return request status", {
    Pending = 0,
    Received = 10,
    ReturnAuthorized = 20,
    ItemsRepaired = 30,
    ItemsRefunded = 40,
    RequestRejected = 50,
    Cancelled = 60,
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Complete,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::try_from(status.code()), Ok(status));
        }
        assert_eq!(PaymentStatus::try_from(35), Ok(PaymentStatus::PartiallyRefunded));
        assert_eq!(ReturnRequestStatus::try_from(0), Ok(ReturnRequestStatus::Pending));
    }

    #[test]
    fn test_unknown_code() {
        let err = ShippingStatus::try_from(11).unwrap_err();
        assert_eq!(err.to_string(), "unknown shipping status code 11");
    }
}
