//! Order endpoints.
//!
//! - GET /orders - Search orders (paged)
//! - GET /orders/by-ids?ids=1;2 - Fetch several orders
//! - GET /orders/by-guid/:guid - Lookup by order GUID
//! - GET /orders/by-custom-number/:number - Lookup by custom order number
//! - GET /orders/:id - Order details
//! - GET /orders/:id/items - Order lines
//! - POST /orders - Place an order from the customer's cart
//! - POST /orders/:id/cancel - Cancel
//! - POST /orders/:id/mark-as-paid - Mark as paid
//! - POST /orders/:id/reorder - Copy the order lines back into the cart
//! - DELETE /orders/:id - Delete

use crate::dto::orders::{OrderDto, OrderItemDto, PlaceOrderRequestDto, WarningsDto};
use crate::dto::{map_all, PagedListDto};
use crate::error::AppError;
use crate::extractors::{
    page_request, require_non_blank, require_positive, ApiJson, ApiQuery, CorrelationId,
    EntityId, IdsQuery, NotifyQuery,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use commerce_api_core::orders::{
    Order, OrderSearch, OrderStatus, PaymentStatus, PlaceOrderRequest, ShippingStatus,
    UnknownStatus,
};
use commerce_api_core::{parse_id_list, DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// Query parameters for searching orders.
#[derive(Debug, Default, Deserialize)]
pub struct SearchOrdersQuery {
    /// Customer filter
    pub customer_id: Option<i32>,
    /// Store filter
    pub store_id: Option<i32>,
    /// `;`-separated order status codes
    pub order_status_ids: Option<String>,
    /// `;`-separated payment status codes
    pub payment_status_ids: Option<String>,
    /// `;`-separated shipping status codes
    pub shipping_status_ids: Option<String>,
    /// Created at or after (RFC 3339)
    pub created_from_utc: Option<DateTime<Utc>>,
    /// Created at or before (RFC 3339)
    pub created_to_utc: Option<DateTime<Utc>>,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

/// Parse a `;`-separated list of status codes.
///
/// A missing or blank list means "no filter".
pub(crate) fn parse_statuses<S>(raw: Option<&str>) -> Result<Vec<S>, AppError>
where
    S: TryFrom<i32, Error = UnknownStatus>,
{
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(Vec::new());
    };
    parse_id_list(raw)?
        .into_iter()
        .map(|code| S::try_from(code).map_err(|e| AppError::bad_request(e.to_string())))
        .collect()
}

impl SearchOrdersQuery {
    fn to_search(&self) -> Result<OrderSearch, AppError> {
        if let (Some(from), Some(to)) = (self.created_from_utc, self.created_to_utc) {
            if from > to {
                return Err(AppError::bad_request(
                    "created_from_utc must not be after created_to_utc",
                ));
            }
        }
        Ok(OrderSearch {
            customer_id: self.customer_id,
            store_id: self.store_id,
            order_statuses: parse_statuses::<OrderStatus>(self.order_status_ids.as_deref())?,
            payment_statuses: parse_statuses::<PaymentStatus>(self.payment_status_ids.as_deref())?,
            shipping_statuses: parse_statuses::<ShippingStatus>(
                self.shipping_status_ids.as_deref(),
            )?,
            created_from_utc: self.created_from_utc,
            created_to_utc: self.created_to_utc,
        })
    }
}

/// Order routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(search_orders).post(place_order))
        .route("/orders/by-ids", get(get_orders_by_ids))
        .route("/orders/by-guid/:guid", get(get_order_by_guid))
        .route("/orders/by-custom-number/:number", get(get_order_by_custom_number))
        .route("/orders/:id", get(get_order).delete(delete_order))
        .route("/orders/:id/items", get(get_order_items))
        .route("/orders/:id/cancel", post(cancel_order))
        .route("/orders/:id/mark-as-paid", post(mark_order_as_paid))
        .route("/orders/:id/reorder", post(reorder))
}

pub(crate) async fn load_order(state: &AppState, id: EntityId) -> Result<Order, AppError> {
    state
        .orders
        .get_order_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Order", id))
}

/// Search orders.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders?customer_id=1&order_status_ids=10;20&page_index=0
/// ```
pub async fn search_orders(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchOrdersQuery>,
) -> Result<Json<PagedListDto<OrderDto>>, AppError> {
    let search = query.to_search()?;
    let page = page_request(query.page_index, query.page_size);
    let orders = state.orders.search_orders(&search, page).await?;
    Ok(Json(PagedListDto::from(&orders)))
}

/// Fetch several orders by id.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/by-ids?ids=1;2
/// ```
pub async fn get_orders_by_ids(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdsQuery>,
) -> Result<Json<Vec<OrderDto>>, AppError> {
    let ids = query.parse()?;
    let orders = state.orders.get_orders_by_ids(&ids).await?;
    Ok(Json(map_all(&orders)))
}

/// Lookup an order by GUID.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/by-guid/:guid
/// ```
pub async fn get_order_by_guid(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<OrderDto>, AppError> {
    let guid = Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::bad_request(format!("'{raw}' is not a valid GUID")))?;
    if guid.is_nil() {
        return Err(AppError::bad_request("guid must not be empty"));
    }
    let order = state
        .orders
        .get_order_by_guid(guid)
        .await?
        .ok_or_else(|| AppError::not_found_by("Order", "guid", guid))?;
    Ok(Json(OrderDto::from(&order)))
}

/// Lookup an order by its custom order number.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/by-custom-number/:number
/// ```
pub async fn get_order_by_custom_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<OrderDto>, AppError> {
    let number = require_non_blank("custom order number", &number)?;
    let order = state
        .orders
        .get_order_by_custom_order_number(number)
        .await?
        .ok_or_else(|| AppError::not_found_by("Order", "custom number", number))?;
    Ok(Json(OrderDto::from(&order)))
}

/// Get an order.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/:id
/// ```
pub async fn get_order(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<OrderDto>, AppError> {
    let order = load_order(&state, id).await?;
    Ok(Json(OrderDto::from(&order)))
}

/// Lines of an order.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/:id/items
/// ```
pub async fn get_order_items(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<OrderItemDto>>, AppError> {
    let order = load_order(&state, id).await?;
    let items = state.orders.get_order_items(order.id).await?;
    Ok(Json(map_all(&items)))
}

/// Place an order from the customer's shopping cart.
///
/// Responds `201 Created` with the order, or `400 Bad Request` listing the
/// reasons the order could not be placed.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/orders
/// {"customer_id": 1, "store_id": 1, "payment_method_system_name": "Payments.CheckMoneyOrder"}
/// ```
#[tracing::instrument(skip_all, fields(correlation_id = %correlation_id.0))]
pub async fn place_order(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    ApiJson(body): ApiJson<PlaceOrderRequestDto>,
) -> Result<(StatusCode, Json<OrderDto>), AppError> {
    let customer_id = require_positive("customer_id", body.customer_id)?;
    let request = PlaceOrderRequest {
        customer_id,
        store_id: body.store_id,
        payment_method_system_name: body
            .payment_method_system_name
            .filter(|name| !name.trim().is_empty()),
    };

    let result = state.order_processing.place_order(&request).await?;
    match result.placed_order {
        Some(order) if result.errors.is_empty() => {
            tracing::info!(customer_id, order_id = order.id, "Order placed");
            Ok((StatusCode::CREATED, Json(OrderDto::from(&order))))
        }
        _ => {
            tracing::info!(customer_id, errors = ?result.errors, "Order was not placed");
            Err(AppError::bad_request(placement_failure_message(&result.errors)))
        }
    }
}

/// The 400 message for an order that was not placed.
fn placement_failure_message(errors: &[String]) -> String {
    let message = errors
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    if message.is_empty() {
        "Order could not be placed".to_string()
    } else {
        message
    }
}

/// Cancel an order.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/orders/:id/cancel?notify_customer=true
/// ```
#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn cancel_order(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<NotifyQuery>,
) -> Result<Json<OrderDto>, AppError> {
    let order = load_order(&state, id).await?;
    if !state.order_processing.can_cancel_order(&order) {
        return Err(AppError::bad_request(format!("Order {id} cannot be cancelled")));
    }
    state
        .order_processing
        .cancel_order(&order, query.notify_customer)
        .await?;
    tracing::info!("Order cancelled");

    let order = load_order(&state, id).await?;
    Ok(Json(OrderDto::from(&order)))
}

/// Mark an order as paid.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/orders/:id/mark-as-paid
/// ```
#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn mark_order_as_paid(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<OrderDto>, AppError> {
    let order = load_order(&state, id).await?;
    if !state.order_processing.can_mark_order_as_paid(&order) {
        return Err(AppError::bad_request(format!(
            "Order {id} cannot be marked as paid"
        )));
    }
    state.order_processing.mark_order_as_paid(&order).await?;
    tracing::info!("Order marked as paid");

    let order = load_order(&state, id).await?;
    Ok(Json(OrderDto::from(&order)))
}

/// Copy the lines of an order back into the customer's cart.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/orders/:id/reorder
/// ```
#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn reorder(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<WarningsDto>, AppError> {
    let order = load_order(&state, id).await?;
    let warnings = state.order_processing.reorder(&order).await?;
    Ok(Json(WarningsDto { warnings }))
}

/// Delete an order.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/v1/orders/:id
/// ```
#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn delete_order(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let order = load_order(&state, id).await?;
    state.orders.delete_order(&order).await?;
    tracing::info!("Order deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_failure_message() {
        assert_eq!(placement_failure_message(&[]), "Order could not be placed");
        assert_eq!(placement_failure_message(&[" ".to_string()]), "Order could not be placed");
        assert_eq!(
            placement_failure_message(&["Cart is empty".to_string(), "No payment method".to_string()]),
            "Cart is empty; No payment method"
        );
    }

    #[test]
    fn test_parse_statuses() {
        let statuses: Vec<OrderStatus> = parse_statuses(Some("10; 40")).unwrap();
        assert_eq!(statuses, vec![OrderStatus::Pending, OrderStatus::Cancelled]);

        let none: Vec<PaymentStatus> = parse_statuses(Some("  ")).unwrap();
        assert!(none.is_empty());

        let err = parse_statuses::<ShippingStatus>(Some("20;99")).unwrap_err();
        assert_eq!(err.message(), "unknown shipping status code 99");
    }

    #[test]
    fn test_search_rejects_inverted_range() {
        let query = SearchOrdersQuery {
            created_from_utc: Some(Utc::now()),
            created_to_utc: Some(Utc::now() - chrono::Duration::days(1)),
            ..SearchOrdersQuery::default()
        };
        assert!(query.to_search().is_err());
    }
}
