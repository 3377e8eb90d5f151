//! Shipment endpoints.
//!
//! - GET /orders/:id/shipments - Shipments of an order
//! - GET /shipments/:id - Shipment details
//! - GET /shipments/:id/items - Shipment lines
//! - POST /shipments/:id/ship - Mark as shipped
//! - POST /shipments/:id/deliver - Mark as delivered

use super::orders::load_order;
use crate::dto::map_all;
use crate::dto::orders::{ShipmentDto, ShipmentItemDto};
use crate::error::AppError;
use crate::extractors::{ApiQuery, EntityId, NotifyQuery};
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use commerce_api_core::orders::Shipment;

/// Shipment routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id/shipments", get(get_order_shipments))
        .route("/shipments/:id", get(get_shipment))
        .route("/shipments/:id/items", get(get_shipment_items))
        .route("/shipments/:id/ship", post(ship))
        .route("/shipments/:id/deliver", post(deliver))
}

async fn load_shipment(state: &AppState, id: EntityId) -> Result<Shipment, AppError> {
    state
        .shipments
        .get_shipment_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Shipment", id))
}

/// Shipments of an order.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/:id/shipments
/// ```
pub async fn get_order_shipments(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<ShipmentDto>>, AppError> {
    let order = load_order(&state, id).await?;
    let shipments = state.shipments.get_shipments_by_order_id(order.id).await?;
    Ok(Json(map_all(&shipments)))
}

/// Get a shipment.
pub async fn get_shipment(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<ShipmentDto>, AppError> {
    let shipment = load_shipment(&state, id).await?;
    Ok(Json(ShipmentDto::from(&shipment)))
}

/// Lines of a shipment.
pub async fn get_shipment_items(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<ShipmentItemDto>>, AppError> {
    let shipment = load_shipment(&state, id).await?;
    let items = state
        .shipments
        .get_shipment_items_by_shipment_id(shipment.id)
        .await?;
    Ok(Json(map_all(&items)))
}

/// Mark a shipment as shipped.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/shipments/:id/ship?notify_customer=true
/// ```
#[tracing::instrument(skip_all, fields(shipment_id = %id))]
pub async fn ship(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<NotifyQuery>,
) -> Result<Json<ShipmentDto>, AppError> {
    let shipment = load_shipment(&state, id).await?;
    state
        .order_processing
        .ship(&shipment, query.notify_customer)
        .await?;
    tracing::info!(order_id = shipment.order_id, "Shipment sent");

    let shipment = load_shipment(&state, id).await?;
    Ok(Json(ShipmentDto::from(&shipment)))
}

/// Mark a shipment as delivered.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/shipments/:id/deliver?notify_customer=true
/// ```
#[tracing::instrument(skip_all, fields(shipment_id = %id))]
pub async fn deliver(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<NotifyQuery>,
) -> Result<Json<ShipmentDto>, AppError> {
    let shipment = load_shipment(&state, id).await?;
    state
        .order_processing
        .deliver(&shipment, query.notify_customer)
        .await?;
    tracing::info!(order_id = shipment.order_id, "Shipment delivered");

    let shipment = load_shipment(&state, id).await?;
    Ok(Json(ShipmentDto::from(&shipment)))
}
