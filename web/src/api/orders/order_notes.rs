//! Order note endpoints.
//!
//! - GET /orders/:id/notes - Notes of an order
//! - POST /orders/:id/notes - Add a note
//! - DELETE /order-notes/:id - Delete a note

use super::orders::load_order;
use crate::dto::map_all;
use crate::dto::orders::{CreateOrderNoteRequest, OrderNoteDto};
use crate::error::AppError;
use crate::extractors::{require_non_blank, ApiJson, EntityId};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use commerce_api_core::orders::OrderNote;

/// Order note routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/:id/notes", get(get_order_notes).post(create_order_note))
        .route("/order-notes/:id", delete(delete_order_note))
}

/// Notes of an order, oldest first.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/orders/:id/notes
/// ```
pub async fn get_order_notes(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<OrderNoteDto>>, AppError> {
    let order = load_order(&state, id).await?;
    let notes = state.orders.get_order_notes(order.id).await?;
    Ok(Json(map_all(&notes)))
}

/// Add a note to an order.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/orders/:id/notes
/// {"note": "Called the customer", "display_to_customer": false}
/// ```
#[tracing::instrument(skip_all, fields(order_id = %id))]
pub async fn create_order_note(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<CreateOrderNoteRequest>,
) -> Result<(StatusCode, Json<OrderNoteDto>), AppError> {
    let text = require_non_blank("note", &body.note)?;
    let order = load_order(&state, id).await?;

    let note = OrderNote {
        order_id: order.id,
        note: text.to_string(),
        display_to_customer: body.display_to_customer,
        ..OrderNote::default()
    };
    let created = state.orders.insert_order_note(note).await?;
    tracing::info!(note_id = created.id, "Order note added");

    Ok((StatusCode::CREATED, Json(OrderNoteDto::from(&created))))
}

/// Delete an order note.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/v1/order-notes/:id
/// ```
#[tracing::instrument(skip_all, fields(note_id = %id))]
pub async fn delete_order_note(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let note = state
        .orders
        .get_order_note_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Order note", id))?;
    state.orders.delete_order_note(&note).await?;
    Ok(StatusCode::NO_CONTENT)
}
