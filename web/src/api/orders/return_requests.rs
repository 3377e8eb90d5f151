//! Return request endpoints.
//!
//! - GET /return-requests - Search return requests (paged)
//! - GET /return-requests/:id - Return request details
//! - PUT /return-requests/:id/status - Move to another status
//! - DELETE /return-requests/:id - Delete

use crate::dto::orders::{ReturnRequestDto, UpdateReturnRequestStatusRequest};
use crate::dto::PagedListDto;
use crate::error::AppError;
use crate::extractors::{page_request, ApiJson, ApiQuery, EntityId};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use commerce_api_core::orders::{ReturnRequest, ReturnRequestFilter, ReturnRequestStatus};
use serde::Deserialize;

/// Query parameters for searching return requests.
#[derive(Debug, Default, Deserialize)]
pub struct SearchReturnRequestsQuery {
    /// Customer filter
    pub customer_id: Option<i32>,
    /// Order line filter
    pub order_item_id: Option<i32>,
    /// Numeric status code
    pub status_id: Option<i32>,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

fn parse_status(code: i32) -> Result<ReturnRequestStatus, AppError> {
    ReturnRequestStatus::try_from(code).map_err(|e| AppError::bad_request(e.to_string()))
}

/// Apply a status change to a stored request.
fn apply_status_change(
    mut request: ReturnRequest,
    change: UpdateReturnRequestStatusRequest,
) -> Result<ReturnRequest, AppError> {
    request.return_request_status = parse_status(change.status_id)?;

    if let Some(returned) = change.returned_quantity {
        if !(0..=request.quantity).contains(&returned) {
            return Err(AppError::bad_request(format!(
                "returned_quantity must be between 0 and {}",
                request.quantity
            )));
        }
        request.returned_quantity = returned;
    }
    if let Some(notes) = change.staff_notes {
        request.staff_notes = Some(notes).filter(|n| !n.trim().is_empty());
    }
    Ok(request)
}

/// Return request routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/return-requests", get(search_return_requests))
        .route(
            "/return-requests/:id",
            get(get_return_request).delete(delete_return_request),
        )
        .route("/return-requests/:id/status", put(update_return_request_status))
}

async fn load_return_request(state: &AppState, id: EntityId) -> Result<ReturnRequest, AppError> {
    state
        .return_requests
        .get_return_request_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Return request", id))
}

/// Search return requests.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/return-requests?customer_id=2&status_id=0
/// ```
pub async fn search_return_requests(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchReturnRequestsQuery>,
) -> Result<Json<PagedListDto<ReturnRequestDto>>, AppError> {
    let filter = ReturnRequestFilter {
        customer_id: query.customer_id,
        order_item_id: query.order_item_id,
        status: query.status_id.map(parse_status).transpose()?,
    };
    let page = page_request(query.page_index, query.page_size);
    let requests = state
        .return_requests
        .search_return_requests(&filter, page)
        .await?;
    Ok(Json(PagedListDto::from(&requests)))
}

/// Get a return request.
pub async fn get_return_request(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<ReturnRequestDto>, AppError> {
    let request = load_return_request(&state, id).await?;
    Ok(Json(ReturnRequestDto::from(&request)))
}

/// Move a return request to another status.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/return-requests/:id/status
/// {"status_id": 10, "returned_quantity": 1, "staff_notes": "Box received"}
/// ```
#[tracing::instrument(skip_all, fields(return_request_id = %id))]
pub async fn update_return_request_status(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<UpdateReturnRequestStatusRequest>,
) -> Result<Json<ReturnRequestDto>, AppError> {
    let existing = load_return_request(&state, id).await?;
    let previous = existing.return_request_status;
    let request = apply_status_change(existing, body)?;

    let updated = state.return_requests.update_return_request(request).await?;
    tracing::info!(
        from = ?previous,
        to = ?updated.return_request_status,
        "Return request status changed"
    );
    Ok(Json(ReturnRequestDto::from(&updated)))
}

/// Delete a return request.
#[tracing::instrument(skip_all, fields(return_request_id = %id))]
pub async fn delete_return_request(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let request = load_return_request(&state, id).await?;
    state.return_requests.delete_return_request(&request).await?;
    Ok(StatusCode::NO_CONTENT)
}
