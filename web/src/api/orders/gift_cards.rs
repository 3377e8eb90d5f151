//! Gift card endpoints.
//!
//! - GET /gift-cards - List gift cards (paged, filtered)
//! - GET /gift-cards/by-coupon/:code - Lookup by coupon code
//! - GET /gift-cards/:id - Gift card details
//! - GET /gift-cards/:id/remaining-amount - Balance left
//! - GET /gift-cards/:id/usage-history - Redemptions
//! - POST /gift-cards - Create
//! - PUT /gift-cards/:id - Update
//! - DELETE /gift-cards/:id - Delete

use crate::dto::orders::{GiftCardDto, GiftCardUsageHistoryDto, RemainingAmountDto};
use crate::dto::{map_all, PagedListDto};
use crate::error::AppError;
use crate::extractors::{page_request, require_non_blank, ApiJson, ApiQuery, EntityId};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use commerce_api_core::orders::{GiftCard, GiftCardFilter};
use commerce_api_core::PageRequest;
use serde::Deserialize;

/// Query parameters for listing gift cards.
#[derive(Debug, Default, Deserialize)]
pub struct ListGiftCardsQuery {
    /// Only cards bought with this order
    pub purchased_with_order_id: Option<i32>,
    /// Exact coupon code (case-insensitive)
    pub coupon_code: Option<String>,
    /// Activation state
    pub is_activated: Option<bool>,
    /// Recipient name substring
    pub recipient_name: Option<String>,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Gift card routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/gift-cards", get(list_gift_cards).post(create_gift_card))
        .route("/gift-cards/by-coupon/:code", get(get_gift_card_by_coupon))
        .route(
            "/gift-cards/:id",
            get(get_gift_card).put(update_gift_card).delete(delete_gift_card),
        )
        .route("/gift-cards/:id/remaining-amount", get(get_remaining_amount))
        .route("/gift-cards/:id/usage-history", get(get_usage_history))
}

async fn load_gift_card(state: &AppState, id: EntityId) -> Result<GiftCard, AppError> {
    state
        .gift_cards
        .get_gift_card_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Gift card", id))
}

fn validate_body(body: &GiftCardDto) -> Result<(), AppError> {
    require_non_blank("gift_card_coupon_code", &body.gift_card_coupon_code)?;
    if body.amount.is_negative() {
        return Err(AppError::bad_request("amount must not be negative"));
    }
    Ok(())
}

/// List gift cards.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/gift-cards?is_activated=true&page_index=0&page_size=20
/// ```
pub async fn list_gift_cards(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListGiftCardsQuery>,
) -> Result<Json<PagedListDto<GiftCardDto>>, AppError> {
    let filter = GiftCardFilter {
        purchased_with_order_id: query.purchased_with_order_id,
        coupon_code: non_blank(query.coupon_code),
        is_activated: query.is_activated,
        recipient_name: non_blank(query.recipient_name),
    };
    let page = page_request(query.page_index, query.page_size);
    let cards = state.gift_cards.get_all_gift_cards(&filter, page).await?;
    Ok(Json(PagedListDto::from(&cards)))
}

/// Lookup a gift card by coupon code.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/gift-cards/by-coupon/:code
/// ```
pub async fn get_gift_card_by_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<GiftCardDto>, AppError> {
    let code = require_non_blank("coupon code", &code)?;
    let filter = GiftCardFilter {
        coupon_code: Some(code.to_string()),
        ..GiftCardFilter::default()
    };
    let cards = state
        .gift_cards
        .get_all_gift_cards(&filter, PageRequest::all())
        .await?;
    let card = cards
        .items()
        .first()
        .ok_or_else(|| AppError::not_found_by("Gift card", "coupon code", code))?;
    Ok(Json(GiftCardDto::from(card)))
}

/// Get a gift card.
pub async fn get_gift_card(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<GiftCardDto>, AppError> {
    let card = load_gift_card(&state, id).await?;
    Ok(Json(GiftCardDto::from(&card)))
}

/// Balance left on a gift card.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/gift-cards/:id/remaining-amount
/// ```
pub async fn get_remaining_amount(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<RemainingAmountDto>, AppError> {
    let card = load_gift_card(&state, id).await?;
    let remaining_amount = state.gift_cards.get_gift_card_remaining_amount(&card).await?;
    Ok(Json(RemainingAmountDto {
        gift_card_id: card.id,
        remaining_amount,
    }))
}

/// Redemptions of a gift card.
pub async fn get_usage_history(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<GiftCardUsageHistoryDto>>, AppError> {
    let card = load_gift_card(&state, id).await?;
    let history = state.gift_cards.get_gift_card_usage_history(&card).await?;
    Ok(Json(map_all(&history)))
}

/// Create a gift card.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/gift-cards
/// {"gift_card_coupon_code": "GIFT-0002", "amount": 2500, "is_gift_card_activated": true}
/// ```
#[tracing::instrument(skip_all)]
pub async fn create_gift_card(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<GiftCardDto>,
) -> Result<(StatusCode, Json<GiftCardDto>), AppError> {
    validate_body(&body)?;
    let card = GiftCard {
        id: 0,
        ..GiftCard::from(body)
    };
    let created = state.gift_cards.insert_gift_card(card).await?;
    tracing::info!(gift_card_id = created.id, "Gift card created");

    Ok((StatusCode::CREATED, Json(GiftCardDto::from(&created))))
}

/// Update a gift card.
#[tracing::instrument(skip_all, fields(gift_card_id = %id))]
pub async fn update_gift_card(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<GiftCardDto>,
) -> Result<Json<GiftCardDto>, AppError> {
    validate_body(&body)?;
    let existing = load_gift_card(&state, id).await?;

    let card = GiftCard {
        id: existing.id,
        created_on_utc: existing.created_on_utc,
        ..GiftCard::from(body)
    };
    let updated = state.gift_cards.update_gift_card(card).await?;
    Ok(Json(GiftCardDto::from(&updated)))
}

/// Delete a gift card.
#[tracing::instrument(skip_all, fields(gift_card_id = %id))]
pub async fn delete_gift_card(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let card = load_gift_card(&state, id).await?;
    state.gift_cards.delete_gift_card(&card).await?;
    tracing::info!("Gift card deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use commerce_api_core::Money;

    #[test]
    fn test_validate_body() {
        let mut body = GiftCardDto {
            gift_card_coupon_code: "GIFT-1".to_string(),
            amount: Money::from_cents(1_000),
            ..GiftCardDto::default()
        };
        assert!(validate_body(&body).is_ok());

        body.amount = Money::from_cents(-1);
        assert_eq!(
            validate_body(&body).map_err(|e| e.message().to_string()),
            Err("amount must not be negative".to_string())
        );

        body.gift_card_coupon_code = "  ".to_string();
        assert!(validate_body(&body).is_err());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" ".to_string())), None);
        assert_eq!(non_blank(Some("Ann".to_string())), Some("Ann".to_string()));
    }
}
