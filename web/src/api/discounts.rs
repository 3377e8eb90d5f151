//! Discount endpoints.
//!
//! - GET /discounts - List discounts (`discount_type`, `coupon_code`, `name`, `show_hidden`)
//! - GET /discounts/by-coupon/:code - Discount carrying a coupon code
//! - GET /discounts/:id - Discount details
//! - GET /discounts/:id/requirements - Requirement tree (`top_level_only`)
//! - GET /discounts/:id/usage-history - Orders the discount was applied to (paged)
//! - POST /discounts/:id/validate - Check a discount for a customer and coupon codes
//! - POST /discounts - Create
//! - PUT /discounts/:id - Update
//! - DELETE /discounts/:id - Delete

use crate::dto::discounts::{
    DiscountDto, DiscountRequirementDto, DiscountUsageHistoryDto, DiscountValidationDto,
};
use crate::dto::{map_all, PagedListDto};
use crate::error::AppError;
use crate::extractors::{
    page_request, require_non_blank, require_positive, ApiJson, ApiQuery, EntityId,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use commerce_api_core::discounts::{Discount, DiscountFilter, DiscountType};
use commerce_api_core::id_list::split_codes;
use serde::Deserialize;

/// Query parameters for listing discounts.
#[derive(Debug, Default, Deserialize)]
pub struct ListDiscountsQuery {
    /// Discount type filter
    pub discount_type: Option<DiscountType>,
    /// Exact coupon code (case-insensitive)
    pub coupon_code: Option<String>,
    /// Name filter (substring, case-insensitive)
    pub name: Option<String>,
    /// Include inactive and out-of-date discounts
    #[serde(default)]
    pub show_hidden: bool,
}

/// `?top_level_only=true`
#[derive(Debug, Default, Deserialize)]
pub struct RequirementsQuery {
    /// Only requirements without a parent group
    #[serde(default)]
    pub top_level_only: bool,
}

/// Query parameters for the usage history.
#[derive(Debug, Default, Deserialize)]
pub struct UsageHistoryQuery {
    /// Order filter
    pub order_id: Option<i32>,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

/// Query parameters for discount validation.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateDiscountQuery {
    /// Customer the discount is checked for
    #[serde(default)]
    pub customer_id: i32,
    /// `;`-separated coupon codes the customer entered
    #[serde(default)]
    pub coupon_codes: String,
}

/// Discount routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/discounts", get(list_discounts).post(create_discount))
        .route("/discounts/by-coupon/:code", get(get_discount_by_coupon))
        .route(
            "/discounts/:id",
            get(get_discount).put(update_discount).delete(delete_discount),
        )
        .route("/discounts/:id/requirements", get(get_discount_requirements))
        .route("/discounts/:id/usage-history", get(get_discount_usage_history))
        .route("/discounts/:id/validate", post(validate_discount))
}

async fn load_discount(state: &AppState, id: EntityId) -> Result<Discount, AppError> {
    state
        .discounts
        .get_discount_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Discount", id))
}

fn validate_body(body: &DiscountDto) -> Result<(), AppError> {
    require_non_blank("name", &body.name)?;
    if body.requires_coupon_code
        && body.coupon_code.as_deref().is_none_or(|c| c.trim().is_empty())
    {
        return Err(AppError::bad_request(
            "coupon_code is required when requires_coupon_code is set",
        ));
    }
    if body.use_percentage && !(0.0..=100.0).contains(&body.discount_percentage) {
        return Err(AppError::bad_request("discount_percentage must be between 0 and 100"));
    }
    if body.discount_amount.is_negative() {
        return Err(AppError::bad_request("discount_amount must not be negative"));
    }
    if let (Some(start), Some(end)) = (body.start_date_utc, body.end_date_utc) {
        if start > end {
            return Err(AppError::bad_request("start_date_utc must not be after end_date_utc"));
        }
    }
    Ok(())
}

/// List discounts.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/discounts?discount_type=AssignedToOrderTotal&show_hidden=true
/// ```
pub async fn list_discounts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListDiscountsQuery>,
) -> Result<Json<Vec<DiscountDto>>, AppError> {
    let filter = DiscountFilter {
        discount_type: query.discount_type,
        coupon_code: query.coupon_code.filter(|c| !c.trim().is_empty()),
        name: query.name,
        show_hidden: query.show_hidden,
    };
    let discounts = state.discounts.get_all_discounts(&filter).await?;
    Ok(Json(map_all(&discounts)))
}

/// Find the discount carrying a coupon code.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/discounts/by-coupon/:code
/// ```
pub async fn get_discount_by_coupon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<DiscountDto>, AppError> {
    let code = require_non_blank("coupon code", &code)?;
    let filter = DiscountFilter {
        coupon_code: Some(code.to_string()),
        show_hidden: true,
        ..DiscountFilter::default()
    };
    let discount = state
        .discounts
        .get_all_discounts(&filter)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found_by("Discount", "coupon code", code))?;
    Ok(Json(DiscountDto::from(&discount)))
}

/// Get a discount.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/discounts/:id
/// ```
pub async fn get_discount(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<DiscountDto>, AppError> {
    let discount = load_discount(&state, id).await?;
    Ok(Json(DiscountDto::from(&discount)))
}

/// Requirements of a discount.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/discounts/:id/requirements?top_level_only=true
/// ```
pub async fn get_discount_requirements(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<RequirementsQuery>,
) -> Result<Json<Vec<DiscountRequirementDto>>, AppError> {
    let discount = load_discount(&state, id).await?;
    let requirements = state
        .discounts
        .get_all_discount_requirements(discount.id, query.top_level_only)
        .await?;
    Ok(Json(map_all(&requirements)))
}

/// Usage history of a discount.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/discounts/:id/usage-history?order_id=12&page_index=0
/// ```
pub async fn get_discount_usage_history(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<UsageHistoryQuery>,
) -> Result<Json<PagedListDto<DiscountUsageHistoryDto>>, AppError> {
    let order_id = query
        .order_id
        .map(|o| require_positive("order_id", o))
        .transpose()?;
    let discount = load_discount(&state, id).await?;
    let page = page_request(query.page_index, query.page_size);
    let history = state
        .discounts
        .get_all_discount_usage_history(Some(discount.id), order_id, page)
        .await?;
    Ok(Json(PagedListDto::from(&history)))
}

/// Check whether a discount applies.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/discounts/:id/validate?customer_id=7&coupon_codes=SAVE10;WELCOME
/// ```
#[tracing::instrument(skip_all, fields(discount_id = %id))]
pub async fn validate_discount(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<ValidateDiscountQuery>,
) -> Result<Json<DiscountValidationDto>, AppError> {
    let customer_id = require_positive("customer_id", query.customer_id)?;
    let coupon_codes = split_codes(&query.coupon_codes);
    let discount = load_discount(&state, id).await?;

    let result = state
        .discounts
        .validate_discount(&discount, customer_id, &coupon_codes)
        .await?;
    tracing::debug!(customer_id, is_valid = result.is_valid, "Discount validated");
    Ok(Json(DiscountValidationDto::new(discount.id, customer_id, &result)))
}

/// Create a discount.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/discounts
/// {"name": "Welcome", "use_percentage": true, "discount_percentage": 5.0, "is_active": true}
/// ```
#[tracing::instrument(skip_all)]
pub async fn create_discount(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<DiscountDto>,
) -> Result<(StatusCode, Json<DiscountDto>), AppError> {
    validate_body(&body)?;
    let discount = Discount {
        id: 0,
        ..Discount::from(body)
    };
    let created = state.discounts.insert_discount(discount).await?;
    tracing::info!(discount_id = created.id, "Discount created");
    Ok((StatusCode::CREATED, Json(DiscountDto::from(&created))))
}

/// Update a discount.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/discounts/:id
/// ```
#[tracing::instrument(skip_all, fields(discount_id = %id))]
pub async fn update_discount(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<DiscountDto>,
) -> Result<Json<DiscountDto>, AppError> {
    validate_body(&body)?;
    let existing = load_discount(&state, id).await?;
    let discount = Discount {
        id: existing.id,
        ..Discount::from(body)
    };
    let updated = state.discounts.update_discount(discount).await?;
    Ok(Json(DiscountDto::from(&updated)))
}

/// Delete a discount.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/v1/discounts/:id
/// ```
#[tracing::instrument(skip_all, fields(discount_id = %id))]
pub async fn delete_discount(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let discount = load_discount(&state, id).await?;
    state.discounts.delete_discount(&discount).await?;
    Ok(StatusCode::NO_CONTENT)
}
