//! Manufacturer endpoints.
//!
//! - GET /manufacturers - List manufacturers (paged, `name`, `show_hidden`)
//! - GET /manufacturers/by-ids?ids=1;2 - Fetch several manufacturers
//! - GET /manufacturers/:id - Manufacturer details
//! - GET /manufacturers/:id/products - Product mappings (paged)
//! - POST /manufacturers - Create
//! - PUT /manufacturers/:id - Update
//! - DELETE /manufacturers/:id - Delete

use super::{NameFilterQuery, ShowHiddenQuery};
use crate::dto::catalog::{ManufacturerDto, ProductManufacturerDto};
use crate::dto::{map_all, PagedListDto};
use crate::error::AppError;
use crate::extractors::{page_request, require_non_blank, ApiJson, ApiQuery, EntityId, IdsQuery};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use commerce_api_core::catalog::{Manufacturer, ManufacturerFilter};

/// Manufacturer routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/manufacturers", get(list_manufacturers).post(create_manufacturer))
        .route("/manufacturers/by-ids", get(get_manufacturers_by_ids))
        .route(
            "/manufacturers/:id",
            get(get_manufacturer)
                .put(update_manufacturer)
                .delete(delete_manufacturer),
        )
        .route("/manufacturers/:id/products", get(get_manufacturer_products))
}

async fn load_manufacturer(state: &AppState, id: EntityId) -> Result<Manufacturer, AppError> {
    state
        .manufacturers
        .get_manufacturer_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Manufacturer", id))
}

/// List manufacturers.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/manufacturers?name=app&page_index=0&page_size=20
/// ```
pub async fn list_manufacturers(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NameFilterQuery>,
) -> Result<Json<PagedListDto<ManufacturerDto>>, AppError> {
    let filter = ManufacturerFilter {
        name: query.name,
        show_hidden: query.show_hidden,
    };
    let page = page_request(query.page_index, query.page_size);
    let manufacturers = state.manufacturers.get_all_manufacturers(&filter, page).await?;
    Ok(Json(PagedListDto::from(&manufacturers)))
}

/// Fetch several manufacturers by id.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/manufacturers/by-ids?ids=1;2
/// ```
pub async fn get_manufacturers_by_ids(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdsQuery>,
) -> Result<Json<Vec<ManufacturerDto>>, AppError> {
    let ids = query.parse()?;
    let manufacturers = state.manufacturers.get_manufacturers_by_ids(&ids).await?;
    Ok(Json(map_all(&manufacturers)))
}

/// Get a manufacturer.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/manufacturers/:id
/// ```
pub async fn get_manufacturer(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<ManufacturerDto>, AppError> {
    let manufacturer = load_manufacturer(&state, id).await?;
    Ok(Json(ManufacturerDto::from(&manufacturer)))
}

/// Products mapped to a manufacturer.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/manufacturers/:id/products?page_index=0
/// ```
pub async fn get_manufacturer_products(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<ShowHiddenQuery>,
) -> Result<Json<PagedListDto<ProductManufacturerDto>>, AppError> {
    let page = page_request(query.page_index, query.page_size);
    let mappings = state
        .manufacturers
        .get_product_manufacturers_by_manufacturer_id(id.get(), query.show_hidden, page)
        .await?;
    Ok(Json(PagedListDto::from(&mappings)))
}

/// Create a manufacturer.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/manufacturers
/// {"name": "Lenovo", "published": true}
/// ```
#[tracing::instrument(skip_all)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ManufacturerDto>,
) -> Result<(StatusCode, Json<ManufacturerDto>), AppError> {
    require_non_blank("name", &body.name)?;
    let manufacturer = Manufacturer {
        id: 0,
        ..Manufacturer::from(body)
    };
    let created = state.manufacturers.insert_manufacturer(manufacturer).await?;
    tracing::info!(manufacturer_id = created.id, "Manufacturer created");
    Ok((StatusCode::CREATED, Json(ManufacturerDto::from(&created))))
}

/// Update a manufacturer.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/manufacturers/:id
/// ```
#[tracing::instrument(skip_all, fields(manufacturer_id = %id))]
pub async fn update_manufacturer(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<ManufacturerDto>,
) -> Result<Json<ManufacturerDto>, AppError> {
    require_non_blank("name", &body.name)?;
    let existing = load_manufacturer(&state, id).await?;
    let manufacturer = Manufacturer {
        id: existing.id,
        created_on_utc: existing.created_on_utc,
        ..Manufacturer::from(body)
    };
    let updated = state.manufacturers.update_manufacturer(manufacturer).await?;
    Ok(Json(ManufacturerDto::from(&updated)))
}

/// Delete a manufacturer.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/v1/manufacturers/:id
/// ```
#[tracing::instrument(skip_all, fields(manufacturer_id = %id))]
pub async fn delete_manufacturer(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let manufacturer = load_manufacturer(&state, id).await?;
    state.manufacturers.delete_manufacturer(&manufacturer).await?;
    Ok(StatusCode::NO_CONTENT)
}
