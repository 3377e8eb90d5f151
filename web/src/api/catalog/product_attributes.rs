//! Product attribute endpoints.

use crate::dto::catalog::ProductAttributeDto;
use crate::dto::PagedListDto;
use crate::error::AppError;
use crate::extractors::{require_non_blank, ApiJson, ApiQuery, EntityId, PageQuery};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use commerce_api_core::catalog::ProductAttribute;

/// Product attribute routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/product-attributes",
            get(list_product_attributes).post(create_product_attribute),
        )
        .route(
            "/product-attributes/:id",
            get(get_product_attribute)
                .put(update_product_attribute)
                .delete(delete_product_attribute),
        )
}

async fn load_attribute(state: &AppState, id: EntityId) -> Result<ProductAttribute, AppError> {
    state
        .product_attributes
        .get_product_attribute_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Product attribute", id))
}

/// List product attributes.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/product-attributes?page_index=0&page_size=20
/// ```
pub async fn list_product_attributes(
    State(state): State<AppState>,
    ApiQuery(paging): ApiQuery<PageQuery>,
) -> Result<Json<PagedListDto<ProductAttributeDto>>, AppError> {
    let attributes = state
        .product_attributes
        .get_all_product_attributes(paging.page())
        .await?;
    Ok(Json(PagedListDto::from(&attributes)))
}

/// Get a product attribute.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/product-attributes/:id
/// ```
pub async fn get_product_attribute(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<ProductAttributeDto>, AppError> {
    let attribute = load_attribute(&state, id).await?;
    Ok(Json(ProductAttributeDto::from(&attribute)))
}

/// Create a product attribute.
#[tracing::instrument(skip_all)]
pub async fn create_product_attribute(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductAttributeDto>,
) -> Result<(StatusCode, Json<ProductAttributeDto>), AppError> {
    require_non_blank("name", &body.name)?;
    let attribute = ProductAttribute {
        id: 0,
        ..ProductAttribute::from(body)
    };
    let created = state
        .product_attributes
        .insert_product_attribute(attribute)
        .await?;
    Ok((StatusCode::CREATED, Json(ProductAttributeDto::from(&created))))
}

/// Update a product attribute.
#[tracing::instrument(skip_all, fields(product_attribute_id = %id))]
pub async fn update_product_attribute(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<ProductAttributeDto>,
) -> Result<Json<ProductAttributeDto>, AppError> {
    require_non_blank("name", &body.name)?;
    let existing = load_attribute(&state, id).await?;
    let attribute = ProductAttribute {
        id: existing.id,
        ..ProductAttribute::from(body)
    };
    let updated = state
        .product_attributes
        .update_product_attribute(attribute)
        .await?;
    Ok(Json(ProductAttributeDto::from(&updated)))
}

/// Delete a product attribute.
#[tracing::instrument(skip_all, fields(product_attribute_id = %id))]
pub async fn delete_product_attribute(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let attribute = load_attribute(&state, id).await?;
    state
        .product_attributes
        .delete_product_attribute(&attribute)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
