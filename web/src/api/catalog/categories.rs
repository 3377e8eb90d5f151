//! Category endpoints.
//!
//! - GET /categories - List categories (paged, `name`, `show_hidden`)
//! - GET /categories/by-ids?ids=1;2 - Fetch several categories
//! - GET /categories/:id - Category details
//! - GET /categories/:id/children - Direct children
//! - GET /categories/:id/breadcrumb - Path from the root category
//! - GET /categories/:id/products - Product mappings (paged)
//! - POST /categories - Create
//! - PUT /categories/:id - Update
//! - DELETE /categories/:id - Delete

use super::{NameFilterQuery, ShowHiddenQuery};
use crate::dto::catalog::{CategoryDto, ProductCategoryDto};
use crate::dto::{map_all, PagedListDto};
use crate::error::AppError;
use crate::extractors::{page_request, require_non_blank, ApiJson, ApiQuery, EntityId, IdsQuery};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use commerce_api_core::catalog::{Category, CategoryFilter};

/// Category routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/by-ids", get(get_categories_by_ids))
        .route(
            "/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/categories/:id/children", get(get_child_categories))
        .route("/categories/:id/breadcrumb", get(get_category_breadcrumb))
        .route("/categories/:id/products", get(get_category_products))
}

async fn load_category(state: &AppState, id: EntityId) -> Result<Category, AppError> {
    state
        .categories
        .get_category_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Category", id))
}

/// Check `parent_id` for a category being written. `category_id` is `None`
/// on create. A parent that is the category itself or one of its
/// descendants is refused.
async fn check_parent(
    state: &AppState,
    category_id: Option<i32>,
    parent_id: i32,
) -> Result<(), AppError> {
    if parent_id < 0 {
        return Err(AppError::bad_request("parent_category_id must not be negative"));
    }
    let Some(category_id) = category_id else {
        return Ok(());
    };
    if parent_id == category_id {
        return Err(AppError::bad_request("A category cannot be its own parent"));
    }
    if parent_id == 0 {
        return Ok(());
    }
    let Some(parent) = state.categories.get_category_by_id(parent_id).await? else {
        return Ok(());
    };
    let ancestors = state.categories.get_category_breadcrumb(&parent).await?;
    if ancestors.iter().any(|c| c.id == category_id) {
        return Err(AppError::bad_request(format!(
            "Category {parent_id} is a descendant of category {category_id} and cannot be its parent"
        )));
    }
    Ok(())
}

/// List categories.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/categories?name=comp&show_hidden=false&page_index=0&page_size=20
/// ```
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NameFilterQuery>,
) -> Result<Json<PagedListDto<CategoryDto>>, AppError> {
    let filter = CategoryFilter {
        name: query.name,
        show_hidden: query.show_hidden,
    };
    let page = page_request(query.page_index, query.page_size);
    let categories = state.categories.get_all_categories(&filter, page).await?;
    Ok(Json(PagedListDto::from(&categories)))
}

/// Fetch several categories by id.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/categories/by-ids?ids=1;2;3
/// ```
pub async fn get_categories_by_ids(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdsQuery>,
) -> Result<Json<Vec<CategoryDto>>, AppError> {
    let ids = query.parse()?;
    let categories = state.categories.get_categories_by_ids(&ids).await?;
    Ok(Json(map_all(&categories)))
}

/// Get a category.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/categories/:id
/// ```
pub async fn get_category(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<CategoryDto>, AppError> {
    let category = load_category(&state, id).await?;
    Ok(Json(CategoryDto::from(&category)))
}

/// Direct children of a category.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/categories/:id/children?show_hidden=false
/// ```
pub async fn get_child_categories(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<ShowHiddenQuery>,
) -> Result<Json<Vec<CategoryDto>>, AppError> {
    let children = state
        .categories
        .get_child_categories(id.get(), query.show_hidden)
        .await?;
    Ok(Json(map_all(&children)))
}

/// Categories from the root down to this one.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/categories/:id/breadcrumb
/// ```
pub async fn get_category_breadcrumb(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<CategoryDto>>, AppError> {
    let category = load_category(&state, id).await?;
    let breadcrumb = state.categories.get_category_breadcrumb(&category).await?;
    Ok(Json(map_all(&breadcrumb)))
}

/// Products mapped to a category.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/categories/:id/products?page_index=0&page_size=20
/// ```
pub async fn get_category_products(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<ShowHiddenQuery>,
) -> Result<Json<PagedListDto<ProductCategoryDto>>, AppError> {
    let page = page_request(query.page_index, query.page_size);
    let mappings = state
        .categories
        .get_product_categories_by_category_id(id.get(), query.show_hidden, page)
        .await?;
    Ok(Json(PagedListDto::from(&mappings)))
}

/// Create a category.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/categories
/// {"name": "Books", "published": true}
/// ```
#[tracing::instrument(skip_all)]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), AppError> {
    require_non_blank("name", &body.name)?;
    check_parent(&state, None, body.parent_category_id).await?;

    let category = Category {
        id: 0,
        ..Category::from(body)
    };
    let created = state.categories.insert_category(category).await?;
    tracing::info!(category_id = created.id, "Category created");

    Ok((StatusCode::CREATED, Json(CategoryDto::from(&created))))
}

/// Update a category.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/categories/:id
/// ```
#[tracing::instrument(skip_all, fields(category_id = %id))]
pub async fn update_category(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<CategoryDto>,
) -> Result<Json<CategoryDto>, AppError> {
    require_non_blank("name", &body.name)?;
    let existing = load_category(&state, id).await?;
    check_parent(&state, Some(existing.id), body.parent_category_id).await?;

    let category = Category {
        id: existing.id,
        created_on_utc: existing.created_on_utc,
        ..Category::from(body)
    };
    let updated = state.categories.update_category(category).await?;
    Ok(Json(CategoryDto::from(&updated)))
}

/// Delete a category.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/v1/categories/:id
/// ```
#[tracing::instrument(skip_all, fields(category_id = %id))]
pub async fn delete_category(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let category = load_category(&state, id).await?;
    state.categories.delete_category(&category).await?;
    tracing::info!("Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
