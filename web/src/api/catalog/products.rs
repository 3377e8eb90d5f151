//! Product endpoints.
//!
//! - GET /products - Search products (paged)
//! - GET /products/by-ids?ids=1;2 - Fetch several products
//! - GET /products/by-sku/:sku - Lookup by SKU
//! - GET /products/low-stock - Products below their minimum stock (paged)
//! - GET /products/:id - Product details
//! - GET /products/:id/categories - Category mappings
//! - GET /products/:id/manufacturers - Manufacturer mappings
//! - GET /products/:id/tier-prices - Quantity break prices
//! - GET /products/:id/attribute-mappings - Attached attributes
//! - GET /products/:id/price - Final price for a customer and quantity
//! - POST /products/:id/inventory - Adjust stock
//! - POST /products - Create
//! - PUT /products/:id - Update
//! - DELETE /products/:id - Delete

use crate::dto::catalog::{
    InventoryAdjustmentRequest, PriceDto, ProductAttributeMappingDto, ProductCategoryDto,
    ProductDto, ProductManufacturerDto, TierPriceDto,
};
use crate::dto::{map_all, PagedListDto};
use crate::error::AppError;
use crate::extractors::{
    page_request, require_non_blank, require_positive, ApiJson, ApiQuery, EntityId, IdsQuery,
};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use commerce_api_core::catalog::{Product, ProductSearch, ProductSortBy};
use commerce_api_core::{parse_id_list, Money};
use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// Query parameters for searching products.
#[derive(Debug, Deserialize)]
pub struct SearchProductsQuery {
    /// Matched against name, SKU and short description
    pub keywords: Option<String>,
    /// `;`-separated category ids
    pub category_ids: Option<String>,
    /// Manufacturer filter
    pub manufacturer_id: Option<i32>,
    /// Vendor filter
    pub vendor_id: Option<i32>,
    /// Lower price bound in cents
    pub price_min: Option<i64>,
    /// Upper price bound in cents
    pub price_max: Option<i64>,
    /// Hide unpublished products (default: true)
    #[serde(default = "default_true")]
    pub published_only: bool,
    /// Sort order (default: position)
    pub order_by: Option<ProductSortBy>,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

impl SearchProductsQuery {
    fn into_search(self) -> Result<ProductSearch, AppError> {
        let category_ids = match self.category_ids.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_id_list(raw)?,
            _ => Vec::new(),
        };
        if let Some(manufacturer_id) = self.manufacturer_id {
            require_positive("manufacturer_id", manufacturer_id)?;
        }
        let price_min = self.price_min.map(Money::from_cents);
        let price_max = self.price_max.map(Money::from_cents);
        if price_min.is_some_and(|p| p.is_negative()) || price_max.is_some_and(|p| p.is_negative()) {
            return Err(AppError::bad_request("price bounds must not be negative"));
        }
        if let (Some(min), Some(max)) = (price_min, price_max) {
            if min > max {
                return Err(AppError::bad_request("price_min must not exceed price_max"));
            }
        }

        Ok(ProductSearch {
            keywords: self.keywords.filter(|k| !k.trim().is_empty()),
            category_ids,
            manufacturer_id: self.manufacturer_id,
            vendor_id: self.vendor_id,
            price_min,
            price_max,
            published_only: self.published_only,
            order_by: self.order_by.unwrap_or_default(),
        })
    }
}

/// Query parameters for the low stock report.
#[derive(Debug, Default, Deserialize)]
pub struct LowStockQuery {
    /// Vendor filter
    pub vendor_id: Option<i32>,
    /// Page number (0-indexed)
    pub page_index: Option<u32>,
    /// Page size (default: 20, max: 100)
    pub page_size: Option<u32>,
}

/// `?show_hidden=true`
#[derive(Debug, Default, Deserialize)]
pub struct MappingQuery {
    /// Include mappings to unpublished rows
    #[serde(default)]
    pub show_hidden: bool,
}

/// Query parameters for the price endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    /// Customer the price is calculated for
    pub customer_id: Option<i32>,
    /// Quantity (default: 1)
    pub quantity: Option<i32>,
}

/// Product routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(search_products).post(create_product))
        .route("/products/by-ids", get(get_products_by_ids))
        .route("/products/by-sku/:sku", get(get_product_by_sku))
        .route("/products/low-stock", get(get_low_stock_products))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/products/:id/categories", get(get_product_categories))
        .route("/products/:id/manufacturers", get(get_product_manufacturers))
        .route("/products/:id/tier-prices", get(get_tier_prices))
        .route("/products/:id/attribute-mappings", get(get_attribute_mappings))
        .route("/products/:id/price", get(get_product_price))
        .route("/products/:id/inventory", post(adjust_inventory))
}

async fn load_product(state: &AppState, id: EntityId) -> Result<Product, AppError> {
    state
        .products
        .get_product_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))
}

fn validate_product(body: &ProductDto) -> Result<(), AppError> {
    require_non_blank("name", &body.name)?;
    if body.price.is_negative() || body.old_price.is_negative() || body.product_cost.is_negative() {
        return Err(AppError::bad_request("prices must not be negative"));
    }
    Ok(())
}

/// Search products.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products?keywords=book&category_ids=2;3&price_max=5000&order_by=price_asc
/// ```
pub async fn search_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchProductsQuery>,
) -> Result<Json<PagedListDto<ProductDto>>, AppError> {
    let page = page_request(query.page_index, query.page_size);
    let search = query.into_search()?;
    tracing::debug!(?search, "Searching products");
    let products = state.products.search_products(&search, page).await?;
    Ok(Json(PagedListDto::from(&products)))
}

/// Fetch several products by id.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/by-ids?ids=1;2;3
/// ```
pub async fn get_products_by_ids(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdsQuery>,
) -> Result<Json<Vec<ProductDto>>, AppError> {
    let ids = query.parse()?;
    let products = state.products.get_products_by_ids(&ids).await?;
    Ok(Json(map_all(&products)))
}

/// Lookup a product by SKU.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/by-sku/:sku
/// ```
pub async fn get_product_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<Json<ProductDto>, AppError> {
    let sku = require_non_blank("sku", &sku)?;
    let product = state
        .products
        .get_product_by_sku(sku)
        .await?
        .ok_or_else(|| AppError::not_found_by("Product", "sku", sku))?;
    Ok(Json(ProductDto::from(&product)))
}

/// Products whose stock fell below their minimum.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/low-stock?vendor_id=3
/// ```
pub async fn get_low_stock_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LowStockQuery>,
) -> Result<Json<PagedListDto<ProductDto>>, AppError> {
    let page = page_request(query.page_index, query.page_size);
    let products = state
        .products
        .get_low_stock_products(query.vendor_id, page)
        .await?;
    Ok(Json(PagedListDto::from(&products)))
}

/// Get a product.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/:id
/// ```
pub async fn get_product(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<ProductDto>, AppError> {
    let product = load_product(&state, id).await?;
    Ok(Json(ProductDto::from(&product)))
}

/// Categories a product is mapped to.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/:id/categories?show_hidden=false
/// ```
pub async fn get_product_categories(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<MappingQuery>,
) -> Result<Json<Vec<ProductCategoryDto>>, AppError> {
    let mappings = state
        .categories
        .get_product_categories_by_product_id(id.get(), query.show_hidden)
        .await?;
    Ok(Json(map_all(&mappings)))
}

/// Manufacturers a product is mapped to.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/:id/manufacturers?show_hidden=false
/// ```
pub async fn get_product_manufacturers(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<MappingQuery>,
) -> Result<Json<Vec<ProductManufacturerDto>>, AppError> {
    let mappings = state
        .manufacturers
        .get_product_manufacturers_by_product_id(id.get(), query.show_hidden)
        .await?;
    Ok(Json(map_all(&mappings)))
}

/// Tier prices of a product.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/:id/tier-prices
/// ```
pub async fn get_tier_prices(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<TierPriceDto>>, AppError> {
    let product = load_product(&state, id).await?;
    let tiers = state.products.get_tier_prices_by_product(product.id).await?;
    Ok(Json(map_all(&tiers)))
}

/// Attributes attached to a product.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/:id/attribute-mappings
/// ```
pub async fn get_attribute_mappings(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<Json<Vec<ProductAttributeMappingDto>>, AppError> {
    let mappings = state
        .product_attributes
        .get_product_attribute_mappings_by_product_id(id.get())
        .await?;
    Ok(Json(map_all(&mappings)))
}

/// Final price of a product.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/products/:id/price?customer_id=5&quantity=10
/// ```
pub async fn get_product_price(
    State(state): State<AppState>,
    id: EntityId,
    ApiQuery(query): ApiQuery<PriceQuery>,
) -> Result<Json<PriceDto>, AppError> {
    let quantity = require_positive("quantity", query.quantity.unwrap_or(1))?;
    let customer_id = query
        .customer_id
        .map(|c| require_positive("customer_id", c))
        .transpose()?;

    let product = load_product(&state, id).await?;
    let price = state
        .prices
        .get_final_price(&product, customer_id, quantity)
        .await?;
    Ok(Json(PriceDto::from(&price)))
}

/// Adjust the stock of a product.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/products/:id/inventory
/// {"quantity_delta": -2, "message": "Damaged in warehouse"}
/// ```
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn adjust_inventory(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<InventoryAdjustmentRequest>,
) -> Result<Json<ProductDto>, AppError> {
    if body.quantity_delta == 0 {
        return Err(AppError::bad_request("quantity_delta must not be zero"));
    }
    let product = load_product(&state, id).await?;
    let updated = state
        .products
        .adjust_inventory(&product, body.quantity_delta, body.message.trim())
        .await?;
    tracing::info!(
        quantity_delta = body.quantity_delta,
        stock_quantity = updated.stock_quantity,
        "Inventory adjusted"
    );
    Ok(Json(ProductDto::from(&updated)))
}

/// Create a product.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/products
/// {"name": "Desk Lamp", "sku": "LAMP-1", "price": 2450, "published": true}
/// ```
#[tracing::instrument(skip_all)]
pub async fn create_product(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ProductDto>,
) -> Result<(StatusCode, Json<ProductDto>), AppError> {
    validate_product(&body)?;
    let product = Product {
        id: 0,
        ..Product::from(body)
    };
    let created = state.products.insert_product(product).await?;
    tracing::info!(product_id = created.id, "Product created");
    Ok((StatusCode::CREATED, Json(ProductDto::from(&created))))
}

/// Update a product.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/products/:id
/// ```
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn update_product(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<ProductDto>,
) -> Result<Json<ProductDto>, AppError> {
    validate_product(&body)?;
    let existing = load_product(&state, id).await?;
    let product = Product {
        id: existing.id,
        created_on_utc: existing.created_on_utc,
        ..Product::from(body)
    };
    let updated = state.products.update_product(product).await?;
    Ok(Json(ProductDto::from(&updated)))
}

/// Delete a product.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/v1/products/:id
/// ```
#[tracing::instrument(skip_all, fields(product_id = %id))]
pub async fn delete_product(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let product = load_product(&state, id).await?;
    state.products.delete_product(&product).await?;
    tracing::info!("Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
