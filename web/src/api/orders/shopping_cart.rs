//! Shopping cart endpoints.
//!
//! Mutations answer `200 OK` with the resulting cart and the warnings the
//! cart service produced; an empty `warnings` array means the change was
//! applied.
//!
//! - GET /shopping-carts/:customer_id?cart_type=ShoppingCart - Cart contents
//! - DELETE /shopping-carts/:customer_id?cart_type=ShoppingCart - Empty the cart
//! - POST /shopping-carts/:customer_id/items - Add a product
//! - PUT /shopping-cart-items/:id - Change the quantity
//! - DELETE /shopping-cart-items/:id - Remove an item

use crate::dto::map_all;
use crate::dto::orders::{AddToCartRequest, ShoppingCartDto, UpdateCartItemRequest};
use crate::error::AppError;
use crate::extractors::{require_positive, ApiJson, ApiQuery, EntityId};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use commerce_api_core::orders::{ShoppingCartItem, ShoppingCartType};
use serde::Deserialize;

/// `?cart_type=Wishlist`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CartTypeQuery {
    /// Cart or wishlist (default: cart)
    #[serde(default)]
    pub cart_type: ShoppingCartType,
}

/// Shopping cart routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping-carts/:customer_id",
            get(get_shopping_cart).delete(clear_shopping_cart),
        )
        .route("/shopping-carts/:customer_id/items", post(add_to_cart))
        .route(
            "/shopping-cart-items/:id",
            put(update_cart_item).delete(delete_cart_item),
        )
}

async fn cart_snapshot(
    state: &AppState,
    customer_id: i32,
    cart_type: ShoppingCartType,
    warnings: Vec<String>,
) -> Result<ShoppingCartDto, AppError> {
    let items = state
        .shopping_carts
        .get_shopping_cart(customer_id, cart_type)
        .await?;
    Ok(ShoppingCartDto {
        customer_id,
        cart_type,
        items: map_all(&items),
        warnings,
    })
}

async fn load_cart_item(state: &AppState, id: EntityId) -> Result<ShoppingCartItem, AppError> {
    state
        .shopping_carts
        .get_shopping_cart_item_by_id(id.get())
        .await?
        .ok_or_else(|| AppError::not_found("Shopping cart item", id))
}

/// Contents of a customer's cart.
///
/// # Endpoint
///
/// ```text
/// GET /api/v1/shopping-carts/:customer_id?cart_type=ShoppingCart
/// ```
pub async fn get_shopping_cart(
    State(state): State<AppState>,
    customer_id: EntityId,
    ApiQuery(query): ApiQuery<CartTypeQuery>,
) -> Result<Json<ShoppingCartDto>, AppError> {
    let cart = cart_snapshot(&state, customer_id.get(), query.cart_type, Vec::new()).await?;
    Ok(Json(cart))
}

/// Add a product to a customer's cart.
///
/// # Endpoint
///
/// ```text
/// POST /api/v1/shopping-carts/:customer_id/items
/// {"product_id": 3, "quantity": 2}
/// ```
#[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
pub async fn add_to_cart(
    State(state): State<AppState>,
    customer_id: EntityId,
    ApiJson(body): ApiJson<AddToCartRequest>,
) -> Result<Json<ShoppingCartDto>, AppError> {
    let product_id = require_positive("product_id", body.product_id)?;
    let quantity = require_positive("quantity", body.quantity)?;
    if body.customer_entered_price.is_negative() {
        return Err(AppError::bad_request(
            "customer_entered_price must not be negative",
        ));
    }

    let warnings = state
        .shopping_carts
        .add_to_cart(
            customer_id.get(),
            product_id,
            body.cart_type,
            quantity,
            body.customer_entered_price,
        )
        .await?;
    if !warnings.is_empty() {
        tracing::debug!(?warnings, "Add to cart produced warnings");
    }

    let cart = cart_snapshot(&state, customer_id.get(), body.cart_type, warnings).await?;
    Ok(Json(cart))
}

/// Change the quantity of a cart item.
///
/// # Endpoint
///
/// ```text
/// PUT /api/v1/shopping-cart-items/:id
/// {"quantity": 3}
/// ```
#[tracing::instrument(skip_all, fields(cart_item_id = %id))]
pub async fn update_cart_item(
    State(state): State<AppState>,
    id: EntityId,
    ApiJson(body): ApiJson<UpdateCartItemRequest>,
) -> Result<Json<ShoppingCartDto>, AppError> {
    let quantity = require_positive("quantity", body.quantity)?;
    let item = load_cart_item(&state, id).await?;

    let warnings = state
        .shopping_carts
        .update_shopping_cart_item(&item, quantity)
        .await?;

    let cart = cart_snapshot(&state, item.customer_id, item.shopping_cart_type, warnings).await?;
    Ok(Json(cart))
}

/// Remove an item from its cart.
#[tracing::instrument(skip_all, fields(cart_item_id = %id))]
pub async fn delete_cart_item(
    State(state): State<AppState>,
    id: EntityId,
) -> Result<StatusCode, AppError> {
    let item = load_cart_item(&state, id).await?;
    state.shopping_carts.delete_shopping_cart_item(&item).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Empty a customer's cart.
#[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
pub async fn clear_shopping_cart(
    State(state): State<AppState>,
    customer_id: EntityId,
    ApiQuery(query): ApiQuery<CartTypeQuery>,
) -> Result<StatusCode, AppError> {
    state
        .shopping_carts
        .clear_shopping_cart(customer_id.get(), query.cart_type)
        .await?;
    tracing::info!(cart_type = ?query.cart_type, "Shopping cart cleared");
    Ok(StatusCode::NO_CONTENT)
}
