//! Order subsystem endpoints: orders, notes, shipments, gift cards, returns
//! and shopping carts.

use crate::state::AppState;
use axum::Router;

pub mod gift_cards;
pub mod order_notes;
pub mod orders;
pub mod return_requests;
pub mod shipments;
pub mod shopping_cart;

/// All order subsystem routes, relative to `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(orders::routes())
        .merge(order_notes::routes())
        .merge(shipments::routes())
        .merge(gift_cards::routes())
        .merge(return_requests::routes())
        .merge(shopping_cart::routes())
}
