//! Application state for Axum handlers.
//!
//! [`AppState`] holds one `Arc<dyn Trait>` handle per domain service. Handlers
//! take `State<AppState>` and pick the services they delegate to.

use commerce_api_core::catalog::{
    CategoryService, ManufacturerService, PriceCalculationService, ProductAttributeService,
    ProductService,
};
use commerce_api_core::discounts::DiscountService;
use commerce_api_core::orders::{
    GiftCardService, OrderProcessingService, OrderService, ReturnRequestService,
    ShipmentService, ShoppingCartService,
};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// Cloning is cheap: every field is an `Arc`.
///
/// # Examples
///
/// ```ignore
/// use commerce_api_web::AppState;
/// use commerce_api_testing::InMemoryCommerce;
/// use std::sync::Arc;
///
/// let state = AppState::from_services(Arc::new(InMemoryCommerce::new()));
/// let app = commerce_api_web::router::api_router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Category lookups and maintenance
    pub categories: Arc<dyn CategoryService>,
    /// Product lookups, maintenance and inventory
    pub products: Arc<dyn ProductService>,
    /// Manufacturer lookups and maintenance
    pub manufacturers: Arc<dyn ManufacturerService>,
    /// Product attributes and their mappings
    pub product_attributes: Arc<dyn ProductAttributeService>,
    /// Final price calculation
    pub prices: Arc<dyn PriceCalculationService>,
    /// Discounts, requirements and usage
    pub discounts: Arc<dyn DiscountService>,
    /// Order lookups and notes
    pub orders: Arc<dyn OrderService>,
    /// Shipment lookups
    pub shipments: Arc<dyn ShipmentService>,
    /// Order state transitions
    pub order_processing: Arc<dyn OrderProcessingService>,
    /// Gift cards
    pub gift_cards: Arc<dyn GiftCardService>,
    /// Return requests
    pub return_requests: Arc<dyn ReturnRequestService>,
    /// Shopping carts and wishlists
    pub shopping_carts: Arc<dyn ShoppingCartService>,
}

impl AppState {
    /// Build the state from a single value implementing every service.
    #[must_use]
    pub fn from_services<T>(services: Arc<T>) -> Self
    where
        T: CategoryService
            + ProductService
            + ManufacturerService
            + ProductAttributeService
            + PriceCalculationService
            + DiscountService
            + OrderService
            + ShipmentService
            + OrderProcessingService
            + GiftCardService
            + ReturnRequestService
            + ShoppingCartService
            + 'static,
    {
        Self {
            categories: services.clone(),
            products: services.clone(),
            manufacturers: services.clone(),
            product_attributes: services.clone(),
            prices: services.clone(),
            discounts: services.clone(),
            orders: services.clone(),
            shipments: services.clone(),
            order_processing: services.clone(),
            gift_cards: services.clone(),
            return_requests: services.clone(),
            shopping_carts: services,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_is_clone() {
        // Ensure AppState implements Clone (required for Axum)
        fn assert_clone<T: Clone + Send + Sync>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_from_services_shares_one_backend() {
        let backend = Arc::new(commerce_api_testing::InMemoryCommerce::new());
        let state = AppState::from_services(backend.clone());
        // One strong count per service handle plus ours
        assert_eq!(Arc::strong_count(&backend), 13);
        drop(state);
        assert_eq!(Arc::strong_count(&backend), 1);
    }
}
