//! In-memory service implementations.
//!
//! A single [`InMemoryCommerce`] implements every service trait over one set
//! of tables, so cross-subsystem operations (placing an order from a cart,
//! reordering, gift card lookups by order) see consistent data.

mod cart;
mod catalog;
mod discounts;
mod orders;
mod seeding;

use commerce_api_core::ServiceError;
use commerce_api_core::catalog::{
    Category, Manufacturer, Product, ProductAttribute, ProductAttributeMapping, ProductCategory,
    ProductManufacturer, TierPrice,
};
use commerce_api_core::discounts::{Discount, DiscountRequirement, DiscountUsageHistory};
use commerce_api_core::environment::{Clock, SystemClock};
use commerce_api_core::orders::{
    GiftCard, GiftCardUsageHistory, Order, OrderItem, OrderNote, ReturnRequest, Shipment,
    ShipmentItem, ShoppingCartItem,
};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Rows keyed by id, with a monotonically increasing id sequence.
#[derive(Debug, Clone)]
pub(crate) struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Reserve the next id.
    pub(crate) const fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    /// Store a row under `id`.
    pub(crate) fn put(&mut self, id: i32, row: T) {
        self.last_id = self.last_id.max(id);
        self.rows.insert(id, row);
    }

    pub(crate) fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub(crate) fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    pub(crate) fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }

    pub(crate) fn remove(&mut self, id: i32) -> Option<T> {
        self.rows.remove(&id)
    }

    /// Rows in id order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    /// Remove every row matching the predicate.
    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        self.rows.retain(|_, row| keep(row));
    }

    /// Clone the rows with the given ids, in the order the ids were given.
    pub(crate) fn pick(&self, ids: &[i32]) -> Vec<T> {
        ids.iter().filter_map(|id| self.get(*id)).collect()
    }
}

/// A recorded stock change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockChange {
    /// Product adjusted
    pub product_id: i32,
    /// Quantity delta
    pub quantity_delta: i32,
    /// Stock after the change
    pub stock_quantity: i32,
    /// Reason supplied by the caller
    pub message: String,
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub(crate) categories: Table<Category>,
    pub(crate) products: Table<Product>,
    pub(crate) product_categories: Table<ProductCategory>,
    pub(crate) manufacturers: Table<Manufacturer>,
    pub(crate) product_manufacturers: Table<ProductManufacturer>,
    pub(crate) product_attributes: Table<ProductAttribute>,
    pub(crate) attribute_mappings: Table<ProductAttributeMapping>,
    pub(crate) tier_prices: Table<TierPrice>,
    pub(crate) stock_history: Vec<StockChange>,
    pub(crate) discounts: Table<Discount>,
    pub(crate) discount_requirements: Table<DiscountRequirement>,
    pub(crate) discount_usage: Table<DiscountUsageHistory>,
    pub(crate) orders: Table<Order>,
    pub(crate) order_items: Table<OrderItem>,
    pub(crate) order_notes: Table<OrderNote>,
    pub(crate) shipments: Table<Shipment>,
    pub(crate) shipment_items: Table<ShipmentItem>,
    pub(crate) gift_cards: Table<GiftCard>,
    pub(crate) gift_card_usage: Table<GiftCardUsageHistory>,
    pub(crate) return_requests: Table<ReturnRequest>,
    pub(crate) cart_items: Table<ShoppingCartItem>,
}

/// In-memory implementation of every Commerce API service trait.
///
/// Cloning is cheap and clones share the same tables.
///
/// # Example
///
/// ```
/// use commerce_api_testing::InMemoryCommerce;
/// use commerce_api_core::catalog::{Category, CategoryService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let commerce = InMemoryCommerce::new();
/// let category = commerce
///     .insert_category(Category { name: "Books".to_string(), published: true, ..Category::default() })
///     .await?;
/// assert_eq!(category.id, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InMemoryCommerce {
    tables: Arc<RwLock<Tables>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InMemoryCommerce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCommerce").finish_non_exhaustive()
    }
}

impl InMemoryCommerce {
    /// Create an empty store backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store with an injected clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            clock,
        }
    }

    /// Stock changes recorded for a product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the table lock is poisoned.
    pub fn stock_history(&self, product_id: i32) -> commerce_api_core::Result<Vec<StockChange>> {
        Ok(self
            .read()?
            .stock_history
            .iter()
            .filter(|c| c.product_id == product_id)
            .cloned()
            .collect())
    }

    pub(crate) fn read(&self) -> commerce_api_core::Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| poisoned())
    }

    pub(crate) fn write(&self) -> commerce_api_core::Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| poisoned())
    }

    pub(crate) fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }
}

impl Default for InMemoryCommerce {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> ServiceError {
    ServiceError::Internal(anyhow::anyhow!("in-memory table lock poisoned"))
}

/// Error for an update that targets a row that does not exist.
pub(crate) fn missing(entity: &str, id: i32) -> ServiceError {
    ServiceError::rejected(format!("{entity} {id} does not exist"))
}

/// Case-insensitive substring match; `None` matches everything.
pub(crate) fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

/// Case-insensitive equality after trimming.
pub(crate) fn eq_ci(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
