//! Catalog service contracts.
//!
//! Implementations live outside this workspace (the in-memory versions in
//! `commerce-api-testing` exist for tests and local runs). Lookups by id
//! return `Ok(None)` for unknown ids; deletes take the entity the caller
//! already fetched.

use super::types::{
    Category, CategoryFilter, Manufacturer, ManufacturerFilter, PriceBreakdown, Product,
    ProductAttribute, ProductAttributeMapping, ProductCategory, ProductManufacturer,
    ProductSearch, TierPrice,
};
use crate::error::Result;
use crate::paging::{PageRequest, PagedList};
use async_trait::async_trait;

/// Category management.
#[async_trait]
pub trait CategoryService: Send + Sync {
    /// List categories matching the filter.
    async fn get_all_categories(
        &self,
        filter: &CategoryFilter,
        page: PageRequest,
    ) -> Result<PagedList<Category>>;

    /// Fetch one category.
    async fn get_category_by_id(&self, id: i32) -> Result<Option<Category>>;

    /// Fetch several categories; unknown ids are skipped.
    async fn get_categories_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>>;

    /// Direct children of a category.
    async fn get_child_categories(&self, parent_id: i32, show_hidden: bool) -> Result<Vec<Category>>;

    /// Path from the root down to `category` (inclusive).
    async fn get_category_breadcrumb(&self, category: &Category) -> Result<Vec<Category>>;

    /// Insert a category and return it with its assigned id.
    async fn insert_category(&self, category: Category) -> Result<Category>;

    /// Replace a stored category.
    async fn update_category(&self, category: Category) -> Result<Category>;

    /// Delete a category.
    async fn delete_category(&self, category: &Category) -> Result<()>;

    /// Product mappings of a category.
    async fn get_product_categories_by_category_id(
        &self,
        category_id: i32,
        show_hidden: bool,
        page: PageRequest,
    ) -> Result<PagedList<ProductCategory>>;

    /// Category mappings of a product.
    async fn get_product_categories_by_product_id(
        &self,
        product_id: i32,
        show_hidden: bool,
    ) -> Result<Vec<ProductCategory>>;
}

/// Product management.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Search products.
    async fn search_products(
        &self,
        search: &ProductSearch,
        page: PageRequest,
    ) -> Result<PagedList<Product>>;

    /// Fetch one product.
    async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>>;

    /// Fetch several products; unknown ids are skipped.
    async fn get_products_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>>;

    /// Fetch a product by SKU.
    async fn get_product_by_sku(&self, sku: &str) -> Result<Option<Product>>;

    /// Products whose tracked stock is at or below their threshold.
    async fn get_low_stock_products(
        &self,
        vendor_id: Option<i32>,
        page: PageRequest,
    ) -> Result<PagedList<Product>>;

    /// Insert a product and return it with its assigned id.
    async fn insert_product(&self, product: Product) -> Result<Product>;

    /// Replace a stored product.
    async fn update_product(&self, product: Product) -> Result<Product>;

    /// Delete a product.
    async fn delete_product(&self, product: &Product) -> Result<()>;

    /// Tier prices of a product.
    async fn get_tier_prices_by_product(&self, product_id: i32) -> Result<Vec<TierPrice>>;

    /// Apply a stock delta and return the updated product.
    async fn adjust_inventory(
        &self,
        product: &Product,
        quantity_delta: i32,
        message: &str,
    ) -> Result<Product>;
}

/// Manufacturer management.
#[async_trait]
pub trait ManufacturerService: Send + Sync {
    /// List manufacturers matching the filter.
    async fn get_all_manufacturers(
        &self,
        filter: &ManufacturerFilter,
        page: PageRequest,
    ) -> Result<PagedList<Manufacturer>>;

    /// Fetch one manufacturer.
    async fn get_manufacturer_by_id(&self, id: i32) -> Result<Option<Manufacturer>>;

    /// Fetch several manufacturers; unknown ids are skipped.
    async fn get_manufacturers_by_ids(&self, ids: &[i32]) -> Result<Vec<Manufacturer>>;

    /// Insert a manufacturer and return it with its assigned id.
    async fn insert_manufacturer(&self, manufacturer: Manufacturer) -> Result<Manufacturer>;

    /// Replace a stored manufacturer.
    async fn update_manufacturer(&self, manufacturer: Manufacturer) -> Result<Manufacturer>;

    /// Delete a manufacturer.
    async fn delete_manufacturer(&self, manufacturer: &Manufacturer) -> Result<()>;

    /// Product mappings of a manufacturer.
    async fn get_product_manufacturers_by_manufacturer_id(
        &self,
        manufacturer_id: i32,
        show_hidden: bool,
        page: PageRequest,
    ) -> Result<PagedList<ProductManufacturer>>;

    /// Manufacturer mappings of a product.
    async fn get_product_manufacturers_by_product_id(
        &self,
        product_id: i32,
        show_hidden: bool,
    ) -> Result<Vec<ProductManufacturer>>;
}

/// Product attribute definitions and their product mappings.
#[async_trait]
pub trait ProductAttributeService: Send + Sync {
    /// List attribute definitions.
    async fn get_all_product_attributes(&self, page: PageRequest) -> Result<PagedList<ProductAttribute>>;

    /// Fetch one attribute definition.
    async fn get_product_attribute_by_id(&self, id: i32) -> Result<Option<ProductAttribute>>;

    /// Insert an attribute definition.
    async fn insert_product_attribute(&self, attribute: ProductAttribute) -> Result<ProductAttribute>;

    /// Replace an attribute definition.
    async fn update_product_attribute(&self, attribute: ProductAttribute) -> Result<ProductAttribute>;

    /// Delete an attribute definition.
    async fn delete_product_attribute(&self, attribute: &ProductAttribute) -> Result<()>;

    /// Attribute mappings of a product.
    async fn get_product_attribute_mappings_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductAttributeMapping>>;
}

/// Price calculation. Discount and tier rules are the implementor's concern.
#[async_trait]
pub trait PriceCalculationService: Send + Sync {
    /// Final unit price of `product` for a customer and quantity.
    async fn get_final_price(
        &self,
        product: &Product,
        customer_id: Option<i32>,
        quantity: i32,
    ) -> Result<PriceBreakdown>;
}
