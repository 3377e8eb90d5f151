//! Catalog subsystem: categories, products, manufacturers and attributes.

mod services;
mod types;

pub use services::{
    CategoryService, ManufacturerService, PriceCalculationService, ProductAttributeService,
    ProductService,
};
pub use types::{
    AttributeControlType, Category, CategoryFilter, Manufacturer, ManufacturerFilter,
    PriceBreakdown, Product, ProductAttribute, ProductAttributeMapping, ProductCategory,
    ProductManufacturer, ProductSearch, ProductSortBy, TierPrice,
};
