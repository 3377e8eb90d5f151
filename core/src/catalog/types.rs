//! Catalog entities as owned by the catalog services.

use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A node in the category tree. Root categories have `parent_category_id == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Display name
    pub name: String,
    /// Rich-text description
    pub description: Option<String>,
    /// Parent category, 0 for roots
    pub parent_category_id: i32,
    /// Picture identifier, 0 when none
    pub picture_id: i32,
    /// Default page size on the storefront
    pub page_size: i32,
    /// Show on the storefront home page
    pub show_on_home_page: bool,
    /// Include in the top menu
    pub include_in_top_menu: bool,
    /// Visible on the storefront
    pub published: bool,
    /// Soft-delete flag
    pub deleted: bool,
    /// Sort order among siblings
    pub display_order: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

/// Filter for listing categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Substring match on the name
    pub name: Option<String>,
    /// Include unpublished categories
    pub show_hidden: bool,
}

/// A sellable product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Display name
    pub name: String,
    /// Short description
    pub short_description: Option<String>,
    /// Full description
    pub full_description: Option<String>,
    /// Stock keeping unit
    pub sku: Option<String>,
    /// Manufacturer part number
    pub manufacturer_part_number: Option<String>,
    /// Global trade item number
    pub gtin: Option<String>,
    /// Current price
    pub price: Money,
    /// Previous price, shown struck through
    pub old_price: Money,
    /// Cost to the merchant
    pub product_cost: Money,
    /// Units in stock
    pub stock_quantity: i32,
    /// Whether stock is tracked for this product
    pub manage_inventory: bool,
    /// Stock level at or below which the product counts as low stock
    pub min_stock_quantity: i32,
    /// Owning vendor, 0 for the store itself
    pub vendor_id: i32,
    /// Product is a gift card
    pub is_gift_card: bool,
    /// Product requires shipping
    pub is_shipping_enabled: bool,
    /// Hide the buy button
    pub disable_buy_button: bool,
    /// Visible on the storefront
    pub published: bool,
    /// Soft-delete flag
    pub deleted: bool,
    /// Sort order
    pub display_order: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

impl Product {
    /// Whether inventory is tracked and at or below the low stock threshold.
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.manage_inventory && self.stock_quantity <= self.min_stock_quantity
    }
}

/// Sort order for product searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    /// Display order
    #[default]
    Position,
    /// Name A-Z
    NameAsc,
    /// Name Z-A
    NameDesc,
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Newest first
    CreatedOn,
}

/// Product search criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    /// Free-text keywords matched against name and SKU
    pub keywords: Option<String>,
    /// Restrict to products mapped to any of these categories
    pub category_ids: Vec<i32>,
    /// Restrict to products of this manufacturer
    pub manufacturer_id: Option<i32>,
    /// Restrict to products of this vendor
    pub vendor_id: Option<i32>,
    /// Lower price bound (inclusive)
    pub price_min: Option<Money>,
    /// Upper price bound (inclusive)
    pub price_max: Option<Money>,
    /// Only published products
    pub published_only: bool,
    /// Sort order
    pub order_by: ProductSortBy,
}

/// Mapping of a product into a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    /// Identifier
    pub id: i32,
    /// Product
    pub product_id: i32,
    /// Category
    pub category_id: i32,
    /// Featured in the category
    pub is_featured_product: bool,
    /// Sort order within the category
    pub display_order: i32,
}

/// A brand or maker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Display name
    pub name: String,
    /// Description
    pub description: Option<String>,
    /// Picture identifier, 0 when none
    pub picture_id: i32,
    /// Visible on the storefront
    pub published: bool,
    /// Soft-delete flag
    pub deleted: bool,
    /// Sort order
    pub display_order: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

/// Filter for listing manufacturers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManufacturerFilter {
    /// Substring match on the name
    pub name: Option<String>,
    /// Include unpublished manufacturers
    pub show_hidden: bool,
}

/// Mapping of a product to a manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductManufacturer {
    /// Identifier
    pub id: i32,
    /// Product
    pub product_id: i32,
    /// Manufacturer
    pub manufacturer_id: i32,
    /// Featured for the manufacturer
    pub is_featured_product: bool,
    /// Sort order
    pub display_order: i32,
}

/// A reusable attribute definition (e.g. "Color").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Name
    pub name: String,
    /// Description
    pub description: Option<String>,
}

/// How an attribute is rendered to the shopper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeControlType {
    /// Drop-down list
    #[default]
    DropdownList,
    /// Radio buttons
    RadioList,
    /// Checkboxes
    Checkboxes,
    /// Single-line text
    TextBox,
    /// Multi-line text
    MultilineTextbox,
    /// Date picker
    Datepicker,
    /// File upload
    FileUpload,
    /// Color squares
    ColorSquares,
}

/// Attachment of an attribute to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributeMapping {
    /// Identifier
    pub id: i32,
    /// Product
    pub product_id: i32,
    /// Attribute definition
    pub product_attribute_id: i32,
    /// Prompt shown next to the control
    pub text_prompt: Option<String>,
    /// Shopper must pick a value
    pub is_required: bool,
    /// Rendering control
    pub attribute_control_type: AttributeControlType,
    /// Sort order
    pub display_order: i32,
}

/// Quantity break price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrice {
    /// Identifier
    pub id: i32,
    /// Product
    pub product_id: i32,
    /// Restrict to a customer role
    pub customer_role_id: Option<i32>,
    /// Minimum quantity for this tier
    pub quantity: i32,
    /// Unit price at this tier
    pub price: Money,
    /// Start of validity
    pub start_date_time_utc: Option<DateTime<Utc>>,
    /// End of validity
    pub end_date_time_utc: Option<DateTime<Utc>>,
}

/// Result of the external price calculation for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Product priced
    pub product_id: i32,
    /// Customer the price applies to, if any
    pub customer_id: Option<i32>,
    /// Quantity priced
    pub quantity: i32,
    /// Unit price before discounts
    pub price_without_discounts: Money,
    /// Unit price after discounts
    pub final_price: Money,
    /// Discount amount per unit
    pub applied_discount_amount: Money,
    /// Discounts that contributed
    pub applied_discount_ids: Vec<i32>,
}
