//! Catalog DTOs.

// Fields mirror the entity fields one-to-one
#![allow(missing_docs)]

use commerce_api_core::catalog::{
    AttributeControlType, Category, Manufacturer, PriceBreakdown, Product, ProductAttribute,
    ProductAttributeMapping, ProductCategory, ProductManufacturer, TierPrice,
};
use commerce_api_core::{DateTime, Money, Utc};
use serde::{Deserialize, Serialize};

/// Category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDto {
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
    /// Sort order among siblings
    pub display_order: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

impl From<&Category> for CategoryDto {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            description: c.description.clone(),
            parent_category_id: c.parent_category_id,
            picture_id: c.picture_id,
            page_size: c.page_size,
            show_on_home_page: c.show_on_home_page,
            include_in_top_menu: c.include_in_top_menu,
            published: c.published,
            display_order: c.display_order,
            created_on_utc: c.created_on_utc,
            updated_on_utc: c.updated_on_utc,
        }
    }
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            parent_category_id: dto.parent_category_id,
            picture_id: dto.picture_id,
            page_size: dto.page_size,
            show_on_home_page: dto.show_on_home_page,
            include_in_top_menu: dto.include_in_top_menu,
            published: dto.published,
            deleted: false,
            display_order: dto.display_order,
            created_on_utc: dto.created_on_utc,
            updated_on_utc: dto.updated_on_utc,
        }
    }
}

/// Product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDto {
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
    /// Sort order
    pub display_order: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            short_description: p.short_description.clone(),
            full_description: p.full_description.clone(),
            sku: p.sku.clone(),
            manufacturer_part_number: p.manufacturer_part_number.clone(),
            gtin: p.gtin.clone(),
            price: p.price,
            old_price: p.old_price,
            product_cost: p.product_cost,
            stock_quantity: p.stock_quantity,
            manage_inventory: p.manage_inventory,
            min_stock_quantity: p.min_stock_quantity,
            vendor_id: p.vendor_id,
            is_gift_card: p.is_gift_card,
            is_shipping_enabled: p.is_shipping_enabled,
            disable_buy_button: p.disable_buy_button,
            published: p.published,
            display_order: p.display_order,
            created_on_utc: p.created_on_utc,
            updated_on_utc: p.updated_on_utc,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            short_description: dto.short_description,
            full_description: dto.full_description,
            sku: dto.sku,
            manufacturer_part_number: dto.manufacturer_part_number,
            gtin: dto.gtin,
            price: dto.price,
            old_price: dto.old_price,
            product_cost: dto.product_cost,
            stock_quantity: dto.stock_quantity,
            manage_inventory: dto.manage_inventory,
            min_stock_quantity: dto.min_stock_quantity,
            vendor_id: dto.vendor_id,
            is_gift_card: dto.is_gift_card,
            is_shipping_enabled: dto.is_shipping_enabled,
            disable_buy_button: dto.disable_buy_button,
            published: dto.published,
            deleted: false,
            display_order: dto.display_order,
            created_on_utc: dto.created_on_utc,
            updated_on_utc: dto.updated_on_utc,
        }
    }
}

/// Product-to-category mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategoryDto {
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

impl From<&ProductCategory> for ProductCategoryDto {
    fn from(m: &ProductCategory) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            category_id: m.category_id,
            is_featured_product: m.is_featured_product,
            display_order: m.display_order,
        }
    }
}

/// Manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManufacturerDto {
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
    /// Sort order
    pub display_order: i32,
    /// Creation time
    pub created_on_utc: DateTime<Utc>,
    /// Last update time
    pub updated_on_utc: DateTime<Utc>,
}

impl From<&Manufacturer> for ManufacturerDto {
    fn from(m: &Manufacturer) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            description: m.description.clone(),
            picture_id: m.picture_id,
            published: m.published,
            display_order: m.display_order,
            created_on_utc: m.created_on_utc,
            updated_on_utc: m.updated_on_utc,
        }
    }
}

impl From<ManufacturerDto> for Manufacturer {
    fn from(dto: ManufacturerDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
            picture_id: dto.picture_id,
            published: dto.published,
            deleted: false,
            display_order: dto.display_order,
            created_on_utc: dto.created_on_utc,
            updated_on_utc: dto.updated_on_utc,
        }
    }
}

/// Product-to-manufacturer mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductManufacturerDto {
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

impl From<&ProductManufacturer> for ProductManufacturerDto {
    fn from(m: &ProductManufacturer) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            manufacturer_id: m.manufacturer_id,
            is_featured_product: m.is_featured_product,
            display_order: m.display_order,
        }
    }
}

/// Product attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductAttributeDto {
    /// Identifier (0 until inserted)
    pub id: i32,
    /// Name
    pub name: String,
    /// Description
    pub description: Option<String>,
}

impl From<&ProductAttribute> for ProductAttributeDto {
    fn from(a: &ProductAttribute) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            description: a.description.clone(),
        }
    }
}

impl From<ProductAttributeDto> for ProductAttribute {
    fn from(dto: ProductAttributeDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Attribute attached to a product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributeMappingDto {
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

impl From<&ProductAttributeMapping> for ProductAttributeMappingDto {
    fn from(m: &ProductAttributeMapping) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            product_attribute_id: m.product_attribute_id,
            text_prompt: m.text_prompt.clone(),
            is_required: m.is_required,
            attribute_control_type: m.attribute_control_type,
            display_order: m.display_order,
        }
    }
}

/// Quantity break price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPriceDto {
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

impl From<&TierPrice> for TierPriceDto {
    fn from(t: &TierPrice) -> Self {
        Self {
            id: t.id,
            product_id: t.product_id,
            customer_role_id: t.customer_role_id,
            quantity: t.quantity,
            price: t.price,
            start_date_time_utc: t.start_date_time_utc,
            end_date_time_utc: t.end_date_time_utc,
        }
    }
}

/// Result of a final price calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDto {
    /// Product
    pub product_id: i32,
    /// Customer the price was calculated for, if any
    pub customer_id: Option<i32>,
    /// Quantity the price was calculated for
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

impl From<&PriceBreakdown> for PriceDto {
    fn from(p: &PriceBreakdown) -> Self {
        Self {
            product_id: p.product_id,
            customer_id: p.customer_id,
            quantity: p.quantity,
            price_without_discounts: p.price_without_discounts,
            final_price: p.final_price,
            applied_discount_amount: p.applied_discount_amount,
            applied_discount_ids: p.applied_discount_ids.clone(),
        }
    }
}

/// Body of `POST /products/{id}/inventory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryAdjustmentRequest {
    /// Signed change to apply to the stock quantity
    pub quantity_delta: i32,
    /// Reason recorded with the change
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_product_round_trip_keeps_fields() {
        let product = Product {
            id: 9,
            name: "Desk Lamp".to_string(),
            sku: Some("LAMP-1".to_string()),
            price: Money::from_cents(2_450),
            stock_quantity: 4,
            manage_inventory: true,
            published: true,
            created_on_utc: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            ..Product::default()
        };

        let dto = ProductDto::from(&product);
        assert_eq!(dto.sku.as_deref(), Some("LAMP-1"));
        assert_eq!(dto.price.cents(), 2_450);
        assert_eq!(Product::from(dto), product);
    }

    #[test]
    fn test_category_dto_accepts_partial_body() {
        let dto: CategoryDto = serde_json::from_str(r#"{"name":"Books","published":true}"#).unwrap();
        let category = Category::from(dto);
        assert_eq!(category.name, "Books");
        assert_eq!(category.parent_category_id, 0);
        assert!(!category.deleted);
    }

    #[test]
    fn test_money_serializes_as_cents() {
        let dto = PriceDto {
            product_id: 1,
            final_price: Money::from_cents(1_999),
            ..PriceDto::default()
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["final_price"], 1_999);
    }
}
