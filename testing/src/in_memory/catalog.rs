//! Catalog services over the in-memory tables.

use super::{InMemoryCommerce, StockChange, Tables, contains_ci, eq_ci, missing};
use async_trait::async_trait;
use commerce_api_core::catalog::{
    Category, CategoryFilter, CategoryService, Manufacturer, ManufacturerFilter,
    ManufacturerService, PriceBreakdown, PriceCalculationService, Product, ProductAttribute,
    ProductAttributeMapping, ProductAttributeService, ProductCategory, ProductManufacturer,
    ProductSearch, ProductService, ProductSortBy, TierPrice,
};
use commerce_api_core::{Money, PageRequest, PagedList, Result, ServiceError};
use std::collections::HashSet;

fn category_visible(tables: &Tables, category_id: i32, show_hidden: bool) -> bool {
    tables
        .categories
        .get(category_id)
        .is_some_and(|c| !c.deleted && (show_hidden || c.published))
}

fn product_visible(tables: &Tables, product_id: i32, show_hidden: bool) -> bool {
    tables
        .products
        .get(product_id)
        .is_some_and(|p| !p.deleted && (show_hidden || p.published))
}

/// Reject a SKU already used by another product. `product.id` is skipped so an
/// update may keep its own SKU.
fn ensure_unique_sku(tables: &Tables, product: &Product) -> Result<()> {
    let Some(sku) = product.sku.as_deref() else {
        return Ok(());
    };
    if tables
        .products
        .values()
        .any(|p| p.id != product.id && p.sku.as_deref().is_some_and(|s| eq_ci(s, sku)))
    {
        return Err(ServiceError::conflict(format!("SKU '{sku}' is already in use")));
    }
    Ok(())
}

#[async_trait]
impl CategoryService for InMemoryCommerce {
    async fn get_all_categories(
        &self,
        filter: &CategoryFilter,
        page: PageRequest,
    ) -> Result<PagedList<Category>> {
        let tables = self.read()?;
        let mut categories: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| !c.deleted && (filter.show_hidden || c.published))
            .filter(|c| contains_ci(&c.name, filter.name.as_deref()))
            .cloned()
            .collect();
        categories.sort_by_key(|c| (c.display_order, c.id));
        Ok(PagedList::paginate(categories, page))
    }

    async fn get_category_by_id(&self, id: i32) -> Result<Option<Category>> {
        Ok(self.read()?.categories.get(id))
    }

    async fn get_categories_by_ids(&self, ids: &[i32]) -> Result<Vec<Category>> {
        Ok(self.read()?.categories.pick(ids))
    }

    async fn get_child_categories(&self, parent_id: i32, show_hidden: bool) -> Result<Vec<Category>> {
        let tables = self.read()?;
        let mut children: Vec<Category> = tables
            .categories
            .values()
            .filter(|c| c.parent_category_id == parent_id)
            .filter(|c| !c.deleted && (show_hidden || c.published))
            .cloned()
            .collect();
        children.sort_by_key(|c| (c.display_order, c.id));
        Ok(children)
    }

    async fn get_category_breadcrumb(&self, category: &Category) -> Result<Vec<Category>> {
        let tables = self.read()?;
        let mut visited = HashSet::new();
        let mut path = vec![category.clone()];
        visited.insert(category.id);

        let mut parent_id = category.parent_category_id;
        while parent_id > 0 && visited.insert(parent_id) {
            let Some(parent) = tables.categories.get(parent_id) else {
                break;
            };
            parent_id = parent.parent_category_id;
            path.push(parent);
        }

        path.reverse();
        Ok(path)
    }

    async fn insert_category(&self, mut category: Category) -> Result<Category> {
        let now = self.now();
        let mut tables = self.write()?;
        category.id = tables.categories.next_id();
        category.created_on_utc = now;
        category.updated_on_utc = now;
        tables.categories.put(category.id, category.clone());
        Ok(category)
    }

    async fn update_category(&self, mut category: Category) -> Result<Category> {
        let now = self.now();
        let mut tables = self.write()?;
        let Some(existing) = tables.categories.get_mut(category.id) else {
            return Err(missing("Category", category.id));
        };
        category.created_on_utc = existing.created_on_utc;
        category.updated_on_utc = now;
        *existing = category.clone();
        Ok(category)
    }

    async fn delete_category(&self, category: &Category) -> Result<()> {
        let mut tables = self.write()?;
        tables.categories.remove(category.id);
        tables.product_categories.retain(|m| m.category_id != category.id);
        for child in tables.categories.rows.values_mut() {
            if child.parent_category_id == category.id {
                child.parent_category_id = category.parent_category_id;
            }
        }
        Ok(())
    }

    async fn get_product_categories_by_category_id(
        &self,
        category_id: i32,
        show_hidden: bool,
        page: PageRequest,
    ) -> Result<PagedList<ProductCategory>> {
        let tables = self.read()?;
        let mut mappings: Vec<ProductCategory> = tables
            .product_categories
            .values()
            .filter(|m| m.category_id == category_id)
            .filter(|m| product_visible(&tables, m.product_id, show_hidden))
            .cloned()
            .collect();
        mappings.sort_by_key(|m| (m.display_order, m.id));
        Ok(PagedList::paginate(mappings, page))
    }

    async fn get_product_categories_by_product_id(
        &self,
        product_id: i32,
        show_hidden: bool,
    ) -> Result<Vec<ProductCategory>> {
        let tables = self.read()?;
        let mut mappings: Vec<ProductCategory> = tables
            .product_categories
            .values()
            .filter(|m| m.product_id == product_id)
            .filter(|m| category_visible(&tables, m.category_id, show_hidden))
            .cloned()
            .collect();
        mappings.sort_by_key(|m| (m.display_order, m.id));
        Ok(mappings)
    }
}

fn matches_search(tables: &Tables, product: &Product, search: &ProductSearch) -> bool {
    if product.deleted || (search.published_only && !product.published) {
        return false;
    }
    if let Some(keywords) = search.keywords.as_deref() {
        let in_name = contains_ci(&product.name, Some(keywords));
        let in_sku = product
            .sku
            .as_deref()
            .is_some_and(|sku| contains_ci(sku, Some(keywords)));
        if !in_name && !in_sku {
            return false;
        }
    }
    if !search.category_ids.is_empty()
        && !tables
            .product_categories
            .values()
            .any(|m| m.product_id == product.id && search.category_ids.contains(&m.category_id))
    {
        return false;
    }
    if let Some(manufacturer_id) = search.manufacturer_id {
        if !tables
            .product_manufacturers
            .values()
            .any(|m| m.product_id == product.id && m.manufacturer_id == manufacturer_id)
        {
            return false;
        }
    }
    search.vendor_id.is_none_or(|v| product.vendor_id == v)
        && search.price_min.is_none_or(|min| product.price >= min)
        && search.price_max.is_none_or(|max| product.price <= max)
}

#[async_trait]
impl ProductService for InMemoryCommerce {
    async fn search_products(
        &self,
        search: &ProductSearch,
        page: PageRequest,
    ) -> Result<PagedList<Product>> {
        let tables = self.read()?;
        let mut products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| matches_search(&tables, p, search))
            .cloned()
            .collect();
        match search.order_by {
            ProductSortBy::Position => products.sort_by_key(|p| (p.display_order, p.id)),
            ProductSortBy::NameAsc => products.sort_by(|a, b| a.name.cmp(&b.name)),
            ProductSortBy::NameDesc => products.sort_by(|a, b| b.name.cmp(&a.name)),
            ProductSortBy::PriceAsc => products.sort_by_key(|p| p.price),
            ProductSortBy::PriceDesc => products.sort_by_key(|p| std::cmp::Reverse(p.price)),
            ProductSortBy::CreatedOn => {
                products.sort_by_key(|p| std::cmp::Reverse(p.created_on_utc));
            }
        }
        Ok(PagedList::paginate(products, page))
    }

    async fn get_product_by_id(&self, id: i32) -> Result<Option<Product>> {
        Ok(self.read()?.products.get(id))
    }

    async fn get_products_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>> {
        Ok(self.read()?.products.pick(ids))
    }

    async fn get_product_by_sku(&self, sku: &str) -> Result<Option<Product>> {
        Ok(self
            .read()?
            .products
            .values()
            .find(|p| !p.deleted && p.sku.as_deref().is_some_and(|s| eq_ci(s, sku)))
            .cloned())
    }

    async fn get_low_stock_products(
        &self,
        vendor_id: Option<i32>,
        page: PageRequest,
    ) -> Result<PagedList<Product>> {
        let tables = self.read()?;
        let products: Vec<Product> = tables
            .products
            .values()
            .filter(|p| !p.deleted && p.is_low_stock())
            .filter(|p| vendor_id.is_none_or(|v| p.vendor_id == v))
            .cloned()
            .collect();
        Ok(PagedList::paginate(products, page))
    }

    async fn insert_product(&self, mut product: Product) -> Result<Product> {
        let now = self.now();
        let mut tables = self.write()?;
        ensure_unique_sku(&tables, &product)?;
        product.id = tables.products.next_id();
        product.created_on_utc = now;
        product.updated_on_utc = now;
        tables.products.put(product.id, product.clone());
        Ok(product)
    }

    async fn update_product(&self, mut product: Product) -> Result<Product> {
        let now = self.now();
        let mut tables = self.write()?;
        if !tables.products.contains(product.id) {
            return Err(missing("Product", product.id));
        }
        ensure_unique_sku(&tables, &product)?;
        let Some(existing) = tables.products.get_mut(product.id) else {
            return Err(missing("Product", product.id));
        };
        product.created_on_utc = existing.created_on_utc;
        product.updated_on_utc = now;
        *existing = product.clone();
        Ok(product)
    }

    async fn delete_product(&self, product: &Product) -> Result<()> {
        let mut tables = self.write()?;
        tables.products.remove(product.id);
        tables.product_categories.retain(|m| m.product_id != product.id);
        tables.product_manufacturers.retain(|m| m.product_id != product.id);
        tables.attribute_mappings.retain(|m| m.product_id != product.id);
        tables.tier_prices.retain(|t| t.product_id != product.id);
        Ok(())
    }

    async fn get_tier_prices_by_product(&self, product_id: i32) -> Result<Vec<TierPrice>> {
        let tables = self.read()?;
        let mut tiers: Vec<TierPrice> = tables
            .tier_prices
            .values()
            .filter(|t| t.product_id == product_id)
            .cloned()
            .collect();
        tiers.sort_by_key(|t| (t.quantity, t.id));
        Ok(tiers)
    }

    async fn adjust_inventory(
        &self,
        product: &Product,
        quantity_delta: i32,
        message: &str,
    ) -> Result<Product> {
        let now = self.now();
        let mut tables = self.write()?;
        let Some(stored) = tables.products.get_mut(product.id) else {
            return Err(missing("Product", product.id));
        };
        if !stored.manage_inventory {
            return Err(ServiceError::rejected(format!(
                "Inventory is not tracked for product {}",
                product.id
            )));
        }
        stored.stock_quantity = stored.stock_quantity.saturating_add(quantity_delta);
        stored.updated_on_utc = now;
        let updated = stored.clone();
        tables.stock_history.push(StockChange {
            product_id: updated.id,
            quantity_delta,
            stock_quantity: updated.stock_quantity,
            message: message.to_string(),
        });
        Ok(updated)
    }
}

#[async_trait]
impl ManufacturerService for InMemoryCommerce {
    async fn get_all_manufacturers(
        &self,
        filter: &ManufacturerFilter,
        page: PageRequest,
    ) -> Result<PagedList<Manufacturer>> {
        let tables = self.read()?;
        let mut manufacturers: Vec<Manufacturer> = tables
            .manufacturers
            .values()
            .filter(|m| !m.deleted && (filter.show_hidden || m.published))
            .filter(|m| contains_ci(&m.name, filter.name.as_deref()))
            .cloned()
            .collect();
        manufacturers.sort_by_key(|m| (m.display_order, m.id));
        Ok(PagedList::paginate(manufacturers, page))
    }

    async fn get_manufacturer_by_id(&self, id: i32) -> Result<Option<Manufacturer>> {
        Ok(self.read()?.manufacturers.get(id))
    }

    async fn get_manufacturers_by_ids(&self, ids: &[i32]) -> Result<Vec<Manufacturer>> {
        Ok(self.read()?.manufacturers.pick(ids))
    }

    async fn insert_manufacturer(&self, mut manufacturer: Manufacturer) -> Result<Manufacturer> {
        let now = self.now();
        let mut tables = self.write()?;
        manufacturer.id = tables.manufacturers.next_id();
        manufacturer.created_on_utc = now;
        manufacturer.updated_on_utc = now;
        tables.manufacturers.put(manufacturer.id, manufacturer.clone());
        Ok(manufacturer)
    }

    async fn update_manufacturer(&self, mut manufacturer: Manufacturer) -> Result<Manufacturer> {
        let now = self.now();
        let mut tables = self.write()?;
        let Some(existing) = tables.manufacturers.get_mut(manufacturer.id) else {
            return Err(missing("Manufacturer", manufacturer.id));
        };
        manufacturer.created_on_utc = existing.created_on_utc;
        manufacturer.updated_on_utc = now;
        *existing = manufacturer.clone();
        Ok(manufacturer)
    }

    async fn delete_manufacturer(&self, manufacturer: &Manufacturer) -> Result<()> {
        let mut tables = self.write()?;
        tables.manufacturers.remove(manufacturer.id);
        tables
            .product_manufacturers
            .retain(|m| m.manufacturer_id != manufacturer.id);
        Ok(())
    }

    async fn get_product_manufacturers_by_manufacturer_id(
        &self,
        manufacturer_id: i32,
        show_hidden: bool,
        page: PageRequest,
    ) -> Result<PagedList<ProductManufacturer>> {
        let tables = self.read()?;
        let mut mappings: Vec<ProductManufacturer> = tables
            .product_manufacturers
            .values()
            .filter(|m| m.manufacturer_id == manufacturer_id)
            .filter(|m| product_visible(&tables, m.product_id, show_hidden))
            .cloned()
            .collect();
        mappings.sort_by_key(|m| (m.display_order, m.id));
        Ok(PagedList::paginate(mappings, page))
    }

    async fn get_product_manufacturers_by_product_id(
        &self,
        product_id: i32,
        show_hidden: bool,
    ) -> Result<Vec<ProductManufacturer>> {
        let tables = self.read()?;
        let mut mappings: Vec<ProductManufacturer> = tables
            .product_manufacturers
            .values()
            .filter(|m| m.product_id == product_id)
            .filter(|m| {
                tables
                    .manufacturers
                    .get(m.manufacturer_id)
                    .is_some_and(|mf| !mf.deleted && (show_hidden || mf.published))
            })
            .cloned()
            .collect();
        mappings.sort_by_key(|m| (m.display_order, m.id));
        Ok(mappings)
    }
}

#[async_trait]
impl ProductAttributeService for InMemoryCommerce {
    async fn get_all_product_attributes(&self, page: PageRequest) -> Result<PagedList<ProductAttribute>> {
        let tables = self.read()?;
        let mut attributes: Vec<ProductAttribute> =
            tables.product_attributes.values().cloned().collect();
        attributes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(PagedList::paginate(attributes, page))
    }

    async fn get_product_attribute_by_id(&self, id: i32) -> Result<Option<ProductAttribute>> {
        Ok(self.read()?.product_attributes.get(id))
    }

    async fn insert_product_attribute(&self, mut attribute: ProductAttribute) -> Result<ProductAttribute> {
        let mut tables = self.write()?;
        attribute.id = tables.product_attributes.next_id();
        tables.product_attributes.put(attribute.id, attribute.clone());
        Ok(attribute)
    }

    async fn update_product_attribute(&self, attribute: ProductAttribute) -> Result<ProductAttribute> {
        let mut tables = self.write()?;
        if !tables.product_attributes.contains(attribute.id) {
            return Err(missing("Product attribute", attribute.id));
        }
        tables.product_attributes.put(attribute.id, attribute.clone());
        Ok(attribute)
    }

    async fn delete_product_attribute(&self, attribute: &ProductAttribute) -> Result<()> {
        let mut tables = self.write()?;
        tables.product_attributes.remove(attribute.id);
        tables
            .attribute_mappings
            .retain(|m| m.product_attribute_id != attribute.id);
        Ok(())
    }

    async fn get_product_attribute_mappings_by_product_id(
        &self,
        product_id: i32,
    ) -> Result<Vec<ProductAttributeMapping>> {
        let tables = self.read()?;
        let mut mappings: Vec<ProductAttributeMapping> = tables
            .attribute_mappings
            .values()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect();
        mappings.sort_by_key(|m| (m.display_order, m.id));
        Ok(mappings)
    }
}

#[async_trait]
impl PriceCalculationService for InMemoryCommerce {
    async fn get_final_price(
        &self,
        product: &Product,
        customer_id: Option<i32>,
        quantity: i32,
    ) -> Result<PriceBreakdown> {
        let now = self.now();
        let tables = self.read()?;

        // Tier with the highest threshold the quantity reaches, role-specific tiers ignored.
        let tier = tables
            .tier_prices
            .values()
            .filter(|t| t.product_id == product.id && t.customer_role_id.is_none())
            .filter(|t| t.quantity <= quantity)
            .filter(|t| t.start_date_time_utc.is_none_or(|start| start <= now))
            .filter(|t| t.end_date_time_utc.is_none_or(|end| end >= now))
            .max_by_key(|t| t.quantity)
            .map(|t| t.price);

        let base = tier.map_or(product.price, |tier_price| tier_price.min(product.price));

        Ok(PriceBreakdown {
            product_id: product.id,
            customer_id,
            quantity,
            price_without_discounts: base,
            final_price: base,
            applied_discount_amount: Money::ZERO,
            applied_discount_ids: Vec::new(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_clock;
    use std::sync::Arc;

    fn commerce() -> InMemoryCommerce {
        InMemoryCommerce::with_clock(Arc::new(test_clock()))
    }

    fn category(name: &str, parent: i32) -> Category {
        Category {
            name: name.to_string(),
            parent_category_id: parent,
            published: true,
            ..Category::default()
        }
    }

    #[tokio::test]
    async fn test_update_cannot_take_another_products_sku() {
        let store = commerce();
        let sku_product = |name: &str, sku: &str| Product {
            name: name.to_string(),
            sku: Some(sku.to_string()),
            ..Product::default()
        };
        store.insert_product(sku_product("Mouse", "M-1")).await.unwrap();
        let keyboard = store.insert_product(sku_product("Keyboard", "K-1")).await.unwrap();

        let taken = Product {
            sku: Some("m-1".to_string()),
            ..keyboard.clone()
        };
        let err = store.update_product(taken).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        // Keeping its own SKU is fine
        let renamed = Product {
            name: "Mechanical keyboard".to_string(),
            ..keyboard
        };
        store.update_product(renamed).await.unwrap();
        assert_eq!(
            store.get_product_by_sku("M-1").await.unwrap().unwrap().name,
            "Mouse"
        );
    }

    #[tokio::test]
    async fn test_breadcrumb_is_root_first() {
        let store = commerce();
        let root = store.insert_category(category("Electronics", 0)).await.unwrap();
        let mid = store.insert_category(category("Computers", root.id)).await.unwrap();
        let leaf = store.insert_category(category("Notebooks", mid.id)).await.unwrap();

        let names: Vec<String> = store
            .get_category_breadcrumb(&leaf)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Electronics", "Computers", "Notebooks"]);
    }

    #[tokio::test]
    async fn test_breadcrumb_survives_cycles() {
        let store = commerce();
        let a = store.insert_category(category("A", 2)).await.unwrap();
        let _b = store.insert_category(category("B", a.id)).await.unwrap();

        let path = store.get_category_breadcrumb(&a).await.unwrap();
        assert_eq!(path.len(), 2);
    }

    #[tokio::test]
    async fn test_hidden_categories_filtered() {
        let store = commerce();
        store.insert_category(category("Visible", 0)).await.unwrap();
        store
            .insert_category(Category {
                published: false,
                ..category("Hidden", 0)
            })
            .await
            .unwrap();

        let visible = store
            .get_all_categories(&CategoryFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(visible.total_count(), 1);

        let all = store
            .get_all_categories(
                &CategoryFilter {
                    show_hidden: true,
                    ..CategoryFilter::default()
                },
                PageRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(all.total_count(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_sku_conflicts() {
        let store = commerce();
        let product = Product {
            name: "Mouse".to_string(),
            sku: Some("MS-1".to_string()),
            ..Product::default()
        };
        store.insert_product(product.clone()).await.unwrap();
        let err = store.insert_product(product).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_adjust_inventory_records_history() {
        let store = commerce();
        let product = store
            .insert_product(Product {
                name: "Cable".to_string(),
                manage_inventory: true,
                stock_quantity: 10,
                ..Product::default()
            })
            .await
            .unwrap();

        let updated = store.adjust_inventory(&product, -3, "sold offline").await.unwrap();
        assert_eq!(updated.stock_quantity, 7);

        let history = store.stock_history(product.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "sold offline");
    }

    #[tokio::test]
    async fn test_adjust_untracked_inventory_rejected() {
        let store = commerce();
        let product = store
            .insert_product(Product {
                name: "Ebook".to_string(),
                ..Product::default()
            })
            .await
            .unwrap();
        let err = store.adjust_inventory(&product, 1, "").await.unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_tier_price_applies_at_threshold() {
        let store = commerce();
        let product = store
            .insert_product(Product {
                name: "Pen".to_string(),
                price: Money::from_cents(200),
                ..Product::default()
            })
            .await
            .unwrap();
        store
            .seed_tier_price(TierPrice {
                product_id: product.id,
                quantity: 10,
                price: Money::from_cents(150),
                ..TierPrice::default()
            })
            .unwrap();

        let single = store.get_final_price(&product, None, 1).await.unwrap();
        assert_eq!(single.final_price, Money::from_cents(200));

        let bulk = store.get_final_price(&product, Some(4), 12).await.unwrap();
        assert_eq!(bulk.final_price, Money::from_cents(150));
        assert_eq!(bulk.customer_id, Some(4));
    }
}
