//! Shopping cart service over the in-memory tables.

use super::{InMemoryCommerce, Tables, missing};
use async_trait::async_trait;
use commerce_api_core::orders::{ShoppingCartItem, ShoppingCartService, ShoppingCartType};
use commerce_api_core::{DateTime, Money, Result, Utc};

/// Warnings for putting `quantity` units of `product_id` into a cart.
/// `already_in_cart` is the quantity the cart holds outside the line being changed.
fn cart_warnings(
    tables: &Tables,
    product_id: i32,
    cart_type: ShoppingCartType,
    quantity: i32,
    already_in_cart: i32,
) -> Vec<String> {
    let mut warnings = Vec::new();
    let Some(product) = tables.products.get(product_id).filter(|p| !p.deleted) else {
        warnings.push(format!("Product {product_id} not found"));
        return warnings;
    };
    if !product.published {
        warnings.push("Product is not published".to_string());
    }
    if cart_type == ShoppingCartType::ShoppingCart && product.disable_buy_button {
        warnings.push("Buying is disabled for this product".to_string());
    }
    if quantity <= 0 {
        warnings.push("Quantity should be positive".to_string());
    }
    let Some(total) = quantity.checked_add(already_in_cart) else {
        warnings.push(format!(
            "The maximum quantity allowed in the cart is {}",
            i32::MAX
        ));
        return warnings;
    };
    if cart_type == ShoppingCartType::ShoppingCart
        && product.manage_inventory
        && total > product.stock_quantity
    {
        let available = (product.stock_quantity - already_in_cart).max(0);
        warnings.push(format!(
            "Your quantity exceeds stock on hand. The maximum quantity that can be added is {available}."
        ));
    }
    warnings
}

/// Add to a cart with the table lock already held.
pub(super) fn add_to_cart_locked(
    tables: &mut Tables,
    now: DateTime<Utc>,
    customer_id: i32,
    product_id: i32,
    cart_type: ShoppingCartType,
    quantity: i32,
    customer_entered_price: Money,
) -> Vec<String> {
    let existing = tables
        .cart_items
        .values()
        .find(|i| {
            i.customer_id == customer_id
                && i.product_id == product_id
                && i.shopping_cart_type == cart_type
        })
        .cloned();
    let in_cart = existing.as_ref().map_or(0, |i| i.quantity);

    let warnings = cart_warnings(tables, product_id, cart_type, quantity, in_cart);
    if !warnings.is_empty() {
        return warnings;
    }

    match existing {
        Some(mut item) => {
            item.quantity = item.quantity.saturating_add(quantity);
            item.updated_on_utc = now;
            tables.cart_items.put(item.id, item);
        }
        None => {
            let id = tables.cart_items.next_id();
            tables.cart_items.put(
                id,
                ShoppingCartItem {
                    id,
                    store_id: 1,
                    shopping_cart_type: cart_type,
                    customer_id,
                    product_id,
                    attributes: None,
                    customer_entered_price,
                    quantity,
                    created_on_utc: now,
                    updated_on_utc: now,
                },
            );
        }
    }
    warnings
}

#[async_trait]
impl ShoppingCartService for InMemoryCommerce {
    async fn get_shopping_cart(
        &self,
        customer_id: i32,
        cart_type: ShoppingCartType,
    ) -> Result<Vec<ShoppingCartItem>> {
        let tables = self.read()?;
        Ok(tables
            .cart_items
            .values()
            .filter(|i| i.customer_id == customer_id && i.shopping_cart_type == cart_type)
            .cloned()
            .collect())
    }

    async fn get_shopping_cart_item_by_id(&self, id: i32) -> Result<Option<ShoppingCartItem>> {
        Ok(self.read()?.cart_items.get(id))
    }

    async fn add_to_cart(
        &self,
        customer_id: i32,
        product_id: i32,
        cart_type: ShoppingCartType,
        quantity: i32,
        customer_entered_price: Money,
    ) -> Result<Vec<String>> {
        let now = self.now();
        let mut tables = self.write()?;
        Ok(add_to_cart_locked(
            &mut tables,
            now,
            customer_id,
            product_id,
            cart_type,
            quantity,
            customer_entered_price,
        ))
    }

    async fn update_shopping_cart_item(&self, item: &ShoppingCartItem, quantity: i32) -> Result<Vec<String>> {
        let now = self.now();
        let mut tables = self.write()?;
        if !tables.cart_items.contains(item.id) {
            return Err(missing("Shopping cart item", item.id));
        }
        let warnings = cart_warnings(&tables, item.product_id, item.shopping_cart_type, quantity, 0);
        if warnings.is_empty() {
            if let Some(stored) = tables.cart_items.get_mut(item.id) {
                stored.quantity = quantity;
                stored.updated_on_utc = now;
            }
        }
        Ok(warnings)
    }

    async fn delete_shopping_cart_item(&self, item: &ShoppingCartItem) -> Result<()> {
        self.write()?.cart_items.remove(item.id);
        Ok(())
    }

    async fn clear_shopping_cart(&self, customer_id: i32, cart_type: ShoppingCartType) -> Result<()> {
        self.write()?
            .cart_items
            .retain(|i| !(i.customer_id == customer_id && i.shopping_cart_type == cart_type));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_clock;
    use commerce_api_core::catalog::{Product, ProductService};
    use std::sync::Arc;

    async fn store_with_product(stock: i32) -> (InMemoryCommerce, Product) {
        let store = InMemoryCommerce::with_clock(Arc::new(test_clock()));
        let product = store
            .insert_product(Product {
                name: "Lamp".to_string(),
                published: true,
                manage_inventory: true,
                stock_quantity: stock,
                ..Product::default()
            })
            .await
            .unwrap();
        (store, product)
    }

    #[tokio::test]
    async fn test_add_merges_existing_line() {
        let (store, product) = store_with_product(10).await;
        let cart = ShoppingCartType::ShoppingCart;

        assert!(store.add_to_cart(3, product.id, cart, 2, Money::ZERO).await.unwrap().is_empty());
        assert!(store.add_to_cart(3, product.id, cart, 1, Money::ZERO).await.unwrap().is_empty());

        let items = store.get_shopping_cart(3, cart).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_stock_warning() {
        let (store, product) = store_with_product(2).await;
        let warnings = store
            .add_to_cart(3, product.id, ShoppingCartType::ShoppingCart, 5, Money::ZERO)
            .await
            .unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("maximum quantity that can be added is 2"));
        assert!(store
            .get_shopping_cart(3, ShoppingCartType::ShoppingCart)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_wishlist_ignores_stock() {
        let (store, product) = store_with_product(0).await;
        let warnings = store
            .add_to_cart(3, product.id, ShoppingCartType::Wishlist, 5, Money::ZERO)
            .await
            .unwrap();
        assert!(warnings.is_empty());
    }

    #[tokio::test]
    async fn test_merge_past_i32_max_is_refused() {
        let (store, product) = store_with_product(0).await;
        let wishlist = ShoppingCartType::Wishlist;

        assert!(store.add_to_cart(3, product.id, wishlist, i32::MAX, Money::ZERO).await.unwrap().is_empty());
        let warnings = store.add_to_cart(3, product.id, wishlist, i32::MAX, Money::ZERO).await.unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("maximum quantity allowed"));

        // The store is still usable and the line is unchanged
        let items = store.get_shopping_cart(3, wishlist).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, i32::MAX);
    }

    #[tokio::test]
    async fn test_clear_only_touches_one_cart_type() {
        let (store, product) = store_with_product(10).await;
        store.add_to_cart(3, product.id, ShoppingCartType::ShoppingCart, 1, Money::ZERO).await.unwrap();
        store.add_to_cart(3, product.id, ShoppingCartType::Wishlist, 1, Money::ZERO).await.unwrap();

        store.clear_shopping_cart(3, ShoppingCartType::ShoppingCart).await.unwrap();

        assert!(store.get_shopping_cart(3, ShoppingCartType::ShoppingCart).await.unwrap().is_empty());
        assert_eq!(store.get_shopping_cart(3, ShoppingCartType::Wishlist).await.unwrap().len(), 1);
    }
}
