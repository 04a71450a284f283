//! Cart store trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Cart, CartItem, CustomerId, ProductId};

use crate::error::{ReplaceError, ServiceError};

const SERVICE: &str = "cart";

/// Access to the customer's shopping cart, owned by another service.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns the customer's current cart.
    async fn get_cart(&self, customer_id: CustomerId) -> Result<Cart, ServiceError>;

    /// Removes an item from the cart.
    async fn remove_item(
        &self,
        customer_id: CustomerId,
        product_id: &ProductId,
    ) -> Result<(), ServiceError>;

    /// Adds an item to the cart.
    async fn add_item(&self, customer_id: CustomerId, item: CartItem) -> Result<(), ServiceError>;

    /// Replaces the cart line for `item.product_id` with `item`.
    ///
    /// The default removes then adds, so a failed add leaves the cart without
    /// the item. Stores that can swap the line atomically should override it.
    async fn replace_item(
        &self,
        customer_id: CustomerId,
        item: CartItem,
    ) -> Result<(), ReplaceError> {
        self.remove_item(customer_id, &item.product_id)
            .await
            .map_err(ReplaceError::Remove)?;
        self.add_item(customer_id, item)
            .await
            .map_err(ReplaceError::Add)
    }
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    carts: HashMap<CustomerId, Cart>,
    fail_on_get: bool,
    fail_on_remove: bool,
    fail_on_add: bool,
    remove_calls: u32,
    add_calls: u32,
}

/// In-memory cart store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartStore {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartStore {
    /// Creates a new in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a cart as-is, replacing any existing cart for the customer.
    pub fn put_cart(&self, cart: Cart) {
        self.state
            .write()
            .unwrap()
            .carts
            .insert(cart.customer_id, cart);
    }

    /// Returns a copy of the stored cart.
    pub fn cart(&self, customer_id: CustomerId) -> Option<Cart> {
        self.state.read().unwrap().carts.get(&customer_id).cloned()
    }

    /// Configures the store to fail get_cart calls.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }

    /// Configures the store to fail remove_item calls.
    pub fn set_fail_on_remove(&self, fail: bool) {
        self.state.write().unwrap().fail_on_remove = fail;
    }

    /// Configures the store to fail add_item calls.
    pub fn set_fail_on_add(&self, fail: bool) {
        self.state.write().unwrap().fail_on_add = fail;
    }

    /// Returns how many times remove_item was called.
    pub fn remove_calls(&self) -> u32 {
        self.state.read().unwrap().remove_calls
    }

    /// Returns how many times add_item was called.
    pub fn add_calls(&self) -> u32 {
        self.state.read().unwrap().add_calls
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn get_cart(&self, customer_id: CustomerId) -> Result<Cart, ServiceError> {
        let state = self.state.read().unwrap();

        if state.fail_on_get {
            return Err(ServiceError::unavailable(SERVICE, "cart service offline"));
        }

        Ok(state
            .carts
            .get(&customer_id)
            .cloned()
            .unwrap_or_else(|| Cart::new(customer_id)))
    }

    async fn remove_item(
        &self,
        customer_id: CustomerId,
        product_id: &ProductId,
    ) -> Result<(), ServiceError> {
        let mut state = self.state.write().unwrap();
        state.remove_calls += 1;

        if state.fail_on_remove {
            return Err(ServiceError::unavailable(SERVICE, "remove failed"));
        }

        let cart = state
            .carts
            .get_mut(&customer_id)
            .ok_or_else(|| ServiceError::rejected(SERVICE, "Carrinho não encontrado"))?;
        cart.remove_item(product_id)
            .map_err(|e| ServiceError::rejected(SERVICE, e.to_string()))?;
        Ok(())
    }

    async fn add_item(&self, customer_id: CustomerId, item: CartItem) -> Result<(), ServiceError> {
        let mut state = self.state.write().unwrap();
        state.add_calls += 1;

        if state.fail_on_add {
            return Err(ServiceError::unavailable(SERVICE, "add failed"));
        }

        state
            .carts
            .entry(customer_id)
            .or_insert_with(|| Cart::new(customer_id))
            .add_item(item)
            .map_err(|e| ServiceError::rejected(SERVICE, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Money;

    fn seeded() -> (InMemoryCartStore, CustomerId) {
        let store = InMemoryCartStore::new();
        let customer_id = CustomerId::new();
        let mut cart = Cart::new(customer_id);
        cart.add_item(CartItem::new("P1", "Widget", 1, Money::from_cents(1000)))
            .unwrap();
        store.put_cart(cart);
        (store, customer_id)
    }

    #[tokio::test]
    async fn test_missing_cart_is_empty() {
        let store = InMemoryCartStore::new();
        let cart = store.get_cart(CustomerId::new()).await.unwrap();
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_replace_item_swaps_price() {
        let (store, customer_id) = seeded();

        store
            .replace_item(
                customer_id,
                CartItem::new("P1", "Widget", 1, Money::from_cents(1250)),
            )
            .await
            .unwrap();

        let cart = store.cart(customer_id).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].unit_price.cents(), 1250);
        assert_eq!(cart.total.cents(), 1250);
    }

    #[tokio::test]
    async fn test_replace_item_remove_failure_skips_add() {
        let (store, customer_id) = seeded();
        store.set_fail_on_remove(true);

        let err = store
            .replace_item(
                customer_id,
                CartItem::new("P1", "Widget", 1, Money::from_cents(1250)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReplaceError::Remove(_)));
        assert_eq!(store.add_calls(), 0);
        assert_eq!(store.cart(customer_id).unwrap().items[0].unit_price.cents(), 1000);
    }

    #[tokio::test]
    async fn test_replace_item_add_failure_leaves_item_removed() {
        let (store, customer_id) = seeded();
        store.set_fail_on_add(true);

        let err = store
            .replace_item(
                customer_id,
                CartItem::new("P1", "Widget", 1, Money::from_cents(1250)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReplaceError::Add(_)));
        assert!(store.cart(customer_id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown_item_is_rejected() {
        let (store, customer_id) = seeded();
        let err = store
            .remove_item(customer_id, &ProductId::new("NOPE"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_fail_on_get() {
        let (store, customer_id) = seeded();
        store.set_fail_on_get(true);
        assert!(store.get_cart(customer_id).await.is_err());
    }
}
