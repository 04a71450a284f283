//! Catalog lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Money, ProductId, ProductRecord};

use crate::error::ServiceError;

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Returns the current records for the given products.
    ///
    /// Products the catalog no longer lists are simply absent from the result.
    async fn get_products(&self, ids: &[ProductId]) -> Result<Vec<ProductRecord>, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, ProductRecord>,
    fail_on_lookup: bool,
    lookups: u32,
}

/// In-memory catalog for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists a product, replacing any previous record with the same id.
    pub fn upsert(&self, record: ProductRecord) {
        self.state
            .write()
            .unwrap()
            .products
            .insert(record.product_id.clone(), record);
    }

    /// Changes the price of a listed product.
    pub fn set_price(&self, product_id: &ProductId, price: Money) {
        if let Some(record) = self.state.write().unwrap().products.get_mut(product_id) {
            record.price = price;
        }
    }

    /// Delists a product.
    pub fn remove(&self, product_id: &ProductId) {
        self.state.write().unwrap().products.remove(product_id);
    }

    /// Configures the catalog to fail lookups.
    pub fn set_fail_on_lookup(&self, fail: bool) {
        self.state.write().unwrap().fail_on_lookup = fail;
    }

    /// Returns how many lookups were served or failed.
    pub fn lookup_count(&self) -> u32 {
        self.state.read().unwrap().lookups
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    async fn get_products(&self, ids: &[ProductId]) -> Result<Vec<ProductRecord>, ServiceError> {
        let mut state = self.state.write().unwrap();
        state.lookups += 1;

        if state.fail_on_lookup {
            return Err(ServiceError::unavailable("catalog", "catalog service offline"));
        }

        Ok(ids
            .iter()
            .filter_map(|id| state.products.get(id).cloned())
            .collect())
    }
}
