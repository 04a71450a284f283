//! Catalog records, the authoritative product data at checkout time.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Money, ProductId};

/// A product as the catalog currently lists it.
///
/// Fetched fresh on every checkout attempt and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub name: String,
    pub price: Money,
}

impl ProductRecord {
    /// Creates a new product record.
    pub fn new(product_id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            price,
        }
    }
}
