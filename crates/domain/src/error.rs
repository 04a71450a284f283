//! Domain error types.

use thiserror::Error;

use crate::value_objects::{Money, ProductId};

/// Errors raised when a cart is asked to hold something invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// Invalid price.
    #[error("Invalid price: {price} (must be greater than 0)")]
    InvalidPrice { price: Money },

    /// The product is already present in the cart.
    #[error("Item already in cart: {product_id}")]
    DuplicateItem { product_id: ProductId },

    /// Item not found in cart.
    #[error("Item not found: {product_id}")]
    ItemNotFound { product_id: ProductId },
}
