//! Shopping cart as reported by the cart service.

use std::collections::HashSet;

use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Money, ProductId};

/// A line in the shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The product identifier, unique within a cart.
    pub product_id: ProductId,

    /// Human-readable product name.
    pub name: String,

    /// Quantity in the cart.
    pub quantity: u32,

    /// Price per unit captured when the item was added.
    pub unit_price: Money,

    /// Product image path, if the catalog has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CartItem {
    /// Creates a new cart item without an image.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            unit_price,
            image: None,
        }
    }

    /// Sets the image path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Returns the line total (quantity * unit_price).
    pub fn total_price(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Checks the item invariants: positive quantity and price.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.quantity == 0 {
            return Err(DomainError::InvalidQuantity {
                quantity: self.quantity,
            });
        }
        if !self.unit_price.is_positive() {
            return Err(DomainError::InvalidPrice {
                price: self.unit_price,
            });
        }
        Ok(())
    }
}

/// How a voucher discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscountType {
    Percentage,
    Value,
}

/// Voucher applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub code: String,
    /// Percentage off in basis points (1250 = 12.5%).
    pub percentage_bp: Option<u32>,
    pub discount: Option<Money>,
    pub discount_type: DiscountType,
}

impl Voucher {
    /// A voucher taking a whole percentage off the cart.
    pub fn percentage(code: impl Into<String>, percentage: u32) -> Self {
        Self::percentage_bp(code, percentage * 100)
    }

    /// A voucher taking a fractional percentage off the cart, in basis points.
    pub fn percentage_bp(code: impl Into<String>, basis_points: u32) -> Self {
        Self {
            code: code.into(),
            percentage_bp: Some(basis_points),
            discount: None,
            discount_type: DiscountType::Percentage,
        }
    }

    /// A voucher taking a fixed amount off the cart.
    pub fn value(code: impl Into<String>, discount: Money) -> Self {
        Self {
            code: code.into(),
            percentage_bp: None,
            discount: Some(discount),
            discount_type: DiscountType::Value,
        }
    }
}

/// The customer's shopping cart.
///
/// `total` and `discount` are owned by the cart service and are taken as
/// correct here; only item existence and prices are checked at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub customer_id: CustomerId,
    pub items: Vec<CartItem>,
    pub voucher: Option<Voucher>,
    pub has_voucher: bool,
    pub discount: Money,
    pub total: Money,
}

impl Cart {
    /// Creates an empty cart for a customer.
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            items: Vec::new(),
            voucher: None,
            has_voucher: false,
            discount: Money::zero(),
            total: Money::zero(),
        }
    }

    /// Returns true if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the code of the applied voucher, if any.
    pub fn voucher_code(&self) -> Option<&str> {
        self.voucher.as_ref().map(|v| v.code.as_str())
    }

    /// Returns the distinct product ids in cart order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|item| seen.insert(&item.product_id))
            .map(|item| item.product_id.clone())
            .collect()
    }

    /// Finds an item by product id.
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product_id == product_id)
    }

    /// Finds an item by product id for in-place correction.
    pub fn item_mut(&mut self, product_id: &ProductId) -> Option<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|item| &item.product_id == product_id)
    }

    /// Adds a validated item, rejecting duplicates.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), DomainError> {
        item.validate()?;
        if self.item(&item.product_id).is_some() {
            return Err(DomainError::DuplicateItem {
                product_id: item.product_id,
            });
        }
        self.items.push(item);
        self.recalculate();
        Ok(())
    }

    /// Removes an item by product id.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<CartItem, DomainError> {
        let idx = self
            .items
            .iter()
            .position(|item| &item.product_id == product_id)
            .ok_or_else(|| DomainError::ItemNotFound {
                product_id: product_id.clone(),
            })?;
        let removed = self.items.remove(idx);
        self.recalculate();
        Ok(removed)
    }

    /// Applies a voucher and recomputes the totals.
    pub fn apply_voucher(&mut self, voucher: Voucher) {
        self.voucher = Some(voucher);
        self.has_voucher = true;
        self.recalculate();
    }

    /// Returns the sum of line totals before any discount.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartItem::total_price).sum()
    }

    // Mirrors the cart service's pricing: discount never exceeds the subtotal.
    fn recalculate(&mut self) {
        let subtotal = self.subtotal();
        let discount = match &self.voucher {
            Some(Voucher {
                discount_type: DiscountType::Percentage,
                percentage_bp: Some(bp),
                ..
            }) => Money::from_cents(subtotal.cents() * i64::from(*bp) / 10_000),
            Some(Voucher {
                discount_type: DiscountType::Value,
                discount: Some(value),
                ..
            }) => *value,
            _ => Money::zero(),
        };
        let discount = discount.min(subtotal);
        self.discount = discount;
        self.total = subtotal - discount;
    }
}
