//! Domain layer for the checkout gateway.
//!
//! This crate provides the data the checkout path moves between services:
//! - Cart and cart items as held by the cart service
//! - Catalog records, the authoritative product prices
//! - Delivery addresses
//! - Order drafts, submissions and confirmations

pub mod address;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod order;
pub mod value_objects;

pub use address::Address;
pub use cart::{Cart, CartItem, DiscountType, Voucher};
pub use catalog::ProductRecord;
pub use common::{CustomerId, OrderId};
pub use error::DomainError;
pub use order::{OrderConfirmation, OrderDraft, OrderStatus, OrderSubmission, PaymentCard};
pub use value_objects::{Money, ProductId};
