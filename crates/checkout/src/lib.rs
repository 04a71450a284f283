//! Checkout reconciliation for the checkout gateway.
//!
//! Before an order is placed the shopper's cart is checked against the
//! catalog, which is owned by another team and may have moved on:
//! 1. Items no longer listed are reported, all at once
//! 2. The first item whose price changed is corrected in the cart, and the
//!    attempt is stopped so the shopper can review it
//! 3. A consistent cart is composed with the delivery address into an order
//!    submission and handed to the order finalizer
//!
//! Cart, catalog, address and finalizer are reached through the traits in
//! [`services`].

pub mod composer;
pub mod error;
pub mod orchestrator;
pub mod reconciliation;
pub mod report;
pub mod services;

pub use composer::compose;
pub use error::{CheckoutError, ReplaceError, ServiceError};
pub use orchestrator::CheckoutOrchestrator;
pub use reconciliation::{Reconciliation, reconcile};
pub use report::{CheckoutIssue, ErrorReport};
pub use services::{
    AddressProvider, CartStore, CatalogLookup, InMemoryAddressBook, InMemoryCartStore,
    InMemoryCatalog, InMemoryOrderFinalizer, OrderFinalizer,
};
