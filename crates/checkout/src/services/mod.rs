//! Collaborator traits and in-memory implementations for the checkout path.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod finalizer;

pub use address::{AddressProvider, InMemoryAddressBook};
pub use cart::{CartStore, InMemoryCartStore};
pub use catalog::{CatalogLookup, InMemoryCatalog};
pub use finalizer::{InMemoryOrderFinalizer, OrderFinalizer};
