//! Shared identifiers used across the checkout gateway crates.

mod types;

pub use types::{CustomerId, OrderId};
