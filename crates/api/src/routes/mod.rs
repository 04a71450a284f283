//! HTTP route handlers.

pub mod identity;
pub mod orders;
pub mod system;
