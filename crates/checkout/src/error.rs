//! Checkout error types.

use thiserror::Error;

use crate::report::ErrorReport;

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The collaborator could not be reached or failed internally.
    #[error("{service} service unavailable: {reason}")]
    Unavailable {
        service: &'static str,
        reason: String,
    },

    /// The collaborator refused the request on business grounds.
    #[error("{service} service rejected the request: {}", messages.join("; "))]
    Rejected {
        service: &'static str,
        messages: Vec<String>,
    },
}

impl ServiceError {
    /// Shorthand for an unavailable collaborator.
    pub fn unavailable(service: &'static str, reason: impl Into<String>) -> Self {
        ServiceError::Unavailable {
            service,
            reason: reason.into(),
        }
    }

    /// Shorthand for a single-message business refusal.
    pub fn rejected(service: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Rejected {
            service,
            messages: vec![message.into()],
        }
    }

    /// Returns the name of the collaborator that failed.
    pub fn service(&self) -> &'static str {
        match self {
            ServiceError::Unavailable { service, .. } | ServiceError::Rejected { service, .. } => {
                service
            }
        }
    }
}

/// Which half of a cart item replacement failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// The stale item could not be removed; the cart is unchanged.
    #[error("could not remove item: {0}")]
    Remove(ServiceError),

    /// The stale item was removed but the corrected one could not be added.
    #[error("could not add item: {0}")]
    Add(ServiceError),
}

/// Errors returned by checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart failed reconciliation; the report says why.
    #[error("Checkout rejected: {0}")]
    Rejected(ErrorReport),

    /// The cart has no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// No order exists for the customer.
    #[error("Order not found")]
    OrderNotFound,

    /// A collaborator call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// Collaborator data broke an invariant the checkout relies on.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
