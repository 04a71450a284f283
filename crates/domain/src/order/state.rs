//! Order status as reported by the order finalizer.

use serde::{Deserialize, Serialize};

/// The status of a finalized order.
///
/// Status transitions (owned by the finalizer, observed here):
/// ```text
/// Authorized ──┬──► Paid ──► Delivered
///              ├──► Refused
///              └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Order accepted and payment authorized.
    #[default]
    Authorized,

    /// Payment captured.
    Paid,

    /// Payment refused.
    Refused,

    /// Order delivered.
    Delivered,

    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Authorized => "Authorized",
            OrderStatus::Paid => "Paid",
            OrderStatus::Refused => "Refused",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_authorized() {
        assert_eq!(OrderStatus::default(), OrderStatus::Authorized);
    }

    #[test]
    fn test_display() {
        assert_eq!(OrderStatus::Authorized.to_string(), "Authorized");
        assert_eq!(OrderStatus::Delivered.to_string(), "Delivered");
    }
}
