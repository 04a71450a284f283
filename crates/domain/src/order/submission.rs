//! Orders handed to, and returned by, the order finalizer.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

use super::draft::PaymentCard;
use super::state::OrderStatus;
use crate::address::Address;
use crate::cart::CartItem;
use crate::value_objects::Money;

/// A reconciled order ready for finalization.
///
/// Has no identity until the finalizer accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub customer_id: CustomerId,
    pub voucher_code: Option<String>,
    pub voucher_used: bool,
    pub total: Money,
    pub discount: Money,
    pub items: Vec<CartItem>,
    pub address: Address,
    pub payment: Option<PaymentCard>,
}

/// An order accepted by the finalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    /// Human-readable sequential order code.
    pub code: u64,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub total: Money,
    pub discount: Money,
    pub voucher_code: Option<String>,
    pub voucher_used: bool,
    pub items: Vec<CartItem>,
    pub address: Address,
    pub created_at: DateTime<Utc>,
}

impl OrderConfirmation {
    /// Builds the confirmation for an accepted submission.
    ///
    /// Payment details are not retained on the confirmation.
    pub fn accept(submission: OrderSubmission, code: u64, created_at: DateTime<Utc>) -> Self {
        Self {
            order_id: OrderId::new(),
            code,
            customer_id: submission.customer_id,
            status: OrderStatus::Authorized,
            total: submission.total,
            discount: submission.discount,
            voucher_code: submission.voucher_code,
            voucher_used: submission.voucher_used,
            items: submission.items,
            address: submission.address,
            created_at,
        }
    }

    /// Returns the number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
