//! Order finalizer trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use domain::{CustomerId, OrderConfirmation, OrderSubmission};

use crate::error::ServiceError;

/// The service that turns a reconciled submission into a placed order.
#[async_trait]
pub trait OrderFinalizer: Send + Sync {
    /// Places the order.
    async fn submit(&self, submission: OrderSubmission)
    -> Result<OrderConfirmation, ServiceError>;

    /// Returns the customer's most recent order, if any.
    async fn last_order(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<OrderConfirmation>, ServiceError>;

    /// Returns every order the customer has placed, newest first.
    async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderConfirmation>, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryFinalizerState {
    orders: Vec<OrderConfirmation>,
    next_code: u64,
    fail_on_submit: bool,
    reject_on_submit: Option<Vec<String>>,
    submissions: Vec<OrderSubmission>,
}

/// In-memory order finalizer for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderFinalizer {
    state: Arc<RwLock<InMemoryFinalizerState>>,
}

impl InMemoryOrderFinalizer {
    /// Creates a new in-memory order finalizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the finalizer to be unreachable on submit.
    pub fn set_fail_on_submit(&self, fail: bool) {
        self.state.write().unwrap().fail_on_submit = fail;
    }

    /// Configures the finalizer to refuse submissions with the given messages.
    pub fn set_reject_on_submit(&self, messages: Option<Vec<String>>) {
        self.state.write().unwrap().reject_on_submit = messages;
    }

    /// Returns every submission received, accepted or not.
    pub fn submissions(&self) -> Vec<OrderSubmission> {
        self.state.read().unwrap().submissions.clone()
    }

    /// Returns the number of accepted orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }
}

#[async_trait]
impl OrderFinalizer for InMemoryOrderFinalizer {
    async fn submit(
        &self,
        submission: OrderSubmission,
    ) -> Result<OrderConfirmation, ServiceError> {
        let mut state = self.state.write().unwrap();
        state.submissions.push(submission.clone());

        if state.fail_on_submit {
            return Err(ServiceError::unavailable("orders", "order service offline"));
        }
        if let Some(messages) = state.reject_on_submit.clone() {
            return Err(ServiceError::Rejected {
                service: "orders",
                messages,
            });
        }

        state.next_code += 1;
        let confirmation = OrderConfirmation::accept(submission, state.next_code, Utc::now());
        state.orders.push(confirmation.clone());

        Ok(confirmation)
    }

    async fn last_order(
        &self,
        customer_id: CustomerId,
    ) -> Result<Option<OrderConfirmation>, ServiceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .orders
            .iter()
            .rev()
            .find(|order| order.customer_id == customer_id)
            .cloned())
    }

    async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderConfirmation>, ServiceError> {
        let state = self.state.read().unwrap();
        Ok(state
            .orders
            .iter()
            .rev()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }
}
