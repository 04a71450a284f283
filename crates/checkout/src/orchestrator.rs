//! Checkout orchestrator, the entry point of the checkout path.

use std::time::Instant;

use domain::{CustomerId, OrderConfirmation, OrderDraft};

use crate::composer;
use crate::error::CheckoutError;
use crate::reconciliation::{self, Reconciliation};
use crate::services::{AddressProvider, CartStore, CatalogLookup, OrderFinalizer};

/// Sequences the checkout of a customer's cart.
///
/// The cart is fetched first, then its catalog records and the delivery
/// address concurrently. The cart is reconciled against the catalog and, only
/// if it is consistent, composed into a submission for the finalizer.
pub struct CheckoutOrchestrator<C, K, A, F>
where
    C: CartStore,
    K: CatalogLookup,
    A: AddressProvider,
    F: OrderFinalizer,
{
    cart: C,
    catalog: K,
    addresses: A,
    finalizer: F,
}

impl<C, K, A, F> CheckoutOrchestrator<C, K, A, F>
where
    C: CartStore + Clone + 'static,
    K: CatalogLookup,
    A: AddressProvider,
    F: OrderFinalizer,
{
    /// Creates a new checkout orchestrator.
    pub fn new(cart: C, catalog: K, addresses: A, finalizer: F) -> Self {
        Self {
            cart,
            catalog,
            addresses,
            finalizer,
        }
    }

    /// Checks out the customer's cart.
    ///
    /// Returns the finalizer's confirmation, or the reason no order was
    /// placed. A rejected attempt performs no submission.
    #[tracing::instrument(skip_all, fields(%customer_id))]
    pub async fn checkout(
        &self,
        customer_id: CustomerId,
        draft: OrderDraft,
    ) -> Result<OrderConfirmation, CheckoutError> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let started = Instant::now();

        let result = self.run_checkout(customer_id, &draft).await;

        let duration = started.elapsed().as_secs_f64();
        metrics::histogram!("checkout_duration_seconds").record(duration);

        match &result {
            Ok(confirmation) => {
                metrics::counter!("checkout_completed").increment(1);
                tracing::info!(
                    order_id = %confirmation.order_id,
                    code = confirmation.code,
                    units = confirmation.unit_count(),
                    duration,
                    "checkout completed"
                );
            }
            Err(CheckoutError::Rejected(report)) => {
                metrics::counter!("checkout_rejected").increment(1);
                tracing::info!(issues = report.len(), "checkout rejected");
            }
            Err(CheckoutError::Service(e)) => {
                metrics::counter!("checkout_failed", "service" => e.service()).increment(1);
                tracing::warn!(service = e.service(), error = %e, "checkout failed upstream");
            }
            Err(e) => {
                metrics::counter!("checkout_failed", "service" => "none").increment(1);
                tracing::warn!(error = %e, "checkout failed");
            }
        }

        result
    }

    async fn run_checkout(
        &self,
        customer_id: CustomerId,
        draft: &OrderDraft,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let mut cart = self.cart.get_cart(customer_id).await?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Dropping either future on the other's failure cancels it.
        let product_ids = cart.product_ids();
        let (catalog, address) = tokio::try_join!(
            self.catalog.get_products(&product_ids),
            self.addresses.get_address(customer_id),
        )?;

        if let Reconciliation::Rejected(report) =
            reconciliation::reconcile(&mut cart, &catalog, &self.cart).await?
        {
            return Err(CheckoutError::Rejected(report));
        }

        let submission = composer::compose(&cart, &address, draft);
        tracing::debug!(
            items = submission.items.len(),
            total = %submission.total,
            "submitting order"
        );

        Ok(self.finalizer.submit(submission).await?)
    }

    /// Returns the customer's most recent order.
    #[tracing::instrument(skip(self))]
    pub async fn last_order(
        &self,
        customer_id: CustomerId,
    ) -> Result<OrderConfirmation, CheckoutError> {
        self.finalizer
            .last_order(customer_id)
            .await?
            .ok_or(CheckoutError::OrderNotFound)
    }

    /// Returns the customer's orders, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn orders_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderConfirmation>, CheckoutError> {
        Ok(self.finalizer.orders_by_customer(customer_id).await?)
    }
}
