//! Cart reconciliation against the catalog.
//!
//! Two kinds of drift are checked, in order:
//! 1. Existence: every cart item must still be listed. All delisted items are
//!    reported together.
//! 2. Price: every cart price must equal the catalog price. The first stale
//!    item is corrected in the cart store and the attempt is stopped so the
//!    shopper can review the new price.

use std::collections::{HashMap, HashSet};

use domain::{Cart, CartItem, ProductId, ProductRecord};

use crate::error::{CheckoutError, ReplaceError};
use crate::report::{CheckoutIssue, ErrorReport};
use crate::services::CartStore;

/// Outcome of reconciling a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Every item exists and is priced as in the catalog.
    Consistent,

    /// The cart cannot be ordered as-is.
    Rejected(ErrorReport),
}

/// Checks `cart` against `catalog`, self-healing the first stale price.
///
/// On a successful self-heal `cart` is updated to the catalog price, matching
/// the store. Errors are reserved for catalog data that breaks the lookup
/// contract; shopper-facing problems come back as [`Reconciliation::Rejected`].
///
/// Once started, the store update runs on its own task and completes even if
/// this future is dropped, so the stored cart never loses the item halfway.
#[tracing::instrument(
    skip_all,
    fields(customer_id = %cart.customer_id, items = cart.items.len(), records = catalog.len())
)]
pub async fn reconcile<C>(
    cart: &mut Cart,
    catalog: &[ProductRecord],
    store: &C,
) -> Result<Reconciliation, CheckoutError>
where
    C: CartStore + Clone + 'static,
{
    if cart.items.len() != catalog.len() {
        let report = unavailable_items(cart, catalog);
        if report.is_empty() {
            return Err(CheckoutError::Internal(format!(
                "catalog returned {} records for {} cart items",
                catalog.len(),
                cart.items.len()
            )));
        }
        tracing::info!(missing = report.len(), "cart has items missing from catalog");
        return Ok(Reconciliation::Rejected(report));
    }

    let Some((stale, record)) = first_price_drift(cart, catalog)? else {
        return Ok(Reconciliation::Consistent);
    };

    let report = self_heal(cart, stale, record, store).await?;
    Ok(Reconciliation::Rejected(report))
}

/// One issue per cart item the catalog no longer lists, in cart order.
fn unavailable_items(cart: &Cart, catalog: &[ProductRecord]) -> ErrorReport {
    let listed: HashSet<&ProductId> = catalog.iter().map(|r| &r.product_id).collect();

    cart.items
        .iter()
        .filter(|item| !listed.contains(&item.product_id))
        .map(|item| CheckoutIssue::ItemUnavailable {
            name: item.name.clone(),
        })
        .collect()
}

/// Finds the first cart item whose price differs from its catalog record.
fn first_price_drift<'a>(
    cart: &Cart,
    catalog: &'a [ProductRecord],
) -> Result<Option<(CartItem, &'a ProductRecord)>, CheckoutError> {
    let by_id: HashMap<&ProductId, &ProductRecord> =
        catalog.iter().map(|r| (&r.product_id, r)).collect();

    for item in &cart.items {
        let record = by_id.get(&item.product_id).ok_or_else(|| {
            CheckoutError::Internal(format!(
                "no catalog record for cart item {}",
                item.product_id
            ))
        })?;

        if record.price != item.unit_price {
            return Ok(Some((item.clone(), *record)));
        }
    }

    Ok(None)
}

async fn self_heal<C>(
    cart: &mut Cart,
    stale: CartItem,
    record: &ProductRecord,
    store: &C,
) -> Result<ErrorReport, CheckoutError>
where
    C: CartStore + Clone + 'static,
{
    let name = stale.name.clone();
    let old = stale.unit_price;
    let new = record.price;

    tracing::info!(
        product_id = %stale.product_id,
        old = %old,
        new = %new,
        "cart price drifted from catalog"
    );

    let mut report = ErrorReport::new();
    report.push(CheckoutIssue::PriceChanged {
        name: name.clone(),
        old,
        new,
    });

    let corrected = CartItem {
        unit_price: new,
        ..stale
    };
    let product_id = corrected.product_id.clone();

    let customer_id = cart.customer_id;
    let store = store.clone();
    let replaced = tokio::spawn(async move { store.replace_item(customer_id, corrected).await })
        .await
        .map_err(|e| CheckoutError::Internal(format!("cart self-heal task failed: {e}")))?;

    match replaced {
        Ok(()) => {
            if let Some(item) = cart.item_mut(&product_id) {
                item.unit_price = new;
            }
            metrics::counter!("cart_self_heal_total", "outcome" => "corrected").increment(1);
            report.clear();
            report.push(CheckoutIssue::PriceCorrected { name, old, new });
        }
        Err(ReplaceError::Remove(e)) => {
            metrics::counter!("cart_self_heal_total", "outcome" => "remove_failed").increment(1);
            tracing::warn!(%product_id, error = %e, "could not remove stale cart item");
            report.push(CheckoutIssue::RemovalFailed { name });
        }
        Err(ReplaceError::Add(e)) => {
            // the store no longer holds the item; keep the local copy in step
            if let Err(e) = cart.remove_item(&product_id) {
                tracing::warn!(%product_id, error = %e, "stale item already gone from local cart");
            }
            metrics::counter!("cart_self_heal_total", "outcome" => "add_failed").increment(1);
            tracing::warn!(%product_id, error = %e, "could not re-add corrected cart item");
            report.push(CheckoutIssue::UpdateFailed { name });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::InMemoryCartStore;
    use domain::{CustomerId, Money};

    fn item(id: &str, name: &str, cents: i64) -> CartItem {
        CartItem::new(id, name, 1, Money::from_cents(cents))
    }

    fn record(id: &str, name: &str, cents: i64) -> ProductRecord {
        ProductRecord::new(id, name, Money::from_cents(cents))
    }

    fn setup(items: Vec<CartItem>) -> (InMemoryCartStore, Cart) {
        let store = InMemoryCartStore::new();
        let mut cart = Cart::new(CustomerId::new());
        for item in items {
            cart.add_item(item).unwrap();
        }
        store.put_cart(cart.clone());
        (store, cart)
    }

    #[tokio::test]
    async fn test_consistent_cart_is_untouched() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000), item("P2", "Gadget", 2500)]);
        let before = cart.clone();
        let catalog = vec![record("P2", "Gadget", 2500), record("P1", "Widget", 1000)];

        let outcome = reconcile(&mut cart, &catalog, &store).await.unwrap();

        assert_eq!(outcome, Reconciliation::Consistent);
        assert_eq!(cart, before);
        assert_eq!(store.remove_calls(), 0);
        assert_eq!(store.add_calls(), 0);
    }

    #[tokio::test]
    async fn test_every_missing_item_is_reported() {
        let (store, mut cart) = setup(vec![
            item("P1", "Widget", 1000),
            item("P2", "Gadget", 2500),
            item("P3", "Doohickey", 300),
        ]);
        let catalog = vec![record("P2", "Gadget", 9999)];

        let outcome = reconcile(&mut cart, &catalog, &store).await.unwrap();

        let Reconciliation::Rejected(report) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(
            report.issues(),
            &[
                CheckoutIssue::ItemUnavailable {
                    name: "Widget".to_string()
                },
                CheckoutIssue::ItemUnavailable {
                    name: "Doohickey".to_string()
                },
            ]
        );
        // existence failures never touch prices
        assert_eq!(store.remove_calls(), 0);
    }

    #[tokio::test]
    async fn test_price_drift_is_corrected_and_rejected() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000)]);
        let catalog = vec![record("P1", "Widget", 1250)];

        let outcome = reconcile(&mut cart, &catalog, &store).await.unwrap();

        let Reconciliation::Rejected(report) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(
            report.issues(),
            &[CheckoutIssue::PriceCorrected {
                name: "Widget".to_string(),
                old: Money::from_cents(1000),
                new: Money::from_cents(1250),
            }]
        );
        assert_eq!(cart.items[0].unit_price.cents(), 1250);

        let stored = store.cart(cart.customer_id).unwrap();
        assert_eq!(stored.items[0].unit_price.cents(), 1250);
        assert_eq!(store.remove_calls(), 1);
        assert_eq!(store.add_calls(), 1);
    }

    #[tokio::test]
    async fn test_removal_failure_keeps_drift_message() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000)]);
        let before = cart.clone();
        store.set_fail_on_remove(true);
        let catalog = vec![record("P1", "Widget", 1250)];

        let outcome = reconcile(&mut cart, &catalog, &store).await.unwrap();

        let Reconciliation::Rejected(report) = outcome else {
            panic!("expected rejection");
        };
        assert_eq!(report.len(), 2);
        assert!(matches!(
            report.issues()[0],
            CheckoutIssue::PriceChanged { .. }
        ));
        assert!(matches!(
            report.issues()[1],
            CheckoutIssue::RemovalFailed { .. }
        ));
        assert_eq!(cart, before);
        assert_eq!(store.add_calls(), 0);
    }

    #[tokio::test]
    async fn test_add_failure_reports_manual_readd() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000)]);
        store.set_fail_on_add(true);
        let catalog = vec![record("P1", "Widget", 1250)];

        let outcome = reconcile(&mut cart, &catalog, &store).await.unwrap();

        let Reconciliation::Rejected(report) = outcome else {
            panic!("expected rejection");
        };
        assert!(matches!(
            report.issues(),
            [
                CheckoutIssue::PriceChanged { .. },
                CheckoutIssue::UpdateFailed { .. }
            ]
        ));
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_only_first_stale_item_is_corrected() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000), item("P2", "Gadget", 2500)]);
        let catalog = vec![record("P1", "Widget", 1100), record("P2", "Gadget", 2600)];

        let outcome = reconcile(&mut cart, &catalog, &store).await.unwrap();

        assert!(matches!(outcome, Reconciliation::Rejected(_)));
        assert_eq!(cart.items[0].unit_price.cents(), 1100);
        assert_eq!(cart.items[1].unit_price.cents(), 2500);
        assert_eq!(store.add_calls(), 1);
    }

    #[tokio::test]
    async fn test_misaligned_catalog_is_internal_error() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000)]);
        let catalog = vec![record("P9", "Other", 1000)];

        let result = reconcile(&mut cart, &catalog, &store).await;
        assert!(matches!(result, Err(CheckoutError::Internal(_))));
    }

    #[tokio::test]
    async fn test_duplicate_catalog_records_are_internal_error() {
        let (store, mut cart) = setup(vec![item("P1", "Widget", 1000)]);
        let catalog = vec![record("P1", "Widget", 1000), record("P1", "Widget", 1000)];

        let result = reconcile(&mut cart, &catalog, &store).await;
        assert!(matches!(result, Err(CheckoutError::Internal(_))));
    }
}
