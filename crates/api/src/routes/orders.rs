//! Checkout and order query endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use checkout::{
    CheckoutOrchestrator, InMemoryAddressBook, InMemoryCartStore, InMemoryCatalog,
    InMemoryOrderFinalizer,
};
use domain::{Address, OrderConfirmation, OrderDraft, PaymentCard};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::identity::Customer;

/// Orchestrator wired to the in-memory collaborators.
pub type InMemoryOrchestrator = CheckoutOrchestrator<
    InMemoryCartStore,
    InMemoryCatalog,
    InMemoryAddressBook,
    InMemoryOrderFinalizer,
>;

/// Shared application state accessible from all handlers.
///
/// The collaborator handles share storage with the orchestrator's copies,
/// so seeding them is visible to checkouts.
pub struct AppState {
    pub orchestrator: InMemoryOrchestrator,
    pub carts: InMemoryCartStore,
    pub catalog: InMemoryCatalog,
    pub addresses: InMemoryAddressBook,
    pub finalizer: InMemoryOrderFinalizer,
}

// -- Request types --

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub payment: Option<PaymentRequest>,
}

#[derive(Deserialize)]
pub struct PaymentRequest {
    pub holder_name: String,
    pub number: String,
    pub expiration: String,
    pub cvv: String,
}

impl std::fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PaymentRequest { .. }")
    }
}

impl TryFrom<CheckoutRequest> for OrderDraft {
    type Error = ApiError;

    fn try_from(req: CheckoutRequest) -> Result<Self, Self::Error> {
        let Some(payment) = req.payment else {
            return Ok(OrderDraft::default());
        };

        let fields = [
            ("holder_name", &payment.holder_name),
            ("number", &payment.number),
            ("expiration", &payment.expiration),
            ("cvv", &payment.cvv),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ApiError::BadRequest(format!("payment.{name} is required")));
        }

        Ok(OrderDraft::with_card(PaymentCard {
            holder_name: payment.holder_name,
            number: payment.number,
            expiration: payment.expiration,
            cvv: payment.cvv,
        }))
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub code: u64,
    pub status: String,
    pub created_at: String,
    pub total_cents: i64,
    pub discount_cents: i64,
    pub voucher_code: Option<String>,
    pub voucher_used: bool,
    pub items: Vec<OrderItemResponse>,
    pub address: Address,
}

#[derive(Serialize)]
pub struct OrderItemResponse {
    pub product_id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<OrderConfirmation> for OrderResponse {
    fn from(order: OrderConfirmation) -> Self {
        Self {
            order_id: order.order_id.to_string(),
            code: order.code,
            status: order.status.to_string(),
            created_at: order.created_at.to_rfc3339(),
            total_cents: order.total.cents(),
            discount_cents: order.discount.cents(),
            voucher_code: order.voucher_code,
            voucher_used: order.voucher_used,
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id.to_string(),
                    name: item.name,
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price.cents(),
                    image: item.image,
                })
                .collect(),
            address: order.address,
        }
    }
}

// -- Handlers --

/// POST /checkout/orders: reconcile the cart and place the order.
#[tracing::instrument(skip(state, req))]
pub async fn checkout(
    State(state): State<Arc<AppState>>,
    Customer(customer_id): Customer,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let draft = OrderDraft::try_from(req)?;
    let confirmation = state.orchestrator.checkout(customer_id, draft).await?;

    Ok((StatusCode::CREATED, Json(confirmation.into())))
}

/// GET /checkout/orders/last: the customer's most recent order.
#[tracing::instrument(skip(state))]
pub async fn last(
    State(state): State<Arc<AppState>>,
    Customer(customer_id): Customer,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orchestrator.last_order(customer_id).await?;
    Ok(Json(order.into()))
}

/// GET /checkout/orders: every order the customer placed, newest first.
#[tracing::instrument(skip(state))]
pub async fn list(
    State(state): State<Arc<AppState>>,
    Customer(customer_id): Customer,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orchestrator.orders_by_customer(customer_id).await?;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_without_payment() {
        let draft = OrderDraft::try_from(CheckoutRequest::default()).unwrap();
        assert_eq!(draft, OrderDraft::default());
    }

    #[test]
    fn test_request_with_blank_card_field() {
        let req = CheckoutRequest {
            payment: Some(PaymentRequest {
                holder_name: "Ana".to_string(),
                number: "4111111111111111".to_string(),
                expiration: "12/30".to_string(),
                cvv: " ".to_string(),
            }),
        };
        let err = OrderDraft::try_from(req).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(msg) if msg == "payment.cvv is required"));
    }
}
