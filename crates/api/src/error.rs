//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use checkout::{CheckoutError, ServiceError};

/// Message shown when the customer has no orders yet.
pub const ORDER_NOT_FOUND: &str = "Pedido não encontrado!";

/// Message shown when checkout is attempted with an empty cart.
pub const EMPTY_CART: &str = "Seu carrinho está vazio, adicione produtos para finalizar a compra";

/// API-level error type that maps to HTTP responses.
///
/// Every error body has the shape `{"errors": ["..."]}`.
#[derive(Debug)]
pub enum ApiError {
    /// The caller identity is missing or malformed.
    Unauthorized(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Checkout or order query failure.
    Checkout(CheckoutError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, messages) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, vec![msg]),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, vec![msg]),
            ApiError::Checkout(err) => checkout_error_to_response(err),
        };

        metrics::counter!("api_errors_total", "status" => status.as_str().to_owned()).increment(1);

        let body = serde_json::json!({ "errors": messages });
        (status, axum::Json(body)).into_response()
    }
}

fn checkout_error_to_response(err: CheckoutError) -> (StatusCode, Vec<String>) {
    match err {
        CheckoutError::Rejected(report) => (StatusCode::BAD_REQUEST, report.messages()),
        CheckoutError::EmptyCart => (StatusCode::BAD_REQUEST, vec![EMPTY_CART.to_string()]),
        CheckoutError::OrderNotFound => (StatusCode::NOT_FOUND, vec![ORDER_NOT_FOUND.to_string()]),
        CheckoutError::Service(ServiceError::Rejected { messages, .. }) => {
            (StatusCode::BAD_REQUEST, messages)
        }
        CheckoutError::Service(ref e @ ServiceError::Unavailable { .. }) => {
            tracing::warn!(service = e.service(), error = %e, "upstream service failure");
            (StatusCode::BAD_GATEWAY, vec![err.to_string()])
        }
        CheckoutError::Internal(ref msg) => {
            tracing::error!(error = %msg, "internal server error");
            (StatusCode::INTERNAL_SERVER_ERROR, vec![err.to_string()])
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        ApiError::Checkout(err)
    }
}
