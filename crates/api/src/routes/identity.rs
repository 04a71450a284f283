//! Caller identity extraction.
//!
//! Authentication happens in front of the gateway; the authenticated
//! customer arrives in the `x-customer-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::CustomerId;

use crate::error::ApiError;

/// Header carrying the authenticated customer's id.
pub const CUSTOMER_HEADER: &str = "x-customer-id";

/// The authenticated customer making the request.
#[derive(Debug, Clone, Copy)]
pub struct Customer(pub CustomerId);

impl<S: Send + Sync> FromRequestParts<S> for Customer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CUSTOMER_HEADER)
            .ok_or_else(|| ApiError::Unauthorized(format!("Missing {CUSTOMER_HEADER} header")))?
            .to_str()
            .map_err(|_| ApiError::Unauthorized(format!("Invalid {CUSTOMER_HEADER} header")))?;

        CustomerId::parse(raw.trim())
            .map(Customer)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid {CUSTOMER_HEADER} header: {e}")))
    }
}
