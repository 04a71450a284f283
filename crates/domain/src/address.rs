//! Delivery address snapshot.

use serde::{Deserialize, Serialize};

/// The customer's delivery address, attached to an order verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub postal_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    pub city: String,
    pub state: String,
}
