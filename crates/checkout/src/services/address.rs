//! Address provider trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Address, CustomerId};

use crate::error::ServiceError;

const SERVICE: &str = "customer";

/// Access to the customer's registered delivery address.
#[async_trait]
pub trait AddressProvider: Send + Sync {
    /// Returns the customer's delivery address.
    async fn get_address(&self, customer_id: CustomerId) -> Result<Address, ServiceError>;
}

#[derive(Debug, Default)]
struct InMemoryAddressState {
    addresses: HashMap<CustomerId, Address>,
    fail_on_get: bool,
}

/// In-memory address book for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAddressBook {
    state: Arc<RwLock<InMemoryAddressState>>,
}

impl InMemoryAddressBook {
    /// Creates a new empty address book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the customer's address.
    pub fn set_address(&self, customer_id: CustomerId, address: Address) {
        self.state
            .write()
            .unwrap()
            .addresses
            .insert(customer_id, address);
    }

    /// Configures the address book to fail lookups.
    pub fn set_fail_on_get(&self, fail: bool) {
        self.state.write().unwrap().fail_on_get = fail;
    }
}

#[async_trait]
impl AddressProvider for InMemoryAddressBook {
    async fn get_address(&self, customer_id: CustomerId) -> Result<Address, ServiceError> {
        let state = self.state.read().unwrap();

        if state.fail_on_get {
            return Err(ServiceError::unavailable(SERVICE, "customer service offline"));
        }

        state
            .addresses
            .get(&customer_id)
            .cloned()
            .ok_or_else(|| ServiceError::rejected(SERVICE, "Endereço não informado"))
    }
}
