//! Client-supplied part of a checkout.

use serde::{Deserialize, Serialize};

/// Payment card details, carried through to the finalizer untouched.
///
/// `Debug` masks the number and cvv so the card never reaches logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCard {
    pub holder_name: String,
    pub number: String,
    pub expiration: String,
    pub cvv: String,
}

impl PaymentCard {
    /// Returns the last four digits of the card number.
    pub fn last_four(&self) -> &str {
        let digits = self.number.trim();
        let start = digits
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        &digits[start..]
    }
}

impl std::fmt::Debug for PaymentCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentCard")
            .field("holder_name", &self.holder_name)
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiration", &self.expiration)
            .field("cvv", &format_args!("***"))
            .finish()
    }
}

/// What the shopper submits to start a checkout.
///
/// Everything else in the order comes from the cart and the address book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub payment: Option<PaymentCard>,
}

impl OrderDraft {
    /// A draft paid with the given card.
    pub fn with_card(card: PaymentCard) -> Self {
        Self {
            payment: Some(card),
        }
    }
}
