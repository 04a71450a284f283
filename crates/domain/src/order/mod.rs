//! Order drafts, submissions and confirmations.

mod draft;
mod state;
mod submission;

pub use draft::{OrderDraft, PaymentCard};
pub use state::OrderStatus;
pub use submission::{OrderConfirmation, OrderSubmission};
