//! Order composition from a reconciled cart.

use domain::{Address, Cart, OrderDraft, OrderSubmission};

/// Builds the submission for a cart that passed reconciliation.
///
/// Totals and discount are the cart service's figures, copied unchanged.
pub fn compose(cart: &Cart, address: &Address, draft: &OrderDraft) -> OrderSubmission {
    OrderSubmission {
        customer_id: cart.customer_id,
        voucher_code: cart.voucher_code().map(str::to_string),
        voucher_used: cart.has_voucher,
        total: cart.total,
        discount: cart.discount,
        items: cart.items.clone(),
        address: address.clone(),
        payment: draft.payment.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{CartItem, CustomerId, Money, PaymentCard, Voucher};

    fn fixtures() -> (Cart, Address, OrderDraft) {
        let mut cart = Cart::new(CustomerId::new());
        cart.add_item(CartItem::new("P1", "Widget", 2, Money::from_cents(1000)))
            .unwrap();
        cart.apply_voucher(Voucher::value("OFF5", Money::from_cents(500)));

        let address = Address {
            street: "Avenida Paulista".to_string(),
            number: "1578".to_string(),
            neighborhood: "Bela Vista".to_string(),
            postal_code: "01310-200".to_string(),
            complement: Some("Sala 4".to_string()),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
        };

        let draft = OrderDraft::with_card(PaymentCard {
            holder_name: "Ana Souza".to_string(),
            number: "4111111111111111".to_string(),
            expiration: "12/30".to_string(),
            cvv: "123".to_string(),
        });

        (cart, address, draft)
    }

    #[test]
    fn test_copies_cart_and_address() {
        let (cart, address, draft) = fixtures();

        let submission = compose(&cart, &address, &draft);

        assert_eq!(submission.customer_id, cart.customer_id);
        assert_eq!(submission.voucher_code.as_deref(), Some("OFF5"));
        assert!(submission.voucher_used);
        assert_eq!(submission.total.cents(), 1500);
        assert_eq!(submission.discount.cents(), 500);
        assert_eq!(submission.items, cart.items);
        assert_eq!(submission.address, address);
        assert_eq!(submission.payment, draft.payment);
    }

    #[test]
    fn test_is_deterministic_and_leaves_inputs_alone() {
        let (cart, address, draft) = fixtures();
        let (cart_before, address_before, draft_before) =
            (cart.clone(), address.clone(), draft.clone());

        let first = compose(&cart, &address, &draft);
        let second = compose(&cart, &address, &draft);

        assert_eq!(first, second);
        assert_eq!(cart, cart_before);
        assert_eq!(address, address_before);
        assert_eq!(draft, draft_before);
    }

    #[test]
    fn test_cart_without_voucher() {
        let (mut cart, address, _) = fixtures();
        cart.voucher = None;
        cart.has_voucher = false;

        let submission = compose(&cart, &address, &OrderDraft::default());

        assert_eq!(submission.voucher_code, None);
        assert!(!submission.voucher_used);
        assert_eq!(submission.payment, None);
    }
}
