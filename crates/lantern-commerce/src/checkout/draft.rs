//! Order drafts: the validated, not-yet-submitted order.

use crate::cart::{CartLineItem, OrderSelection, OrderTotals};
use crate::checkout::{PaymentMethod, ShippingInfo};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Everything needed to place one order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    /// Selected lines, in cart order.
    pub items: Vec<CartLineItem>,
    /// Receiver's full name.
    pub receiver_name: String,
    /// Receiver's phone number.
    pub receiver_phone: String,
    /// Address line, ward and province joined.
    pub full_address: String,
    /// Note for the courier.
    pub note: String,
    /// Chosen payment method.
    pub payment_method: PaymentMethod,
}

impl OrderDraft {
    /// Totals with no shipping fee and no discount.
    pub fn totals(&self) -> OrderTotals {
        OrderTotals::for_items(&self.items)
    }

    /// `"<name> x<quantity>"` for each line, comma separated.
    pub fn product_summary(&self) -> String {
        self.items
            .iter()
            .map(|item| format!("{} x{}", item.product.name, item.quantity))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Assemble a draft from the cart, the shopper's selection and the form.
///
/// Fails if any required shipping field is blank or if no selected line is
/// still in the cart.
pub fn build_order_draft(
    cart: &[CartLineItem],
    selection: &OrderSelection,
    shipping: &ShippingInfo,
    payment_method: PaymentMethod,
) -> Result<OrderDraft, CommerceError> {
    let missing = shipping.missing_fields();
    if !missing.is_empty() {
        return Err(CommerceError::MissingShippingInfo(missing));
    }

    let items = selection.apply(cart);
    if items.is_empty() {
        return Err(CommerceError::EmptySelection);
    }

    let full_address = shipping
        .full_address()
        .ok_or_else(|| CommerceError::MissingShippingInfo(vec!["province", "ward"]))?;

    Ok(OrderDraft {
        items,
        receiver_name: shipping.receiver_name.trim().to_string(),
        receiver_phone: shipping.receiver_phone.trim().to_string(),
        full_address,
        note: shipping.note.clone(),
        payment_method,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::catalog::ProductRecord;
    use crate::checkout::Region;
    use crate::money::Money;

    fn cart() -> Cart {
        Cart::from_items(vec![
            CartLineItem {
                product: ProductRecord::new("A", "Trà sen", 100_000),
                quantity: 2,
            },
            CartLineItem {
                product: ProductRecord::new("B", "Mứt gừng", 50_000),
                quantity: 1,
            },
        ])
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo::new("Nguyễn Lan", "0901234567", "12 Hàng Bài")
            .with_regions(Region::new(1, "Hà Nội"), Region::new(70, "Phường Cửa Nam"))
            .with_note("Giao giờ hành chính")
    }

    #[test]
    fn test_build_draft_filters_selection() {
        let cart = cart();
        let selection = OrderSelection::from_ids(["A"]);
        let draft = build_order_draft(cart.items(), &selection, &shipping(), PaymentMethod::Cod).unwrap();

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.full_address, "12 Hàng Bài, Phường Cửa Nam, Hà Nội");
        assert_eq!(draft.totals().subtotal, Money::vnd(200_000));
        assert_eq!(draft.totals().total, Money::vnd(200_000));
        assert_eq!(draft.product_summary(), "Trà sen x2");
    }

    #[test]
    fn test_build_draft_keeps_cart_order() {
        let cart = cart();
        let selection = OrderSelection::from_ids(["B", "A"]);
        let draft = build_order_draft(cart.items(), &selection, &shipping(), PaymentMethod::Qr).unwrap();
        assert_eq!(draft.product_summary(), "Trà sen x2, Mứt gừng x1");
        assert_eq!(draft.item_count(), 3);
        assert_eq!(draft.payment_method, PaymentMethod::Qr);
    }

    #[test]
    fn test_build_draft_requires_shipping_fields() {
        let cart = cart();
        let selection = OrderSelection::from_ids(["A"]);

        let mut no_ward = shipping();
        no_ward.ward = None;
        let err = build_order_draft(cart.items(), &selection, &no_ward, PaymentMethod::Cod).unwrap_err();
        assert_eq!(err, CommerceError::MissingShippingInfo(vec!["ward"]));
        assert!(err.is_validation());

        let mut no_phone = shipping();
        no_phone.receiver_phone = "   ".into();
        assert!(build_order_draft(cart.items(), &selection, &no_phone, PaymentMethod::Cod).is_err());
    }

    #[test]
    fn test_build_draft_requires_selected_items() {
        let cart = cart();
        let selection = OrderSelection::from_ids(["gone"]);
        let err = build_order_draft(cart.items(), &selection, &shipping(), PaymentMethod::Cod).unwrap_err();
        assert_eq!(err, CommerceError::EmptySelection);
    }
}
