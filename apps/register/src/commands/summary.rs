//! # Summary Commands
//!
//! The summary panel: totals, VAT and the bill discount box.

use serde::Serialize;
use tracing::debug;
use wpos_core::{BillDiscount, CartSummary, DiscountKind, SummaryCalculator};

use crate::state::{CartSession, ConfigState};

/// Summary plus display strings in the configured currency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub summary: CartSummary,
    pub bill_discount: BillDiscount,
    pub display: SummaryDisplay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDisplay {
    pub regular_subtotal: String,
    pub vat: String,
    pub bill_discount: String,
    pub back_order_subtotal: String,
    pub grand_total: String,
}

/// Gets the cart summary.
///
/// Memoised by cart revision, bill discount input and VAT rate; repeated
/// calls on an unchanged cart return the stored summary.
pub fn get_summary(cart: &CartSession, config: &ConfigState) -> SummaryResponse {
    debug!("get_summary command");
    let summary = cart.summary(&SummaryCalculator::new(config.vat_rate));
    let display = SummaryDisplay {
        regular_subtotal: config.format_currency(summary.regular_subtotal),
        vat: config.format_currency(summary.vat),
        bill_discount: config.format_currency(summary.bill_discount_amount),
        back_order_subtotal: config.format_currency(summary.back_order_subtotal),
        grand_total: config.format_currency(summary.grand_total),
    };
    SummaryResponse {
        summary,
        bill_discount: cart.bill_discount(),
        display,
    }
}

/// Replaces the bill discount input.
///
/// ## Behavior
/// - Text other than digits and one decimal point is refused: the previous
///   input stays, as a numeric input box would behave
/// - Accepted text that is empty or zero means no bill discount
///
/// ## Returns
/// The bill discount input now in effect
pub fn set_bill_discount(cart: &CartSession, value: String, kind: DiscountKind) -> BillDiscount {
    debug!(value = %value, %kind, "set_bill_discount command");
    if !BillDiscount::is_acceptable_input(&value) {
        debug!(value = %value, "Bill discount input refused");
        return cart.bill_discount();
    }
    let bill = BillDiscount::from_input(value, kind);
    cart.set_bill_discount(bill.clone());
    bill
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpos_core::{CartCommand, Discount, Money, Product};

    /// Three units at ฿100 with a ฿10 line discount.
    fn session() -> CartSession {
        let cart = CartSession::new();
        let product = Product::new("P1", "Vitamin C", Money::from_baht(100), 5);
        for _ in 0..3 {
            cart.dispatch(
                CartCommand::AddItem {
                    product: product.clone(),
                },
                |_, _| (),
            );
        }
        cart.dispatch(
            CartCommand::UpdateDiscount {
                id: "P1".to_string(),
                discount: Discount::Baht(Money::from_baht(10)).into(),
            },
            |_, _| (),
        );
        cart
    }

    #[test]
    fn test_summary_with_bill_discount() {
        let cart = session();
        let config = ConfigState::default();

        let before = get_summary(&cart, &config);
        assert_eq!(before.display.vat, "฿20.30");
        assert_eq!(before.display.grand_total, "฿310.30");

        set_bill_discount(&cart, "20".to_string(), DiscountKind::Percent);
        let after = get_summary(&cart, &config);
        assert_eq!(after.summary.bill_discount_amount, Money::from_satang(6206));
        assert_eq!(after.display.grand_total, "฿248.24");
        assert_eq!(after.bill_discount.value, "20");
    }

    #[test]
    fn test_refused_input_keeps_previous() {
        let cart = session();
        set_bill_discount(&cart, "5".to_string(), DiscountKind::Baht);

        let current = set_bill_discount(&cart, "5a".to_string(), DiscountKind::Baht);

        assert_eq!(current.value, "5");
        assert_eq!(cart.bill_discount(), current);
    }

    #[test]
    fn test_vat_rate_comes_from_config() {
        let cart = session();
        let config = ConfigState {
            vat_rate: wpos_core::TaxRate::zero(),
            ..ConfigState::default()
        };
        assert_eq!(get_summary(&cart, &config).display.grand_total, "฿290.00");
    }
}
