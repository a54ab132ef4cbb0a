//! # Summary Calculator
//!
//! A stateless pass over [`CartState`] that produces the totals the register
//! shows. The result is a read-only record; it is never written back into
//! the cart.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  regular lines ──► per-line discount ──► regular subtotal              │
//! │                                                │                        │
//! │                                        + VAT (regular only)             │
//! │                                                │                        │
//! │                                   total before bill discount            │
//! │                                                │                        │
//! │                                     − bill discount (≤ total)           │
//! │                                                │                        │
//! │                                        regular final total              │
//! │                                                │                        │
//! │  back-order lines ──► price × qty ─────────────┤  no VAT, no discounts  │
//! │                                                ▼                        │
//! │                                           grand total                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wpos_core::cart::{CartCommand, CartState};
//! use wpos_core::money::Money;
//! use wpos_core::summary::{BillDiscount, SummaryCalculator};
//! use wpos_core::types::{DiscountKind, Product};
//!
//! let product = Product::new("P1", "Vitamin C", Money::from_baht(100), 5);
//! let mut cart = CartState::new();
//! cart.apply(CartCommand::AddItem { product });
//!
//! let summary = SummaryCalculator::default()
//!     .summarize(&cart, &BillDiscount::from_input("", DiscountKind::Baht));
//! assert_eq!(summary.vat, Money::from_baht(7));
//! assert_eq!(summary.grand_total, Money::from_baht(107));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartState;
use crate::money::Money;
use crate::pricing;
use crate::types::{CartLineItem, Discount, DiscountKind, TaxRate};
use crate::validation::parse_hundredths;

// =============================================================================
// Bill Discount Input
// =============================================================================

/// The bill discount as the cashier typed it.
///
/// The raw text is kept so the UI can echo it back; it is parsed each time
/// a summary is derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillDiscount {
    pub value: String,
    pub kind: DiscountKind,
}

impl BillDiscount {
    pub fn from_input(value: impl Into<String>, kind: DiscountKind) -> Self {
        BillDiscount {
            value: value.into(),
            kind,
        }
    }

    /// Checks if `text` may be typed into the bill discount box.
    ///
    /// Digits with at most one decimal point; the empty string is allowed so
    /// the box can be cleared.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::summary::BillDiscount;
    ///
    /// assert!(BillDiscount::is_acceptable_input("12."));
    /// assert!(!BillDiscount::is_acceptable_input("12a"));
    /// ```
    pub fn is_acceptable_input(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_digit() || b == b'.')
            && text.bytes().filter(|&b| b == b'.').count() <= 1
    }

    /// The discount to apply, if the text is a positive number.
    ///
    /// Non-numeric text and zero both mean "no bill discount".
    pub fn discount(&self) -> Option<Discount> {
        let hundredths = parse_hundredths("bill discount", &self.value).ok()?;
        let discount = Discount::from_hundredths(self.kind, hundredths);
        (!discount.is_zero()).then_some(discount)
    }
}

// =============================================================================
// Summary Records
// =============================================================================

/// Per-line breakdown for either pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub id: String,
    pub name: String,
    pub quantity: i64,
    /// Unit price × quantity.
    pub original_total: Money,
    /// Always zero for back-order lines.
    pub discount_amount: Money,
    pub final_total: Money,
}

/// Everything the summary panel renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub regular_items: Vec<LineSummary>,
    pub back_order_items: Vec<LineSummary>,

    /// Sum of per-line discounts on regular lines.
    pub item_discount_total: Money,
    /// Regular lines after per-line discounts.
    pub regular_subtotal: Money,
    pub vat_rate: TaxRate,
    pub vat: Money,
    pub total_before_bill_discount: Money,
    pub bill_discount_amount: Money,
    pub regular_final_total: Money,

    /// Back-order lines at list price: no VAT, no discounts.
    pub back_order_subtotal: Money,
    pub grand_total: Money,

    pub has_regular_items: bool,
    pub has_back_order_items: bool,
}

// =============================================================================
// Calculator
// =============================================================================

/// Derives a [`CartSummary`] from cart state and bill discount input.
///
/// Pure and re-entrant: the same inputs always produce the same summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryCalculator {
    vat_rate: TaxRate,
}

impl SummaryCalculator {
    pub fn new(vat_rate: TaxRate) -> Self {
        SummaryCalculator { vat_rate }
    }

    pub fn vat_rate(&self) -> TaxRate {
        self.vat_rate
    }

    pub fn summarize(&self, cart: &CartState, bill: &BillDiscount) -> CartSummary {
        let regular_items: Vec<LineSummary> = cart
            .items()
            .iter()
            .map(|line| regular_line(cart, line))
            .collect();

        let regular_subtotal: Money = regular_items.iter().map(|line| line.final_total).sum();
        let item_discount_total: Money =
            regular_items.iter().map(|line| line.discount_amount).sum();

        let vat = regular_subtotal.calculate_tax(self.vat_rate);
        let total_before_bill_discount = regular_subtotal + vat;

        let bill_discount_amount =
            pricing::bill_discount_amount(total_before_bill_discount, bill.discount().as_ref());
        let regular_final_total = (total_before_bill_discount - bill_discount_amount).max_zero();

        let back_order_items: Vec<LineSummary> =
            cart.back_order_items().iter().map(back_order_line).collect();
        let back_order_subtotal: Money =
            back_order_items.iter().map(|line| line.final_total).sum();

        CartSummary {
            has_regular_items: !regular_items.is_empty(),
            has_back_order_items: !back_order_items.is_empty(),
            regular_items,
            back_order_items,
            item_discount_total,
            regular_subtotal,
            vat_rate: self.vat_rate,
            vat,
            total_before_bill_discount,
            bill_discount_amount,
            regular_final_total,
            back_order_subtotal,
            grand_total: (regular_final_total + back_order_subtotal).max_zero(),
        }
    }
}

fn regular_line(cart: &CartState, line: &CartLineItem) -> LineSummary {
    let price = line.product.price;
    LineSummary {
        id: line.product.id.clone(),
        name: line.product.name.clone(),
        quantity: line.quantity,
        original_total: line.line_total(),
        discount_amount: cart.discount_amount(price, line.quantity, line.id()),
        final_total: cart.discounted_price(price, line.quantity, line.id()),
    }
}

fn back_order_line(line: &CartLineItem) -> LineSummary {
    LineSummary {
        id: line.product.id.clone(),
        name: line.product.name.clone(),
        quantity: line.quantity,
        original_total: line.line_total(),
        discount_amount: Money::zero(),
        final_total: line.line_total(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
