//! # Cart Session
//!
//! Owns the one cart of a register session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every command must finish before the next one starts
//! 2. Catalog reloads run concurrently with cart commands
//! 3. The summary memo must stay paired with the cart it was derived from
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Session Operations                              │
//! │                                                                         │
//! │  UI Action              Command                 Session Change          │
//! │  ─────────              ───────                 ──────────────          │
//! │                                                                         │
//! │  Click Product ───────► add_to_cart() ────────► dispatch(AddItem)      │
//! │  Back-order Modal ────► add_back_order_item() ► dispatch(AddBackOrder) │
//! │  Discount Box ────────► update_discount() ────► dispatch(UpdateDisc.)  │
//! │  Bill Discount Box ───► set_bill_discount() ──► bill input replaced    │
//! │  Summary Panel ───────► get_summary() ────────► memo hit or recompute  │
//! │                                                                         │
//! │  NOTE: All operations acquire the Mutex lock exclusively.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use wpos_core::{
    BillDiscount, CartCommand, CartState, CartSummary, CommandOutcome, SummaryCalculator, TaxRate,
};

/// What a memoised summary was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SummaryKey {
    revision: u64,
    bill: BillDiscount,
    vat_rate: TaxRate,
}

/// Everything guarded by the session lock.
#[derive(Debug, Default)]
struct Session {
    cart: CartState,
    bill: BillDiscount,
    memo: Option<(SummaryKey, CartSummary)>,
}

/// Session metadata for the UI header.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub opened_at: DateTime<Utc>,
}

/// The register's cart session.
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them write; reads of the summary
/// also write the memo.
#[derive(Debug)]
pub struct CartSession {
    info: SessionInfo,
    inner: Arc<Mutex<Session>>,
}

impl CartSession {
    /// Opens a session with an empty cart.
    pub fn new() -> Self {
        CartSession {
            info: SessionInfo {
                session_id: Uuid::new_v4(),
                opened_at: Utc::now(),
            },
            inner: Arc::new(Mutex::new(Session::default())),
        }
    }

    pub fn info(&self) -> &SessionInfo {
        &self.info
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let session = self.inner.lock().expect("Cart mutex poisoned");
        f(&session.cart)
    }

    /// Applies one command under the lock and hands the result to `f`.
    pub fn dispatch<F, R>(&self, command: CartCommand, f: F) -> R
    where
        F: FnOnce(&CartState, CommandOutcome) -> R,
    {
        let mut session = self.inner.lock().expect("Cart mutex poisoned");
        let outcome = session.cart.apply(command);
        f(&session.cart, outcome)
    }

    pub fn bill_discount(&self) -> BillDiscount {
        let session = self.inner.lock().expect("Cart mutex poisoned");
        session.bill.clone()
    }

    pub fn set_bill_discount(&self, bill: BillDiscount) {
        let mut session = self.inner.lock().expect("Cart mutex poisoned");
        session.bill = bill;
    }

    /// Summary for the current cart and bill discount.
    ///
    /// Recomputed only when the cart revision, the bill discount input or
    /// the VAT rate differs from the memoised one.
    pub fn summary(&self, calculator: &SummaryCalculator) -> CartSummary {
        let mut session = self.inner.lock().expect("Cart mutex poisoned");
        let key = SummaryKey {
            revision: session.cart.revision(),
            bill: session.bill.clone(),
            vat_rate: calculator.vat_rate(),
        };

        if let Some((memo_key, summary)) = &session.memo {
            if *memo_key == key {
                return summary.clone();
            }
        }

        let summary = calculator.summarize(&session.cart, &session.bill);
        session.memo = Some((key, summary.clone()));
        summary
    }

    /// Revision the memoised summary was derived from.
    #[cfg(test)]
    fn memo_revision(&self) -> Option<u64> {
        let session = self.inner.lock().expect("Cart mutex poisoned");
        session.memo.as_ref().map(|(key, _)| key.revision)
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpos_core::{DiscountKind, Money, Product};

    fn p1() -> Product {
        Product::new("P1", "Vitamin C", Money::from_baht(100), 5)
    }

    #[test]
    fn test_dispatch_applies_under_lock() {
        let session = CartSession::new();

        let (quantity, outcome) = session
            .dispatch(CartCommand::AddItem { product: p1() }, |cart, outcome| {
                (cart.regular_quantity("P1"), outcome)
            });

        assert_eq!(quantity, 1);
        assert_eq!(outcome, CommandOutcome::Applied);
        assert_eq!(session.with_cart(|cart| cart.total_items()), 1);
    }

    #[test]
    fn test_summary_is_memoised_by_revision() {
        let session = CartSession::new();
        let calculator = SummaryCalculator::default();
        session.dispatch(CartCommand::AddItem { product: p1() }, |_, _| ());

        let first = session.summary(&calculator);
        assert_eq!(session.memo_revision(), Some(1));
        assert_eq!(session.summary(&calculator), first);

        session.dispatch(CartCommand::AddItem { product: p1() }, |_, _| ());
        let second = session.summary(&calculator);
        assert_eq!(session.memo_revision(), Some(2));
        assert_eq!(second.regular_subtotal, Money::from_baht(200));
    }

    #[test]
    fn test_summary_follows_bill_discount_and_vat() {
        let session = CartSession::new();
        session.dispatch(CartCommand::AddItem { product: p1() }, |_, _| ());

        let with_vat = session.summary(&SummaryCalculator::default());
        assert_eq!(with_vat.grand_total, Money::from_baht(107));

        session.set_bill_discount(BillDiscount::from_input("7", DiscountKind::Baht));
        assert_eq!(
            session.summary(&SummaryCalculator::default()).grand_total,
            Money::from_baht(100)
        );

        let no_vat = session.summary(&SummaryCalculator::new(TaxRate::zero()));
        assert_eq!(no_vat.grand_total, Money::from_baht(93));
    }

    #[test]
    fn test_rejected_command_keeps_memo() {
        let session = CartSession::new();
        let calculator = SummaryCalculator::default();
        session.summary(&calculator);

        session.dispatch(
            CartCommand::RemoveItem {
                id: "P404".to_string(),
            },
            |_, _| (),
        );

        assert_eq!(session.memo_revision(), Some(0));
    }
}
