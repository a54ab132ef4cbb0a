//! # Cart Store
//!
//! The cart is a single-writer state machine: every [`CartCommand`] maps
//! `(state, command) → state'` and completes before the next is accepted.
//!
//! ## Pools
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           CartState                                     │
//! │                                                                         │
//! │  items (regular)            back_order_items          discounts         │
//! │  ───────────────            ────────────────          ─────────         │
//! │  P1 × 3                     P1 × 2                    P1 → ฿10          │
//! │  P2 × 1                     P7 × 4                                      │
//! │                                                                         │
//! │  • one line per product per pool (re-adding merges)                    │
//! │  • a product may sit in both pools at once                             │
//! │  • discounts apply to regular lines only                               │
//! │  • regular(id) + back_order(id) ≤ stock(id), always                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rejection Policy
//! Boundary conditions are never errors. A command that cannot apply leaves
//! the state untouched and reports [`CommandOutcome::Ignored`]; one that can
//! only partly apply is clamped and reports [`CommandOutcome::Clamped`]. The
//! UI relies on these idempotent no-ops for disabled buttons.
//!
//! ## Usage
//! ```rust
//! use wpos_core::cart::{CartCommand, CartState};
//! use wpos_core::money::Money;
//! use wpos_core::types::Product;
//!
//! let product = Product::new("P1", "Vitamin C", Money::from_baht(100), 5);
//! let mut cart = CartState::new();
//!
//! for _ in 0..3 {
//!     cart.apply(CartCommand::AddItem { product: product.clone() });
//! }
//! cart.apply(CartCommand::AddBackOrderItem { product, quantity: 5 });
//!
//! assert_eq!(cart.regular_quantity("P1"), 3);
//! assert_eq!(cart.back_order_quantity("P1"), 2);
//! assert_eq!(cart.total_across_pools("P1"), 5);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{self, clamp_line_discount};
use crate::stock::{self, allocate};
use crate::types::{CartLineItem, Discount, DiscountRequest, Product};

// =============================================================================
// Commands & Outcomes
// =============================================================================

/// Every mutation the cart accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartCommand {
    /// One more unit in the regular pool.
    AddItem { product: Product },
    /// Drop the regular line and its discount.
    RemoveItem { id: String },
    /// Set the regular quantity; `≤ 0` removes.
    UpdateQuantity { id: String, quantity: i64 },
    IncrementItem { id: String },
    DecrementItem { id: String },
    /// Add up to `quantity` units to the back-order pool.
    AddBackOrderItem { product: Product, quantity: i64 },
    RemoveBackOrderItem { id: String },
    /// Set the back-order quantity; `≤ 0` removes.
    UpdateBackOrderQuantity { id: String, quantity: i64 },
    /// Store, replace or (when zero) delete a regular line's discount.
    ///
    /// The request is bounded against the line before it is stored.
    UpdateDiscount { id: String, discount: DiscountRequest },
    ClearCart,
}

/// Why a command left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum IgnoreReason {
    /// No unit of the product is left to allocate.
    StockExhausted,
    /// The command names a line that is not in the pool.
    LineNotFound,
    /// A back order asked for zero or fewer units.
    NonPositiveQuantity,
}

/// What a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CommandOutcome {
    /// Applied exactly as asked.
    Applied,
    /// Applied with a smaller value.
    ///
    /// Quantities for pool commands; hundredths (satang or basis points)
    /// for discounts.
    Clamped { requested: i64, granted: i64 },
    /// State unchanged.
    Ignored { reason: IgnoreReason },
}

impl CommandOutcome {
    /// Checks if the command changed the state.
    #[inline]
    pub fn changed_state(&self) -> bool {
        !matches!(self, CommandOutcome::Ignored { .. })
    }

    fn ignored(reason: IgnoreReason) -> Self {
        CommandOutcome::Ignored { reason }
    }

    fn from_allocation(allocation: stock::Allocation) -> Self {
        if allocation.was_clamped() {
            CommandOutcome::Clamped {
                requested: allocation.requested,
                granted: allocation.granted.max(0),
            }
        } else {
            CommandOutcome::Applied
        }
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart aggregate.
///
/// ## Invariants
/// - Lines are unique by product id within each pool
/// - Every line has `quantity >= 1`
/// - `regular(id) + back_order(id) <= stock(id)`
/// - Totals always equal a fresh sum over the lines; they are recomputed
///   after every transition, never adjusted incrementally
/// - `revision` increases whenever a command changes the state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartLineItem>,
    total_items: i64,
    total_amount: Money,
    back_order_items: Vec<CartLineItem>,
    back_order_total_items: i64,
    back_order_total_amount: Money,
    discounts: BTreeMap<String, Discount>,
    #[ts(type = "number")]
    revision: u64,
}

impl Default for CartState {
    fn default() -> Self {
        CartState::new()
    }
}

/// Pure form of [`CartState::apply`].
///
/// ## Example
/// ```rust
/// use wpos_core::cart::{reduce, CartCommand, CartState};
///
/// let empty = CartState::new();
/// let (next, outcome) = reduce(&empty, CartCommand::RemoveItem { id: "P1".into() });
/// assert!(!outcome.changed_state());
/// assert_eq!(next, empty);
/// ```
pub fn reduce(state: &CartState, command: CartCommand) -> (CartState, CommandOutcome) {
    let mut next = state.clone();
    let outcome = next.apply(command);
    (next, outcome)
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState {
            items: Vec::new(),
            total_items: 0,
            total_amount: Money::zero(),
            back_order_items: Vec::new(),
            back_order_total_items: 0,
            back_order_total_amount: Money::zero(),
            discounts: BTreeMap::new(),
            revision: 0,
        }
    }

    /// Applies one command atomically.
    ///
    /// ## Command Table
    /// ```text
    /// ┌───────────────────────────┬─────────────────────────────────────────┐
    /// │ Command                   │ Effect / rejection                      │
    /// ├───────────────────────────┼─────────────────────────────────────────┤
    /// │ AddItem                   │ +1 regular, if total < stock            │
    /// │ RemoveItem                │ drop line + discount                    │
    /// │ UpdateQuantity            │ ≤0 removes; else ≤ stock − back order   │
    /// │ Increment / Decrement     │ ±1; decrement to 0 removes              │
    /// │ AddBackOrderItem          │ + min(q, stock − total)                 │
    /// │ RemoveBackOrderItem       │ drop back-order line                    │
    /// │ UpdateBackOrderQuantity   │ ≤0 removes; else ≤ stock − regular      │
    /// │ UpdateDiscount            │ clamp, store; zero deletes              │
    /// │ ClearCart                 │ empty cart                              │
    /// └───────────────────────────┴─────────────────────────────────────────┘
    /// ```
    pub fn apply(&mut self, command: CartCommand) -> CommandOutcome {
        let outcome = match command {
            CartCommand::AddItem { product } => self.add_item(product),
            CartCommand::RemoveItem { id } => self.remove_item(&id),
            CartCommand::UpdateQuantity { id, quantity } => self.update_quantity(&id, quantity),
            CartCommand::IncrementItem { id } => self.increment_item(&id),
            CartCommand::DecrementItem { id } => self.decrement_item(&id),
            CartCommand::AddBackOrderItem { product, quantity } => {
                self.add_back_order_item(product, quantity)
            }
            CartCommand::RemoveBackOrderItem { id } => self.remove_back_order_item(&id),
            CartCommand::UpdateBackOrderQuantity { id, quantity } => {
                self.update_back_order_quantity(&id, quantity)
            }
            CartCommand::UpdateDiscount { id, discount } => self.update_discount(&id, discount),
            CartCommand::ClearCart => self.clear(),
        };

        if outcome.changed_state() {
            self.recompute_totals();
            self.revision += 1;
        }
        outcome
    }

    // -------------------------------------------------------------------------
    // Regular pool
    // -------------------------------------------------------------------------

    fn add_item(&mut self, product: Product) -> CommandOutcome {
        if !stock::can_add(product.stock, self.total_across_pools(&product.id)) {
            return CommandOutcome::ignored(IgnoreReason::StockExhausted);
        }

        match self.items.iter_mut().find(|line| line.id() == product.id) {
            Some(line) => line.quantity += 1,
            None => self.items.push(CartLineItem::new(product, 1)),
        }
        CommandOutcome::Applied
    }

    fn remove_item(&mut self, id: &str) -> CommandOutcome {
        let before = self.items.len();
        self.items.retain(|line| line.id() != id);
        if self.items.len() == before {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        }
        self.discounts.remove(id);
        CommandOutcome::Applied
    }

    fn update_quantity(&mut self, id: &str, quantity: i64) -> CommandOutcome {
        let Some(stock) = line_stock(&self.items, id) else {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        };
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let ceiling = stock::pool_ceiling(stock, self.back_order_quantity(id));
        let allocation = allocate(quantity, ceiling);
        if allocation.is_empty() {
            self.remove_item(id);
        } else if let Some(line) = self.items.iter_mut().find(|line| line.id() == id) {
            line.quantity = allocation.granted;
        }
        CommandOutcome::from_allocation(allocation)
    }

    fn increment_item(&mut self, id: &str) -> CommandOutcome {
        let Some(stock) = line_stock(&self.items, id) else {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        };
        if !stock::can_add(stock, self.total_across_pools(id)) {
            return CommandOutcome::ignored(IgnoreReason::StockExhausted);
        }
        if let Some(line) = self.items.iter_mut().find(|line| line.id() == id) {
            line.quantity += 1;
        }
        CommandOutcome::Applied
    }

    fn decrement_item(&mut self, id: &str) -> CommandOutcome {
        let Some(line) = self.items.iter_mut().find(|line| line.id() == id) else {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        };
        if line.quantity > 1 {
            line.quantity -= 1;
            return CommandOutcome::Applied;
        }
        self.remove_item(id)
    }

    // -------------------------------------------------------------------------
    // Back-order pool
    // -------------------------------------------------------------------------

    fn add_back_order_item(&mut self, product: Product, quantity: i64) -> CommandOutcome {
        if quantity <= 0 {
            return CommandOutcome::ignored(IgnoreReason::NonPositiveQuantity);
        }

        let available = stock::available_stock(product.stock, self.total_across_pools(&product.id));
        let allocation = allocate(quantity, available);
        if allocation.is_empty() {
            return CommandOutcome::ignored(IgnoreReason::StockExhausted);
        }

        match self
            .back_order_items
            .iter_mut()
            .find(|line| line.id() == product.id)
        {
            Some(line) => line.quantity += allocation.granted,
            None => self
                .back_order_items
                .push(CartLineItem::new(product, allocation.granted)),
        }
        CommandOutcome::from_allocation(allocation)
    }

    fn remove_back_order_item(&mut self, id: &str) -> CommandOutcome {
        let before = self.back_order_items.len();
        self.back_order_items.retain(|line| line.id() != id);
        if self.back_order_items.len() == before {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        }
        CommandOutcome::Applied
    }

    fn update_back_order_quantity(&mut self, id: &str, quantity: i64) -> CommandOutcome {
        let Some(stock) = line_stock(&self.back_order_items, id) else {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        };
        if quantity <= 0 {
            return self.remove_back_order_item(id);
        }

        let ceiling = stock::pool_ceiling(stock, self.regular_quantity(id));
        let allocation = allocate(quantity, ceiling);
        if allocation.is_empty() {
            self.remove_back_order_item(id);
        } else if let Some(line) = self.back_order_items.iter_mut().find(|line| line.id() == id) {
            line.quantity = allocation.granted;
        }
        CommandOutcome::from_allocation(allocation)
    }

    // -------------------------------------------------------------------------
    // Discounts & reset
    // -------------------------------------------------------------------------

    fn update_discount(&mut self, id: &str, request: DiscountRequest) -> CommandOutcome {
        let Some(line) = self.items.iter().find(|line| line.id() == id) else {
            return CommandOutcome::ignored(IgnoreReason::LineNotFound);
        };

        let clamped = clamp_line_discount(request, line.line_total());
        if clamped.is_zero() {
            self.discounts.remove(id);
        } else {
            self.discounts.insert(id.to_string(), clamped);
        }

        if clamped.hundredths() < request.amount {
            CommandOutcome::Clamped {
                requested: request.amount,
                granted: clamped.hundredths(),
            }
        } else {
            CommandOutcome::Applied
        }
    }

    fn clear(&mut self) -> CommandOutcome {
        let revision = self.revision;
        *self = CartState::new();
        self.revision = revision;
        CommandOutcome::Applied
    }

    fn recompute_totals(&mut self) {
        self.total_items = self.items.iter().map(|line| line.quantity).sum();
        self.total_amount = self.items.iter().map(CartLineItem::line_total).sum();
        self.back_order_total_items = self.back_order_items.iter().map(|line| line.quantity).sum();
        self.back_order_total_amount = self
            .back_order_items
            .iter()
            .map(CartLineItem::line_total)
            .sum();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Regular lines, in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Back-order lines, in insertion order.
    pub fn back_order_items(&self) -> &[CartLineItem] {
        &self.back_order_items
    }

    pub fn discounts(&self) -> &BTreeMap<String, Discount> {
        &self.discounts
    }

    /// Units in the regular pool.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Undiscounted value of the regular pool.
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn back_order_total_items(&self) -> i64 {
        self.back_order_total_items
    }

    pub fn back_order_total_amount(&self) -> Money {
        self.back_order_total_amount
    }

    /// State identity: changes whenever a command changes the cart.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.back_order_items.is_empty()
    }

    pub fn is_in_cart(&self, id: &str) -> bool {
        self.items.iter().any(|line| line.id() == id)
    }

    pub fn is_in_back_order(&self, id: &str) -> bool {
        self.back_order_items.iter().any(|line| line.id() == id)
    }

    pub fn regular_quantity(&self, id: &str) -> i64 {
        stock::pool_quantity(&self.items, id)
    }

    pub fn back_order_quantity(&self, id: &str) -> i64 {
        stock::pool_quantity(&self.back_order_items, id)
    }

    /// Regular plus back-order quantity of one product.
    pub fn total_across_pools(&self, id: &str) -> i64 {
        stock::total_across_pools(&self.items, &self.back_order_items, id)
    }

    /// Units of `id` still free given a current stock figure.
    pub fn available_stock(&self, id: &str, stock: i64) -> i64 {
        stock::available_stock(stock, self.total_across_pools(id))
    }

    /// Whether one more unit of `id` fits under `stock`.
    pub fn can_add(&self, id: &str, stock: i64) -> bool {
        stock::can_add(stock, self.total_across_pools(id))
    }

    /// The discount entry for a regular line, if any.
    pub fn discount(&self, id: &str) -> Option<&Discount> {
        self.discounts.get(id)
    }

    /// `price × quantity` after `id`'s discount.
    pub fn discounted_price(&self, price: Money, quantity: i64, id: &str) -> Money {
        pricing::discounted_total(price, quantity, self.discount(id))
    }

    /// Money taken off `price × quantity` by `id`'s discount.
    pub fn discount_amount(&self, price: Money, quantity: i64, id: &str) -> Money {
        pricing::discount_amount(price, quantity, self.discount(id))
    }
}

/// Stock figure recorded on a pool's line for `id`.
fn line_stock(lines: &[CartLineItem], id: &str) -> Option<i64> {
    lines
        .iter()
        .find(|line| line.id() == id)
        .map(|line| line.product.stock)
}

// =============================================================================
// Unit Tests
// =============================================================================
