//! # Stock Allocation
//!
//! A product's stock is one finite number shared by two pools: regular
//! ("buy now") lines and back-order ("ship later") lines.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock = 5                                                              │
//! │                                                                         │
//! │  ┌───────────────── regular ─────────────┐┌── back order ──┐           │
//! │  │   ■   ■   ■                           ││   ■   ■        │           │
//! │  └───────────────────────────────────────┘└────────────────┘           │
//! │                                                                         │
//! │  regular + back order ≤ stock, after every command                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every pool-mutating command in [`crate::cart`] goes through these helpers
//! so the cross-pool ceiling is enforced before state changes, never checked
//! afterwards.

use crate::types::CartLineItem;

/// Quantity of `id` held in one pool (0 when absent).
pub fn pool_quantity(lines: &[CartLineItem], id: &str) -> i64 {
    lines
        .iter()
        .find(|line| line.id() == id)
        .map_or(0, |line| line.quantity)
}

/// Quantity of `id` held across both pools.
pub fn total_across_pools(regular: &[CartLineItem], back_order: &[CartLineItem], id: &str) -> i64 {
    pool_quantity(regular, id) + pool_quantity(back_order, id)
}

/// Units still free to allocate, never negative.
#[inline]
pub fn available_stock(stock: i64, allocated: i64) -> i64 {
    (stock - allocated).max(0)
}

/// Whether one more unit fits under the stock ceiling.
#[inline]
pub fn can_add(stock: i64, allocated: i64) -> bool {
    allocated < stock
}

/// Largest quantity one pool may hold, given what the other pool holds.
#[inline]
pub fn pool_ceiling(stock: i64, other_pool: i64) -> i64 {
    stock - other_pool
}

/// The result of fitting a requested quantity under a ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub requested: i64,
    pub granted: i64,
}

impl Allocation {
    /// Checks if less than the requested quantity was granted.
    #[inline]
    pub fn was_clamped(&self) -> bool {
        self.granted < self.requested
    }

    /// Checks if nothing could be granted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.granted <= 0
    }
}

/// Grants `min(requested, ceiling)`.
///
/// ## Example
/// ```rust
/// use wpos_core::stock::allocate;
///
/// // 3 already in the regular pool, stock 5: a back order of 5 gets 2
/// let allocation = allocate(5, 5 - 3);
/// assert_eq!(allocation.granted, 2);
/// assert!(allocation.was_clamped());
/// ```
pub fn allocate(requested: i64, ceiling: i64) -> Allocation {
    Allocation {
        requested,
        granted: requested.min(ceiling),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::Product;

    fn line(id: &str, quantity: i64) -> CartLineItem {
        CartLineItem::new(Product::new(id, id, Money::from_baht(1), 10), quantity)
    }

    #[test]
    fn test_quantities_across_pools() {
        let regular = vec![line("P1", 3), line("P2", 1)];
        let back_order = vec![line("P1", 2)];

        assert_eq!(pool_quantity(&regular, "P1"), 3);
        assert_eq!(pool_quantity(&back_order, "P2"), 0);
        assert_eq!(total_across_pools(&regular, &back_order, "P1"), 5);
        assert_eq!(total_across_pools(&regular, &back_order, "P9"), 0);
    }

    #[test]
    fn test_available_and_can_add() {
        assert_eq!(available_stock(5, 3), 2);
        assert_eq!(available_stock(5, 5), 0);
        // Stock shrank below what the cart holds
        assert_eq!(available_stock(2, 5), 0);

        assert!(can_add(5, 4));
        assert!(!can_add(5, 5));
        assert!(!can_add(0, 0));
    }

    #[test]
    fn test_allocate() {
        let full = allocate(2, 5);
        assert_eq!(full.granted, 2);
        assert!(!full.was_clamped());

        let clamped = allocate(5, 2);
        assert_eq!(clamped.granted, 2);
        assert!(clamped.was_clamped());

        assert!(allocate(3, 0).is_empty());
        assert!(allocate(3, pool_ceiling(4, 6)).is_empty());
    }
}
