//! # Money Module
//!
//! Provides the `Money` type for handling baht amounts safely.
//!
//! ## Why Integer Satang?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Floating point:                                                        │
//! │    290 × 0.07 = 20.300000000000001  ❌ drifts on every recompute        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Satang (1 baht = 100 satang)                     │
//! │    29000 satang × 700 bps = 2030 satang = ฿20.30 exactly               │
//! │    Percentages round half up to the nearest satang, once               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wpos_core::money::Money;
//!
//! let price = Money::from_satang(10_000); // ฿100.00
//! let line = price * 3;                   // ฿300.00
//! assert_eq!(line.satang(), 30_000);
//! assert_eq!(line.to_string(), "฿300.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in satang, the smallest baht unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate differences (line total minus discount)
///   may dip below zero before being floored
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Saturating operators**: `+`, `-`, `*` and [`Money::multiply_quantity`]
///   stop at `i64::MIN`/`i64::MAX` instead of wrapping or panicking
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► CartLineItem.line_total ──► discounted total
///                                                     │
///                     regular subtotal ◄──────────────┘
///                           │
///                           ▼
///                 VAT ──► bill discount ──► grand total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from satang.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::money::Money;
    ///
    /// let price = Money::from_satang(1050); // ฿10.50
    /// assert_eq!(price.satang(), 1050);
    /// ```
    #[inline]
    pub const fn from_satang(satang: i64) -> Self {
        Money(satang)
    }

    /// Creates a Money value from whole baht.
    #[inline]
    pub const fn from_baht(baht: i64) -> Self {
        Money(baht.saturating_mul(100))
    }

    /// Returns the value in satang.
    #[inline]
    pub const fn satang(&self) -> i64 {
        self.0
    }

    /// Returns the whole baht portion (truncated toward zero).
    #[inline]
    pub const fn baht(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the satang portion (always 0-99).
    #[inline]
    pub const fn satang_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Floors the value at zero.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::money::Money;
    ///
    /// assert_eq!(Money::from_satang(-250).max_zero(), Money::zero());
    /// assert_eq!(Money::from_satang(250).max_zero().satang(), 250);
    /// ```
    #[inline]
    pub fn max_zero(self) -> Self {
        Money(self.0.max(0))
    }

    /// Restricts the value to `[min, max]`.
    ///
    /// If `max < min` (e.g. a zero-priced line), `min` wins.
    #[inline]
    pub fn clamp_between(self, min: Money, max: Money) -> Self {
        Money(self.0.min(max.0).max(min.0))
    }

    /// Returns `bps` basis points of this amount, rounded half up to the
    /// nearest satang.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`. The +5000 is the half
    /// that gives round-half-up behaviour.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::money::Money;
    ///
    /// // 20% of ฿310.30 = ฿62.06
    /// let total = Money::from_satang(31_030);
    /// assert_eq!(total.percentage_of(2000).satang(), 6206);
    /// ```
    pub fn percentage_of(&self, bps: u32) -> Money {
        // i128 keeps large carts from overflowing before the division
        let portion = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_satang(portion.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Calculates tax at the given rate.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::money::Money;
    /// use wpos_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_satang(29_000); // ฿290.00
    /// let vat = subtotal.calculate_tax(TaxRate::from_bps(700));
    /// assert_eq!(vat.satang(), 2030); // ฿20.30
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage_of(rate.bps())
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::money::Money;
    ///
    /// let line = Money::from_satang(30_000); // ฿300.00
    /// assert_eq!(line.apply_percentage_discount(1000).satang(), 27_000);
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        *self - self.percentage_of(discount_bps)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `฿1,234.50`, the grouping the storefront shows on screen.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("฿"))
    }
}

impl Money {
    /// Formats with thousands separators and two decimals behind `symbol`.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::money::Money;
    ///
    /// assert_eq!(Money::from_satang(-123_450).format_with_symbol("THB "), "-THB 1,234.50");
    /// ```
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.baht().unsigned_abs()),
            self.satang_part()
        )
    }
}

/// Inserts `,` between groups of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
