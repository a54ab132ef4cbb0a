//! # Domain Types
//!
//! Core domain types used throughout the register.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  CartLineItem   │   │    Discount     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product        │   │  Baht(Money)    │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  Percent(bps)   │       │
//! │  │  price (Money)  │   └─────────────────┘   └─────────────────┘       │
//! │  │  stock          │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │    TaxRate      │   │   Percentage    │       │
//! │                        │  700 = 7% VAT   │   │  0..=10000 bps  │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Basis points in one hundred percent.
pub const FULL_PERCENT_BPS: u32 = 10_000;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7% (Thai VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        crate::VAT_RATE
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A discount percentage in basis points, never above 100%.
///
/// Decoding goes through [`Percentage::from_bps`], so `15000` on the wire
/// arrives as 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(from = "u32")]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points, clamped to 100%.
    #[inline]
    pub fn from_bps(bps: u32) -> Self {
        Percentage(bps.min(FULL_PERCENT_BPS))
    }

    /// Creates a percentage from whole percent, clamped to 100%.
    ///
    /// ## Example
    /// ```rust
    /// use wpos_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::from_whole(20).bps(), 2000);
    /// assert_eq!(Percentage::from_whole(150).bps(), 10_000);
    /// ```
    #[inline]
    pub fn from_whole(pct: u32) -> Self {
        Percentage::from_bps(pct.saturating_mul(100))
    }

    /// Returns the percentage in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u32> for Percentage {
    fn from(bps: u32) -> Self {
        Percentage::from_bps(bps)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product supplied by the catalog.
///
/// The cart never mutates products; it reads `price` and `stock` when a
/// command executes and keeps a snapshot on each line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Unit price.
    pub price: Money,

    /// Units on hand, shared by the regular and back-order pools.
    pub stock: i64,

    /// Image URL.
    pub image: Option<String>,

    pub category: Option<String>,

    pub description: Option<String>,
}

impl Product {
    /// Creates a product with no image, category or description.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            stock,
            image: None,
            category: None,
            description: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// A product snapshot plus the quantity held in one pool.
///
/// ## Invariant
/// `quantity >= 1`. A command that would leave a line at zero removes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartLineItem {
    pub fn new(product: Product, quantity: i64) -> Self {
        CartLineItem { product, quantity }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity, before any discount.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// Whether a discount is a flat baht amount or a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    #[default]
    Baht,
    Percent,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Baht => f.write_str("baht"),
            DiscountKind::Percent => f.write_str("percent"),
        }
    }
}

impl FromStr for DiscountKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baht" => Ok(DiscountKind::Baht),
            "percent" => Ok(DiscountKind::Percent),
            _ => Err(ValidationError::NotAllowed {
                field: "discount type".to_string(),
                allowed: vec!["baht".to_string(), "percent".to_string()],
            }),
        }
    }
}

/// A discount entry.
///
/// Serialised as `{ "type": "baht", "amount": 1000 }` so the UI keeps the
/// `{amount, type}` shape it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "amount", rename_all = "lowercase")]
pub enum Discount {
    /// Flat amount off.
    Baht(Money),
    /// Percentage off.
    Percent(Percentage),
}

impl Discount {
    /// Builds a discount from an amount in hundredths (satang or bps).
    ///
    /// Negative amounts become zero.
    pub fn from_hundredths(kind: DiscountKind, hundredths: i64) -> Self {
        match kind {
            DiscountKind::Baht => Discount::Baht(Money::from_satang(hundredths.max(0))),
            DiscountKind::Percent => {
                let bps = hundredths.clamp(0, FULL_PERCENT_BPS as i64) as u32;
                Discount::Percent(Percentage::from_bps(bps))
            }
        }
    }

    pub fn kind(&self) -> DiscountKind {
        match self {
            Discount::Baht(_) => DiscountKind::Baht,
            Discount::Percent(_) => DiscountKind::Percent,
        }
    }

    /// The amount in hundredths of its unit (satang or basis points).
    pub fn hundredths(&self) -> i64 {
        match self {
            Discount::Baht(amount) => amount.satang(),
            Discount::Percent(pct) => pct.bps() as i64,
        }
    }

    /// Checks if applying the discount changes nothing.
    pub fn is_zero(&self) -> bool {
        match self {
            Discount::Baht(amount) => !amount.is_positive(),
            Discount::Percent(pct) => pct.is_zero(),
        }
    }
}

/// A discount as entered, before the line it targets bounds it.
///
/// Same `{ "type", "amount" }` shape as [`Discount`], but `amount` is raw
/// hundredths (satang or basis points), so `15000` percent or a negative
/// baht figure reaches the reducer as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRequest {
    #[serde(rename = "type")]
    pub kind: DiscountKind,
    #[ts(type = "number")]
    pub amount: i64,
}

impl DiscountRequest {
    pub fn new(kind: DiscountKind, amount: i64) -> Self {
        DiscountRequest { kind, amount }
    }
}

impl From<Discount> for DiscountRequest {
    fn from(discount: Discount) -> Self {
        DiscountRequest::new(discount.kind(), discount.hundredths())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
