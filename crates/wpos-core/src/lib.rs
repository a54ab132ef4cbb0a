//! # wpos-core: Cart Engine for the W POS Storefront
//!
//! This crate holds the register's business logic as pure functions and a
//! single-writer state machine, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        W POS Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI                                │   │
//! │  │    Catalog grid ──► Cart panel ──► Summary panel               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / queries                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                wpos-register (app crate)                        │   │
//! │  │    config, tracing, catalog file, cart session, summary memo   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ wpos-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │  summary  │  │   stock   │  │  catalog  │  │   │
//! │  │   │  reducer  │  │ VAT, bill │  │  pools    │  │  filter   │  │   │
//! │  │   │ CartState │  │ discount  │  │ ceilings  │  │  paging   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart state and the command reducer
//! - [`summary`] - Totals, VAT and bill discount
//! - [`pricing`] - Per-line and bill discount arithmetic
//! - [`stock`] - Shared stock ceiling across regular and back-order pools
//! - [`catalog`] - Catalog filtering and pagination
//! - [`types`] - Domain types (Product, CartLineItem, Discount)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation and decimal parsing
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, including summaries
//! 2. **No I/O**: files, network and logging live in the app crate
//! 3. **Integer Money**: all monetary values are satang (i64)
//! 4. **No-op Rejection**: cart commands clamp or ignore, they never fail
//!
//! ## Example Usage
//!
//! ```rust
//! use wpos_core::money::Money;
//! use wpos_core::VAT_RATE;
//!
//! let subtotal = Money::from_baht(290);
//! assert_eq!(subtotal.calculate_tax(VAT_RATE).satang(), 2030); // ฿20.30
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod stock;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, CartCommand, CartState, CommandOutcome, IgnoreReason};
pub use catalog::{CatalogFilter, Page, PriceRange, StockFilter};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use summary::{BillDiscount, CartSummary, LineSummary, SummaryCalculator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Thai VAT, charged on regular lines only.
pub const VAT_RATE: TaxRate = TaxRate::from_bps(700);

/// Catalog cards per page on a full-width screen.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;
