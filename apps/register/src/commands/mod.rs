//! # Register Commands
//!
//! Every operation the storefront UI can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Catalog search, pagination, reload
//! ├── cart.rs     ◄─── Regular pool, back-order pool, line discounts
//! ├── summary.rs  ◄─── Totals, VAT, bill discount
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Command Flow                                │
//! │                                                                         │
//! │  Storefront UI                                                          │
//! │  ─────────────                                                          │
//! │  {"command":"add_to_cart","args":{"productId":"BW-001"}}                │
//! │         │                                                               │
//! │         │ (one JSON line on stdin)                                      │
//! │         ▼                                                               │
//! │  ipc::handle                                                            │
//! │  ───────────                                                            │
//! │  Request::AddToCart { product_id }                                      │
//! │      └──► commands::cart::add_to_cart(&catalog, &cart, product_id)     │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  {"ok":true,"data":{"cart":{...},"outcome":{"status":"applied"}}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartSession)
//!
//! // Needs catalog and cart
//! fn add_to_cart(catalog: &CatalogState, cart: &CartSession, ...)
//!
//! // Summary needs the VAT rate from config
//! fn get_summary(cart: &CartSession, config: &ConfigState)
//! ```

pub mod cart;
pub mod catalog;
pub mod config;
pub mod summary;
