//! # W POS Register Library
//!
//! Application layer of the storefront register: configuration, the catalog
//! snapshot, the cart session and the commands the UI invokes.
//!
//! ## Module Organization
//! ```text
//! wpos_register/
//! ├── lib.rs          ◄─── You are here (logging & Register setup)
//! ├── main.rs         ◄─── Binary entry point
//! ├── ipc.rs          ◄─── JSON-lines command channel
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Catalog file & snapshot
//! │   ├── cart.rs     ◄─── Cart session & summary memo
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── Catalog search & reload
//! │   ├── cart.rs     ◄─── Cart, back-order & discount commands
//! │   ├── summary.rs  ◄─── Summary & bill discount
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register State                                       │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │  CatalogState    │ │   CartSession    │ │    ConfigState       │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • Products      │ │  • Both pools    │ │  • VAT rate          │   │
//! │  │  • Reloadable    │ │  • Discounts     │ │  • Page size         │   │
//! │  │                  │ │  • Bill discount │ │  • Catalog path      │   │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘   │
//! │                                                                         │
//! │  WHY: Each command only requests the state it needs.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wpos_core::{Product, SummaryCalculator};

use error::CatalogError;
use state::{CartSession, CatalogState, ConfigState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries command responses.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=wpos_core=trace` - Show trace for one crate only
/// - Default: INFO, DEBUG for the register crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wpos_register=debug,wpos_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Every piece of state a register session needs.
#[derive(Debug)]
pub struct Register {
    config: ConfigState,
    catalog: CatalogState,
    cart: CartSession,
}

impl Register {
    /// Creates a register over an in-memory catalog.
    pub fn new(config: ConfigState, products: Vec<Product>) -> Self {
        Register {
            config,
            catalog: CatalogState::new(products),
            cart: CartSession::new(),
        }
    }

    /// Loads the configured catalog file and opens a session.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Read catalog_path ─────► parse productList ─────► validate records │
    /// │  2. Open cart session (empty cart, empty bill discount)                │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// A register without a catalog cannot sell anything, so a missing or
    /// malformed file is an error here rather than an empty catalog.
    pub async fn bootstrap(config: ConfigState) -> Result<Self, CatalogError> {
        let catalog = CatalogState::default();
        let count = catalog.load_from_path(&config.catalog_path).await?;
        let cart = CartSession::new();

        info!(
            products = count,
            session_id = %cart.info().session_id,
            vat_bps = config.vat_rate.bps(),
            "Register ready"
        );

        Ok(Register {
            config,
            catalog,
            cart,
        })
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn cart(&self) -> &CartSession {
        &self.cart
    }

    /// Calculator for the configured VAT rate.
    pub fn summary_calculator(&self) -> SummaryCalculator {
        SummaryCalculator::new(self.config.vat_rate)
    }
}
