//! # W POS Register Entry Point
//!
//! Headless register process driven by the storefront UI.
//!
//! ## Process Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        W POS Register                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Storefront UI (TypeScript)                    │  │
//! │  │  • Product Grid         • Cart & Back-order Lists                │  │
//! │  │  • Discount Boxes       • Summary Panel                          │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ JSON lines (stdin / stdout)          │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► Sets up logging, config, catalog                 │  │
//! │  │  ipc.rs ─────► Decodes requests, routes to commands             │  │
//! │  │  commands/ ──► add_to_cart, add_back_order_item, get_summary    │  │
//! │  │  state/ ─────► CatalogState, CartSession, ConfigState           │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    products.json (catalog file)                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (logging to stderr)
//! 2. Read configuration from the environment
//! 3. Load the catalog file
//! 4. Serve commands until stdin closes

use std::process::ExitCode;

use tracing::{error, info};
use wpos_register::state::ConfigState;
use wpos_register::{init_tracing, ipc, Register};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    info!("Starting W POS register");

    let config = match ConfigState::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let register = match Register::bootstrap(config).await {
        Ok(register) => register,
        Err(e) => {
            error!(error = %e, "Catalog could not be loaded");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = ipc::serve(&register, tokio::io::stdin(), tokio::io::stdout()).await {
        error!(error = %e, "Command channel failed");
        return ExitCode::FAILURE;
    }

    info!("Register shut down");
    ExitCode::SUCCESS
}
