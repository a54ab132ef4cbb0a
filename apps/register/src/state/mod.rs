//! # State Module
//!
//! Manages register state.
//!
//! ## Why Multiple State Types?
//! Each command declares exactly the state it needs, and independent states
//! do not block each other: a catalog reload never waits on the cart lock.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ CatalogState │  │ CartSession  │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  RwLock<Arc< │  │  Arc<Mutex<  │  │  vat_rate        │              │
//! │  │   Vec<       │  │   cart,      │  │  items_per_page  │              │
//! │  │   Product>>> │  │   bill,      │  │  catalog_path    │              │
//! │  │              │  │   memo >>    │  │                  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: snapshot swapped atomically, readers keep their Arc   │
//! │  • CartSession: Mutex, one command at a time                           │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartSession, SessionInfo};
pub use catalog::{parse_catalog, CatalogState};
pub use config::ConfigState;
