//! # Config Commands
//!
//! Register configuration for the UI: store name, currency, VAT rate.

use serde::Serialize;
use tracing::debug;

use crate::state::{CartSession, ConfigState, SessionInfo};

/// Configuration plus the session the UI is attached to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub config: ConfigState,
    pub session: SessionInfo,
}

/// Gets the current register configuration.
///
/// ## When Used
/// - App startup (to configure UI)
/// - Currency formatting
/// - VAT label on the summary panel
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState, cart: &CartSession) -> ConfigResponse {
    debug!("get_config command");
    ConfigResponse {
        config: config.clone(),
        session: cart.info().clone(),
    }
}
