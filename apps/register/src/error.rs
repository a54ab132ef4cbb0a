//! # Register Errors
//!
//! Loading errors for the app layer plus the unified error type commands
//! return to the UI.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in W POS                                  │
//! │                                                                         │
//! │  Startup                          Commands                              │
//! │  ───────                          ────────                              │
//! │  ConfigError ──┐                  unknown product ──► NOT_FOUND         │
//! │  CatalogError ─┼──► ApiError      bad search term ──► VALIDATION_ERROR  │
//! │                │                  malformed request ► INVALID_REQUEST   │
//! │                ▼                                                        │
//! │        logged, process exits      stock / missing line ──► no error,   │
//! │                                   reported as a CommandOutcome          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The UI receives:
//! ```json
//! { "code": "NOT_FOUND", "message": "Product not found: BW-404" }
//! ```

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;
use wpos_core::{CoreError, ValidationError};

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors reading the product catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A record parsed but does not describe a usable product.
    #[error("Catalog record {index} is invalid: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: CoreError,
    },

    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(String),
}

/// Errors reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

// =============================================================================
// API Error
// =============================================================================

/// Error returned from register commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product id not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// The request itself could not be understood
    InvalidRequest,

    /// The catalog file could not be loaded
    CatalogError,

    /// Configuration is invalid
    ConfigError,

    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::InvalidProduct { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        // Paths and parser positions are for the log, not the cashier
        tracing::error!("Catalog load failed: {}", err);
        ApiError::new(ErrorCode::CatalogError, "Product catalog could not be loaded")
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_serialization() {
        let err: ApiError = CoreError::ProductNotFound("BW-404".to_string()).into();
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "NOT_FOUND", "message": "Product not found: BW-404" })
        );
    }

    #[test]
    fn test_validation_conversion() {
        let err: ApiError = ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "query must be at most 100 characters");
    }

    #[test]
    fn test_catalog_error_hides_details() {
        let err: ApiError = CatalogError::DuplicateId("BW-001".to_string()).into();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(!err.message.contains("BW-001"));
    }
}
