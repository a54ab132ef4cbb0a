//! # Error Types
//!
//! Domain-specific error types for wpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wpos-core errors (this file)                                          │
//! │  ├── CoreError        - Catalog and product lookups                    │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  wpos-register errors (app crate)                                      │
//! │  ├── CatalogError     - Catalog file loading                           │
//! │  ├── ConfigError      - Environment configuration                      │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! │                                                                         │
//! │  Cart commands never produce errors: boundary conditions are no-ops    │
//! │  or clamps, reported as a CommandOutcome instead.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the current catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A catalog record cannot become a `Product`.
    ///
    /// ## When This Occurs
    /// - Negative price or stock in the catalog file
    /// - Missing id or name
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a price that is not a decimal number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ProductNotFound("P404".to_string());
        assert_eq!(err.to_string(), "Product not found: P404");

        let err = CoreError::InvalidProduct {
            id: "P1".to_string(),
            source: ValidationError::OutOfRange {
                field: "stock".to_string(),
                min: 0,
                max: i64::MAX,
            },
        };
        assert!(err.to_string().starts_with("Invalid product P1: stock must be between 0"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "items per page".to_string(),
        };
        assert_eq!(err.to_string(), "items per page must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
