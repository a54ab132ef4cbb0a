//! # Validation Module
//!
//! Input validation utilities for the register.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog boundary                                              │
//! │  ├── Product records checked once when the catalog file is loaded      │
//! │  └── Bad records are rejected, never clamped                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: User text (discount boxes)                                   │
//! │  ├── THIS MODULE: decimal text → integer hundredths                    │
//! │  └── Non-numeric bill discount text is treated as zero by the caller   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                  │
//! │  └── Quantities and discounts clamped into range, never rejected       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wpos_core::validation::{parse_hundredths, validate_product_name};
//!
//! assert_eq!(parse_hundredths("price", "310.30").unwrap(), 31_030);
//! assert!(validate_product_name("").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product name accepted from the catalog.
const MAX_NAME_LEN: usize = 200;

/// Longest catalog search term.
const MAX_QUERY_LEN: usize = 100;

/// Dearest unit price a catalog product may carry (฿10,000,000.00).
pub const MAX_PRICE_SATANG: i64 = 1_000_000_000;

/// Most units a catalog product may report on hand.
///
/// With [`MAX_PRICE_SATANG`] this keeps `price × stock` far inside `i64`.
pub const MAX_STOCK: i64 = 1_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use wpos_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Vitamin C 1000mg").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a catalog search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - At most [`MAX_PRICE_SATANG`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.satang() > MAX_PRICE_SATANG {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_SATANG,
        });
    }

    Ok(())
}

/// Validates a stock level.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - At most [`MAX_STOCK`]
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_STOCK,
        });
    }

    Ok(())
}

/// Validates the page size used for catalog pagination.
pub fn validate_items_per_page(per_page: usize) -> ValidationResult<()> {
    if per_page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "items per page".to_string(),
        });
    }

    Ok(())
}

/// Validates every field of a catalog product.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    Ok(())
}

// =============================================================================
// Decimal Text
// =============================================================================

/// Parses non-negative decimal text into hundredths of its unit.
///
/// Satang for baht amounts, basis points for percentages.
///
/// ## Rules
/// - Accepts `digits`, `digits.`, `.digits` and `digits.digits`
/// - More than two fractional digits round half up
/// - Signs, exponents, separators and empty text are rejected
///
/// ## Example
/// ```rust
/// use wpos_core::validation::parse_hundredths;
///
/// assert_eq!(parse_hundredths("amount", "20").unwrap(), 2000);
/// assert_eq!(parse_hundredths("amount", "12.5").unwrap(), 1250);
/// assert_eq!(parse_hundredths("amount", "0.125").unwrap(), 13);
/// assert!(parse_hundredths("amount", "abc").is_err());
/// ```
pub fn parse_hundredths(field: &str, text: &str) -> ValidationResult<i64> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let text = text.trim();
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("must be a number"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid("must contain only digits and one decimal point"));
    }

    let too_large = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: i64::MAX / 100,
    };

    let mut value: i64 = 0;
    for digit in whole.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(i64::from(digit - b'0')))
            .ok_or_else(too_large)?;
    }
    value = value.checked_mul(100).ok_or_else(too_large)?;

    let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);

    value
        .checked_add(tenths * 10 + hundredths + i64::from(round_up))
        .ok_or_else(too_large)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Vitamin C 1000mg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  vit ").unwrap(), "vit");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_product() {
        let product = Product::new("P1", "Vitamin C", Money::from_baht(100), 5);
        assert!(validate_product(&product).is_ok());

        let free = Product::new("P2", "Sample", Money::zero(), 0);
        assert!(validate_product(&free).is_ok());

        let negative_stock = Product::new("P3", "Broken", Money::from_baht(1), -1);
        assert!(matches!(
            validate_product(&negative_stock),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "stock"
        ));

        let negative_price = Product::new("P4", "Broken", Money::from_satang(-1), 1);
        assert!(validate_product(&negative_price).is_err());

        let no_id = Product::new(" ", "Nameless", Money::zero(), 1);
        assert!(validate_product(&no_id).is_err());
    }

    #[test]
    fn test_price_and_stock_ceilings() {
        let dearest_price = Money::from_satang(MAX_PRICE_SATANG);
        let dearest = Product::new("P5", "Gold Bar", dearest_price, MAX_STOCK);
        assert!(validate_product(&dearest).is_ok());
        assert_eq!(
            dearest.price.multiply_quantity(dearest.stock).satang(),
            MAX_PRICE_SATANG * MAX_STOCK
        );

        let overpriced = Product::new("P6", "Typo", Money::from_satang(i64::MAX / 100), 1);
        assert!(matches!(
            validate_product(&overpriced),
            Err(ValidationError::OutOfRange { ref field, max, .. })
                if field == "price" && max == MAX_PRICE_SATANG
        ));

        let overstocked = Product::new("P7", "Typo", Money::from_baht(1), MAX_STOCK + 1);
        assert!(matches!(
            validate_product(&overstocked),
            Err(ValidationError::OutOfRange { ref field, .. }) if field == "stock"
        ));
    }

    #[test]
    fn test_validate_items_per_page() {
        assert!(validate_items_per_page(6).is_ok());
        assert!(validate_items_per_page(0).is_err());
    }

    #[test]
    fn test_parse_hundredths_accepts_decimals() {
        assert_eq!(parse_hundredths("v", "0").unwrap(), 0);
        assert_eq!(parse_hundredths("v", "100").unwrap(), 10_000);
        assert_eq!(parse_hundredths("v", "310.3").unwrap(), 31_030);
        assert_eq!(parse_hundredths("v", "310.30").unwrap(), 31_030);
        assert_eq!(parse_hundredths("v", "7.").unwrap(), 700);
        assert_eq!(parse_hundredths("v", ".5").unwrap(), 50);
        assert_eq!(parse_hundredths("v", " 12 ").unwrap(), 1200);
    }

    #[test]
    fn test_parse_hundredths_rounds_half_up() {
        assert_eq!(parse_hundredths("v", "1.004").unwrap(), 100);
        assert_eq!(parse_hundredths("v", "1.005").unwrap(), 101);
        assert_eq!(parse_hundredths("v", "0.999").unwrap(), 100);
    }

    #[test]
    fn test_parse_hundredths_rejects_garbage() {
        for text in ["", ".", "abc", "-5", "+5", "1e3", "1,000", "1.2.3", "NaN"] {
            assert!(parse_hundredths("v", text).is_err(), "accepted {text:?}");
        }
        assert!(matches!(
            parse_hundredths("v", "99999999999999999999"),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
