//! # Discount & Pricing
//!
//! Pure functions from `(price, quantity, discount)` to money.
//!
//! ```text
//! no discount:  price × qty
//! percent:      price × qty − round(price × qty × pct)
//! baht:         max(0, price × qty − amount)
//! ```
//!
//! Discount amounts are always `line total − discounted total`, so they are
//! never negative once the clamp in [`clamp_line_discount`] has run.

use crate::money::Money;
use crate::types::{Discount, DiscountKind, DiscountRequest};

/// Total of a line after its discount.
///
/// ## Example
/// ```rust
/// use wpos_core::money::Money;
/// use wpos_core::pricing::discounted_total;
/// use wpos_core::types::Discount;
///
/// let flat = Discount::Baht(Money::from_baht(10));
/// assert_eq!(discounted_total(Money::from_baht(100), 3, Some(&flat)), Money::from_baht(290));
/// ```
pub fn discounted_total(price: Money, quantity: i64, discount: Option<&Discount>) -> Money {
    let line_total = price.multiply_quantity(quantity);
    match discount {
        None => line_total,
        Some(Discount::Percent(pct)) => line_total.apply_percentage_discount(pct.bps()),
        Some(Discount::Baht(amount)) => (line_total - *amount).max_zero(),
    }
}

/// Money taken off a line by its discount.
pub fn discount_amount(price: Money, quantity: i64, discount: Option<&Discount>) -> Money {
    price.multiply_quantity(quantity) - discounted_total(price, quantity, discount)
}

/// Bounds a requested per-line discount by what the line can give.
///
/// - Percent: `[0, 100]`
/// - Baht: `[0, line total]`
///
/// ## Example
/// ```rust
/// use wpos_core::money::Money;
/// use wpos_core::pricing::clamp_line_discount;
/// use wpos_core::types::{Discount, DiscountKind, DiscountRequest, Percentage};
///
/// let request = DiscountRequest::new(DiscountKind::Percent, 15_000);
/// assert_eq!(
///     clamp_line_discount(request, Money::from_baht(300)),
///     Discount::Percent(Percentage::from_whole(100))
/// );
/// ```
pub fn clamp_line_discount(request: DiscountRequest, line_total: Money) -> Discount {
    match request.kind {
        DiscountKind::Percent => Discount::from_hundredths(DiscountKind::Percent, request.amount),
        DiscountKind::Baht => Discount::Baht(
            Money::from_satang(request.amount).clamp_between(Money::zero(), line_total.max_zero()),
        ),
    }
}

/// Money taken off the regular total by a bill-level discount.
///
/// Never more than `total`; zero when there is no discount.
///
/// ## Example
/// ```rust
/// use wpos_core::money::Money;
/// use wpos_core::pricing::bill_discount_amount;
/// use wpos_core::types::{Discount, Percentage};
///
/// let total = Money::from_satang(31_030);
/// let twenty = Discount::Percent(Percentage::from_whole(20));
/// assert_eq!(bill_discount_amount(total, Some(&twenty)).satang(), 6206);
/// ```
pub fn bill_discount_amount(total: Money, discount: Option<&Discount>) -> Money {
    let total = total.max_zero();
    let amount = match discount {
        None => return Money::zero(),
        Some(Discount::Percent(pct)) => total.percentage_of(pct.bps()),
        Some(Discount::Baht(amount)) => amount.max_zero(),
    };
    amount.min(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Percentage;

    const PRICE: Money = Money::from_baht(100);

    #[test]
    fn test_no_discount() {
        assert_eq!(discounted_total(PRICE, 3, None), Money::from_baht(300));
        assert_eq!(discount_amount(PRICE, 3, None), Money::zero());
    }

    #[test]
    fn test_percent_discount() {
        let ten = Discount::Percent(Percentage::from_whole(10));
        assert_eq!(discounted_total(PRICE, 3, Some(&ten)), Money::from_baht(270));
        assert_eq!(discount_amount(PRICE, 3, Some(&ten)), Money::from_baht(30));

        let all = Discount::Percent(Percentage::from_whole(100));
        assert_eq!(discounted_total(PRICE, 3, Some(&all)), Money::zero());
    }

    #[test]
    fn test_baht_discount_floors_at_zero() {
        let huge = Discount::Baht(Money::from_baht(1_000_000));
        assert_eq!(discounted_total(PRICE, 3, Some(&huge)), Money::zero());
        assert_eq!(discount_amount(PRICE, 3, Some(&huge)), Money::from_baht(300));
    }

    #[test]
    fn test_clamp_line_discount() {
        let line_total = Money::from_baht(300);
        let baht = |satang| DiscountRequest::new(DiscountKind::Baht, satang);
        let percent = |bps| DiscountRequest::new(DiscountKind::Percent, bps);

        assert_eq!(clamp_line_discount(baht(50_000), line_total), Discount::Baht(line_total));
        assert_eq!(clamp_line_discount(baht(-500), line_total), Discount::Baht(Money::zero()));
        assert_eq!(
            clamp_line_discount(percent(5000), line_total),
            Discount::Percent(Percentage::from_whole(50))
        );
        assert_eq!(
            clamp_line_discount(percent(-1), line_total),
            Discount::Percent(Percentage::from_bps(0))
        );

        let full = clamp_line_discount(percent(25_000), line_total);
        assert_eq!(full, Discount::Percent(Percentage::from_whole(100)));
        assert_eq!(discounted_total(PRICE, 3, Some(&full)), Money::zero());
        assert_eq!(discount_amount(PRICE, 3, Some(&full)), line_total);
    }

    #[test]
    fn test_bill_discount_amount() {
        let total = Money::from_satang(31_030);
        assert_eq!(bill_discount_amount(total, None), Money::zero());

        let flat = Discount::Baht(Money::from_baht(50));
        assert_eq!(bill_discount_amount(total, Some(&flat)), Money::from_baht(50));

        let too_much = Discount::Baht(Money::from_baht(5000));
        assert_eq!(bill_discount_amount(total, Some(&too_much)), total);

        let all = Discount::Percent(Percentage::from_whole(100));
        assert_eq!(bill_discount_amount(total, Some(&all)), total);
    }
}
