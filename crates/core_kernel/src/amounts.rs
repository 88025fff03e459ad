//! Monetary decimal helpers
//!
//! Amounts are plain `Decimal` values in dollars. Every persisted or reported
//! amount is rounded to cents, half away from zero.
//!
//! Amounts and rates read from requests are bounded by [`MAX_AMOUNT`] and
//! [`MAX_RATE_PERCENT`], and the arithmetic helpers here return `None` instead
//! of overflowing.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Number of decimal places carried by reported amounts
pub const CENT_PLACES: u32 = 2;

/// Largest amount a `NUMERIC(15, 2)` column holds
pub const MAX_AMOUNT: Decimal = dec!(9999999999999.99);

/// Largest percentage rate accepted for fees and interest
pub const MAX_RATE_PERCENT: Decimal = dec!(100);

/// Decimal places stored for an interest rate (`NUMERIC(7, 4)`)
pub const RATE_PLACES: u32 = 4;

const HUNDRED: Decimal = dec!(100);

/// Rounds an amount to whole cents, half away from zero
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies a percentage rate (e.g. `2.5` for 2.5%) to an amount, unrounded
///
/// Returns `None` on overflow.
pub fn percent_of(amount: Decimal, rate_percent: Decimal) -> Option<Decimal> {
    amount.checked_mul(rate_percent)?.checked_div(HUNDRED)
}

/// Sums amounts, returning `None` on overflow
pub fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

/// Number of significant decimal places, ignoring trailing zeros
pub fn decimal_places(amount: Decimal) -> u32 {
    amount.normalize().scale()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents_half_away_from_zero() {
        assert_eq!(round_cents(dec!(10.005)), dec!(10.01));
        assert_eq!(round_cents(dec!(10.004)), dec!(10.00));
        assert_eq!(round_cents(dec!(-10.005)), dec!(-10.01));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(1000000), dec!(2.5)), Some(dec!(25000)));
        assert_eq!(percent_of(dec!(200), dec!(0)), Some(dec!(0)));
        assert_eq!(percent_of(Decimal::MAX, dec!(2)), None);
    }

    #[test]
    fn test_checked_sum_overflow() {
        assert_eq!(checked_sum([dec!(1.5), dec!(2.25)]), Some(dec!(3.75)));
        assert_eq!(checked_sum([Decimal::MAX, Decimal::MAX]), None);
        assert_eq!(checked_sum(std::iter::empty()), Some(Decimal::ZERO));
    }

    #[test]
    fn test_decimal_places_ignores_trailing_zeros() {
        assert_eq!(decimal_places(dec!(550000.00)), 0);
        assert_eq!(decimal_places(dec!(9.2500)), 2);
        assert_eq!(decimal_places(dec!(0.125)), 3);
    }
}
