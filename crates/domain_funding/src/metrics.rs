//! Loan repayment metrics
//!
//! Amortized repayment figures for an application's loan terms:
//!
//! ```text
//! monthly repayment = L · c · (1 + c)^n / ((1 + c)^n - 1)
//! ```
//!
//! where `L` is the principal, `c` the monthly rate (annual % / 100 / 12) and
//! `n` the term in months. A zero rate repays the principal in equal parts.
//! Totals are computed from the unrounded repayment and every reported figure
//! is rounded to cents.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{round_cents, FieldErrors};

use crate::application::LoanApplication;
use crate::input::{LoanTerms, NON_FIELD_ERRORS};

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Repayment figures for a loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanMetrics {
    pub monthly_repayment: Decimal,
    pub total_repayment: Decimal,
    pub total_interest: Decimal,
    /// Principal as a percentage of the security value, when one is recorded
    pub loan_to_value_ratio: Option<Decimal>,
    pub interest_rate: Decimal,
    pub loan_term_years: Decimal,
}

impl LoanMetrics {
    /// Computes the metrics for an application
    ///
    /// Missing loan terms are reported the same way as for a funding
    /// calculation. Figures too large to compute are reported under
    /// `non_field_errors`.
    pub fn for_application(application: &LoanApplication) -> Result<Self, FieldErrors> {
        let terms = LoanTerms::from_application(application)?;
        Self::calculate(&terms, application.security_value).ok_or_else(|| {
            FieldErrors::new().with(NON_FIELD_ERRORS, "Loan terms are too large to compute repayments")
        })
    }

    /// Computes the metrics for validated loan terms
    pub fn calculate(terms: &LoanTerms, security_value: Option<Decimal>) -> Option<Self> {
        let principal = terms.loan_amount;
        let periods = Decimal::from(terms.loan_term);
        let monthly_rate = terms
            .interest_rate
            .checked_div(HUNDRED)?
            .checked_div(MONTHS_PER_YEAR)?;

        let repayment = annuity_payment(principal, monthly_rate, terms.loan_term)?;
        let total_repayment = repayment.checked_mul(periods)?;
        let total_interest = total_repayment.checked_sub(principal)?;

        let loan_to_value_ratio = match security_value {
            Some(security) if security > Decimal::ZERO => {
                Some(round_cents(principal.checked_mul(HUNDRED)?.checked_div(security)?))
            }
            _ => None,
        };

        Some(Self {
            monthly_repayment: round_cents(repayment),
            total_repayment: round_cents(total_repayment),
            total_interest: round_cents(total_interest),
            loan_to_value_ratio,
            interest_rate: terms.interest_rate,
            loan_term_years: round_cents(periods.checked_div(MONTHS_PER_YEAR)?),
        })
    }
}

/// Level payment that repays `principal` over `periods` at `rate` per period
fn annuity_payment(principal: Decimal, rate: Decimal, periods: u32) -> Option<Decimal> {
    if periods == 0 {
        return Some(Decimal::ZERO);
    }
    if rate.is_zero() {
        return principal.checked_div(Decimal::from(periods));
    }

    let compound = compound(rate, periods)?;
    let growth = compound.checked_sub(Decimal::ONE)?;
    if growth.is_zero() {
        // Rate too small to register at this precision
        return principal.checked_div(Decimal::from(periods));
    }
    principal
        .checked_mul(rate)?
        .checked_mul(compound)?
        .checked_div(growth)
}

/// `(1 + rate)^periods` by repeated squaring
fn compound(rate: Decimal, periods: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(rate)?;
    let mut exponent = periods;
    let mut result = Decimal::ONE;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        exponent >>= 1;
        if exponent > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(amount: Decimal, months: u32, rate: Decimal) -> LoanTerms {
        LoanTerms {
            loan_amount: amount,
            loan_term: months,
            interest_rate: rate,
        }
    }

    #[test]
    fn test_amortized_repayment() {
        let metrics = LoanMetrics::calculate(&terms(dec!(500000), 360, dec!(6)), Some(dec!(625000))).unwrap();

        assert_eq!(metrics.monthly_repayment, dec!(2997.75));
        assert_eq!(metrics.total_repayment, dec!(1079190.95));
        assert_eq!(metrics.total_interest, dec!(579190.95));
        assert_eq!(metrics.loan_to_value_ratio, Some(dec!(80)));
        assert_eq!(metrics.loan_term_years, dec!(30));
    }

    #[test]
    fn test_zero_rate_repays_in_equal_parts() {
        let metrics = LoanMetrics::calculate(&terms(dec!(12000), 24, Decimal::ZERO), None).unwrap();
        assert_eq!(metrics.monthly_repayment, dec!(500));
        assert_eq!(metrics.total_interest, Decimal::ZERO);
        assert_eq!(metrics.loan_to_value_ratio, None);
        assert_eq!(metrics.loan_term_years, dec!(2));
    }

    #[test]
    fn test_zero_term_has_no_repayment() {
        let metrics = LoanMetrics::calculate(&terms(dec!(12000), 0, dec!(8)), Some(Decimal::ZERO)).unwrap();
        assert_eq!(metrics.monthly_repayment, Decimal::ZERO);
        assert_eq!(metrics.loan_to_value_ratio, None);
    }

    #[test]
    fn test_compound_matches_repeated_multiplication() {
        let rate = dec!(0.005);
        let mut expected = Decimal::ONE;
        for _ in 0..37 {
            expected *= Decimal::ONE + rate;
        }
        let actual = compound(rate, 37).unwrap();
        assert!((actual - expected).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_missing_terms_are_field_errors() {
        let errors = LoanMetrics::for_application(&LoanApplication::new("APP-1")).unwrap_err();
        assert!(errors.contains("loan_amount"));
        assert!(errors.contains("loan_term"));
        assert!(errors.contains("interest_rate"));
    }

    #[test]
    fn test_unbounded_growth_is_reported() {
        let application = LoanApplication::new("APP-2").with_loan(dec!(100000), u32::MAX, dec!(100));
        let errors = LoanMetrics::for_application(&application).unwrap_err();
        assert!(errors.contains(NON_FIELD_ERRORS));
    }
}
