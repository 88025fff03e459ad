//! Funding calculator
//!
//! Computes the fee breakdown and net funds available for a loan.
//!
//! # Fee components
//!
//! | Component          | Formula                                                   |
//! |--------------------|-----------------------------------------------------------|
//! | establishment fee  | principal × establishment rate %                          |
//! | capped interest    | principal × interest rate % × capped months / 12          |
//! | line fee           | principal × monthly line fee rate % × capped months       |
//! | brokerage fee      | principal × brokerage rate %                              |
//! | legal fee          | legal fee before GST + 10% GST                            |
//! | account fees       | monthly account fee × capped months                       |
//! | flat fees          | application, due diligence, valuation, working            |
//!
//! Each component is rounded to cents (half away from zero) before summing,
//! so `funds_available + total_fees` always equals the principal exactly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use core_kernel::{checked_sum, percent_of, round_cents, FieldErrors};

use crate::application::LoanApplication;
use crate::input::{CalculationInput, FundingCalculationInput, LoanTerms, NON_FIELD_ERRORS};
use crate::result::FundingResult;

/// Australian GST rate applied to legal fees
pub const GST_RATE: Decimal = dec!(0.10);

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Stateless funding calculator
pub struct FundingCalculator;

impl FundingCalculator {
    /// Validates the application's loan terms and the manual inputs together
    ///
    /// All field errors from both sources are returned in one mapping. The
    /// capped-months check against the loan term only runs once both sides
    /// parsed cleanly.
    pub fn prepare(application: &LoanApplication, payload: &Value) -> Result<CalculationInput, FieldErrors> {
        let terms = LoanTerms::from_application(application);
        let fees = FundingCalculationInput::from_json(payload);

        match (terms, fees) {
            (Ok(terms), Ok(fees)) => {
                fees.check_against(&terms)?;
                Ok(CalculationInput { terms, fees })
            }
            (terms, fees) => {
                let mut errors = FieldErrors::new();
                if let Err(e) = terms {
                    errors.merge(e);
                }
                if let Err(e) = fees {
                    errors.merge(e);
                }
                Err(errors)
            }
        }
    }

    /// Computes the fee breakdown for validated inputs
    ///
    /// Arithmetic is checked. Inputs too large to compute are reported under
    /// `non_field_errors` rather than overflowing.
    pub fn calculate(input: &CalculationInput) -> Result<FundingResult, FieldErrors> {
        Self::breakdown(input).ok_or_else(|| {
            FieldErrors::new().with(NON_FIELD_ERRORS, "Funding amounts are too large to calculate")
        })
    }

    fn breakdown(input: &CalculationInput) -> Option<FundingResult> {
        let CalculationInput { terms, fees } = input;
        let principal = terms.loan_amount;
        let months = Decimal::from(fees.capped_interest_months);

        let establishment_fee = round_cents(percent_of(principal, fees.establishment_fee_rate)?);
        let capped_interest = round_cents(
            percent_of(principal, terms.interest_rate)?
                .checked_mul(months)?
                .checked_div(MONTHS_PER_YEAR)?,
        );
        let line_fee = round_cents(percent_of(principal, fees.monthly_line_fee_rate)?.checked_mul(months)?);
        let brokerage_fee = round_cents(percent_of(principal, fees.brokerage_fee_rate)?);

        let legal_fee_gst = round_cents(fees.legal_fee_before_gst.checked_mul(GST_RATE)?);
        let legal_fee = round_cents(fees.legal_fee_before_gst).checked_add(legal_fee_gst)?;

        let application_fee = round_cents(fees.application_fee);
        let due_diligence_fee = round_cents(fees.due_diligence_fee);
        let valuation_fee = round_cents(fees.valuation_fee);
        let account_fees = round_cents(fees.monthly_account_fee.checked_mul(months)?);
        let working_fee = round_cents(fees.working_fee);

        let total_fees = checked_sum([
            establishment_fee,
            capped_interest,
            line_fee,
            brokerage_fee,
            legal_fee,
            application_fee,
            due_diligence_fee,
            valuation_fee,
            account_fees,
            working_fee,
        ])?;

        Some(FundingResult {
            establishment_fee,
            capped_interest,
            line_fee,
            brokerage_fee,
            legal_fee,
            legal_fee_gst,
            application_fee,
            due_diligence_fee,
            valuation_fee,
            account_fees,
            working_fee,
            total_fees,
            funds_available: principal.checked_sub(total_fees)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn application() -> LoanApplication {
        LoanApplication::new("APP-2024-0001").with_loan(dec!(1000000), 12, dec!(8))
    }

    fn payload() -> Value {
        json!({
            "establishment_fee_rate": 2.5,
            "capped_interest_months": 9,
            "monthly_line_fee_rate": 0.5,
            "brokerage_fee_rate": 1.0,
            "application_fee": 500,
            "due_diligence_fee": 1000,
            "legal_fee_before_gst": 2000,
            "valuation_fee": 1500,
            "monthly_account_fee": 50
        })
    }

    #[test]
    fn test_reference_breakdown() {
        let input = FundingCalculator::prepare(&application(), &payload()).unwrap();
        let result = FundingCalculator::calculate(&input).unwrap();

        assert_eq!(result.establishment_fee, dec!(25000));
        assert_eq!(result.capped_interest, dec!(60000));
        assert_eq!(result.line_fee, dec!(45000));
        assert_eq!(result.brokerage_fee, dec!(10000));
        assert_eq!(result.legal_fee, dec!(2200));
        assert_eq!(result.legal_fee_gst, dec!(200));
        assert_eq!(result.account_fees, dec!(450));
        assert_eq!(result.working_fee, Decimal::ZERO);
        assert_eq!(result.total_fees, dec!(145650));
        assert_eq!(result.funds_available, dec!(854350));
    }

    #[test]
    fn test_components_are_rounded_half_away_from_zero() {
        let application = LoanApplication::new("APP-2").with_loan(dec!(1234.5), 3, dec!(7.3));
        let mut body = payload();
        body["capped_interest_months"] = json!(1);
        body["establishment_fee_rate"] = json!("1.01");
        let input = FundingCalculator::prepare(&application, &body).unwrap();
        let result = FundingCalculator::calculate(&input).unwrap();

        // 1234.5 × 1.01% = 12.46845
        assert_eq!(result.establishment_fee, dec!(12.47));
        // 1234.5 × 7.3% / 12 = 7.509875
        assert_eq!(result.capped_interest, dec!(7.51));
        assert_eq!(result.funds_available + result.total_fees, dec!(1234.5));
    }

    #[test]
    fn test_loan_and_input_errors_are_combined() {
        let application = LoanApplication::new("APP-3");
        let mut body = payload();
        body["brokerage_fee_rate"] = json!("lots");

        let errors = FundingCalculator::prepare(&application, &body).unwrap_err();
        assert!(errors.contains("loan_amount"));
        assert!(errors.contains("loan_term"));
        assert!(errors.contains("interest_rate"));
        assert!(errors.contains("brokerage_fee_rate"));
    }

    #[test]
    fn test_overflow_is_reported_not_raised() {
        let application = LoanApplication::new("APP-5").with_loan(Decimal::MAX, 4_000_000_000, Decimal::MAX);
        let mut body = payload();
        body["capped_interest_months"] = json!(4_000_000_000u32);
        let input = FundingCalculator::prepare(&application, &body).unwrap();

        let errors = FundingCalculator::calculate(&input).unwrap_err();
        assert_eq!(errors.get(NON_FIELD_ERRORS), Some("Funding amounts are too large to calculate"));
    }

    #[test]
    fn test_fees_may_exceed_principal() {
        let application = LoanApplication::new("APP-4").with_loan(dec!(1000), 12, dec!(8));
        let input = FundingCalculator::prepare(&application, &payload()).unwrap();
        let result = FundingCalculator::calculate(&input).unwrap();
        assert!(result.is_shortfall());
        assert_eq!(result.funds_available + result.total_fees, dec!(1000));
    }
}
