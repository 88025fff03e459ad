//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use domain_borrower::business_numbers::{abn_check_digits, acn_check_digit};
use domain_funding::LoanApplication;

fn digits_to_string(digits: &[u8]) -> String {
    digits.iter().map(|d| char::from(b'0' + d)).collect()
}

/// Strategy for generating ACNs with a correct check digit
pub fn valid_acn_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..=9, 8).prop_map(|body| {
        let mut digits = body.clone();
        // check digit is always 0-9
        digits.push(acn_check_digit(&body) as u8);
        digits_to_string(&digits)
    })
}

/// Strategy for generating ABNs that satisfy the modulus-89 check
pub fn valid_abn_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..=9, 9).prop_filter_map("no leading digits", |body| {
        let (first, second) = abn_check_digits(&body)?;
        let mut digits = vec![first, second];
        digits.extend_from_slice(&body);
        Some(digits_to_string(&digits))
    })
}

/// Strategy for generating non-negative dollar amounts in whole cents
pub fn amount_strategy(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for generating percentage rates from 0.00 to 20.00
pub fn rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=2000).prop_map(|basis| Decimal::new(basis, 2))
}

/// Strategy for generating loan terms from one month to thirty years
pub fn loan_term_strategy() -> impl Strategy<Value = u32> {
    1u32..=360
}

/// Strategy for generating applications with complete loan terms
pub fn application_strategy() -> impl Strategy<Value = LoanApplication> {
    (amount_strategy(500_000_000), loan_term_strategy(), rate_strategy()).prop_map(
        |(amount, term, rate)| LoanApplication::new("APP-PROP").with_loan(amount, term, rate),
    )
}

/// Strategy for generating valid manual funding inputs for a loan term
///
/// Rates and amounts are sent as strings, the way form posts arrive.
pub fn funding_payload_strategy(loan_term: u32) -> impl Strategy<Value = Value> {
    (
        (rate_strategy(), rate_strategy(), rate_strategy()),
        0..=loan_term,
        (
            amount_strategy(1_000_000),
            amount_strategy(1_000_000),
            amount_strategy(1_000_000),
            amount_strategy(1_000_000),
        ),
        amount_strategy(50_000),
        amount_strategy(1_000_000),
    )
        .prop_map(
            |((establishment, line, brokerage), months, (application, diligence, legal, valuation), account, working)| {
                json!({
                    "establishment_fee_rate": establishment.to_string(),
                    "capped_interest_months": months,
                    "monthly_line_fee_rate": line.to_string(),
                    "brokerage_fee_rate": brokerage.to_string(),
                    "application_fee": application.to_string(),
                    "due_diligence_fee": diligence.to_string(),
                    "legal_fee_before_gst": legal.to_string(),
                    "valuation_fee": valuation.to_string(),
                    "monthly_account_fee": account.to_string(),
                    "working_fee": working.to_string(),
                })
            },
        )
}

/// Strategy for generating an application together with inputs that fit its term
pub fn funding_case_strategy() -> impl Strategy<Value = (LoanApplication, Value)> {
    application_strategy().prop_flat_map(|application| {
        let term = application.loan_term.unwrap_or(1);
        (Just(application), funding_payload_strategy(term))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_generated_acns_are_valid(acn in valid_acn_strategy()) {
            prop_assert!(domain_borrower::is_valid_acn(&acn));
        }

        #[test]
        fn test_generated_abns_are_valid(abn in valid_abn_strategy()) {
            prop_assert_eq!(abn.len(), 11);
            prop_assert!(domain_borrower::is_valid_abn(&abn));
        }

        #[test]
        fn test_rates_in_range(rate in rate_strategy()) {
            prop_assert!(rate >= Decimal::ZERO);
            prop_assert!(rate <= Decimal::new(20, 0));
        }
    }
}
