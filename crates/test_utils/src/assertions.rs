//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::FieldErrors;
use domain_funding::{FundingCalculationHistory, FundingResult};

/// Asserts that a field carries exactly the given message
///
/// # Panics
///
/// Panics with the full error map when the field is missing or differs
pub fn assert_field_error(errors: &FieldErrors, field: &str, expected: &str) {
    match errors.get(field) {
        Some(actual) => assert_eq!(
            actual, expected,
            "Unexpected message for '{}': actual='{}', expected='{}'",
            field, actual, expected
        ),
        None => panic!("Expected an error on '{}', got {:?}", field, errors),
    }
}

/// Asserts that the error map is keyed by exactly these fields
pub fn assert_error_fields(errors: &FieldErrors, expected: &[&str]) {
    let mut expected: Vec<&str> = expected.to_vec();
    expected.sort_unstable();
    let actual: Vec<&str> = errors.fields().collect();
    assert_eq!(actual, expected, "Field error keys differ: {:?}", errors);
}

/// Asserts that validation produced no errors
pub fn assert_no_field_errors(errors: &FieldErrors) {
    assert!(errors.is_empty(), "Expected no field errors, got {:?}", errors);
}

/// Asserts that a value has at most two decimal places
pub fn assert_whole_cents(value: Decimal) {
    assert_eq!(
        value.round_dp(2),
        value,
        "Expected a value in whole cents, got {}",
        value
    );
}

/// Asserts the funding invariants for a result
///
/// - every component is in whole cents
/// - components sum to `total_fees`
/// - `funds_available` is the principal less `total_fees`
pub fn assert_funding_balances(result: &FundingResult, principal: Decimal) {
    let mut sum = Decimal::ZERO;
    for (name, value) in result.components() {
        assert!(
            value.round_dp(2) == value,
            "Component {} is not in whole cents: {}",
            name,
            value
        );
        sum += value;
    }

    assert_eq!(
        sum, result.total_fees,
        "Components sum to {} but total_fees is {}",
        sum, result.total_fees
    );
    assert_eq!(
        result.funds_available,
        principal - result.total_fees,
        "funds_available {} != principal {} - total_fees {}",
        result.funds_available,
        principal,
        result.total_fees
    );
}

/// Asserts that history records are ordered newest first
pub fn assert_newest_first(records: &[FundingCalculationHistory]) {
    for pair in records.windows(2) {
        assert!(
            pair[0].created_at >= pair[1].created_at,
            "History out of order: {} ({}) before {} ({})",
            pair[0].id,
            pair[0].created_at,
            pair[1].id,
            pair[1].created_at
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_field_error() {
        let errors = FieldErrors::new().with("abn", "Invalid ABN checksum");
        assert_field_error(&errors, "abn", "Invalid ABN checksum");
    }

    #[test]
    #[should_panic(expected = "Expected an error on 'acn'")]
    fn test_assert_field_error_missing() {
        assert_field_error(&FieldErrors::new(), "acn", "ACN is required");
    }

    #[test]
    fn test_assert_error_fields_is_order_insensitive() {
        let errors = FieldErrors::new().with("b", "x").with("a", "y");
        assert_error_fields(&errors, &["b", "a"]);
    }

    #[test]
    #[should_panic(expected = "whole cents")]
    fn test_assert_whole_cents_fails() {
        assert_whole_cents(dec!(1.005));
    }
}
