//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for the funding and borrower domains.
//! These fixtures are consistent and predictable, and the expected outcomes
//! below were worked out by hand.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_funding::LoanApplication;

/// Fixture for funding calculation data
pub struct FundingFixtures;

impl FundingFixtures {
    /// Reference number of the reference application
    pub fn reference_number() -> &'static str {
        "APP-2024-0001"
    }

    /// 1,000,000 over 12 months at 8% per annum
    pub fn reference_application() -> LoanApplication {
        LoanApplication::new(Self::reference_number()).with_loan(dec!(1000000), 12, dec!(8))
    }

    /// Application with no loan terms captured yet
    pub fn application_without_terms() -> LoanApplication {
        LoanApplication::new("APP-2024-0002")
    }

    /// Manual inputs matching [`Self::reference_application`]
    pub fn reference_payload() -> Value {
        json!({
            "establishment_fee_rate": 2.5,
            "capped_interest_months": 9,
            "monthly_line_fee_rate": 0.5,
            "brokerage_fee_rate": 1.0,
            "application_fee": 500,
            "due_diligence_fee": 1000,
            "legal_fee_before_gst": 2000,
            "valuation_fee": 1500,
            "monthly_account_fee": 50,
            "working_fee": 0
        })
    }

    /// Expected `total_fees` for the reference case
    ///
    /// 25000 establishment + 60000 interest + 45000 line + 10000 brokerage
    /// + 2200 legal + 500 + 1000 + 1500 + 450 account fees.
    pub fn reference_total_fees() -> Decimal {
        dec!(145650)
    }

    /// Expected `funds_available` for the reference case
    pub fn reference_funds_available() -> Decimal {
        dec!(854350)
    }

    /// A well-formed loan extension request
    pub fn extension_payload() -> Value {
        json!({
            "new_rate": 9.25,
            "new_loan_amount": 1100000,
            "new_repayment": 8500
        })
    }
}

/// Fixture for borrower payloads
pub struct BorrowerFixtures;

impl BorrowerFixtures {
    /// A company borrower that passes every rule
    pub fn valid_company() -> Value {
        json!({
            "company_name": "Test Company Pty Ltd",
            "abn": IdentifierFixtures::valid_abn(),
            "acn": IdentifierFixtures::valid_acn(),
            "business_type": "pty_ltd",
            "industry": "Technology",
            "years_in_business": 5,
            "financial_info": {
                "annual_revenue": 1000000,
                "net_profit": 200000,
                "assets": 500000,
                "liabilities": 300000
            },
            "registered_address": {
                "street": "123 Business St",
                "city": "Sydney",
                "state": "NSW",
                "postal_code": "2000",
                "country": "Australia"
            },
            "directors": [
                {"first_name": "John", "last_name": "Doe", "email": "john.doe@example.com"}
            ]
        })
    }

    /// A company borrower with ten distinct problems
    pub fn invalid_company() -> Value {
        json!({
            "abn": "12345678901",
            "acn": "123456789",
            "business_type": "invalid_type",
            "industry": "Technology",
            "years_in_business": "not_a_number",
            "financial_info": {
                "annual_revenue": -1000,
                "net_profit": "not_a_number"
            },
            "registered_address": {
                "street": "123 Business St",
                "city": "Sydney",
                "state": "NSW",
                "postal_code": "invalid",
                "country": "Australia"
            },
            "directors": [
                {"first_name": "", "last_name": "Doe", "email": "invalid-email"}
            ]
        })
    }

    /// An individual borrower that passes every rule on [`TemporalFixtures::as_of`]
    pub fn valid_individual() -> Value {
        json!({
            "first_name": "Jane",
            "last_name": "Citizen",
            "email": "jane.citizen@example.com.au",
            "phone": "0412 345 678",
            "date_of_birth": "1985-03-14",
            "residency_status": "citizen",
            "marital_status": "married",
            "employment_type": "full_time",
            "employment_duration": 36,
            "annual_income": "95000.00",
            "other_income": 0,
            "monthly_expenses": 2800,
            "assets": [{"asset_type": "property", "value": 650000}],
            "liabilities": [{"liability_type": "mortgage", "amount": 420000, "monthly_payment": 2300}]
        })
    }
}

/// Fixture for Australian business identifiers
pub struct IdentifierFixtures;

impl IdentifierFixtures {
    /// ABN with a valid modulus-89 checksum
    pub fn valid_abn() -> &'static str {
        "51824753556"
    }

    /// ACN with a valid check digit
    pub fn valid_acn() -> &'static str {
        "004085616"
    }

    /// Eleven digits failing the ABN checksum
    pub fn invalid_abn() -> &'static str {
        "12345678901"
    }

    /// Nine digits failing the ACN check digit
    pub fn invalid_acn() -> &'static str {
        "123456789"
    }
}

/// Fixture for dates used by age checks
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Fixed "today" for individual borrower validation
    pub fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// A birthday that turns 18 exactly on [`Self::as_of`]
    pub fn eighteenth_birthday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2007, 1, 1).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_totals_balance() {
        let application = FundingFixtures::reference_application();
        assert_eq!(
            FundingFixtures::reference_total_fees() + FundingFixtures::reference_funds_available(),
            application.loan_amount.unwrap()
        );
    }

    #[test]
    fn test_identifier_fixtures() {
        assert!(domain_borrower::is_valid_abn(IdentifierFixtures::valid_abn()));
        assert!(domain_borrower::is_valid_acn(IdentifierFixtures::valid_acn()));
        assert!(!domain_borrower::is_valid_abn(IdentifierFixtures::invalid_abn()));
        assert!(!domain_borrower::is_valid_acn(IdentifierFixtures::invalid_acn()));
    }
}
