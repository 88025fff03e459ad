//! Comprehensive tests for domain_borrower

use proptest::prelude::*;
use serde_json::json;

use domain_borrower::business_numbers::acn_check_digit;
use domain_borrower::{
    is_valid_abn, is_valid_acn, validate_abn, validate_acn, validate_company_borrower,
    IdentifierError, IndividualBorrowerValidator,
};
use test_utils::{
    assert_error_fields, assert_field_error, assert_no_field_errors, valid_abn_strategy,
    valid_acn_strategy, BorrowerFixtures, CompanyBorrowerBuilder, IdentifierFixtures,
    IndividualBorrowerBuilder, TemporalFixtures,
};

// ============================================================================
// ABN / ACN Tests
// ============================================================================

mod identifier_tests {
    use super::*;

    #[test]
    fn test_abn_accepts_common_separators() {
        assert_eq!(validate_abn("51824753556").unwrap(), IdentifierFixtures::valid_abn());
        assert_eq!(validate_abn("51 824 753 556").unwrap(), IdentifierFixtures::valid_abn());
        assert_eq!(validate_abn("51-824-753-556").unwrap(), IdentifierFixtures::valid_abn());
    }

    #[test]
    fn test_abn_rejections_carry_messages() {
        assert_eq!(
            validate_abn(IdentifierFixtures::invalid_abn()).unwrap_err().to_string(),
            "Invalid ABN checksum"
        );
        assert_eq!(validate_abn("61824753556").unwrap_err().to_string(), "Invalid ABN checksum");
        assert_eq!(validate_abn("123").unwrap_err().to_string(), "ABN must be 11 digits");
    }

    #[test]
    fn test_acn_validation() {
        assert!(is_valid_acn(IdentifierFixtures::valid_acn()));
        assert!(is_valid_acn("004 085 616"));
        assert!(is_valid_acn("004-085-616"));
        assert_eq!(validate_acn(IdentifierFixtures::invalid_acn()), Err(IdentifierError::AcnChecksum));
        assert_eq!(validate_acn("104085616"), Err(IdentifierError::AcnChecksum));
        assert_eq!(validate_acn("12345").unwrap_err().to_string(), "ACN must be 9 digits");
    }

    proptest! {
        #[test]
        fn prop_generated_abns_are_valid(abn in valid_abn_strategy()) {
            prop_assert!(is_valid_abn(&abn));
            let spaced = format!("{} {} {} {}", &abn[..2], &abn[2..5], &abn[5..8], &abn[8..]);
            prop_assert_eq!(validate_abn(&spaced), Ok(abn));
        }

        #[test]
        fn prop_acn_check_digit_change_is_detected(acn in valid_acn_strategy(), bump in 1u32..10) {
            let digits: Vec<u8> = acn.bytes().map(|b| b - b'0').collect();
            let wrong = (acn_check_digit(&digits[..8]) + bump) % 10;
            let tampered = format!("{}{}", &acn[..8], wrong);
            prop_assert_eq!(validate_acn(&tampered), Err(IdentifierError::AcnChecksum));
        }

        #[test]
        fn prop_abn_never_panics(raw in ".{0,30}") {
            let _ = validate_abn(&raw);
            let _ = validate_acn(&raw);
        }
    }
}

// ============================================================================
// Company Borrower Tests
// ============================================================================

mod company_tests {
    use super::*;

    #[test]
    fn test_valid_company_has_no_errors() {
        assert_no_field_errors(&validate_company_borrower(&BorrowerFixtures::valid_company()));
        assert_no_field_errors(&validate_company_borrower(&CompanyBorrowerBuilder::new().build()));
    }

    #[test]
    fn test_invalid_company_reports_every_field() {
        let errors = validate_company_borrower(&BorrowerFixtures::invalid_company());
        assert_error_fields(
            &errors,
            &[
                "company_name",
                "abn",
                "acn",
                "business_type",
                "years_in_business",
                "registered_address.postal_code",
                "directors[0].first_name",
                "directors[0].email",
                "financial_info.annual_revenue",
                "financial_info.net_profit",
            ],
        );

        assert_field_error(&errors, "company_name", "Company Name is required");
        assert_field_error(&errors, "abn", "Invalid ABN checksum");
        assert_field_error(&errors, "acn", "Invalid ACN checksum");
        assert_field_error(&errors, "business_type", "Invalid business type");
        assert_field_error(&errors, "years_in_business", "Years in business must be a number");
        assert_field_error(
            &errors,
            "registered_address.postal_code",
            "Australian postal code must be 4 digits",
        );
        assert_field_error(&errors, "directors[0].first_name", "Director first name is required");
        assert_field_error(&errors, "directors[0].email", "Invalid email format");
        assert_field_error(&errors, "financial_info.annual_revenue", "Annual Revenue cannot be negative");
        assert_field_error(&errors, "financial_info.net_profit", "Net Profit must be a number");
    }

    #[test]
    fn test_missing_address_fields_are_nested() {
        let payload = CompanyBorrowerBuilder::new()
            .set("registered_address", json!({"street": "1 Main St", "country": "Australia"}))
            .build();

        let errors = validate_company_borrower(&payload);
        assert_error_fields(
            &errors,
            &[
                "registered_address.city",
                "registered_address.state",
                "registered_address.postal_code",
            ],
        );
        assert_field_error(&errors, "registered_address.city", "City is required");
        assert_field_error(&errors, "registered_address.postal_code", "Postal Code is required");
    }

    #[test]
    fn test_abn_length_message() {
        let payload = CompanyBorrowerBuilder::new().with_abn("5182475355").build();
        assert_field_error(&validate_company_borrower(&payload), "abn", "ABN must be 11 digits");
    }

    #[test]
    fn test_numeric_abn_is_checked_as_digits() {
        let payload = CompanyBorrowerBuilder::new()
            .set("abn", json!(51824753556u64))
            .build();
        assert_no_field_errors(&validate_company_borrower(&payload));
    }

    #[test]
    fn test_acn_is_required_and_checked() {
        let payload = CompanyBorrowerBuilder::new().without("acn").build();
        assert_error_fields(&validate_company_borrower(&payload), &["acn"]);

        let payload = CompanyBorrowerBuilder::new().with_acn(IdentifierFixtures::invalid_acn()).build();
        assert_field_error(&validate_company_borrower(&payload), "acn", "Invalid ACN checksum");
    }

    #[test]
    fn test_negative_years_in_business() {
        let payload = CompanyBorrowerBuilder::new().set("years_in_business", json!(-2)).build();
        assert_field_error(
            &validate_company_borrower(&payload),
            "years_in_business",
            "Years in business cannot be negative",
        );
    }

    #[test]
    fn test_address_and_financial_fields_are_checked() {
        let payload = CompanyBorrowerBuilder::new()
            .with_address_field("postal_code", json!("20000"))
            .with_financial_field("liabilities", json!(-1))
            .build();
        assert_error_fields(
            &validate_company_borrower(&payload),
            &["registered_address.postal_code", "financial_info.liabilities"],
        );
    }

    #[test]
    fn test_director_last_name_required() {
        let payload = CompanyBorrowerBuilder::new()
            .with_director(json!({"first_name": "Mary"}))
            .build();
        assert_error_fields(&validate_company_borrower(&payload), &["directors[1].last_name"]);
    }
}

// ============================================================================
// Individual Borrower Tests
// ============================================================================

mod individual_tests {
    use super::*;

    fn validate(payload: &serde_json::Value) -> core_kernel::FieldErrors {
        IndividualBorrowerValidator::validate_as_of(payload, TemporalFixtures::as_of())
    }

    #[test]
    fn test_valid_individual_has_no_errors() {
        assert_no_field_errors(&validate(&BorrowerFixtures::valid_individual()));
        assert_no_field_errors(&validate(&IndividualBorrowerBuilder::new().build()));
    }

    #[test]
    fn test_invalid_individual_collects_all_errors() {
        let payload = json!({
            "first_name": "  ",
            "email": "jane@",
            "phone": "12345",
            "residency_status": "tourist",
            "marital_status": "complicated",
            "employment_type": "gig",
            "annual_income": "lots",
            "monthly_expenses": -10,
            "employment_duration": -3,
            "assets": [{"asset_type": "yacht", "value": -1}],
            "liabilities": [{"liability_type": "mortgage", "monthly_payment": "x"}]
        });

        let errors = validate(&payload);
        assert_error_fields(
            &errors,
            &[
                "first_name",
                "last_name",
                "email",
                "phone",
                "residency_status",
                "marital_status",
                "employment_type",
                "annual_income",
                "monthly_expenses",
                "employment_duration",
                "assets[0].asset_type",
                "assets[0].value",
                "liabilities[0].amount",
                "liabilities[0].monthly_payment",
            ],
        );
        assert_field_error(&errors, "annual_income", "Annual Income must be a number");
        assert_field_error(&errors, "monthly_expenses", "Monthly Expenses cannot be negative");
    }

    #[test]
    fn test_eighteenth_birthday_is_old_enough() {
        let birthday = TemporalFixtures::eighteenth_birthday();
        let payload = IndividualBorrowerBuilder::new()
            .with_date_of_birth(&birthday.to_string())
            .build();
        assert_no_field_errors(&validate(&payload));

        let day_late = birthday.succ_opt().unwrap();
        let payload = IndividualBorrowerBuilder::new()
            .with_date_of_birth(&day_late.to_string())
            .build();
        assert_error_fields(&validate(&payload), &["date_of_birth"]);
    }

    #[test]
    fn test_phone_digit_bounds() {
        let check = |phone: &str| {
            let payload = IndividualBorrowerBuilder::new().with_phone(phone).build();
            validate(&payload).contains("phone")
        };
        assert!(!check("12345678"));
        assert!(!check("+61 412 345 678"));
        assert!(check("1234567"));
        assert!(check("1234567890123456"));
        assert!(check("0412-ABC-678"));
    }

    #[test]
    fn test_financial_rows_are_indexed() {
        let payload = IndividualBorrowerBuilder::new()
            .with_assets(json!([
                {"asset_type": "savings", "value": 1000},
                {"asset_type": "property", "value": "abc"}
            ]))
            .with_liabilities(json!([{"liability_type": "boat_loan", "amount": 10}]))
            .build();
        assert_error_fields(
            &validate(&payload),
            &["assets[1].value", "liabilities[0].liability_type"],
        );
    }

    #[test]
    fn test_optional_fields_may_be_omitted() {
        let payload = IndividualBorrowerBuilder::new()
            .without("phone")
            .without("assets")
            .without("other_income")
            .build();
        assert_no_field_errors(&validate(&payload));
    }

    #[test]
    fn test_non_object_payload() {
        let errors = validate(&json!("Jane"));
        assert!(errors.contains("non_field_errors"));
    }
}
