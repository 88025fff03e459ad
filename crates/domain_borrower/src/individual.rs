//! Individual borrower validation
//!
//! Applies the same collect-everything approach as the company validator to
//! personal borrower details, employment, and the borrower's assets and
//! liabilities.

use chrono::{Datelike, NaiveDate, Utc};
use core_kernel::json::{decimal_from, is_blank, whole_number_from, NumberError};
use core_kernel::validation::{field_label, indexed};
use core_kernel::{FieldErrors, MAX_AMOUNT};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

use crate::choices::{AssetType, EmploymentType, LiabilityType, MaritalStatus, ResidencyStatus};
use crate::company::NON_FIELD_ERRORS;
use crate::rules::{is_valid_email, phone_digit_count};

/// Minimum age of an individual borrower in whole years
pub const MINIMUM_BORROWER_AGE: u32 = 18;

/// Allowed number of digits in a phone number
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 8..=15;

const REQUIRED_FIELDS: [&str; 2] = ["first_name", "last_name"];
const MONEY_FIELDS: [&str; 3] = ["annual_income", "other_income", "monthly_expenses"];

/// Validates an individual borrower payload against today's date
pub fn validate_individual_borrower(payload: &Value) -> FieldErrors {
    IndividualBorrowerValidator::validate(payload)
}

/// Validator for individual borrower payloads
pub struct IndividualBorrowerValidator;

impl IndividualBorrowerValidator {
    /// Runs every rule using the current UTC date for age checks
    pub fn validate(payload: &Value) -> FieldErrors {
        Self::validate_as_of(payload, Utc::now().date_naive())
    }

    /// Runs every rule with an explicit reference date
    pub fn validate_as_of(payload: &Value, today: NaiveDate) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let Some(borrower) = payload.as_object() else {
            errors.add(NON_FIELD_ERRORS, "Borrower data must be an object");
            return errors;
        };

        Self::validate_personal(borrower, today, &mut errors);
        Self::validate_status_fields(borrower, &mut errors);
        Self::validate_income(borrower, &mut errors);
        Self::validate_assets(borrower, &mut errors);
        Self::validate_liabilities(borrower, &mut errors);

        if !errors.is_empty() {
            debug!(error_count = errors.len(), "Individual borrower failed validation");
        }
        errors
    }

    /// Runs only the income, asset and liability rules
    ///
    /// Used when a payload carries a borrower's financial position without
    /// personal details.
    pub fn validate_financials(payload: &Value) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match payload.as_object() {
            Some(borrower) => {
                Self::validate_income(borrower, &mut errors);
                Self::validate_assets(borrower, &mut errors);
                Self::validate_liabilities(borrower, &mut errors);
            }
            None => errors.add(NON_FIELD_ERRORS, "Borrower data must be an object"),
        }
        errors
    }

    fn validate_personal(borrower: &Map<String, Value>, today: NaiveDate, errors: &mut FieldErrors) {
        for field in REQUIRED_FIELDS {
            if is_blank(borrower.get(field)) {
                errors.add(field, format!("{} is required", field_label(field)));
            }
        }

        if let Some(email) = present(borrower, "email") {
            if !email.as_str().map(is_valid_email).unwrap_or(false) {
                errors.add("email", "Invalid email format");
            }
        }

        if let Some(phone) = present(borrower, "phone") {
            let digits = phone.as_str().and_then(phone_digit_count);
            if !digits.map(|n| PHONE_DIGITS.contains(&n)).unwrap_or(false) {
                errors.add("phone", "Phone number must contain between 8 and 15 digits");
            }
        }

        if let Some(dob) = present(borrower, "date_of_birth") {
            let parsed = dob
                .as_str()
                .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok());
            match parsed {
                None => errors.add("date_of_birth", "Date of birth must be a valid date (YYYY-MM-DD)"),
                Some(dob) if dob > today => {
                    errors.add("date_of_birth", "Date of birth cannot be in the future");
                }
                Some(dob) if age_on(dob, today) < MINIMUM_BORROWER_AGE => {
                    errors.add(
                        "date_of_birth",
                        format!("Borrower must be at least {} years old", MINIMUM_BORROWER_AGE),
                    );
                }
                Some(_) => {}
            }
        }
    }

    fn validate_status_fields(borrower: &Map<String, Value>, errors: &mut FieldErrors) {
        check_choice::<ResidencyStatus>(borrower, "residency_status", "Invalid residency status", errors);
        check_choice::<MaritalStatus>(borrower, "marital_status", "Invalid marital status", errors);
        check_choice::<EmploymentType>(borrower, "employment_type", "Invalid employment type", errors);
    }

    fn validate_income(borrower: &Map<String, Value>, errors: &mut FieldErrors) {
        for field in MONEY_FIELDS {
            if let Some(value) = present(borrower, field) {
                if let Some(message) = non_negative_amount(field, value) {
                    errors.add(field, message);
                }
            }
        }

        if let Some(duration) = present(borrower, "employment_duration") {
            match whole_number_from(duration) {
                Ok(months) if months < 0 => {
                    errors.add("employment_duration", "Employment Duration cannot be negative");
                }
                Ok(_) => {}
                Err(NumberError::NotWholeNumber) => {
                    errors.add("employment_duration", "Employment Duration must be a whole number of months");
                }
                Err(_) => errors.add("employment_duration", "Employment Duration must be a number"),
            }
        }
    }

    fn validate_assets(borrower: &Map<String, Value>, errors: &mut FieldErrors) {
        let Some(assets) = list_field(borrower, "assets", errors) else {
            return;
        };

        for (index, asset) in assets.iter().enumerate() {
            let path = indexed("assets", index);
            let Some(asset) = asset.as_object() else {
                errors.add(path, "Asset details must be an object");
                continue;
            };

            let mut nested = FieldErrors::new();
            check_choice::<AssetType>(asset, "asset_type", "Invalid asset type", &mut nested);
            if let Some(value) = present(asset, "value") {
                if let Some(message) = non_negative_amount("value", value) {
                    nested.add("value", message);
                }
            }
            errors.merge_nested(&path, nested);
        }
    }

    fn validate_liabilities(borrower: &Map<String, Value>, errors: &mut FieldErrors) {
        let Some(liabilities) = list_field(borrower, "liabilities", errors) else {
            return;
        };

        for (index, liability) in liabilities.iter().enumerate() {
            let path = indexed("liabilities", index);
            let Some(liability) = liability.as_object() else {
                errors.add(path, "Liability details must be an object");
                continue;
            };

            let mut nested = FieldErrors::new();
            match present(liability, "liability_type") {
                Some(_) => {
                    check_choice::<LiabilityType>(liability, "liability_type", "Invalid liability type", &mut nested);
                }
                None => nested.add("liability_type", "Liability Type is required"),
            }
            match present(liability, "amount") {
                Some(amount) => {
                    if let Some(message) = non_negative_amount("amount", amount) {
                        nested.add("amount", message);
                    }
                }
                None => nested.add("amount", "Amount is required"),
            }
            if let Some(payment) = present(liability, "monthly_payment") {
                if let Some(message) = non_negative_amount("monthly_payment", payment) {
                    nested.add("monthly_payment", message);
                }
            }
            errors.merge_nested(&path, nested);
        }
    }
}

/// Whole years between `dob` and `today`
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

/// Returns the field value unless it is missing, null, or an empty string
///
/// Zero is a meaningful amount here, unlike in the required-field checks.
pub(crate) fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|value| match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

fn list_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<&'a Vec<Value>> {
    let value = present(object, field)?;
    match value.as_array() {
        Some(items) => Some(items),
        None => {
            errors.add(field, format!("{} must be a list", field_label(field)));
            None
        }
    }
}

fn check_choice<T: FromStr>(
    object: &Map<String, Value>,
    field: &str,
    message: &str,
    errors: &mut FieldErrors,
) {
    if let Some(value) = present(object, field) {
        let known = value.as_str().map(|code| T::from_str(code).is_ok()).unwrap_or(false);
        if !known {
            errors.add(field, message);
        }
    }
}

fn non_negative_amount(field: &str, value: &Value) -> Option<String> {
    match decimal_from(value) {
        Ok(amount) if amount < Decimal::ZERO => Some(format!("{} cannot be negative", field_label(field))),
        Ok(amount) if amount > MAX_AMOUNT => Some(format!("{} cannot exceed {}", field_label(field), MAX_AMOUNT)),
        Ok(_) => None,
        Err(_) => Some(format!("{} must be a number", field_label(field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let dob = NaiveDate::from_ymd_opt(2006, 6, 15).unwrap();
        assert_eq!(age_on(dob, today()), 18);
        let dob = NaiveDate::from_ymd_opt(2006, 6, 16).unwrap();
        assert_eq!(age_on(dob, today()), 17);
    }

    #[test]
    fn test_minimal_valid_borrower() {
        let errors = IndividualBorrowerValidator::validate_as_of(
            &json!({"first_name": "Jane", "last_name": "Citizen"}),
            today(),
        );
        assert!(errors.is_empty(), "unexpected errors: {}", errors);
    }

    #[test]
    fn test_date_of_birth_rules() {
        let check = |dob: &str| {
            IndividualBorrowerValidator::validate_as_of(
                &json!({"first_name": "Jane", "last_name": "Citizen", "date_of_birth": dob}),
                today(),
            )
            .get("date_of_birth")
            .map(str::to_string)
        };
        assert_eq!(check("1980-01-31"), None);
        assert_eq!(check("2030-01-01").as_deref(), Some("Date of birth cannot be in the future"));
        assert_eq!(check("2010-01-01").as_deref(), Some("Borrower must be at least 18 years old"));
        assert_eq!(
            check("31/01/1980").as_deref(),
            Some("Date of birth must be a valid date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn test_zero_amounts_are_accepted() {
        let errors = IndividualBorrowerValidator::validate_as_of(
            &json!({
                "first_name": "Jane", "last_name": "Citizen",
                "other_income": 0,
                "liabilities": [{"liability_type": "credit_card", "amount": 0, "monthly_payment": 0}]
            }),
            today(),
        );
        assert!(errors.is_empty(), "unexpected errors: {}", errors);
    }

    #[test]
    fn test_amounts_are_bounded() {
        let errors = IndividualBorrowerValidator::validate_financials(&json!({
            "annual_income": "79228162514264337593543950335",
            "assets": [{"asset_type": "property", "value": "10000000000000"}]
        }));
        assert_eq!(errors.get("annual_income"), Some("Annual Income cannot exceed 9999999999999.99"));
        assert_eq!(errors.get("assets[0].value"), Some("Value cannot exceed 9999999999999.99"));
    }

    #[test]
    fn test_employment_duration_must_be_whole() {
        let errors = IndividualBorrowerValidator::validate_as_of(
            &json!({"first_name": "Jane", "last_name": "Citizen", "employment_duration": 6.5}),
            today(),
        );
        assert_eq!(
            errors.get("employment_duration"),
            Some("Employment Duration must be a whole number of months")
        );
    }
}
