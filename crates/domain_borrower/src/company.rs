//! Company borrower validation
//!
//! Validates a company borrower payload as submitted by the application form.
//! Every rule runs regardless of earlier failures and the outcome is a flat
//! [`FieldErrors`] mapping; an empty mapping means the payload is acceptable.
//!
//! # Validation Rules
//!
//! ## Required fields
//! - `company_name`, `abn`, `acn`, `business_type`, `industry`
//!
//! ## Identifiers
//! - `abn` passes the modulus-89 checksum
//! - `acn` check digit matches
//!
//! ## Business details
//! - `business_type` is one of the known business structures
//! - `years_in_business` is a non-negative number
//!
//! ## Financial information
//! - `annual_revenue`, `net_profit`, `assets`, `liabilities` are numbers
//! - all but `net_profit` are non-negative
//!
//! ## Registered address
//! - street, city, state, postal code and country are required
//! - Australian postal codes have exactly four digits
//!
//! ## Directors
//! - first and last name required, email well formed when given

use std::fmt;
use std::str::FromStr;

use core_kernel::json::{decimal_from, is_blank, text_from};
use core_kernel::validation::{field_label, indexed};
use core_kernel::FieldErrors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::business_numbers::{validate_abn, validate_acn};
use crate::error::IdentifierError;
use crate::rules::{is_australia, is_australian_postal_code, is_valid_email};

/// Key used for errors that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const REQUIRED_FIELDS: [&str; 5] = ["company_name", "abn", "acn", "business_type", "industry"];
const FINANCIAL_FIELDS: [&str; 4] = ["annual_revenue", "net_profit", "assets", "liabilities"];
const ADDRESS_FIELDS: [&str; 5] = ["street", "city", "state", "postal_code", "country"];

/// Legal structure of a company borrower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    SoleProprietorship,
    Partnership,
    PtyLtd,
    PublicCompany,
    Trust,
    NonProfit,
}

impl BusinessType {
    /// All business types in display order
    pub const ALL: [BusinessType; 6] = [
        BusinessType::SoleProprietorship,
        BusinessType::Partnership,
        BusinessType::PtyLtd,
        BusinessType::PublicCompany,
        BusinessType::Trust,
        BusinessType::NonProfit,
    ];

    /// Wire code of the business type
    pub fn code(&self) -> &'static str {
        match self {
            BusinessType::SoleProprietorship => "sole_proprietorship",
            BusinessType::Partnership => "partnership",
            BusinessType::PtyLtd => "pty_ltd",
            BusinessType::PublicCompany => "public_company",
            BusinessType::Trust => "trust",
            BusinessType::NonProfit => "non_profit",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BusinessType::ALL
            .into_iter()
            .find(|business_type| business_type.code() == s)
            .ok_or_else(|| format!("unknown business type: {}", s))
    }
}

/// Validates a company borrower payload
///
/// Shorthand for [`CompanyBorrowerValidator::validate`].
pub fn validate_company_borrower(payload: &Value) -> FieldErrors {
    CompanyBorrowerValidator::validate(payload)
}

/// Validator for company borrower payloads
///
/// # Examples
///
/// ```rust
/// use domain_borrower::company::CompanyBorrowerValidator;
/// use serde_json::json;
///
/// let errors = CompanyBorrowerValidator::validate(&json!({"company_name": "Acme"}));
/// assert!(errors.contains("abn"));
/// assert!(!errors.contains("company_name"));
/// ```
pub struct CompanyBorrowerValidator;

impl CompanyBorrowerValidator {
    /// Runs every company rule and returns the collected field errors
    pub fn validate(payload: &Value) -> FieldErrors {
        let mut errors = FieldErrors::new();

        let Some(company) = payload.as_object() else {
            errors.add(NON_FIELD_ERRORS, "Company borrower data must be an object");
            return errors;
        };

        Self::validate_required_fields(company, &mut errors);
        Self::validate_identifiers(company, &mut errors);
        Self::validate_business_details(company, &mut errors);
        Self::validate_financial_info(company, &mut errors);
        Self::validate_address(company, &mut errors);
        Self::validate_directors(company, &mut errors);

        if !errors.is_empty() {
            debug!(error_count = errors.len(), "Company borrower failed validation");
        }
        errors
    }

    fn validate_required_fields(company: &Map<String, Value>, errors: &mut FieldErrors) {
        for field in REQUIRED_FIELDS {
            if is_blank(company.get(field)) {
                errors.add(field, format!("{} is required", field_label(field)));
            }
        }
    }

    fn validate_identifiers(company: &Map<String, Value>, errors: &mut FieldErrors) {
        if let Some(abn) = company.get("abn").filter(|v| !is_blank(Some(v))) {
            let outcome = text_from(abn)
                .ok_or(IdentifierError::AbnLength)
                .and_then(|raw| validate_abn(&raw));
            if let Err(e) = outcome {
                errors.add("abn", e.to_string());
            }
        }

        if let Some(acn) = company.get("acn").filter(|v| !is_blank(Some(v))) {
            let outcome = text_from(acn)
                .ok_or(IdentifierError::AcnLength)
                .and_then(|raw| validate_acn(&raw));
            if let Err(e) = outcome {
                errors.add("acn", e.to_string());
            }
        }
    }

    fn validate_business_details(company: &Map<String, Value>, errors: &mut FieldErrors) {
        if let Some(business_type) = company.get("business_type").filter(|v| !is_blank(Some(v))) {
            let known = business_type
                .as_str()
                .map(|code| code.parse::<BusinessType>().is_ok())
                .unwrap_or(false);
            if !known {
                errors.add("business_type", "Invalid business type");
            }
        }

        if let Some(years) = company.get("years_in_business").filter(|v| !is_blank(Some(v))) {
            match decimal_from(years) {
                Ok(years) if years < Decimal::ZERO => {
                    errors.add("years_in_business", "Years in business cannot be negative");
                }
                Ok(_) => {}
                Err(_) => errors.add("years_in_business", "Years in business must be a number"),
            }
        }
    }

    fn validate_financial_info(company: &Map<String, Value>, errors: &mut FieldErrors) {
        let Some(info) = company.get("financial_info") else {
            return;
        };
        let Some(info) = info.as_object() else {
            if !info.is_null() {
                errors.add("financial_info", "Financial Info must be an object");
            }
            return;
        };

        let mut nested = FieldErrors::new();
        for field in FINANCIAL_FIELDS {
            let Some(value) = info.get(field).filter(|v| !is_blank(Some(v))) else {
                continue;
            };
            match decimal_from(value) {
                // Net profit may legitimately be a loss
                Ok(amount) if field != "net_profit" && amount < Decimal::ZERO => {
                    nested.add(field, format!("{} cannot be negative", field_label(field)));
                }
                Ok(_) => {}
                Err(_) => nested.add(field, format!("{} must be a number", field_label(field))),
            }
        }
        errors.merge_nested("financial_info", nested);
    }

    fn validate_address(company: &Map<String, Value>, errors: &mut FieldErrors) {
        let Some(address) = company.get("registered_address") else {
            return;
        };
        let Some(address) = address.as_object() else {
            if !address.is_null() {
                errors.add("registered_address", "Registered Address must be an object");
            }
            return;
        };

        let mut nested = FieldErrors::new();
        for field in ADDRESS_FIELDS {
            if is_blank(address.get(field)) {
                nested.add(field, format!("{} is required", field_label(field)));
            }
        }

        let in_australia = address
            .get("country")
            .and_then(Value::as_str)
            .map(is_australia)
            .unwrap_or(false);
        if in_australia {
            if let Some(code) = address.get("postal_code").filter(|v| !is_blank(Some(v))) {
                let valid = text_from(code)
                    .map(|code| is_australian_postal_code(&code))
                    .unwrap_or(false);
                if !valid {
                    nested.add("postal_code", "Australian postal code must be 4 digits");
                }
            }
        }
        errors.merge_nested("registered_address", nested);
    }

    fn validate_directors(company: &Map<String, Value>, errors: &mut FieldErrors) {
        let Some(directors) = company.get("directors").filter(|v| !is_blank(Some(v))) else {
            return;
        };
        let Some(directors) = directors.as_array() else {
            errors.add("directors", "Directors must be a list");
            return;
        };

        for (index, director) in directors.iter().enumerate() {
            let path = indexed("directors", index);
            let Some(director) = director.as_object() else {
                errors.add(path, "Director details must be an object");
                continue;
            };

            let mut nested = FieldErrors::new();
            if is_blank(director.get("first_name")) {
                nested.add("first_name", "Director first name is required");
            }
            if is_blank(director.get("last_name")) {
                nested.add("last_name", "Director last name is required");
            }
            if let Some(email) = director.get("email").filter(|v| !is_blank(Some(v))) {
                if !email.as_str().map(is_valid_email).unwrap_or(false) {
                    nested.add("email", "Invalid email format");
                }
            }
            errors.merge_nested(&path, nested);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_business_type_codes() {
        for business_type in BusinessType::ALL {
            assert_eq!(business_type.code().parse::<BusinessType>(), Ok(business_type));
        }
        assert!("llc".parse::<BusinessType>().is_err());
    }

    #[test]
    fn test_non_object_payload() {
        let errors = validate_company_borrower(&json!(["not", "a", "company"]));
        assert_eq!(errors.get(NON_FIELD_ERRORS), Some("Company borrower data must be an object"));
    }

    #[test]
    fn test_required_messages_use_title_case() {
        let errors = validate_company_borrower(&json!({}));
        assert_eq!(errors.get("company_name"), Some("Company Name is required"));
        assert_eq!(errors.get("business_type"), Some("Business Type is required"));
        assert_eq!(errors.get("abn"), Some("Abn is required"));
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn test_net_profit_may_be_negative() {
        let errors = validate_company_borrower(&json!({
            "financial_info": {"net_profit": -5000, "liabilities": "-1"}
        }));
        assert!(!errors.contains("financial_info.net_profit"));
        assert_eq!(
            errors.get("financial_info.liabilities"),
            Some("Liabilities cannot be negative")
        );
    }

    #[test]
    fn test_postal_code_only_checked_for_australia() {
        let errors = validate_company_borrower(&json!({
            "registered_address": {
                "street": "1 Queen St", "city": "Auckland", "state": "AUK",
                "postal_code": "10100", "country": "New Zealand"
            }
        }));
        assert!(!errors.contains("registered_address.postal_code"));
    }

    #[test]
    fn test_numeric_postal_code_is_read_as_text() {
        let errors = validate_company_borrower(&json!({
            "registered_address": {
                "street": "1 George St", "city": "Sydney", "state": "NSW",
                "postal_code": 2000, "country": "Australia"
            }
        }));
        assert!(!errors.contains("registered_address.postal_code"));
    }
}
