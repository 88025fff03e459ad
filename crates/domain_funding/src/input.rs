//! Funding calculation inputs
//!
//! Two sources feed a calculation: the loan terms stored on the application
//! and the manual fee parameters submitted by the user. Both are validated in
//! full before any arithmetic so that every problem is reported together.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use core_kernel::json::{decimal_from, whole_number_from, NumberError};
use core_kernel::validation::field_label;
use core_kernel::{FieldErrors, MAX_AMOUNT, MAX_RATE_PERCENT};

use crate::application::LoanApplication;

/// Key for errors about the payload as a whole
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Loan principal, term and rate taken from the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Principal in dollars
    pub loan_amount: Decimal,
    /// Term in months
    pub loan_term: u32,
    /// Annual interest rate as a percentage
    pub interest_rate: Decimal,
}

impl LoanTerms {
    /// Reads the loan terms from an application
    ///
    /// Each missing or negative value is reported under its own field name.
    pub fn from_application(application: &LoanApplication) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let loan_amount = required_on_application(application.loan_amount, "loan_amount", &mut errors);
        let interest_rate = required_on_application(application.interest_rate, "interest_rate", &mut errors);
        if application.loan_term.is_none() {
            errors.add("loan_term", "Loan term is required to calculate funding");
        }

        match (loan_amount, application.loan_term, interest_rate) {
            (Some(loan_amount), Some(loan_term), Some(interest_rate)) if errors.is_empty() => Ok(Self {
                loan_amount,
                loan_term,
                interest_rate,
            }),
            _ => Err(errors),
        }
    }
}

fn required_on_application(value: Option<Decimal>, field: &str, errors: &mut FieldErrors) -> Option<Decimal> {
    match value {
        None => {
            errors.add(field, format!("{} is required to calculate funding", sentence_label(field)));
            None
        }
        Some(v) if v < Decimal::ZERO => {
            errors.add(field, format!("{} cannot be negative", field_label(field)));
            None
        }
        Some(v) => Some(v),
    }
}

fn sentence_label(field: &str) -> String {
    let label = field.replace('_', " ");
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => label,
    }
}

/// Manually supplied fee and rate parameters
///
/// Rates are percentages (`2.5` means 2.5%). Fees are dollar amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingCalculationInput {
    pub establishment_fee_rate: Decimal,
    pub capped_interest_months: u32,
    pub monthly_line_fee_rate: Decimal,
    pub brokerage_fee_rate: Decimal,
    pub application_fee: Decimal,
    pub due_diligence_fee: Decimal,
    pub legal_fee_before_gst: Decimal,
    pub valuation_fee: Decimal,
    pub monthly_account_fee: Decimal,
    #[serde(default)]
    pub working_fee: Decimal,
}

impl FundingCalculationInput {
    /// Parses and validates the manual inputs from a JSON payload
    ///
    /// Numbers may arrive as JSON numbers or numeric strings.
    pub fn from_json(payload: &Value) -> Result<Self, FieldErrors> {
        let Some(fields) = payload.as_object() else {
            return Err(FieldErrors::new().with(NON_FIELD_ERRORS, "Funding input must be an object"));
        };

        let mut errors = FieldErrors::new();
        let mut rate = |field: &str| read_amount(fields, field, true, MAX_RATE_PERCENT, &mut errors);
        let establishment_fee_rate = rate("establishment_fee_rate");
        let monthly_line_fee_rate = rate("monthly_line_fee_rate");
        let brokerage_fee_rate = rate("brokerage_fee_rate");

        let capped_interest_months = read_months(fields, &mut errors);
        let application_fee = read_amount(fields, "application_fee", true, MAX_AMOUNT, &mut errors);
        let due_diligence_fee = read_amount(fields, "due_diligence_fee", true, MAX_AMOUNT, &mut errors);
        let legal_fee_before_gst = read_amount(fields, "legal_fee_before_gst", true, MAX_AMOUNT, &mut errors);
        let valuation_fee = read_amount(fields, "valuation_fee", true, MAX_AMOUNT, &mut errors);
        let monthly_account_fee = read_amount(fields, "monthly_account_fee", true, MAX_AMOUNT, &mut errors);
        let working_fee = read_amount(fields, "working_fee", false, MAX_AMOUNT, &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        // Every required field is Some once no errors were recorded
        Ok(Self {
            establishment_fee_rate: establishment_fee_rate.unwrap_or_default(),
            capped_interest_months: capped_interest_months.unwrap_or_default(),
            monthly_line_fee_rate: monthly_line_fee_rate.unwrap_or_default(),
            brokerage_fee_rate: brokerage_fee_rate.unwrap_or_default(),
            application_fee: application_fee.unwrap_or_default(),
            due_diligence_fee: due_diligence_fee.unwrap_or_default(),
            legal_fee_before_gst: legal_fee_before_gst.unwrap_or_default(),
            valuation_fee: valuation_fee.unwrap_or_default(),
            monthly_account_fee: monthly_account_fee.unwrap_or_default(),
            working_fee: working_fee.unwrap_or_default(),
        })
    }

    /// Checks the inputs against the loan they apply to
    pub fn check_against(&self, terms: &LoanTerms) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.capped_interest_months > terms.loan_term {
            errors.add(
                "capped_interest_months",
                format!(
                    "Capped interest months cannot exceed the loan term of {} months",
                    terms.loan_term
                ),
            );
        }
        errors.into_result(())
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

fn read_amount(
    fields: &Map<String, Value>,
    field: &str,
    required: bool,
    max: Decimal,
    errors: &mut FieldErrors,
) -> Option<Decimal> {
    let value = fields.get(field);
    if is_missing(value) {
        if required {
            errors.add(field, format!("{} is required", field_label(field)));
        }
        return None;
    }

    match value.map(decimal_from) {
        Some(Ok(amount)) if amount < Decimal::ZERO => {
            errors.add(field, format!("{} cannot be negative", field_label(field)));
            None
        }
        Some(Ok(amount)) if amount > max => {
            errors.add(field, format!("{} cannot exceed {}", field_label(field), max));
            None
        }
        Some(Ok(amount)) => Some(amount),
        _ => {
            errors.add(field, format!("{} must be a number", field_label(field)));
            None
        }
    }
}

fn read_months(fields: &Map<String, Value>, errors: &mut FieldErrors) -> Option<u32> {
    const FIELD: &str = "capped_interest_months";
    let value = fields.get(FIELD);
    let Some(value) = value.filter(|v| !is_missing(Some(v))) else {
        errors.add(FIELD, "Capped Interest Months is required");
        return None;
    };

    match whole_number_from(value) {
        Ok(months) if months < 0 => {
            errors.add(FIELD, "Capped Interest Months cannot be negative");
            None
        }
        Ok(months) => match u32::try_from(months) {
            Ok(months) => Some(months),
            Err(_) => {
                errors.add(FIELD, "Capped Interest Months is out of range");
                None
            }
        },
        Err(NumberError::NotWholeNumber) => {
            errors.add(FIELD, "Capped Interest Months must be a whole number");
            None
        }
        Err(NumberError::OutOfRange) => {
            errors.add(FIELD, "Capped Interest Months is out of range");
            None
        }
        Err(NumberError::NotANumber) => {
            errors.add(FIELD, "Capped Interest Months must be a number");
            None
        }
    }
}

/// Loan terms and manual inputs as recorded with each calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    #[serde(flatten)]
    pub terms: LoanTerms,
    #[serde(flatten)]
    pub fees: FundingCalculationInput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "establishment_fee_rate": 2.5,
            "capped_interest_months": 9,
            "monthly_line_fee_rate": "0.5",
            "brokerage_fee_rate": 1.0,
            "application_fee": 500,
            "due_diligence_fee": 1000,
            "legal_fee_before_gst": 2000,
            "valuation_fee": 1500,
            "monthly_account_fee": 50
        })
    }

    #[test]
    fn test_parses_numbers_and_strings() {
        let input = FundingCalculationInput::from_json(&payload()).unwrap();
        assert_eq!(input.monthly_line_fee_rate, dec!(0.5));
        assert_eq!(input.capped_interest_months, 9);
        assert_eq!(input.working_fee, Decimal::ZERO);
    }

    #[test]
    fn test_reports_every_bad_field() {
        let mut bad = payload();
        bad["establishment_fee_rate"] = json!("abc");
        bad["application_fee"] = json!(-1);
        bad["capped_interest_months"] = json!(2.5);
        bad.as_object_mut().unwrap().remove("valuation_fee");

        let errors = FundingCalculationInput::from_json(&bad).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("establishment_fee_rate"), Some("Establishment Fee Rate must be a number"));
        assert_eq!(errors.get("application_fee"), Some("Application Fee cannot be negative"));
        assert_eq!(
            errors.get("capped_interest_months"),
            Some("Capped Interest Months must be a whole number")
        );
        assert_eq!(errors.get("valuation_fee"), Some("Valuation Fee is required"));
    }

    #[test]
    fn test_amounts_and_rates_are_bounded() {
        let mut large = payload();
        large["monthly_account_fee"] = json!("79228162514264337593543950335");
        large["brokerage_fee_rate"] = json!(100.01);
        large["establishment_fee_rate"] = json!(100);

        let errors = FundingCalculationInput::from_json(&large).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get("monthly_account_fee"),
            Some("Monthly Account Fee cannot exceed 9999999999999.99")
        );
        assert_eq!(errors.get("brokerage_fee_rate"), Some("Brokerage Fee Rate cannot exceed 100"));
    }

    #[test]
    fn test_zero_fees_are_allowed() {
        let mut zero = payload();
        zero["application_fee"] = json!(0);
        zero["working_fee"] = json!("0");
        assert!(FundingCalculationInput::from_json(&zero).is_ok());
    }

    #[test]
    fn test_missing_loan_terms_are_keyed_by_field() {
        let application = LoanApplication::new("APP-1");
        let errors = LoanTerms::from_application(&application).unwrap_err();
        assert_eq!(errors.get("loan_amount"), Some("Loan amount is required to calculate funding"));
        assert_eq!(errors.get("loan_term"), Some("Loan term is required to calculate funding"));
        assert_eq!(errors.get("interest_rate"), Some("Interest rate is required to calculate funding"));
    }

    #[test]
    fn test_capped_months_cannot_exceed_term() {
        let input = FundingCalculationInput::from_json(&payload()).unwrap();
        let terms = LoanTerms {
            loan_amount: dec!(100000),
            loan_term: 6,
            interest_rate: dec!(8),
        };
        let errors = input.check_against(&terms).unwrap_err();
        assert!(errors.contains("capped_interest_months"));
    }
}
