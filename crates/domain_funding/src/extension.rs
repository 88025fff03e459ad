//! Loan extensions
//!
//! Extending a loan replaces the application's rate and amount and leaves a
//! note describing the new terms, including the agreed repayment.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::amounts::{decimal_places, CENT_PLACES, RATE_PLACES};
use core_kernel::json::decimal_from;
use core_kernel::validation::field_label;
use core_kernel::{ApplicationId, FieldErrors, NoteId, UserId, MAX_AMOUNT, MAX_RATE_PERCENT};

use crate::input::NON_FIELD_ERRORS;

/// Title used for notes written by a loan extension
pub const EXTENSION_NOTE_TITLE: &str = "Loan Extended";

/// New terms for an existing loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanExtension {
    /// New annual interest rate as a percentage
    pub new_rate: Decimal,
    /// New principal
    pub new_loan_amount: Decimal,
    /// New repayment amount
    pub new_repayment: Decimal,
}

impl LoanExtension {
    /// Parses and validates an extension request
    ///
    /// All three fields are required. The amount must be positive; rate and
    /// repayment may be zero. Values must fit the stored columns: rates up to
    /// 100% with four decimal places, amounts with whole cents.
    pub fn from_json(payload: &Value) -> Result<Self, FieldErrors> {
        let Some(fields) = payload.as_object() else {
            return Err(FieldErrors::new().with(NON_FIELD_ERRORS, "Loan extension must be an object"));
        };

        let mut errors = FieldErrors::new();
        let mut read = |field: &str, limits: Limits| -> Option<Decimal> {
            let value = fields.get(field).filter(|v| !v.is_null());
            let Some(value) = value else {
                errors.add(field, format!("{} is required", field_label(field)));
                return None;
            };
            let label = field_label(field);
            match decimal_from(value) {
                Ok(amount) if amount < Decimal::ZERO => {
                    errors.add(field, format!("{} cannot be negative", label));
                    None
                }
                Ok(amount) if amount.is_zero() && !limits.allow_zero => {
                    errors.add(field, format!("{} must be greater than zero", label));
                    None
                }
                Ok(amount) if amount > limits.max => {
                    errors.add(field, format!("{} cannot exceed {}", label, limits.max));
                    None
                }
                Ok(amount) if decimal_places(amount) > limits.places => {
                    errors.add(
                        field,
                        format!("{} cannot have more than {} decimal places", label, limits.places),
                    );
                    None
                }
                Ok(amount) => Some(amount.normalize()),
                Err(_) => {
                    errors.add(field, format!("{} must be a number", label));
                    None
                }
            }
        };

        let new_rate = read("new_rate", Limits::RATE);
        let new_loan_amount = read("new_loan_amount", Limits::PRINCIPAL);
        let new_repayment = read("new_repayment", Limits::REPAYMENT);

        match (new_rate, new_loan_amount, new_repayment) {
            (Some(new_rate), Some(new_loan_amount), Some(new_repayment)) => Ok(Self {
                new_rate,
                new_loan_amount,
                new_repayment,
            }),
            _ => Err(errors),
        }
    }

    /// Text of the note recorded with the extension
    pub fn note_content(&self) -> String {
        format!(
            "Loan extended with new terms: Rate {}%, Amount ${}, Repayment ${}",
            self.new_rate, self.new_loan_amount, self.new_repayment
        )
    }

    /// Builds the note recorded with the extension
    pub fn note(&self, application_id: ApplicationId, created_by: Option<UserId>) -> ApplicationNote {
        ApplicationNote::new(application_id, EXTENSION_NOTE_TITLE, self.note_content(), created_by)
    }
}

#[derive(Clone, Copy)]
struct Limits {
    max: Decimal,
    places: u32,
    allow_zero: bool,
}

impl Limits {
    const RATE: Limits = Limits { max: MAX_RATE_PERCENT, places: RATE_PLACES, allow_zero: true };
    const PRINCIPAL: Limits = Limits { max: MAX_AMOUNT, places: CENT_PLACES, allow_zero: false };
    const REPAYMENT: Limits = Limits { max: MAX_AMOUNT, places: CENT_PLACES, allow_zero: true };
}

/// A free-text note attached to an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationNote {
    pub id: NoteId,
    pub application_id: ApplicationId,
    pub title: String,
    pub content: String,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl ApplicationNote {
    /// Creates a note stamped with the current time
    pub fn new(
        application_id: ApplicationId,
        title: impl Into<String>,
        content: impl Into<String>,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: NoteId::new_v7(),
            application_id,
            title: title.into(),
            content: content.into(),
            created_by,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parses_extension() {
        let extension = LoanExtension::from_json(&json!({
            "new_rate": "9.5",
            "new_loan_amount": 550000,
            "new_repayment": 4200.50
        }))
        .unwrap();
        assert_eq!(extension.new_rate, dec!(9.5));
        assert_eq!(
            extension.note_content(),
            "Loan extended with new terms: Rate 9.5%, Amount $550000, Repayment $4200.5"
        );
    }

    #[test]
    fn test_terms_must_fit_stored_columns() {
        let errors = LoanExtension::from_json(&json!({
            "new_rate": 1000,
            "new_loan_amount": "1e14",
            "new_repayment": "4200.505"
        }))
        .unwrap_err();
        assert_eq!(errors.get("new_rate"), Some("New Rate cannot exceed 100"));
        assert_eq!(
            errors.get("new_loan_amount"),
            Some("New Loan Amount cannot exceed 9999999999999.99")
        );
        assert_eq!(
            errors.get("new_repayment"),
            Some("New Repayment cannot have more than 2 decimal places")
        );

        let errors = LoanExtension::from_json(&json!({
            "new_rate": "9.12345",
            "new_loan_amount": 550000,
            "new_repayment": 4200
        }))
        .unwrap_err();
        assert_eq!(errors.get("new_rate"), Some("New Rate cannot have more than 4 decimal places"));
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_places() {
        let extension = LoanExtension::from_json(&json!({
            "new_rate": "9.250000",
            "new_loan_amount": "550000.000",
            "new_repayment": 4200
        }))
        .unwrap();
        assert_eq!(extension.new_rate, dec!(9.25));
        assert_eq!(
            extension.note_content(),
            "Loan extended with new terms: Rate 9.25%, Amount $550000, Repayment $4200"
        );
    }

    #[test]
    fn test_rejects_bad_terms() {
        let errors = LoanExtension::from_json(&json!({
            "new_rate": -1,
            "new_loan_amount": 0
        }))
        .unwrap_err();
        assert_eq!(errors.get("new_rate"), Some("New Rate cannot be negative"));
        assert_eq!(errors.get("new_loan_amount"), Some("New Loan Amount must be greater than zero"));
        assert_eq!(errors.get("new_repayment"), Some("New Repayment is required"));
    }
}
