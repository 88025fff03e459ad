//! Borrower DTOs

use serde::Serialize;

use core_kernel::FieldErrors;
use domain_borrower::IdentifierError;

/// Outcome of a borrower payload validation
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

impl From<FieldErrors> for ValidationResponse {
    fn from(errors: FieldErrors) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Outcome of an ABN or ACN check
#[derive(Debug, Serialize)]
pub struct IdentifierCheckResponse {
    pub valid: bool,
    pub normalized: Option<String>,
    pub formatted: Option<String>,
    pub error: Option<String>,
}

impl IdentifierCheckResponse {
    /// Builds the response from a validation result and a formatter
    pub fn from_result(
        result: Result<String, IdentifierError>,
        format: impl Fn(&str) -> Result<String, IdentifierError>,
    ) -> Self {
        match result {
            Ok(normalized) => Self {
                valid: true,
                formatted: format(&normalized).ok(),
                normalized: Some(normalized),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                normalized: None,
                formatted: None,
                error: Some(e.to_string()),
            },
        }
    }
}
