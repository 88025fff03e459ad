//! Funding domain errors
//!
//! Validation failures carry the full field-keyed mapping so callers can show
//! every problem at once.

use core_kernel::{ApplicationId, FieldErrors, PortError};
use thiserror::Error;

/// Errors that can occur in the funding domain
#[derive(Debug, Error)]
pub enum FundingError {
    /// One or more input fields are invalid
    #[error("Funding validation failed: {0}")]
    Validation(FieldErrors),

    /// The application does not exist
    #[error("Application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    /// The store failed to read or write
    #[error("Funding storage error: {0}")]
    Storage(#[from] PortError),
}

impl FundingError {
    /// Maps a port error for a specific application, turning `NotFound` into
    /// [`FundingError::ApplicationNotFound`]
    pub fn from_port(error: PortError, application_id: ApplicationId) -> Self {
        if error.is_not_found() {
            FundingError::ApplicationNotFound(application_id)
        } else {
            FundingError::Storage(error)
        }
    }

    /// Returns the field errors for validation failures
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FundingError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<FieldErrors> for FundingError {
    fn from(errors: FieldErrors) -> Self {
        FundingError::Validation(errors)
    }
}
