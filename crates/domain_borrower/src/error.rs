//! Borrower domain errors
//!
//! Identifier errors carry the exact user-facing messages that end up in a
//! borrower's field error mapping.

use thiserror::Error;

/// Errors raised by ABN/ACN validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// ABN does not contain exactly 11 digits once separators are removed
    #[error("ABN must be 11 digits")]
    AbnLength,

    /// ABN digits fail the modulus-89 check
    #[error("Invalid ABN checksum")]
    AbnChecksum,

    /// ACN does not contain exactly 9 digits once separators are removed
    #[error("ACN must be 9 digits")]
    AcnLength,

    /// ACN check digit does not match
    #[error("Invalid ACN checksum")]
    AcnChecksum,
}

impl IdentifierError {
    /// Returns true for checksum (rather than length) failures
    pub fn is_checksum(&self) -> bool {
        matches!(self, IdentifierError::AbnChecksum | IdentifierError::AcnChecksum)
    }
}
