//! Borrower Domain - Borrower validation for loan applications
//!
//! This crate provides:
//! - ABN and ACN checksum validation and formatting
//! - Company borrower validation (identifiers, business details, financials,
//!   registered address, directors)
//! - Individual borrower validation (personal details, employment, assets,
//!   liabilities)
//! - Borrower financial summaries
//! - Eligibility assessment (debt-to-income, serviceability, loan-to-value)
//!
//! Validators never stop at the first problem. They return a
//! [`core_kernel::FieldErrors`] mapping keyed by field path, empty when the
//! payload is valid.

pub mod business_numbers;
pub mod choices;
pub mod company;
pub mod eligibility;
pub mod error;
pub mod financial;
pub mod individual;
pub mod rules;

pub use business_numbers::{is_valid_abn, is_valid_acn, validate_abn, validate_acn};
pub use choices::{AssetType, EmploymentType, LiabilityType, MaritalStatus, ResidencyStatus};
pub use company::{validate_company_borrower, BusinessType, CompanyBorrowerValidator, NON_FIELD_ERRORS};
pub use eligibility::{assess_eligibility, EligibilityAssessment, LoanServicing};
pub use error::IdentifierError;
pub use financial::{Asset, FinancialProfile, FinancialSummary, Liability};
pub use individual::{validate_individual_borrower, IndividualBorrowerValidator};
