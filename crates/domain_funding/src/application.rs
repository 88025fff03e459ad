//! Loan application slice used by the funding calculator

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::ApplicationId;

use crate::result::FundingResult;

/// The parts of a loan application that funding depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Unique identifier
    pub id: ApplicationId,
    /// Human-facing reference, e.g. `APP-2024-0001`
    pub reference_number: String,
    /// Principal in dollars
    pub loan_amount: Option<Decimal>,
    /// Term in months
    pub loan_term: Option<u32>,
    /// Annual interest rate as a percentage
    pub interest_rate: Option<Decimal>,
    /// Value of the property offered as security
    pub security_value: Option<Decimal>,
    /// Result of the most recent funding calculation
    pub funding_result: Option<FundingResult>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl LoanApplication {
    /// Creates an application with no loan terms yet
    pub fn new(reference_number: impl Into<String>) -> Self {
        Self {
            id: ApplicationId::new_v7(),
            reference_number: reference_number.into(),
            loan_amount: None,
            loan_term: None,
            interest_rate: None,
            security_value: None,
            funding_result: None,
            updated_at: Utc::now(),
        }
    }

    /// Sets principal, term and rate
    pub fn with_loan(mut self, amount: Decimal, term_months: u32, interest_rate: Decimal) -> Self {
        self.loan_amount = Some(amount);
        self.loan_term = Some(term_months);
        self.interest_rate = Some(interest_rate);
        self
    }

    /// Sets the value of the security property
    pub fn with_security(mut self, value: Decimal) -> Self {
        self.security_value = Some(value);
        self
    }

    /// Returns true once a funding calculation has been recorded
    pub fn has_funding_result(&self) -> bool {
        self.funding_result.is_some()
    }
}
