//! Funding DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{ApplicationId, CalculationId};
use domain_funding::{ApplicationNote, FundingOutcome, FundingResult, LoanApplication};

#[derive(Debug, Serialize)]
pub struct FundingCalculationResponse {
    pub message: String,
    pub result: FundingResult,
    pub history_id: CalculationId,
}

impl From<FundingOutcome> for FundingCalculationResponse {
    fn from(outcome: FundingOutcome) -> Self {
        Self {
            message: "Funding calculation completed successfully".to_string(),
            history_id: outcome.record.id,
            result: outcome.result,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FundingResultResponse {
    pub application_id: ApplicationId,
    pub reference_number: String,
    pub funding_result: Option<FundingResult>,
}

/// Loan terms of an application after a change
#[derive(Debug, Serialize)]
pub struct ApplicationTermsResponse {
    pub id: ApplicationId,
    pub reference_number: String,
    pub loan_amount: Option<Decimal>,
    pub loan_term: Option<u32>,
    pub interest_rate: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

impl From<LoanApplication> for ApplicationTermsResponse {
    fn from(application: LoanApplication) -> Self {
        Self {
            id: application.id,
            reference_number: application.reference_number,
            loan_amount: application.loan_amount,
            loan_term: application.loan_term,
            interest_rate: application.interest_rate,
            updated_at: application.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoanExtensionResponse {
    pub message: String,
    pub application: ApplicationTermsResponse,
    pub note: ApplicationNote,
}
