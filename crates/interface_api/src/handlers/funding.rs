//! Funding handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use core_kernel::validation::indexed;
use core_kernel::{ApplicationId, FieldErrors};
use domain_borrower::{
    assess_eligibility, EligibilityAssessment, FinancialProfile, FinancialSummary, LoanServicing,
};
use domain_funding::{FundingCalculationHistory, LoanMetrics};

use crate::auth::{permissions, require_permission, Claims};
use crate::dto::funding::*;
use crate::{error::ApiError, AppState};

fn parse_application_id(raw: &str) -> Result<ApplicationId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("Invalid application id '{}'", raw)))
}

/// Runs the funding calculator for an application
pub async fn calculate_funding(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<FundingCalculationResponse>, ApiError> {
    require_permission(&claims, permissions::FUNDING_WRITE)?;
    let application_id = parse_application_id(&id)?;

    let outcome = state
        .funding
        .calculate(application_id, &payload, claims.user_id())
        .await?;

    Ok(Json(outcome.into()))
}

/// Lists the calculation history of an application, newest first
pub async fn funding_history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FundingCalculationHistory>>, ApiError> {
    require_permission(&claims, permissions::FUNDING_READ)?;
    let application_id = parse_application_id(&id)?;

    Ok(Json(state.funding.history(application_id).await?))
}

/// Returns the cached result of the latest calculation
pub async fn funding_result(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<FundingResultResponse>, ApiError> {
    require_permission(&claims, permissions::FUNDING_READ)?;
    let application_id = parse_application_id(&id)?;

    let application = state.funding.application(application_id).await?;
    Ok(Json(FundingResultResponse {
        application_id: application.id,
        reference_number: application.reference_number,
        funding_result: application.funding_result,
    }))
}

/// Applies new loan terms and records a note
pub async fn extend_loan(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<LoanExtensionResponse>, ApiError> {
    require_permission(&claims, permissions::LOAN_EXTEND)?;
    let application_id = parse_application_id(&id)?;

    let (application, note) = state
        .funding
        .extend_loan(application_id, &payload, claims.user_id())
        .await?;

    Ok(Json(LoanExtensionResponse {
        message: "Loan extended successfully".to_string(),
        application: application.into(),
        note,
    }))
}

/// Computes repayment metrics from the application's current loan terms
pub async fn loan_metrics(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<LoanMetrics>, ApiError> {
    require_permission(&claims, permissions::FUNDING_READ)?;
    let application_id = parse_application_id(&id)?;

    Ok(Json(state.funding.loan_metrics(application_id).await?))
}

/// Assesses the borrowers sent as `{"borrowers": [...]}` against the loan
pub async fn borrower_eligibility(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<EligibilityAssessment>, ApiError> {
    require_permission(&claims, permissions::FUNDING_READ)?;
    let application_id = parse_application_id(&id)?;

    let application = state.funding.application(application_id).await?;
    let metrics = LoanMetrics::for_application(&application)?;
    let borrowers = borrower_summaries(&payload)?;

    let servicing = LoanServicing {
        loan_amount: application.loan_amount.unwrap_or_default(),
        monthly_repayment: metrics.monthly_repayment,
        security_value: application.security_value,
    };
    Ok(Json(assess_eligibility(&borrowers, &servicing)?))
}

fn borrower_summaries(payload: &Value) -> Result<Vec<FinancialSummary>, ApiError> {
    let Some(borrowers) = payload.get("borrowers").and_then(Value::as_array) else {
        return Err(FieldErrors::new().with("borrowers", "Borrowers must be a list").into());
    };

    let mut errors = FieldErrors::new();
    let mut summaries = Vec::with_capacity(borrowers.len());
    for (index, borrower) in borrowers.iter().enumerate() {
        match FinancialProfile::from_json(borrower).and_then(|profile| profile.summarize()) {
            Ok(summary) => summaries.push(summary),
            Err(nested) => errors.merge_nested(&indexed("borrowers", index), nested),
        }
    }
    errors.into_result(summaries).map_err(ApiError::from)
}
