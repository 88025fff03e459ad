//! Borrower validation handlers
//!
//! Validation outcomes are data: an invalid borrower is a 200 response with
//! `valid: false`. Only the financial summary answers 400, since it cannot be
//! computed from invalid figures.

use axum::{Extension, Json};
use serde_json::Value;

use core_kernel::json::text_from;
use domain_borrower::business_numbers::{format_abn, format_acn};
use domain_borrower::{
    validate_abn, validate_acn, validate_company_borrower, validate_individual_borrower,
    FinancialProfile, FinancialSummary,
};

use crate::auth::{permissions, require_permission, Claims};
use crate::dto::borrower::*;
use crate::error::ApiError;

/// Validates a company borrower payload
pub async fn validate_company(
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Value>,
) -> Result<Json<ValidationResponse>, ApiError> {
    require_permission(&claims, permissions::BORROWER_VALIDATE)?;
    Ok(Json(validate_company_borrower(&payload).into()))
}

/// Validates an individual borrower payload
pub async fn validate_individual(
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Value>,
) -> Result<Json<ValidationResponse>, ApiError> {
    require_permission(&claims, permissions::BORROWER_VALIDATE)?;
    Ok(Json(validate_individual_borrower(&payload).into()))
}

/// Checks an ABN sent as `{"abn": ...}`
pub async fn check_abn(
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Value>,
) -> Result<Json<IdentifierCheckResponse>, ApiError> {
    require_permission(&claims, permissions::BORROWER_VALIDATE)?;
    let raw = identifier_field(&payload, "abn")?;
    Ok(Json(IdentifierCheckResponse::from_result(validate_abn(&raw), format_abn)))
}

/// Checks an ACN sent as `{"acn": ...}`
pub async fn check_acn(
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Value>,
) -> Result<Json<IdentifierCheckResponse>, ApiError> {
    require_permission(&claims, permissions::BORROWER_VALIDATE)?;
    let raw = identifier_field(&payload, "acn")?;
    Ok(Json(IdentifierCheckResponse::from_result(validate_acn(&raw), format_acn)))
}

/// Summarizes a borrower's assets, liabilities and monthly cash flow
pub async fn financial_summary(
    Extension(claims): Extension<Claims>,
    Json(payload): Json<Value>,
) -> Result<Json<FinancialSummary>, ApiError> {
    require_permission(&claims, permissions::BORROWER_VALIDATE)?;
    let profile = FinancialProfile::from_json(&payload)?;
    Ok(Json(profile.summarize()?))
}

fn identifier_field(payload: &Value, field: &str) -> Result<String, ApiError> {
    payload
        .get(field)
        .and_then(text_from)
        .ok_or_else(|| ApiError::BadRequest(format!("'{}' is required", field)))
}
