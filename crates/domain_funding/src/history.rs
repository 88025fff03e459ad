//! Funding calculation history
//!
//! One immutable record per calculation run. Records are only ever inserted;
//! they disappear only when their application is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ApplicationId, CalculationId, UserId};

use crate::input::CalculationInput;
use crate::result::FundingResult;

/// A recorded funding calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingCalculationHistory {
    /// Time-ordered identifier
    pub id: CalculationId,
    /// Application the calculation belongs to
    pub application_id: ApplicationId,
    /// Loan terms and manual inputs used
    pub calculation_input: CalculationInput,
    /// Computed breakdown
    pub calculation_result: FundingResult,
    /// User who ran the calculation, if known
    pub created_by: Option<UserId>,
    /// When the calculation ran
    pub created_at: DateTime<Utc>,
}

impl FundingCalculationHistory {
    /// Creates a new history record stamped with the current time
    pub fn new(
        application_id: ApplicationId,
        calculation_input: CalculationInput,
        calculation_result: FundingResult,
        created_by: Option<UserId>,
    ) -> Self {
        Self {
            id: CalculationId::new_v7(),
            application_id,
            calculation_input,
            calculation_result,
            created_by,
            created_at: Utc::now(),
        }
    }
}

/// Sorts records newest first, breaking timestamp ties by id
pub fn sort_newest_first(records: &mut [FundingCalculationHistory]) {
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
    });
}
