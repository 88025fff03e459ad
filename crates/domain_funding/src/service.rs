//! Funding use cases
//!
//! `FundingService` validates, computes, and hands the resulting writes to the
//! store as a single unit of work.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{ApplicationId, FieldErrors, HealthCheckResult, UserId};

use crate::application::LoanApplication;
use crate::calculator::FundingCalculator;
use crate::error::FundingError;
use crate::extension::{ApplicationNote, LoanExtension};
use crate::history::FundingCalculationHistory;
use crate::metrics::LoanMetrics;
use crate::ports::FundingStore;
use crate::result::FundingResult;

/// Outcome of a successful calculation
#[derive(Debug, Clone)]
pub struct FundingOutcome {
    pub result: FundingResult,
    pub record: FundingCalculationHistory,
}

/// Application service for funding calculations and loan extensions
#[derive(Clone)]
pub struct FundingService {
    store: Arc<dyn FundingStore>,
}

impl FundingService {
    /// Creates a service over a store
    pub fn new(store: Arc<dyn FundingStore>) -> Self {
        Self { store }
    }

    /// Runs a funding calculation for an application
    ///
    /// Validation happens before any arithmetic and nothing is written when it
    /// fails. On success the history record and the cached result are written
    /// together.
    pub async fn calculate(
        &self,
        application_id: ApplicationId,
        payload: &Value,
        acting_user: Option<UserId>,
    ) -> Result<FundingOutcome, FundingError> {
        let application = self.load(application_id).await?;

        let rejected = |errors: FieldErrors| {
            warn!(
                application_id = %application_id,
                error_count = errors.len(),
                "Funding calculation rejected"
            );
            FundingError::Validation(errors)
        };

        let input = FundingCalculator::prepare(&application, payload).map_err(rejected)?;
        let result = FundingCalculator::calculate(&input).map_err(rejected)?;
        let record = FundingCalculationHistory::new(application_id, input, result.clone(), acting_user);

        self.store
            .record_calculation(&record)
            .await
            .map_err(|e| FundingError::from_port(e, application_id))?;

        info!(
            application_id = %application_id,
            calculation_id = %record.id,
            total_fees = %result.total_fees,
            funds_available = %result.funds_available,
            "Funding calculation recorded"
        );

        Ok(FundingOutcome { result, record })
    }

    /// Returns the calculation history of an application, newest first
    pub async fn history(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<FundingCalculationHistory>, FundingError> {
        self.load(application_id).await?;
        self.store
            .list_calculations(application_id)
            .await
            .map_err(|e| FundingError::from_port(e, application_id))
    }

    /// Returns an application
    pub async fn application(&self, application_id: ApplicationId) -> Result<LoanApplication, FundingError> {
        self.load(application_id).await
    }

    /// Returns the cached result of the latest calculation, if any
    pub async fn current_result(
        &self,
        application_id: ApplicationId,
    ) -> Result<Option<FundingResult>, FundingError> {
        Ok(self.load(application_id).await?.funding_result)
    }

    /// Computes repayment metrics from an application's current loan terms
    pub async fn loan_metrics(&self, application_id: ApplicationId) -> Result<LoanMetrics, FundingError> {
        let application = self.load(application_id).await?;
        LoanMetrics::for_application(&application).map_err(FundingError::Validation)
    }

    /// Applies new loan terms to an application and records a note
    ///
    /// The cached funding result is left as it was.
    pub async fn extend_loan(
        &self,
        application_id: ApplicationId,
        payload: &Value,
        acting_user: Option<UserId>,
    ) -> Result<(LoanApplication, ApplicationNote), FundingError> {
        self.load(application_id).await?;
        let extension = LoanExtension::from_json(payload)?;

        let note = extension.note(application_id, acting_user);
        let application = self
            .store
            .apply_loan_extension(application_id, &extension, &note)
            .await
            .map_err(|e| FundingError::from_port(e, application_id))?;

        info!(
            application_id = %application_id,
            new_rate = %extension.new_rate,
            new_loan_amount = %extension.new_loan_amount,
            "Loan extended"
        );

        Ok((application, note))
    }

    /// Returns the notes of an application, newest first
    pub async fn notes(&self, application_id: ApplicationId) -> Result<Vec<ApplicationNote>, FundingError> {
        self.load(application_id).await?;
        self.store
            .list_notes(application_id)
            .await
            .map_err(|e| FundingError::from_port(e, application_id))
    }

    /// Reports the health of the underlying store
    pub async fn store_health(&self) -> HealthCheckResult {
        self.store.health_check().await
    }

    async fn load(&self, application_id: ApplicationId) -> Result<LoanApplication, FundingError> {
        self.store
            .get_application(application_id)
            .await
            .map_err(|e| FundingError::from_port(e, application_id))
    }
}
