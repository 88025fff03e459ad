//! In-memory funding store
//!
//! All state sits behind one `RwLock`, so a write guard covers both halves of
//! a unit of work.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use core_kernel::{
    AdapterHealth, ApplicationId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};

use crate::application::LoanApplication;
use crate::extension::{ApplicationNote, LoanExtension};
use crate::history::{sort_newest_first, FundingCalculationHistory};
use crate::ports::FundingStore;

#[derive(Debug, Default)]
struct Inner {
    applications: HashMap<ApplicationId, LoanApplication>,
    history: HashMap<ApplicationId, Vec<FundingCalculationHistory>>,
    notes: HashMap<ApplicationId, Vec<ApplicationNote>>,
}

/// Funding store kept in process memory
#[derive(Debug, Default, Clone)]
pub struct InMemoryFundingStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryFundingStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with applications
    pub async fn with_applications(applications: Vec<LoanApplication>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.write().await;
            for application in applications {
                inner.applications.insert(application.id, application);
            }
        }
        store
    }
}

impl DomainPort for InMemoryFundingStore {}

#[async_trait]
impl HealthCheckable for InMemoryFundingStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult {
            adapter_id: "memory-funding-store".to_string(),
            status: AdapterHealth::Healthy,
            latency_ms: 0,
            message: Some("In-memory store".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl FundingStore for InMemoryFundingStore {
    async fn get_application(&self, id: ApplicationId) -> Result<LoanApplication, PortError> {
        self.inner
            .read()
            .await
            .applications
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Application", id))
    }

    async fn save_application(&self, application: &LoanApplication) -> Result<(), PortError> {
        self.inner
            .write()
            .await
            .applications
            .insert(application.id, application.clone());
        Ok(())
    }

    async fn record_calculation(&self, record: &FundingCalculationHistory) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;

        let application = inner
            .applications
            .get_mut(&record.application_id)
            .ok_or_else(|| PortError::not_found("Application", record.application_id))?;
        application.funding_result = Some(record.calculation_result.clone());
        application.updated_at = record.created_at;

        inner
            .history
            .entry(record.application_id)
            .or_default()
            .push(record.clone());

        debug!(calculation_id = %record.id, "Recorded funding calculation in memory");
        Ok(())
    }

    async fn list_calculations(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<FundingCalculationHistory>, PortError> {
        let inner = self.inner.read().await;
        let mut records = inner.history.get(&application_id).cloned().unwrap_or_default();
        sort_newest_first(&mut records);
        Ok(records)
    }

    async fn apply_loan_extension(
        &self,
        application_id: ApplicationId,
        extension: &LoanExtension,
        note: &ApplicationNote,
    ) -> Result<LoanApplication, PortError> {
        let mut inner = self.inner.write().await;

        let application = inner
            .applications
            .get_mut(&application_id)
            .ok_or_else(|| PortError::not_found("Application", application_id))?;
        application.interest_rate = Some(extension.new_rate);
        application.loan_amount = Some(extension.new_loan_amount);
        application.updated_at = Utc::now();
        let updated = application.clone();

        inner.notes.entry(application_id).or_default().push(note.clone());
        Ok(updated)
    }

    async fn list_notes(&self, application_id: ApplicationId) -> Result<Vec<ApplicationNote>, PortError> {
        let inner = self.inner.read().await;
        let mut notes = inner.notes.get(&application_id).cloned().unwrap_or_default();
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }
}
