//! PostgreSQL Funding Store
//!
//! This module provides the database adapter for the funding domain,
//! implementing the `FundingStore` port using the `ApplicationRepository`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresFundingStore;
//! use domain_funding::{FundingService, FundingStore};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn FundingStore> = Arc::new(PostgresFundingStore::new(pool));
//! let service = FundingService::new(store);
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, ApplicationId, DomainPort, HealthCheckResult, HealthCheckable, PortError,
};
use domain_funding::{
    ApplicationNote, FundingCalculationHistory, FundingStore, LoanApplication, LoanExtension,
};

use crate::repositories::ApplicationRepository;

const ADAPTER_ID: &str = "postgres-funding-store";

/// PostgreSQL-backed implementation of the FundingStore port
///
/// # Health Checking
///
/// Health checks run `SELECT 1` against the pool and report the latency.
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - Connection and pool errors -> `PortError::Connection`
/// - Other errors -> `PortError::Internal`
#[derive(Debug, Clone)]
pub struct PostgresFundingStore {
    repository: ApplicationRepository,
    pool: PgPool,
}

impl PostgresFundingStore {
    /// Creates a new PostgreSQL funding store
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ApplicationRepository::new(pool.clone()),
            pool,
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &ApplicationRepository {
        &self.repository
    }
}

impl DomainPort for PostgresFundingStore {}

#[async_trait]
impl HealthCheckable for PostgresFundingStore {
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: ADAPTER_ID.to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl FundingStore for PostgresFundingStore {
    #[instrument(skip(self), fields(application_id = %id))]
    async fn get_application(&self, id: ApplicationId) -> Result<LoanApplication, PortError> {
        debug!("Fetching application");

        let row = self.repository.get_by_id(id.into()).await?;
        Ok(row.into_application()?)
    }

    #[instrument(skip(self, application), fields(application_id = %application.id))]
    async fn save_application(&self, application: &LoanApplication) -> Result<(), PortError> {
        self.repository.upsert(application).await?;
        Ok(())
    }

    #[instrument(
        skip(self, record),
        fields(application_id = %record.application_id, calculation_id = %record.id)
    )]
    async fn record_calculation(&self, record: &FundingCalculationHistory) -> Result<(), PortError> {
        self.repository.record_calculation(record).await?;
        debug!("Funding calculation committed");
        Ok(())
    }

    #[instrument(skip(self), fields(application_id = %application_id))]
    async fn list_calculations(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<FundingCalculationHistory>, PortError> {
        let rows = self.repository.list_calculations(application_id.into()).await?;
        debug!(count = rows.len(), "Loaded funding history");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, extension, note), fields(application_id = %application_id))]
    async fn apply_loan_extension(
        &self,
        application_id: ApplicationId,
        extension: &LoanExtension,
        note: &ApplicationNote,
    ) -> Result<LoanApplication, PortError> {
        let row = self
            .repository
            .apply_loan_extension(application_id.into(), extension, note)
            .await?;
        Ok(row.into_application()?)
    }

    #[instrument(skip(self), fields(application_id = %application_id))]
    async fn list_notes(&self, application_id: ApplicationId) -> Result<Vec<ApplicationNote>, PortError> {
        let rows = self.repository.list_notes(application_id.into()).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
