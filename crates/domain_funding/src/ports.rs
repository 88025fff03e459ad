//! Funding Domain Ports
//!
//! `FundingStore` is everything the funding use cases need from persistence.
//!
//! # Adapters
//!
//! - **PostgreSQL** (`infra_db::PostgresFundingStore`): sqlx transactions
//! - **In-memory** ([`crate::adapters::InMemoryFundingStore`]): single lock
//!   guard, used for local runs and tests
//!
//! # Atomicity
//!
//! [`FundingStore::record_calculation`] and
//! [`FundingStore::apply_loan_extension`] are units of work: either every
//! write they describe happens or none does.
//!
//! ```rust,ignore
//! let store: Arc<dyn FundingStore> = match config.storage {
//!     StorageBackend::Postgres => Arc::new(PostgresFundingStore::new(pool)),
//!     StorageBackend::Memory => Arc::new(InMemoryFundingStore::new()),
//! };
//! let service = FundingService::new(store);
//! ```

use async_trait::async_trait;

use core_kernel::{ApplicationId, DomainPort, HealthCheckable, PortError};

use crate::application::LoanApplication;
use crate::extension::{ApplicationNote, LoanExtension};
use crate::history::FundingCalculationHistory;

/// Port for loan application funding persistence
#[async_trait]
pub trait FundingStore: DomainPort + HealthCheckable {
    /// Retrieves an application
    ///
    /// # Returns
    ///
    /// The application, or `PortError::NotFound`
    async fn get_application(&self, id: ApplicationId) -> Result<LoanApplication, PortError>;

    /// Inserts or replaces an application
    async fn save_application(&self, application: &LoanApplication) -> Result<(), PortError>;

    /// Records a calculation
    ///
    /// Inserts the history record and overwrites the application's cached
    /// `funding_result` with its result in one unit of work.
    async fn record_calculation(&self, record: &FundingCalculationHistory) -> Result<(), PortError>;

    /// Lists the calculations of an application, newest first
    async fn list_calculations(
        &self,
        application_id: ApplicationId,
    ) -> Result<Vec<FundingCalculationHistory>, PortError>;

    /// Applies new loan terms and records the note in one unit of work
    ///
    /// # Returns
    ///
    /// The updated application
    async fn apply_loan_extension(
        &self,
        application_id: ApplicationId,
        extension: &LoanExtension,
        note: &ApplicationNote,
    ) -> Result<LoanApplication, PortError>;

    /// Lists the notes of an application, newest first
    async fn list_notes(&self, application_id: ApplicationId) -> Result<Vec<ApplicationNote>, PortError>;
}
