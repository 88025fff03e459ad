//! Funding Domain - Fee breakdown and funds-available calculation
//!
//! This crate provides:
//! - Parsing and validation of manual funding inputs and loan terms
//! - The funding calculator (itemized fees, total fees, funds available)
//! - Append-only calculation history with the latest result cached on the
//!   application
//! - Loan extensions with an accompanying application note
//! - Amortized repayment metrics and loan-to-value ratio
//! - The `FundingStore` port and an in-memory adapter
//! - `FundingService`, which orchestrates the use cases

pub mod adapters;
pub mod application;
pub mod calculator;
pub mod error;
pub mod extension;
pub mod history;
pub mod input;
pub mod metrics;
pub mod ports;
pub mod result;
pub mod service;

pub use adapters::InMemoryFundingStore;
pub use application::LoanApplication;
pub use calculator::FundingCalculator;
pub use error::FundingError;
pub use extension::{ApplicationNote, LoanExtension};
pub use history::FundingCalculationHistory;
pub use input::{CalculationInput, FundingCalculationInput, LoanTerms};
pub use metrics::LoanMetrics;
pub use ports::FundingStore;
pub use result::FundingResult;
pub use service::{FundingOutcome, FundingService};
