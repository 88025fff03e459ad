//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresFundingStore;
//! use domain_funding::FundingStore;
//!
//! let store = PostgresFundingStore::new(pool);
//! let application = store.get_application(application_id).await?;
//! ```

pub mod funding;

pub use funding::PostgresFundingStore;
