//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence for the lending core using
//! SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. `ApplicationRepository` owns the
//! SQL; `PostgresFundingStore` adapts it to the `FundingStore` port of the
//! funding domain.
//!
//! # Atomicity
//!
//! Recording a calculation inserts a history row and overwrites the cached
//! `funding_result` inside one transaction. Loan extensions update the
//! application and insert a note inside one transaction.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresFundingStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/lending")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresFundingStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::ApplicationRepository;
pub use adapters::PostgresFundingStore;
