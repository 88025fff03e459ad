//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! lending core test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built applications and payloads with known outcomes
//! - `builders`: Builder patterns for applications and JSON payloads
//! - `database`: Database test helpers and container management
//! - `assertions`: Assertion helpers for field errors and funding results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
