//! Core Kernel - Foundational types and utilities for the lending core
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for applications, users, and calculation records
//! - Field-keyed validation error mappings
//! - Lenient JSON field coercion for payloads arriving from web clients
//! - Cent rounding for monetary decimals
//! - Port/adapter infrastructure shared by the domain crates

pub mod identifiers;
pub mod validation;
pub mod json;
pub mod amounts;
pub mod ports;
pub mod error;

pub use identifiers::{ApplicationId, UserId, CalculationId, NoteId, BorrowerId};
pub use validation::FieldErrors;
pub use amounts::{round_cents, percent_of, checked_sum, MAX_AMOUNT, MAX_RATE_PERCENT};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
pub use error::CoreError;
