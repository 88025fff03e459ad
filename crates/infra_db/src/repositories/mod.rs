//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! domain types.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries bound with `sqlx::query_as` and `FromRow` rows
//! - JSON documents stored in JSONB columns through `sqlx::types::Json`
//! - Transactions for every write that spans more than one statement

pub mod application;

pub use application::{ApplicationRepository, ApplicationRow, CalculationRow, NoteRow};
