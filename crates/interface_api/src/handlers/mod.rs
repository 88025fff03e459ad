//! Request handlers

pub mod borrower;
pub mod funding;
pub mod health;
