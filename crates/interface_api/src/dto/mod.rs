//! Request and response bodies

pub mod borrower;
pub mod funding;
