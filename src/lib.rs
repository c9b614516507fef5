//! OKR discipline scoring.
//!
//! Users are built from account and key-result records, checked for a
//! weekly check-in cadence inside a date window, compared against last
//! month's stored goal average, and scored with a fixed additive table.

pub mod analyze;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod sources;
pub mod store;
pub mod types;
