//! gradebook-core — Grade aggregation, outlier detection, and statistics.
//!
//! This crate defines the gradebook data model, the read-only accessor traits
//! the engine consumes, and the pure functions that turn assignment weights
//! and recorded scores into ranked final grades and flagged issues.

pub mod aggregator;
pub mod detector;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod snapshot;
pub mod statistics;
pub mod traits;
