//! Service layer for the contest aggregator.
//!
//! This module contains the business logic for:
//! - Per-platform contest fetching (`sources`)
//! - Concurrent, fail-soft aggregation (`ContestAggregator`)

mod aggregator;
pub mod sources;

pub use aggregator::{AggregateReport, ContestAggregator, SourceReport};
pub use sources::ContestSource;
