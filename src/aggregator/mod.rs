//! Aggregation of ownership records into per-holder token sets.

pub mod holders;

pub use holders::{aggregate, aggregate_with_report, AggregationReport, HolderAggregator, HolderMap};
