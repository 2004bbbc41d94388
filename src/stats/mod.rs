//! Distribution statistics over token balances.
//!
//! This module computes:
//! - Count, sum, mean, population standard deviation, min/max
//! - Interpolated percentiles
//! - Range-bucket histograms
//! - Lorenz curve and Gini coefficient
//! - Top holders

pub mod buckets;
pub mod distribution;
pub mod lorenz;
pub mod percentile;

pub use buckets::{parse_boundaries, Bucket, BucketTable};
pub use distribution::{analyze, top_holders, BalanceRecord, DistributionSummary, TopHolder};
pub use lorenz::{gini, lorenz_curve, LorenzPoint};
pub use percentile::{percentile, Percentiles};
