//! Percentiles with linear interpolation between ranks.

use serde::{Deserialize, Serialize};

/// Percentile `p` (0..=100) of an ascending slice
///
/// The target rank is `p / 100 * (n - 1)`. A whole-number rank returns that
/// element unchanged; otherwise the two neighbouring values are interpolated.
/// The rank is computed in integers so whole ranks are detected exactly.
/// An empty slice yields 0.
pub fn percentile(sorted: &[u64], p: u32) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let p = p.min(100) as usize;
    let scaled = p * (sorted.len() - 1);
    let lower = scaled / 100;
    let remainder = scaled % 100;

    if remainder == 0 {
        return sorted[lower] as f64;
    }

    let low = sorted[lower] as f64;
    let high = sorted[lower + 1] as f64;
    low + (high - low) * (remainder as f64 / 100.0)
}

/// The percentile set reported in analytics output
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Percentiles {
    pub fn from_sorted(sorted: &[u64]) -> Self {
        Self {
            p10: percentile(sorted, 10),
            p25: percentile(sorted, 25),
            p50: percentile(sorted, 50),
            p75: percentile(sorted, 75),
            p90: percentile(sorted, 90),
            p95: percentile(sorted, 95),
            p99: percentile(sorted, 99),
        }
    }
}
