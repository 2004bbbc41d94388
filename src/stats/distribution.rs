//! Descriptive statistics over holder balances.

use super::buckets::{Bucket, BucketTable};
use super::lorenz::gini;
use super::percentile::Percentiles;
use crate::utils::error::StatsError;
use log::debug;
use serde::{Deserialize, Serialize};

/// One holder's balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub address: String,
    pub amount: u64,
}

impl BalanceRecord {
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// Top holder row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopHolder {
    pub address: String,
    pub amount: u64,
}

/// Analytics document handed to reporting and plotting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionSummary {
    pub total_holders: usize,
    pub total_tokens_distributed: u128,
    pub average_tokens_per_holder: f64,
    pub median_tokens_per_holder: f64,
    /// Population standard deviation
    pub standard_deviation: f64,
    pub min: u64,
    pub max: u64,
    pub percentiles: Percentiles,
    pub distribution_buckets: Vec<Bucket>,
    pub top_holders: Vec<TopHolder>,
    pub gini_coefficient: f64,
}

/// Compute the distribution summary
///
/// **Public** - main entry point for statistics
///
/// # Arguments
/// * `balances` - one record per distinct holder
/// * `boundaries` - bucket lower bounds, starting at 0, strictly ascending
/// * `top_n` - number of top holders to keep (0 gives an empty list)
///
/// # Errors
/// * `StatsError::InvalidBucketConfig` - boundaries are not a valid partition
pub fn analyze(
    balances: &[BalanceRecord],
    boundaries: &[u64],
    top_n: usize,
) -> Result<DistributionSummary, StatsError> {
    let table = BucketTable::new(boundaries)?;

    debug!(
        "Analyzing {} balances over {} buckets",
        balances.len(),
        table.len()
    );

    let mut amounts: Vec<u64> = balances.iter().map(|b| b.amount).collect();
    amounts.sort_unstable();

    let total_holders = amounts.len();
    let total_tokens: u128 = amounts.iter().map(|&a| u128::from(a)).sum();
    let mean = if total_holders > 0 {
        total_tokens as f64 / total_holders as f64
    } else {
        0.0
    };

    let percentiles = Percentiles::from_sorted(&amounts);

    Ok(DistributionSummary {
        total_holders,
        total_tokens_distributed: total_tokens,
        average_tokens_per_holder: mean,
        median_tokens_per_holder: percentiles.p50,
        standard_deviation: population_std_dev(&amounts, mean),
        min: amounts.first().copied().unwrap_or(0),
        max: amounts.last().copied().unwrap_or(0),
        percentiles,
        distribution_buckets: table.tally(amounts.iter().copied()),
        top_holders: top_holders(balances, top_n),
        gini_coefficient: gini(&amounts),
    })
}

/// Population standard deviation (divides by n)
fn population_std_dev(amounts: &[u64], mean: f64) -> f64 {
    if amounts.is_empty() {
        return 0.0;
    }

    let variance = amounts
        .iter()
        .map(|&a| {
            let diff = a as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / amounts.len() as f64;

    variance.sqrt()
}

/// Largest holders first; equal amounts ordered by address
pub fn top_holders(balances: &[BalanceRecord], top_n: usize) -> Vec<TopHolder> {
    let mut ranked: Vec<&BalanceRecord> = balances.iter().collect();
    ranked.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.address.cmp(&b.address))
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|b| TopHolder {
            address: b.address.clone(),
            amount: b.amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(amounts: &[u64]) -> Vec<BalanceRecord> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, &a)| BalanceRecord::new(format!("0x{:02x}", i), a))
            .collect()
    }

    #[test]
    fn test_basic_stats() {
        let summary = analyze(&balances(&[2, 4, 4, 4, 5, 5, 7, 9]), &[0, 5], 3).unwrap();

        assert_eq!(summary.total_holders, 8);
        assert_eq!(summary.total_tokens_distributed, 40);
        assert_eq!(summary.average_tokens_per_holder, 5.0);
        assert_eq!(summary.standard_deviation, 2.0);
        assert_eq!(summary.min, 2);
        assert_eq!(summary.max, 9);
        assert_eq!(summary.median_tokens_per_holder, 4.5);
    }

    #[test]
    fn test_empty_input() {
        let summary = analyze(&[], &[0, 10], 5).unwrap();
        assert_eq!(summary.total_holders, 0);
        assert_eq!(summary.average_tokens_per_holder, 0.0);
        assert_eq!(summary.standard_deviation, 0.0);
        assert_eq!(summary.distribution_buckets.len(), 2);
        assert!(summary.top_holders.is_empty());
    }

    #[test]
    fn test_invalid_buckets_abort() {
        let result = analyze(&balances(&[1, 2]), &[3, 1], 1);
        assert!(matches!(result, Err(StatsError::InvalidBucketConfig(_))));
    }

    #[test]
    fn test_top_holders_tie_break() {
        let records = vec![
            BalanceRecord::new("0xc", 5),
            BalanceRecord::new("0xa", 5),
            BalanceRecord::new("0xb", 9),
            BalanceRecord::new("0xd", 1),
        ];

        let top = top_holders(&records, 3);
        let addresses: Vec<&str> = top.iter().map(|t| t.address.as_str()).collect();
        assert_eq!(addresses, vec!["0xb", "0xa", "0xc"]);

        assert!(top_holders(&records, 0).is_empty());
        assert_eq!(top_holders(&records, 10).len(), 4);
    }
}
