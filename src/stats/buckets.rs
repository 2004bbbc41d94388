//! Range buckets for balance histograms.
//!
//! Boundaries are lower bounds: `[0, 5, 10]` gives `[0, 5)`, `[5, 10)` and
//! `[10, +inf)`. The first boundary must be 0 and the list strictly
//! ascending, so the buckets cover every non-negative amount exactly once.

use crate::utils::error::StatsError;
use serde::{Deserialize, Serialize};

/// One histogram row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Human-readable range, e.g. `"5-9"` or `"1000+"`
    pub range: String,
    pub count: usize,
    /// Summed in u128 so a bucket never overflows
    pub total_tokens: u128,
}

/// Validated bucket boundaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketTable {
    lower_bounds: Vec<u64>,
}

impl BucketTable {
    /// Validate boundaries and build the table
    ///
    /// # Errors
    /// * `StatsError::InvalidBucketConfig` - empty, not starting at 0, or not strictly ascending
    pub fn new(boundaries: &[u64]) -> Result<Self, StatsError> {
        let Some(&first) = boundaries.first() else {
            return Err(StatsError::InvalidBucketConfig(
                "at least one boundary is required".to_string(),
            ));
        };

        if first != 0 {
            return Err(StatsError::InvalidBucketConfig(format!(
                "first boundary must be 0, got {} (amounts below it would fall in no bucket)",
                first
            )));
        }

        if let Some(pair) = boundaries.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(StatsError::InvalidBucketConfig(format!(
                "boundaries must be strictly ascending ({} is followed by {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self {
            lower_bounds: boundaries.to_vec(),
        })
    }

    pub fn len(&self) -> usize {
        self.lower_bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lower_bounds.is_empty()
    }

    /// Index of the bucket `[low, high)` containing `amount`
    pub fn classify(&self, amount: u64) -> usize {
        // Number of lower bounds <= amount; the first bound is 0 so this is >= 1
        self.lower_bounds.partition_point(|&low| low <= amount) - 1
    }

    /// Label for bucket `index`
    pub fn label(&self, index: usize) -> String {
        let low = self.lower_bounds[index];
        match self.lower_bounds.get(index + 1) {
            None => format!("{}+", low),
            Some(&high) if high - 1 == low => low.to_string(),
            Some(&high) => format!("{}-{}", low, high - 1),
        }
    }

    /// Count holders and tokens per bucket
    pub fn tally(&self, amounts: impl IntoIterator<Item = u64>) -> Vec<Bucket> {
        let mut counts = vec![0usize; self.len()];
        let mut totals = vec![0u128; self.len()];

        for amount in amounts {
            let index = self.classify(amount);
            counts[index] += 1;
            totals[index] += u128::from(amount);
        }

        counts
            .into_iter()
            .zip(totals)
            .enumerate()
            .map(|(index, (count, total_tokens))| Bucket {
                range: self.label(index),
                count,
                total_tokens,
            })
            .collect()
    }
}

/// Parse a comma-separated boundary list such as `"0,5,10,20"`
pub fn parse_boundaries(list: &str) -> Result<Vec<u64>, StatsError> {
    list.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>().map_err(|_| {
                StatsError::InvalidBucketConfig(format!("'{}' is not a non-negative integer", part))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_boundaries() {
        assert!(BucketTable::new(&[]).is_err());
        assert!(BucketTable::new(&[1, 5]).is_err());
        assert!(BucketTable::new(&[0, 5, 5]).is_err());
        assert!(BucketTable::new(&[0, 10, 5]).is_err());
        assert!(BucketTable::new(&[0]).is_ok());
    }

    #[test]
    fn test_classify_half_open() {
        let table = BucketTable::new(&[0, 5, 10]).unwrap();
        assert_eq!(table.classify(0), 0);
        assert_eq!(table.classify(4), 0);
        assert_eq!(table.classify(5), 1);
        assert_eq!(table.classify(9), 1);
        assert_eq!(table.classify(10), 2);
        assert_eq!(table.classify(u64::MAX), 2);
    }

    #[test]
    fn test_labels() {
        let table = BucketTable::new(&[0, 1, 5, 1000]).unwrap();
        assert_eq!(table.label(0), "0");
        assert_eq!(table.label(1), "1-4");
        assert_eq!(table.label(2), "5-999");
        assert_eq!(table.label(3), "1000+");
    }

    #[test]
    fn test_tally() {
        let table = BucketTable::new(&[0, 5, 10]).unwrap();
        let buckets = table.tally(vec![1, 4, 5, 12, 30]);

        assert_eq!(buckets.len(), 3);
        assert_eq!((buckets[0].count, buckets[0].total_tokens), (2, 5));
        assert_eq!((buckets[1].count, buckets[1].total_tokens), (1, 5));
        assert_eq!((buckets[2].count, buckets[2].total_tokens), (2, 42));
    }

    #[test]
    fn test_tally_does_not_overflow() {
        let table = BucketTable::new(&[0, 10]).unwrap();
        let buckets = table.tally(vec![u64::MAX, u64::MAX, 3]);

        assert_eq!(buckets[0].total_tokens, 3);
        assert_eq!(buckets[1].total_tokens, 2 * u128::from(u64::MAX));
    }

    #[test]
    fn test_parse_boundaries() {
        assert_eq!(parse_boundaries("0, 5,10").unwrap(), vec![0, 5, 10]);
        assert!(parse_boundaries("0,-5").is_err());
        assert!(parse_boundaries("0,abc").is_err());
    }
}
