//! Fold raw ownership records into a holder map.
//!
//! Each record's owner is canonicalized for the chain and its token id
//! decoded; the id is then added to that owner's set. Because the result is
//! a set union, page arrival order never changes the final map.

use crate::canonical::{canonicalize, to_internal, CanonicalAddress, ChainKind, TokenId};
use crate::collector::RawRecord;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Canonical address -> owned token ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolderMap {
    holders: BTreeMap<CanonicalAddress, BTreeSet<TokenId>>,
}

impl HolderMap {
    /// Number of distinct holders
    pub fn len(&self) -> usize {
        self.holders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holders.is_empty()
    }

    /// Number of (holder, token) pairs
    pub fn token_count(&self) -> usize {
        self.holders.values().map(BTreeSet::len).sum()
    }

    pub fn get(&self, address: &str) -> Option<&BTreeSet<TokenId>> {
        self.holders.get(address)
    }

    /// Holders in ascending address order, ids in ascending numeric order
    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalAddress, &BTreeSet<TokenId>)> {
        self.holders.iter()
    }

    fn insert(&mut self, address: CanonicalAddress, token_id: TokenId) -> bool {
        self.holders.entry(address).or_default().insert(token_id)
    }
}

/// Counts gathered during aggregation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationReport {
    pub records_seen: usize,
    pub inserted: usize,
    /// Records whose (holder, token) pair was already present
    pub duplicates: usize,
    pub missing_fields: usize,
    pub invalid_addresses: usize,
    pub invalid_token_ids: usize,
}

impl AggregationReport {
    /// Records dropped for missing or malformed fields
    pub fn skipped(&self) -> usize {
        self.missing_fields + self.invalid_addresses + self.invalid_token_ids
    }
}

/// Incremental aggregator, fed one page at a time
#[derive(Debug, Clone)]
pub struct HolderAggregator {
    chain: ChainKind,
    holders: HolderMap,
    report: AggregationReport,
}

impl HolderAggregator {
    pub fn new(chain: ChainKind) -> Self {
        Self {
            chain,
            holders: HolderMap::default(),
            report: AggregationReport::default(),
        }
    }

    /// Add a batch of records, returning how many new pairs were inserted
    pub fn ingest(&mut self, records: &[RawRecord]) -> usize {
        records
            .iter()
            .filter(|record| self.ingest_record(record))
            .count()
    }

    /// Add one record; `true` if it contributed a new (holder, token) pair
    pub fn ingest_record(&mut self, record: &RawRecord) -> bool {
        self.report.records_seen += 1;

        let (Some(owner), Some(raw_id)) = (&record.owner, &record.token_id) else {
            self.report.missing_fields += 1;
            return false;
        };

        let address = match canonicalize(owner, self.chain) {
            Ok(address) => address,
            Err(e) => {
                debug!("Skipping record: {}", e);
                self.report.invalid_addresses += 1;
                return false;
            }
        };

        let token_id = match to_internal(raw_id) {
            Ok(id) => id,
            Err(e) => {
                debug!("Skipping record: {}", e);
                self.report.invalid_token_ids += 1;
                return false;
            }
        };

        if self.holders.insert(address, token_id) {
            self.report.inserted += 1;
            true
        } else {
            self.report.duplicates += 1;
            false
        }
    }

    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    pub fn report(&self) -> AggregationReport {
        self.report
    }

    pub fn finish(self) -> (HolderMap, AggregationReport) {
        (self.holders, self.report)
    }
}

/// Aggregate a complete record sequence
///
/// **Public** - one-shot entry point
pub fn aggregate(records: &[RawRecord], chain: ChainKind) -> HolderMap {
    aggregate_with_report(records, chain).0
}

/// Aggregate and also return skip/duplicate counts
pub fn aggregate_with_report(
    records: &[RawRecord],
    chain: ChainKind,
) -> (HolderMap, AggregationReport) {
    let mut aggregator = HolderAggregator::new(chain);
    aggregator.ingest(records);
    aggregator.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::RawTokenId;

    #[test]
    fn test_groups_by_canonical_address() {
        let records = vec![
            RawRecord::new("0x000ABC", 1u64),
            RawRecord::new("abc", "0x2"),
            RawRecord::new("0xabc", "3"),
        ];

        let map = aggregate(&records, ChainKind::VariableWidth);
        assert_eq!(map.len(), 1);
        assert_eq!(map.token_count(), 3);

        let ids: Vec<u64> = map
            .get("0xabc")
            .unwrap()
            .iter()
            .map(|id| id.to_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_fixed_width_keeps_distinct_padding() {
        let records = vec![RawRecord::new("0x0abc", 1u64), RawRecord::new("0xabc", 2u64)];
        let map = aggregate(&records, ChainKind::FixedWidth);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_duplicate_ids_are_noops() {
        let records = vec![
            RawRecord::new("0xa", 26u64),
            RawRecord::new("0xA", "0x1a"),
            RawRecord::new("0xa", "26"),
        ];

        let (map, report) = aggregate_with_report(&records, ChainKind::FixedWidth);
        assert_eq!(map.token_count(), 1);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates, 2);
    }

    #[test]
    fn test_skips_bad_records() {
        let records = vec![
            RawRecord::default(),
            RawRecord {
                owner: Some("0xa".into()),
                token_id: None,
            },
            RawRecord::new("0xnothex", 1u64),
            RawRecord {
                owner: Some("0xa".into()),
                token_id: Some(RawTokenId::Integer(-4)),
            },
            RawRecord::new("0xa", 1u64),
        ];

        let (map, report) = aggregate_with_report(&records, ChainKind::FixedWidth);
        assert_eq!(map.len(), 1);
        assert_eq!(report.records_seen, 5);
        assert_eq!(report.missing_fields, 2);
        assert_eq!(report.invalid_addresses, 1);
        assert_eq!(report.invalid_token_ids, 1);
        assert_eq!(report.skipped(), 4);
    }

    #[test]
    fn test_incremental_ingest() {
        let mut aggregator = HolderAggregator::new(ChainKind::FixedWidth);
        assert_eq!(aggregator.ingest(&[RawRecord::new("0xa", 1u64)]), 1);
        assert_eq!(
            aggregator.ingest(&[RawRecord::new("0xa", 1u64), RawRecord::new("0xb", 1u64)]),
            1
        );
        assert_eq!(aggregator.holder_count(), 2);
    }
}
