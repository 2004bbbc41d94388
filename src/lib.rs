//! Holder Snapshot
//!
//! NFT holder snapshots and token distribution statistics.
//!
//! The snapshot pipeline collects ownership records page by page from an
//! indexing API, canonicalizes addresses and token ids, groups them per
//! holder, and writes a deterministic snapshot document. The statistics side
//! turns per-holder balances into percentiles, buckets, a Gini coefficient
//! and a top-holder list.
//!
//! ## Getting Started
//!
//! ```bash
//! holder-snapshot holders --contract-address 0x04a3... --name "Loot" --network starknet
//! holder-snapshot analyze --balances balances.csv --report report.txt
//! ```

pub mod aggregator;
pub mod canonical;
pub mod collector;
pub mod commands;
pub mod input;
pub mod output;
pub mod rpc;
pub mod snapshot;
pub mod stats;
pub mod utils;
