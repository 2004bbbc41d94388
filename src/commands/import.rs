//! Import command implementation.
//!
//! Builds a snapshot from a hand-collected address list. Each unique holder
//! gets one sequential token id starting at 1, in first-seen order.

use crate::aggregator::aggregate;
use crate::canonical::{canonicalize, Network};
use crate::collector::RawRecord;
use crate::input::{parse_address_list, AddressListOptions};
use crate::output::write_snapshot;
use crate::snapshot::{build, SnapshotMetadata};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Arguments for the import command
#[derive(Debug, Clone)]
pub struct ImportArgs {
    /// Input CSV path
    pub input: PathBuf,

    /// Output path for the snapshot JSON
    pub output: PathBuf,

    pub name: String,
    pub network: Network,
    pub description: Option<String>,

    /// Column holding wallet addresses
    pub address_column: String,

    /// Column holding each row's network, if any
    pub network_column: Option<String>,

    /// Keep only rows whose network column matches this value
    pub network_filter: Option<String>,

    pub contract_address: Option<String>,
    pub claim_contract: Option<String>,
    pub block_height: Option<u64>,
}

/// Row counts from an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub empty_addresses: usize,
    pub filtered_out: usize,
    pub duplicates: usize,
    pub invalid_addresses: usize,
    pub holders: usize,
}

pub fn validate_args(args: &ImportArgs) -> Result<()> {
    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.name.trim().is_empty() {
        anyhow::bail!("Snapshot name cannot be empty");
    }

    if args.network_filter.is_some() && args.network_column.is_none() {
        anyhow::bail!("--network-filter requires --network-column");
    }

    Ok(())
}

/// Execute the import command
///
/// # Errors
/// * Input cannot be read or lacks the configured columns
/// * No addresses survive filtering
/// * Snapshot write failure
pub fn execute_import(args: &ImportArgs) -> Result<ImportReport> {
    info!("Importing address list: {}", args.input.display());

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let options = AddressListOptions {
        address_column: args.address_column.clone(),
        network_column: args.network_column.clone(),
        network_filter: args.network_filter.clone(),
    };
    let list = parse_address_list(BufReader::new(file), &options)
        .context("Failed to parse address list")?;

    for (network, rows) in &list.rows_by_network {
        info!("  {}: {} rows", if network.is_empty() { "(none)" } else { network }, rows);
    }

    // Two spellings of one address must not receive two ids
    let chain = args.network.chain_kind();
    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(list.addresses.len());
    let mut report = ImportReport {
        total_rows: list.total_rows,
        empty_addresses: list.empty_addresses,
        filtered_out: list.filtered_out,
        duplicates: list.duplicates,
        ..ImportReport::default()
    };

    for raw in &list.addresses {
        let address = match canonicalize(raw, chain) {
            Ok(address) => address,
            Err(e) => {
                debug!("Skipping row: {}", e);
                report.invalid_addresses += 1;
                continue;
            }
        };

        if !seen.insert(address.clone()) {
            report.duplicates += 1;
            continue;
        }

        let token_id = records.len() as u64 + 1;
        records.push(RawRecord::new(address.into_string(), token_id));
    }

    if report.invalid_addresses > 0 {
        warn!("Skipped {} invalid addresses", report.invalid_addresses);
    }

    let holders = aggregate(&records, chain);
    if holders.is_empty() {
        anyhow::bail!("No addresses left after filtering");
    }
    report.holders = holders.len();

    let mut metadata = SnapshotMetadata::new(&args.name, args.network.name())
        .with_block_height(args.block_height.unwrap_or(0));
    if let Some(contract_address) = &args.contract_address {
        metadata = metadata.with_contract_address(contract_address);
    }
    if let Some(claim_contract) = &args.claim_contract {
        metadata = metadata.with_claim_contract(claim_contract);
    }
    if let Some(description) = &args.description {
        metadata = metadata.with_description(description);
    }

    let snapshot = build(holders, &metadata);
    write_snapshot(&snapshot, &args.output).context("Failed to write snapshot JSON")?;

    info!("Total rows in CSV: {}", report.total_rows);
    info!("  Empty addresses: {}", report.empty_addresses);
    info!("  Filtered out: {}", report.filtered_out);
    info!("  Duplicate addresses removed: {}", report.duplicates);
    info!("  Unique addresses: {}", report.holders);
    info!("✓ Snapshot written to: {}", args.output.display());

    Ok(report)
}
