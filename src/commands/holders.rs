//! Holders command implementation.
//!
//! The holders command:
//! 1. Collects NFT ownership records page by page
//! 2. Aggregates them into canonical holder -> token id sets
//! 3. Builds the snapshot document
//! 4. Writes it to disk

use super::utils::{log_collector_event, validate_source, SourceArgs};
use crate::aggregator::HolderAggregator;
use crate::canonical::Network;
use crate::collector::{CollectorState, PaginatedCollector, RawRecord};
use crate::output::{read_snapshot, write_snapshot};
use crate::rpc::{Fetch, HttpFetcher};
use crate::snapshot::{build, SnapshotMetadata};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the holders command
#[derive(Debug, Clone)]
pub struct HoldersArgs {
    pub source: SourceArgs,

    /// Collection name
    pub name: String,

    pub network: Network,

    /// Output path for the snapshot JSON
    pub output: PathBuf,

    /// Snapshot description (defaults to "{name} snapshot")
    pub description: Option<String>,

    pub block_height: Option<u64>,

    /// Claim contract address (defaults to 0x1)
    pub claim_contract: Option<String>,
}

/// What a holders run produced
#[derive(Debug, Clone)]
pub struct HoldersReport {
    pub holders: usize,
    pub tokens: usize,
    pub pages: usize,
    pub skipped_records: usize,
    pub state: CollectorState,
    /// Cursor to pass as `--resume-page-key` after a failed run
    pub resume_page_key: Option<String>,
    pub output: PathBuf,
}

/// Default snapshot file name: `{name_snake}_snapshot_{network}.json`
pub fn default_output_path(name: &str, network: Network) -> PathBuf {
    let name_snake = name.to_lowercase().replace(' ', "_");
    PathBuf::from(format!("{}_snapshot_{}.json", name_snake, network.name()))
}

/// Validate holders arguments
pub fn validate_args(args: &HoldersArgs) -> Result<()> {
    validate_source(&args.source)?;

    if args.name.trim().is_empty() {
        anyhow::bail!("Collection name cannot be empty");
    }

    Ok(())
}

/// Execute the holders command against the live API
pub fn execute_holders(args: &HoldersArgs) -> Result<HoldersReport> {
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    run_holders(fetcher, args)
}

/// Execute the holders command with any fetch implementation
///
/// # Errors
/// * Partial snapshot at `--output` unreadable or for another contract when resuming
/// * No holders collected (the process should exit non-zero)
/// * Snapshot write failure
pub fn run_holders<F: Fetch>(fetcher: F, args: &HoldersArgs) -> Result<HoldersReport> {
    let start_time = Instant::now();

    info!(
        "Fetching NFT holders from collection: {}",
        args.source.contract_address
    );
    info!("API URL: {}", args.source.api_url);

    let mut aggregator = HolderAggregator::new(args.network.chain_kind());
    if args.source.resume_page_key.is_some() {
        merge_partial_snapshot(&mut aggregator, args)?;
    }

    let mut collector = PaginatedCollector::new(fetcher, args.source.collector_config())
        .on_event(log_collector_event);

    while let Some(records) = collector.next_page() {
        aggregator.ingest(&records);
        info!(
            "Page {}: Processed {} NFTs (Total unique holders: {})",
            collector.pages(),
            records.len(),
            aggregator.holder_count()
        );
    }

    let state = collector.state();
    let pages = collector.pages();
    let resume_page_key = match state {
        CollectorState::Failed => collector.cursor().map(str::to_string),
        _ => None,
    };

    let (holders, aggregation) = aggregator.finish();

    if aggregation.skipped() > 0 {
        warn!(
            "Skipped {} records ({} missing fields, {} invalid addresses, {} invalid token ids)",
            aggregation.skipped(),
            aggregation.missing_fields,
            aggregation.invalid_addresses,
            aggregation.invalid_token_ids
        );
    }

    if holders.is_empty() {
        anyhow::bail!("No holders found");
    }

    if state == CollectorState::Failed {
        warn!(
            "Collection incomplete, writing partial snapshot{}",
            resume_page_key
                .as_deref()
                .map(|key| format!(" (resume with --resume-page-key {})", key))
                .unwrap_or_default()
        );
    }

    let mut metadata = SnapshotMetadata::new(&args.name, args.network.name())
        .with_contract_address(&args.source.contract_address)
        .with_block_height(args.block_height.unwrap_or(0));
    if let Some(description) = &args.description {
        metadata = metadata.with_description(description);
    }
    if let Some(claim_contract) = &args.claim_contract {
        metadata = metadata.with_claim_contract(claim_contract);
    }

    let holder_count = holders.len();
    let token_count = holders.token_count();
    let snapshot = build(holders, &metadata);

    write_snapshot(&snapshot, &args.output).context("Failed to write snapshot JSON")?;

    info!("✓ Snapshot written to: {}", args.output.display());
    info!("Total unique holders: {}", holder_count);
    info!("Total NFTs tracked: {}", token_count);
    info!(
        "Holders completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(HoldersReport {
        holders: holder_count,
        tokens: token_count,
        pages,
        skipped_records: aggregation.skipped(),
        state,
        resume_page_key,
        output: args.output.clone(),
    })
}

/// Fold the holders of an earlier partial run back into the aggregator
///
/// A resumed run only fetches the pages after the cursor, so the snapshot
/// already at `--output` carries everything before it.
fn merge_partial_snapshot(aggregator: &mut HolderAggregator, args: &HoldersArgs) -> Result<()> {
    if !args.output.exists() {
        warn!(
            "Resuming without a partial snapshot at {}; earlier pages will be missing",
            args.output.display()
        );
        return Ok(());
    }

    let previous = read_snapshot(&args.output)
        .with_context(|| format!("Failed to read partial snapshot {}", args.output.display()))?;

    let expected = args.source.contract_address.trim().to_lowercase();
    if previous.contract_address != expected {
        anyhow::bail!(
            "Partial snapshot {} is for contract {}, not {}",
            args.output.display(),
            previous.contract_address,
            expected
        );
    }

    for (address, ids) in &previous.snapshot {
        for id in ids {
            aggregator.ingest_record(&RawRecord::new(address.as_str(), id.as_str()));
        }
    }

    info!(
        "Merged {} holders ({} tokens) from partial snapshot {}",
        previous.holder_count(),
        previous.token_count(),
        args.output.display()
    );

    Ok(())
}
