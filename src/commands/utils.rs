//! Helpers shared by the command implementations.

use crate::canonical::{parse_token_text, Network};
use crate::collector::{CollectorConfig, CollectorEvent};
use crate::output::read_snapshot;
use crate::snapshot::validate_document;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::time::Duration;

/// Source options shared by the collecting commands
#[derive(Debug, Clone)]
pub struct SourceArgs {
    /// Indexing API endpoint
    pub api_url: String,

    /// NFT collection contract address
    pub contract_address: String,

    /// Optional token id range, forwarded to the API
    pub start_token_id: Option<String>,
    pub end_token_id: Option<String>,

    /// Items per page (clamped to 100)
    pub page_size: usize,

    /// Delay between page requests in milliseconds
    pub delay_ms: u64,

    /// Cursor to resume an interrupted collection from
    pub resume_page_key: Option<String>,
}

impl SourceArgs {
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig::for_collection(
            self.api_url.clone(),
            &self.contract_address,
            self.start_token_id.as_deref(),
            self.end_token_id.as_deref(),
        )
        .with_page_size(self.page_size)
        .with_delay(Duration::from_millis(self.delay_ms))
        .with_start_cursor(self.resume_page_key.clone())
    }
}

/// Validate source arguments
///
/// Checks the API URL scheme, the contract address, and that the token id
/// range bounds parse and are ordered.
pub fn validate_source(args: &SourceArgs) -> Result<()> {
    if args.api_url.is_empty() {
        anyhow::bail!("API URL cannot be empty");
    }

    if !args.api_url.starts_with("http://") && !args.api_url.starts_with("https://") {
        anyhow::bail!("API URL must start with http:// or https://");
    }

    let contract = args
        .contract_address
        .strip_prefix("0x")
        .unwrap_or(&args.contract_address);

    if contract.is_empty() {
        anyhow::bail!("Contract address cannot be empty");
    }

    if !contract.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Contract address contains invalid characters");
    }

    if args.page_size == 0 {
        anyhow::bail!("page_size must be greater than 0");
    }

    let start = args
        .start_token_id
        .as_deref()
        .map(parse_token_text)
        .transpose()
        .context("Invalid start token id")?;
    let end = args
        .end_token_id
        .as_deref()
        .map(parse_token_text)
        .transpose()
        .context("Invalid end token id")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            anyhow::bail!("Start token id {} is greater than end token id {}", start, end);
        }
    }

    Ok(())
}

/// Log collector progress events
pub fn log_collector_event(event: &CollectorEvent) {
    match event {
        CollectorEvent::PageFetched {
            page,
            records,
            total_records,
            has_more,
        } => debug!(
            "Page {}: {} records (total {}, more: {})",
            page, records, total_records, has_more
        ),
        CollectorEvent::Finished {
            pages,
            total_records,
        } => info!(
            "Collection finished: {} records over {} pages",
            total_records, pages
        ),
        CollectorEvent::Failed {
            page,
            total_records,
            error,
        } => warn!(
            "Collection stopped at page {}: {} (keeping {} records)",
            page, error, total_records
        ),
    }
}

/// Validate a snapshot JSON file and print a summary
pub fn validate_snapshot_file(file_path: &Path) -> Result<()> {
    println!("Validating snapshot: {}", file_path.display());

    let snapshot = read_snapshot(file_path)
        .with_context(|| format!("Failed to read snapshot {}", file_path.display()))?;

    let issues = validate_document(&snapshot);

    if issues.is_empty() {
        println!("✓ Valid snapshot JSON");
    } else {
        println!("✗ {} problem(s) found", issues.len());
        for issue in &issues {
            println!("  - {}", issue);
        }
    }
    println!("  Name: {}", snapshot.name);
    println!("  Network: {} ({})", snapshot.network, snapshot.chain_id);
    println!("  Contract: {}", snapshot.contract_address);
    println!("  Block Height: {}", snapshot.block_height);
    println!("  Holders: {}", snapshot.holder_count());
    println!("  Tokens: {}", snapshot.token_count());

    if !issues.is_empty() {
        anyhow::bail!("Snapshot failed validation");
    }

    Ok(())
}

/// Display supported networks
pub fn display_networks() {
    println!("Supported networks:");
    for network in Network::ALL {
        println!(
            "  {:<10} chain_id {:<24} {:?} addresses",
            network.name(),
            network.chain_id(),
            network.chain_kind()
        );
    }
}

/// Display version information
pub fn display_version() {
    println!("Holder Snapshot v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("NFT holder snapshots and token distribution statistics.");
}
