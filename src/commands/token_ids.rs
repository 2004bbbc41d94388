//! Token ids command implementation.
//!
//! Collects every token id of a collection, deduplicates and sorts them, and
//! writes the list as txt, json or csv.

use super::utils::{log_collector_event, validate_source, SourceArgs};
use crate::canonical::{to_internal, TokenId};
use crate::collector::{CollectorState, PaginatedCollector};
use crate::output::{write_token_ids, TokenIdFormat};
use crate::rpc::{Fetch, HttpFetcher};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Arguments for the token-ids command
#[derive(Debug, Clone)]
pub struct TokenIdsArgs {
    pub source: SourceArgs,

    /// Output path for the id list
    pub output: PathBuf,

    pub format: TokenIdFormat,
}

/// What a token-ids run produced
#[derive(Debug, Clone)]
pub struct TokenIdsReport {
    pub tokens: usize,
    pub pages: usize,
    pub invalid_ids: usize,
    pub state: CollectorState,
    /// Cursor to pass as `--resume-page-key` after a failed run
    pub resume_page_key: Option<String>,
    pub output: PathBuf,
}

pub fn validate_args(args: &TokenIdsArgs) -> Result<()> {
    validate_source(&args.source)
}

/// Execute the token-ids command against the live API
pub fn execute_token_ids(args: &TokenIdsArgs) -> Result<TokenIdsReport> {
    let fetcher = HttpFetcher::new().context("Failed to create HTTP client")?;
    run_token_ids(fetcher, args)
}

/// Execute the token-ids command with any fetch implementation
///
/// # Errors
/// * No token ids collected
/// * Output write failure
pub fn run_token_ids<F: Fetch>(fetcher: F, args: &TokenIdsArgs) -> Result<TokenIdsReport> {
    info!(
        "Fetching token IDs from collection: {}",
        args.source.contract_address
    );

    let mut ids: BTreeSet<TokenId> = BTreeSet::new();
    let mut invalid_ids = 0;

    let mut collector = PaginatedCollector::new(fetcher, args.source.collector_config())
        .on_event(log_collector_event);

    while let Some(records) = collector.next_page() {
        for record in &records {
            let Some(raw) = &record.token_id else {
                invalid_ids += 1;
                continue;
            };
            match to_internal(raw) {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(e) => {
                    debug!("Skipping token id: {}", e);
                    invalid_ids += 1;
                }
            }
        }
        info!(
            "Page {}: Found {} tokens (Total: {})",
            collector.pages(),
            records.len(),
            ids.len()
        );
    }

    let state = collector.state();
    let pages = collector.pages();
    let resume_page_key = match state {
        CollectorState::Failed => collector.cursor().map(str::to_string),
        _ => None,
    };

    if invalid_ids > 0 {
        warn!("Skipped {} records without a usable token id", invalid_ids);
    }

    if ids.is_empty() {
        anyhow::bail!("No token IDs found");
    }

    if state == CollectorState::Failed {
        warn!(
            "Collection incomplete, writing partial token id list{}",
            resume_page_key
                .as_deref()
                .map(|key| format!(" (resume with --resume-page-key {})", key))
                .unwrap_or_default()
        );
    }

    let ids: Vec<TokenId> = ids.into_iter().collect();
    write_token_ids(&ids, &args.output, args.format).context("Failed to write token ids")?;

    info!("✓ Token IDs written to: {}", args.output.display());
    info!("Total unique token IDs: {}", ids.len());
    if let (Some(first), Some(last)) = (ids.first(), ids.last()) {
        info!("Token ID range: {} - {}", first, last);
    }

    Ok(TokenIdsReport {
        tokens: ids.len(),
        pages,
        invalid_ids,
        state,
        resume_page_key,
        output: args.output.clone(),
    })
}
