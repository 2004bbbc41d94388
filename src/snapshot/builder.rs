//! Turn an aggregated holder map into a snapshot document.

use super::schema::{SnapshotDocument, SnapshotEntry, SnapshotMetadata};
use crate::aggregator::HolderMap;
use crate::canonical::{to_hex, Network};
use crate::utils::config::DEFAULT_CHAIN_ID;
use log::{debug, warn};

/// Build the snapshot document
///
/// **Public** - main entry point for snapshot assembly
///
/// Addresses come out in ascending lexicographic order and each id list in
/// ascending numeric order, so identical inputs serialize identically.
pub fn build(holders: HolderMap, metadata: &SnapshotMetadata) -> SnapshotDocument {
    debug!(
        "Building snapshot for {} holders ({} tokens)",
        holders.len(),
        holders.token_count()
    );

    // HolderMap iterates in sorted order already
    let snapshot: Vec<SnapshotEntry> = holders
        .iter()
        .map(|(address, ids)| {
            let hex_ids = ids.iter().map(|id| to_hex(*id)).collect();
            (address.as_str().to_string(), hex_ids)
        })
        .collect();

    SnapshotDocument {
        block_height: metadata.block_height,
        chain_id: chain_id_for(&metadata.network).to_string(),
        claim_contract: metadata.claim_contract.clone(),
        contract_address: metadata.contract_address.trim().to_lowercase(),
        description: metadata.description.clone(),
        entrypoint: metadata.entrypoint.clone(),
        name: metadata.name.clone(),
        network: network_label(&metadata.network),
        snapshot,
    }
}

/// Chain id for a network name (case-insensitive)
///
/// Unknown names fall back to `DEFAULT_CHAIN_ID` with a warning.
pub fn chain_id_for(network: &str) -> &'static str {
    match Network::from_name(network) {
        Some(network) => network.chain_id(),
        None => {
            warn!(
                "Unknown network '{}', falling back to chain id {}",
                network, DEFAULT_CHAIN_ID
            );
            DEFAULT_CHAIN_ID
        }
    }
}

/// Capitalized network label ("starknet" -> "Starknet")
fn network_label(network: &str) -> String {
    if let Some(known) = Network::from_name(network) {
        return known.display_name().to_string();
    }

    let lower = network.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
