//! Snapshot document schema.
//!
//! This is the structure written to disk and consumed by the claim tooling.
//! Field order is part of the format; keep it alphabetical.

use crate::utils::config::{DEFAULT_CLAIM_CONTRACT, DEFAULT_ENTRYPOINT};
use serde::{Deserialize, Serialize};

/// `[address, [hex token ids...]]`
pub type SnapshotEntry = (String, Vec<String>);

/// Top-level snapshot document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub block_height: u64,

    /// Hex chain id
    pub chain_id: String,

    pub claim_contract: String,

    /// Collection contract the holders were read from
    pub contract_address: String,

    pub description: String,

    /// Claim contract entrypoint
    pub entrypoint: String,

    pub name: String,

    /// Capitalized network name
    pub network: String,

    /// Holders sorted by address, ids sorted numerically
    pub snapshot: Vec<SnapshotEntry>,
}

impl SnapshotDocument {
    pub fn holder_count(&self) -> usize {
        self.snapshot.len()
    }

    pub fn token_count(&self) -> usize {
        self.snapshot.iter().map(|(_, ids)| ids.len()).sum()
    }
}

/// Everything in a snapshot document except the holder list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMetadata {
    pub block_height: u64,
    /// Network name, matched case-insensitively
    pub network: String,
    pub claim_contract: String,
    pub contract_address: String,
    pub description: String,
    pub entrypoint: String,
    pub name: String,
}

impl SnapshotMetadata {
    /// Metadata with the default description, claim contract and entrypoint
    pub fn new(name: impl Into<String>, network: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            block_height: 0,
            network: network.into(),
            claim_contract: DEFAULT_CLAIM_CONTRACT.to_string(),
            contract_address: DEFAULT_CLAIM_CONTRACT.to_string(),
            description: format!("{} snapshot", name),
            entrypoint: DEFAULT_ENTRYPOINT.to_string(),
            name,
        }
    }

    pub fn with_contract_address(mut self, contract_address: impl Into<String>) -> Self {
        self.contract_address = contract_address.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_block_height(mut self, block_height: u64) -> Self {
        self.block_height = block_height;
        self
    }

    pub fn with_claim_contract(mut self, claim_contract: impl Into<String>) -> Self {
        self.claim_contract = claim_contract.into();
        self
    }
}
