//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default timeout for API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Hard upper bound on the page size the indexing API accepts
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Default delay between page requests (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 200;

// Query and response field names used by the indexing API
pub const CONTRACT_PARAM: &str = "contractAddress";
pub const PAGE_SIZE_PARAM: &str = "pageSize";
pub const PAGE_KEY_PARAM: &str = "pageKey";
pub const START_TOKEN_PARAM: &str = "startTokenId";
pub const END_TOKEN_PARAM: &str = "endTokenId";
pub const NEXT_PAGE_FIELD: &str = "nextPageKey";
pub const NFTS_FIELD: &str = "nfts";

// Field names for record parsing (different response shapes use different names).
// Checked in order; the first one present wins.
pub const OWNER_FIELD_NAMES: &[&str] = &["ownerAddress", "owner_address", "owner"];
pub const TOKEN_ID_FIELD_NAMES: &[&str] = &["tokenId", "token_id", "id"];

// Snapshot document defaults
pub const DEFAULT_CHAIN_ID: &str = "0x1";
pub const DEFAULT_CLAIM_CONTRACT: &str = "0x1";
pub const DEFAULT_ENTRYPOINT: &str = "claim_from_forwarder";

/// Lower bounds of the default distribution buckets
pub const DEFAULT_BUCKET_BOUNDARIES: &[u64] = &[0, 5, 10, 20, 50, 100, 200, 500, 1000];

pub const DEFAULT_TOP_HOLDERS: usize = 100;

/// Number of holders listed in the text report
pub const REPORT_TOP_HOLDERS: usize = 10;

/// Token ids per line in CSV token id output
pub const CSV_IDS_PER_LINE: usize = 100;
