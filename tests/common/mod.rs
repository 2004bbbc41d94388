//! Shared test helpers.

#![allow(dead_code)]

use holder_snapshot::rpc::Fetch;
use holder_snapshot::utils::error::FetchError;
use serde_json::{json, Value};
use std::cell::RefCell;

/// Replays canned responses in order and records every query
pub struct ScriptedFetcher {
    responses: RefCell<Vec<Result<Value, FetchError>>>,
    pub queries: RefCell<Vec<Vec<(String, String)>>>,
}

impl ScriptedFetcher {
    pub fn new(responses: Vec<Result<Value, FetchError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().rev().collect()),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.queries.borrow().len()
    }

    pub fn param(&self, call: usize, name: &str) -> Option<String> {
        self.queries.borrow()[call]
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

impl Fetch for ScriptedFetcher {
    fn fetch(&self, _endpoint: &str, query: &[(String, String)]) -> Result<Value, FetchError> {
        self.queries.borrow_mut().push(query.to_vec());
        self.responses
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(FetchError::InvalidResponse("no more responses".into())))
    }
}

/// `count` NFT entries with token ids `start..start + count`, spread over 10 owners
pub fn nft_entries(start: u64, count: u64) -> Vec<Value> {
    (start..start + count)
        .map(|id| json!({ "ownerAddress": format!("0x{:03x}", id % 10 + 1), "tokenId": id }))
        .collect()
}

pub fn page(nfts: Vec<Value>, next_page_key: Option<&str>) -> Result<Value, FetchError> {
    Ok(json!({ "nfts": nfts, "nextPageKey": next_page_key }))
}

pub fn rate_limited() -> Result<Value, FetchError> {
    Err(FetchError::HttpStatus {
        status: 429,
        body: "Too Many Requests".to_string(),
    })
}
