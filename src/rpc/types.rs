//! Response types for the NFT indexing API.
//!
//! The API answers either `{ "result": { "nfts": [...], "nextPageKey": ... } }`
//! or the same payload unwrapped at the top level, and reports failures as
//! `{ "error": ... }`. [`normalize_page`] folds all of these into [`NftPage`]
//! once per response so nothing downstream has to care.

use crate::utils::config::{NEXT_PAGE_FIELD, NFTS_FIELD};
use crate::utils::error::FetchError;

/// One page of NFT entries, after shape normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NftPage {
    /// Raw NFT entries (field names vary, see collector)
    pub nfts: Vec<serde_json::Value>,

    /// Cursor for the next page; `None` when the API reports no more pages
    pub next_page_key: Option<String>,
}

/// Normalize a raw API document into a page
///
/// # Errors
/// * `FetchError::Upstream` - the document carries a non-null `error` field
/// * `FetchError::InvalidResponse` - the document is not shaped like a page
pub fn normalize_page(document: serde_json::Value) -> Result<NftPage, FetchError> {
    let serde_json::Value::Object(mut root) = document else {
        return Err(FetchError::InvalidResponse(
            "Response must be a JSON object".to_string(),
        ));
    };

    if let Some(error) = root.get("error").filter(|e| !e.is_null()) {
        let message = match error {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(FetchError::Upstream(message));
    }

    // Unwrap `result` if present
    let mut data = match root.remove("result") {
        Some(serde_json::Value::Object(inner)) => inner,
        Some(other) => {
            return Err(FetchError::InvalidResponse(format!(
                "Unexpected result type: {}",
                json_type_name(&other)
            )))
        }
        None => root,
    };

    let nfts = match data.remove(NFTS_FIELD) {
        Some(serde_json::Value::Array(items)) => items,
        Some(serde_json::Value::Null) | None => Vec::new(),
        Some(other) => {
            return Err(FetchError::InvalidResponse(format!(
                "Expected `{}` to be an array, got {}",
                NFTS_FIELD,
                json_type_name(&other)
            )))
        }
    };

    let next_page_key = match data.remove(NEXT_PAGE_FIELD) {
        Some(serde_json::Value::String(key)) if !key.is_empty() => Some(key),
        _ => None,
    };

    Ok(NftPage {
        nfts,
        next_page_key,
    })
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
