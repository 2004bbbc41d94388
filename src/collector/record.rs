//! Field extraction for raw NFT entries.
//!
//! Upstream response shapes disagree on field names, so each field has an
//! ordered list of aliases (see `utils::config`). The first alias carrying a
//! non-null value wins; records inside one page may use different aliases.

use crate::canonical::RawTokenId;
use crate::utils::config::{OWNER_FIELD_NAMES, TOKEN_ID_FIELD_NAMES};

/// Owner and token id pulled out of one NFT entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRecord {
    pub owner: Option<String>,
    pub token_id: Option<RawTokenId>,
}

impl RawRecord {
    pub fn new(owner: impl Into<String>, token_id: impl Into<RawTokenId>) -> Self {
        Self {
            owner: Some(owner.into()),
            token_id: Some(token_id.into()),
        }
    }

    /// Extract a record from an API entry using the alias lists
    pub fn from_json(entry: &serde_json::Value) -> Self {
        let owner = lookup_field(entry, OWNER_FIELD_NAMES)
            .and_then(|value| value.as_str())
            .map(str::trim)
            .filter(|owner| !owner.is_empty())
            .map(str::to_string);

        let token_id = lookup_field(entry, TOKEN_ID_FIELD_NAMES).and_then(RawTokenId::from_json);

        Self { owner, token_id }
    }

    pub fn is_complete(&self) -> bool {
        self.owner.is_some() && self.token_id.is_some()
    }
}

/// Return the value of the first alias present (and non-null) on the entry
pub fn lookup_field<'a>(
    entry: &'a serde_json::Value,
    aliases: &[&str],
) -> Option<&'a serde_json::Value> {
    let object = entry.as_object()?;
    aliases
        .iter()
        .filter_map(|name| object.get(*name))
        .find(|value| !value.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alias_priority() {
        let entry = json!({ "owner": "0xb", "ownerAddress": "0xa", "id": 3, "tokenId": "0x1" });
        let record = RawRecord::from_json(&entry);

        assert_eq!(record.owner.as_deref(), Some("0xa"));
        assert_eq!(record.token_id, Some(RawTokenId::Text("0x1".to_string())));
    }

    #[test]
    fn test_fallback_aliases() {
        let entry = json!({ "owner_address": "0xa", "token_id": 5 });
        let record = RawRecord::from_json(&entry);
        assert_eq!(record.owner.as_deref(), Some("0xa"));
        assert_eq!(record.token_id, Some(RawTokenId::Integer(5)));

        let entry = json!({ "owner": "0xc", "id": "9" });
        let record = RawRecord::from_json(&entry);
        assert_eq!(record.owner.as_deref(), Some("0xc"));
        assert_eq!(record.token_id, Some(RawTokenId::Text("9".to_string())));
    }

    #[test]
    fn test_null_alias_falls_through() {
        let entry = json!({ "ownerAddress": null, "owner": "0xc", "tokenId": 1 });
        let record = RawRecord::from_json(&entry);
        assert_eq!(record.owner.as_deref(), Some("0xc"));
    }

    #[test]
    fn test_missing_fields() {
        let record = RawRecord::from_json(&json!({ "name": "Punk #1" }));
        assert!(!record.is_complete());
        assert_eq!(record, RawRecord::default());

        let record = RawRecord::from_json(&json!("not an object"));
        assert_eq!(record, RawRecord::default());

        let record = RawRecord::from_json(&json!({ "owner": "", "tokenId": 1 }));
        assert!(record.owner.is_none());
    }
}
