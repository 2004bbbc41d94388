//! Invariant checks for snapshot documents read back from disk.

use super::schema::SnapshotDocument;
use crate::canonical::{canonicalize, parse_token_text, to_hex, ChainKind, Network, TokenId};

/// Check a document against the snapshot format rules
///
/// Returns a list of human-readable problems; empty means the document is
/// well-formed. Checks:
/// - addresses are canonical for the document's network
/// - addresses are strictly ascending (sorted, no duplicates)
/// - token ids are minimal lower-case hex, strictly ascending per holder
pub fn validate_document(doc: &SnapshotDocument) -> Vec<String> {
    let mut issues = Vec::new();

    let kind = Network::from_name(&doc.network)
        .map(Network::chain_kind)
        .unwrap_or(ChainKind::FixedWidth);

    let mut previous_address: Option<&str> = None;

    for (index, (address, ids)) in doc.snapshot.iter().enumerate() {
        match canonicalize(address, kind) {
            Ok(canonical) if canonical.as_str() == address => {}
            Ok(canonical) => issues.push(format!(
                "entry {}: address {} is not canonical (expected {})",
                index, address, canonical
            )),
            Err(e) => issues.push(format!("entry {}: {}", index, e)),
        }

        if let Some(previous) = previous_address {
            if previous >= address.as_str() {
                issues.push(format!(
                    "entry {}: address {} is out of order or duplicated",
                    index, address
                ));
            }
        }
        previous_address = Some(address.as_str());

        if ids.is_empty() {
            issues.push(format!("entry {}: holder {} has no token ids", index, address));
        }

        let mut previous_id: Option<TokenId> = None;
        for raw in ids {
            let id = match parse_token_text(raw) {
                Ok(id) => id,
                Err(e) => {
                    issues.push(format!("entry {}: {}", index, e));
                    continue;
                }
            };

            if to_hex(id) != *raw {
                issues.push(format!(
                    "entry {}: token id {} is not minimal lower-case hex",
                    index, raw
                ));
            }

            if previous_id.is_some_and(|prev| prev >= id) {
                issues.push(format!(
                    "entry {}: token id {} is out of order or duplicated",
                    index, raw
                ));
            }
            previous_id = Some(id);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(network: &str, snapshot: Vec<(&str, Vec<&str>)>) -> SnapshotDocument {
        SnapshotDocument {
            block_height: 0,
            chain_id: "0x1".into(),
            claim_contract: "0x1".into(),
            contract_address: "0x1".into(),
            description: String::new(),
            entrypoint: "claim_from_forwarder".into(),
            name: "Test".into(),
            network: network.into(),
            snapshot: snapshot
                .into_iter()
                .map(|(a, ids)| (a.to_string(), ids.into_iter().map(String::from).collect()))
                .collect(),
        }
    }

    #[test]
    fn test_valid_document() {
        let d = doc("Starknet", vec![("0xa", vec!["0x1", "0x2"]), ("0xb", vec!["0x0"])]);
        assert!(validate_document(&d).is_empty());
    }

    #[test]
    fn test_detects_problems() {
        let d = doc(
            "Starknet",
            vec![("0xb", vec!["0x2", "0x1"]), ("0x0a", vec!["0X1"]), ("0xa", vec![])],
        );
        let issues = validate_document(&d);

        assert!(issues.iter().any(|i| i.contains("out of order")));
        assert!(issues.iter().any(|i| i.contains("not canonical")));
        assert!(issues.iter().any(|i| i.contains("not minimal")));
        assert!(issues.iter().any(|i| i.contains("no token ids")));
    }
}
