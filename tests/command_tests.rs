mod common;

use common::{nft_entries, page, rate_limited, ScriptedFetcher};
use holder_snapshot::canonical::Network;
use holder_snapshot::collector::CollectorState;
use holder_snapshot::commands::{
    run_holders, run_token_ids, validate_snapshot_file, HoldersArgs, SourceArgs, TokenIdsArgs,
};
use holder_snapshot::output::{read_snapshot, TokenIdFormat};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::Path;

fn source() -> SourceArgs {
    SourceArgs {
        api_url: "https://api.test/getCollectionNFTs".to_string(),
        contract_address: "0x04A3F".to_string(),
        start_token_id: None,
        end_token_id: None,
        page_size: 100,
        delay_ms: 0,
        resume_page_key: None,
    }
}

fn holders_args(dir: &Path) -> HoldersArgs {
    HoldersArgs {
        source: source(),
        name: "Blobert".to_string(),
        network: Network::Starknet,
        output: dir.join("blobert_snapshot_starknet.json"),
        description: None,
        block_height: Some(42),
        claim_contract: None,
    }
}

#[test]
fn test_holders_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let args = holders_args(dir.path());
    let fetcher = ScriptedFetcher::new(vec![
        page(nft_entries(0, 100), Some("k1")),
        page(nft_entries(100, 100), Some("k2")),
        page(vec![], None),
    ]);

    let report = run_holders(&fetcher, &args).unwrap();

    assert_eq!(report.state, CollectorState::Done);
    assert_eq!(report.holders, 10);
    assert_eq!(report.tokens, 200);
    assert_eq!(report.pages, 3);
    assert_eq!(report.resume_page_key, None);

    let snapshot = read_snapshot(&args.output).unwrap();
    assert_eq!(snapshot.name, "Blobert");
    assert_eq!(snapshot.description, "Blobert snapshot");
    assert_eq!(snapshot.contract_address, "0x04a3f");
    assert_eq!(snapshot.block_height, 42);
    assert_eq!(snapshot.holder_count(), 10);
    assert_eq!(snapshot.token_count(), 200);
    assert_eq!(snapshot.snapshot[0].0, "0x1");
    assert_eq!(&snapshot.snapshot[0].1[..3], ["0x0", "0xa", "0x14"]);

    validate_snapshot_file(&args.output).unwrap();
}

#[test]
fn test_holders_partial_run_keeps_records() {
    let dir = tempfile::tempdir().unwrap();
    let args = holders_args(dir.path());
    let fetcher = ScriptedFetcher::new(vec![page(nft_entries(0, 50), Some("k1")), rate_limited()]);

    let report = run_holders(&fetcher, &args).unwrap();

    assert_eq!(report.state, CollectorState::Failed);
    assert_eq!(report.tokens, 50);
    assert_eq!(report.resume_page_key.as_deref(), Some("k1"));
    assert!(args.output.exists());
}

#[test]
fn test_holders_resume_merges_partial_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = holders_args(dir.path());

    let first = ScriptedFetcher::new(vec![page(nft_entries(0, 50), Some("k1")), rate_limited()]);
    let report = run_holders(&first, &args).unwrap();
    assert_eq!(report.resume_page_key.as_deref(), Some("k1"));

    args.source.resume_page_key = report.resume_page_key;
    let second = ScriptedFetcher::new(vec![page(nft_entries(50, 50), None)]);
    let report = run_holders(&second, &args).unwrap();

    assert_eq!(second.param(0, "pageKey").as_deref(), Some("k1"));
    assert_eq!(report.state, CollectorState::Done);
    assert_eq!(report.holders, 10);
    assert_eq!(report.tokens, 100);
    assert_eq!(report.resume_page_key, None);

    let snapshot = read_snapshot(&args.output).unwrap();
    assert_eq!(snapshot.token_count(), 100);
    assert_eq!(&snapshot.snapshot[0].1[..6], ["0x0", "0xa", "0x14", "0x1e", "0x28", "0x32"]);
    validate_snapshot_file(&args.output).unwrap();
}

#[test]
fn test_holders_resume_rejects_snapshot_of_other_contract() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = holders_args(dir.path());

    let first = ScriptedFetcher::new(vec![page(nft_entries(0, 10), Some("k1")), rate_limited()]);
    run_holders(&first, &args).unwrap();

    args.source.contract_address = "0xbeef".to_string();
    args.source.resume_page_key = Some("k1".to_string());
    let second = ScriptedFetcher::new(vec![page(nft_entries(10, 10), None)]);

    let err = run_holders(&second, &args).unwrap_err();

    assert!(err.to_string().contains("not 0xbeef"));
    assert_eq!(second.calls(), 0);
    assert_eq!(read_snapshot(&args.output).unwrap().token_count(), 10);
}

#[test]
fn test_holders_with_no_results_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = holders_args(dir.path());
    let fetcher = ScriptedFetcher::new(vec![page(vec![], None)]);

    let err = run_holders(&fetcher, &args).unwrap_err();

    assert!(err.to_string().contains("No holders found"));
    assert!(!args.output.exists());
}

#[test]
fn test_holders_mixed_field_aliases() {
    let dir = tempfile::tempdir().unwrap();
    let args = holders_args(dir.path());
    let fetcher = ScriptedFetcher::new(vec![Ok(json!({
        "result": {
            "nfts": [
                { "ownerAddress": "0x000ABC", "tokenId": "0x1a" },
                { "owner_address": "0xabc", "token_id": 26 },
                { "owner": "0x0def", "id": "7" },
                { "tokenId": 9 }
            ],
            "nextPageKey": null
        }
    }))]);

    let report = run_holders(&fetcher, &args).unwrap();

    assert_eq!(report.holders, 2);
    assert_eq!(report.tokens, 2);
    assert_eq!(report.skipped_records, 1);

    let snapshot = read_snapshot(&args.output).unwrap();
    assert_eq!(
        snapshot.snapshot,
        vec![
            ("0xabc".to_string(), vec!["0x1a".to_string()]),
            ("0xdef".to_string(), vec!["0x7".to_string()]),
        ]
    );
}

#[test]
fn test_token_ids_are_sorted_and_unique() {
    let dir = tempfile::tempdir().unwrap();
    let args = TokenIdsArgs {
        source: source(),
        output: dir.path().join("ids.csv"),
        format: TokenIdFormat::Csv,
    };
    let fetcher = ScriptedFetcher::new(vec![
        Ok(json!({ "nfts": [{ "tokenId": 30 }, { "tokenId": "0x2" }], "nextPageKey": "k1" })),
        Ok(json!({ "nfts": [{ "tokenId": "2" }, { "tokenId": 10 }, { "tokenId": -1 }] })),
    ]);

    let report = run_token_ids(&fetcher, &args).unwrap();

    assert_eq!(report.tokens, 3);
    assert_eq!(report.invalid_ids, 1);
    assert_eq!(std::fs::read_to_string(&args.output).unwrap(), "2,10,30\n");
}

#[test]
fn test_token_ids_partial_run_reports_resume_key() {
    let dir = tempfile::tempdir().unwrap();
    let args = TokenIdsArgs {
        source: source(),
        output: dir.path().join("ids.txt"),
        format: TokenIdFormat::Json,
    };
    let fetcher = ScriptedFetcher::new(vec![page(nft_entries(0, 20), Some("k1")), rate_limited()]);

    let report = run_token_ids(&fetcher, &args).unwrap();

    assert_eq!(report.state, CollectorState::Failed);
    assert_eq!(report.tokens, 20);
    assert_eq!(report.resume_page_key.as_deref(), Some("k1"));
    assert!(args.output.exists());
}

#[test]
fn test_token_ids_complete_run_has_no_resume_key() {
    let dir = tempfile::tempdir().unwrap();
    let args = TokenIdsArgs {
        source: source(),
        output: dir.path().join("ids.txt"),
        format: TokenIdFormat::Txt,
    };
    let fetcher = ScriptedFetcher::new(vec![page(nft_entries(0, 5), None)]);

    let report = run_token_ids(&fetcher, &args).unwrap();

    assert_eq!(report.state, CollectorState::Done);
    assert_eq!(report.resume_page_key, None);
}

#[test]
fn test_token_ids_with_no_results_fails() {
    let dir = tempfile::tempdir().unwrap();
    let args = TokenIdsArgs {
        source: source(),
        output: dir.path().join("ids.txt"),
        format: TokenIdFormat::Txt,
    };
    let fetcher = ScriptedFetcher::new(vec![rate_limited()]);

    assert!(run_token_ids(&fetcher, &args).is_err());
    assert!(!args.output.exists());
}

#[test]
fn test_validate_rejects_unsorted_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(
        &path,
        serde_json::to_string(&json!({
            "block_height": 0,
            "chain_id": "0x534e5f4d41494e",
            "claim_contract": "0x1",
            "contract_address": "0x1",
            "description": "bad",
            "entrypoint": "claim_from_forwarder",
            "name": "bad",
            "network": "Starknet",
            "snapshot": [["0xb", ["0x1"]], ["0xa", ["0x2"]]]
        }))
        .unwrap(),
    )
    .unwrap();

    assert!(validate_snapshot_file(&path).is_err());
}
