//! Fixed chain vectors produced by the Python bundle generator.
//!
//! The JSONL below is byte-for-byte what `json.dumps` writes for each row;
//! heads were computed there with `json.dumps(payload, sort_keys=True)`.

mod common;

use common::BundleFixture;
use sealcheck_evidence::chain::ChainRecords;
use sealcheck_evidence::{
    compute_head, verify_bundle_dir, verify_chain, CanonScheme, ChainRecord, ErrorCode,
    VerifyOptions, SENTINEL_DIGEST,
};
use serde_json::{json, Value};

const PY_HEADS: [&str; 3] = [
    "43c27969f107fe3378b36521903793577f2a5e55445f9b85e1d43be9928252b1",
    "e7278812c517cfc1a05f2be268b9da75840b6db2d2c66e90df1278a14f488f2a",
    "4ade5a6c099cfb9bc74fe992ca7f65b6d4702d7ee75dc3fe819127e56ec83335",
];

const JCS_HEADS: [&str; 3] = [
    "3c7b57151b121700a866fc836470fc5344f0cef33592b46bc1f39ea16fcc7754",
    "51d5202955862c9386450866e0f9d40c5f094456deffc7ed0bb3ef4bb6347442",
    "13320e5610441b12c219258d84538ca3ad6a9e9fa9eb91116e50e9ac648e04df",
];

const PY_CHAIN_LOG: &str = r#"{"i": 0, "prev": "0000000000000000000000000000000000000000000000000000000000000000", "head": "43c27969f107fe3378b36521903793577f2a5e55445f9b85e1d43be9928252b1", "payload": {"event": "intake", "case": "C-17", "items": 3}}
{"i": 1, "prev": "43c27969f107fe3378b36521903793577f2a5e55445f9b85e1d43be9928252b1", "head": "e7278812c517cfc1a05f2be268b9da75840b6db2d2c66e90df1278a14f488f2a", "payload": {"event": "seal", "by": {"name": "Zo\u00eb", "role": "analyst"}, "ratio": 0.25}}
{"i": 2, "prev": "e7278812c517cfc1a05f2be268b9da75840b6db2d2c66e90df1278a14f488f2a", "head": "4ade5a6c099cfb9bc74fe992ca7f65b6d4702d7ee75dc3fe819127e56ec83335", "payload": {"event": "export", "targets": ["s3", "tape"], "ok": true, "note": null}}
"#;

/// `json.loads` reads `-0` as the int 0 but `-0.0` / `-0E1` as floats.
const NEGATIVE_ZERO_LINE: &str = r#"{"i": 0, "prev": "0000000000000000000000000000000000000000000000000000000000000000", "head": "6d9cccaac568fe15e70d7973dfca5b56f5a4fc03d28d682455f2ea2948a9b6bf", "payload": {"n": -0, "f": -0.0, "l": [-0, 10, -0E1]}}"#;

fn payloads() -> Vec<Value> {
    vec![
        json!({"event": "intake", "case": "C-17", "items": 3}),
        json!({"event": "seal", "by": {"name": "Zoë", "role": "analyst"}, "ratio": 0.25}),
        json!({"event": "export", "targets": ["s3", "tape"], "ok": true, "note": null}),
    ]
}

fn heads(canon: CanonScheme) -> Vec<String> {
    let mut prev = SENTINEL_DIGEST.to_string();
    payloads()
        .iter()
        .map(|payload| {
            prev = compute_head(&prev, payload, canon).unwrap();
            prev.clone()
        })
        .collect()
}

#[test]
fn py_sort_keys_heads_match_generator() {
    assert_eq!(heads(CanonScheme::PySortKeys), PY_HEADS);
}

#[test]
fn jcs_heads_match_compact_sorted_form() {
    assert_eq!(heads(CanonScheme::Jcs), JCS_HEADS);
}

#[test]
fn generator_log_parses_and_verifies() {
    let records: Vec<ChainRecord> = ChainRecords::new(PY_CHAIN_LOG.as_bytes(), 1 << 20, 100)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].payload["by"]["name"], "Zoë");

    let head = verify_chain(&records, CanonScheme::PySortKeys).unwrap();
    assert_eq!(head, PY_HEADS[2]);

    let err = verify_chain(&records, CanonScheme::Jcs).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ChainHeadMismatch);
    assert!(err.message.contains("i=0"));
}

#[test]
fn generator_bundle_verifies_with_py_sort_keys() {
    let bundle = BundleFixture::new().file("a.txt", "hello").write();
    std::fs::write(bundle.chain_path(), PY_CHAIN_LOG).unwrap();
    let manifest = json!({
        "bundle": "case-2024-017",
        "files": {"a.txt": "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"},
        "chain_head": PY_HEADS[2],
    });
    std::fs::write(bundle.manifest_path(), manifest.to_string()).unwrap();

    let opts = VerifyOptions {
        canon: CanonScheme::PySortKeys,
        ..Default::default()
    };
    let report = verify_bundle_dir(bundle.path(), &opts).unwrap();
    let chain = report.chain.unwrap();
    assert_eq!(chain.records, 3);
    assert_eq!(chain.head, PY_HEADS[2]);

    let err = verify_bundle_dir(bundle.path(), &VerifyOptions::default()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ChainHeadMismatch);
}

#[test]
fn negative_zero_literals_hash_like_json_loads() {
    let records: Vec<ChainRecord> = ChainRecords::new(NEGATIVE_ZERO_LINE.as_bytes(), 1 << 20, 10)
        .collect::<Result<_, _>>()
        .unwrap();
    let head = verify_chain(&records, CanonScheme::PySortKeys).unwrap();
    assert_eq!(
        head,
        "6d9cccaac568fe15e70d7973dfca5b56f5a4fc03d28d682455f2ea2948a9b6bf"
    );
}
