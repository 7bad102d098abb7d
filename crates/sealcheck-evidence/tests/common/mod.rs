//! Bundle fixtures for integration tests.

#![allow(dead_code)]

use sealcheck_evidence::{compute_head, CanonScheme, ChainRecord, SENTINEL_DIGEST};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct BundleFixture {
    pub dir: TempDir,
    pub files: BTreeMap<String, Vec<u8>>,
    pub records: Vec<ChainRecord>,
    pub declare_head: bool,
}

impl BundleFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            files: BTreeMap::new(),
            records: Vec::new(),
            declare_head: true,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn file(mut self, rel: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files.insert(rel.to_string(), content.into());
        self
    }

    pub fn chain(mut self, payloads: &[Value], canon: CanonScheme) -> Self {
        self.records = build_chain(payloads, canon);
        self
    }

    pub fn without_declared_head(mut self) -> Self {
        self.declare_head = false;
        self
    }

    pub fn head(&self) -> Option<String> {
        self.records.last().map(|r| r.head.clone())
    }

    /// Write files, manifest and (if any records) the chain log.
    pub fn write(self) -> Self {
        let mut digests = serde_json::Map::new();
        for (rel, content) in &self.files {
            let path = self.dir.path().join(rel);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).unwrap();
            }
            std::fs::write(&path, content).unwrap();
            digests.insert(rel.clone(), json!(sealcheck_evidence::crypto::sha256_hex(content)));
        }

        let chain_head = if self.declare_head { self.head() } else { None };
        let manifest = json!({
            "bundle": "case-2024-017",
            "files": digests,
            "chain_head": chain_head,
        });
        std::fs::write(
            self.dir.path().join("manifest.json"),
            serde_json::to_vec_pretty(&manifest).unwrap(),
        )
        .unwrap();

        if !self.records.is_empty() {
            write_chain(&self.chain_path(), &self.records);
        }
        self
    }

    pub fn chain_path(&self) -> PathBuf {
        self.dir.path().join("audit_chain.jsonl")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.path().join("manifest.json")
    }
}

pub fn build_chain(payloads: &[Value], canon: CanonScheme) -> Vec<ChainRecord> {
    let mut prev = SENTINEL_DIGEST.to_string();
    payloads
        .iter()
        .enumerate()
        .map(|(i, payload)| {
            let head = compute_head(&prev, payload, canon).unwrap();
            ChainRecord {
                i: i as u64,
                prev: std::mem::replace(&mut prev, head.clone()),
                head,
                payload: payload.clone(),
            }
        })
        .collect()
}

pub fn write_chain(path: &Path, records: &[ChainRecord]) {
    let mut out = String::new();
    for record in records {
        out.push_str(&serde_json::to_string(record).unwrap());
        out.push('\n');
    }
    std::fs::write(path, out).unwrap();
}

pub fn sample_payloads() -> Vec<Value> {
    vec![
        json!({"event": "intake", "case": "C-17", "items": 3}),
        json!({"event": "hash", "path": "evidence/disk.img", "algo": "sha256"}),
        json!({"event": "seal", "by": {"name": "Zoë", "role": "analyst"}, "ratio": 0.25}),
        json!({"event": "export", "targets": ["s3", "tape"], "ok": true, "note": null}),
    ]
}
