// Shared fixtures for graph tests

#![allow(dead_code)]

use serde_json::Value;
use wikigraph_dataset::{Dataset, DocumentRecord, OutgoingLinks};

pub fn record(id: &str, links: Value) -> DocumentRecord {
    DocumentRecord::new(id, OutgoingLinks::from(links))
}

pub fn dataset(records: Vec<DocumentRecord>) -> Dataset {
    Dataset::from_records(records)
}

/// `{A: [B, C], B: [A]}` where C was never crawled
pub fn three_pages() -> Dataset {
    dataset(vec![
        record("A", serde_json::json!(["B", "C"])),
        record("B", serde_json::json!(["A"])),
    ])
}

/// `count` pages in a ring, each linking to the next one
pub fn ring(count: usize) -> Dataset {
    dataset(
        (0..count)
            .map(|i| {
                record(
                    &format!("n{}", i + 1),
                    serde_json::json!([format!("n{}", (i + 1) % count + 1)]),
                )
            })
            .collect(),
    )
}
