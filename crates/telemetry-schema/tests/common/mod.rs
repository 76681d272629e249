//! Common test utilities for telemetry-schema tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use telemetry_schema::{SchemaEntries, SchemaSource};

/// Histograms declared by the fixture revision, in schema-document form
pub const SCHEMA_JSON: &str = r#"{
    "GC_MS": {
        "kind": "exponential",
        "high": 10000,
        "n_buckets": 50,
        "description": "Time spent running JS GC (ms)"
    },
    "PAGE_LOAD_MS": {
        "kind": "linear",
        "low": 1,
        "high": "100",
        "n_buckets": 12
    },
    "HTTPCONNMGR_USED_SPECULATIVE_CONN": {
        "kind": "boolean"
    },
    "A11Y_INSTANTIATED_FLAG": {
        "kind": "flag"
    },
    "CRASH_COUNT": {
        "kind": "count"
    },
    "NETWORK_PROTOCOL": {
        "kind": "enumerated",
        "n_values": 8
    },
    "LEGACY_TIMER": {
        "kind": "keyed-timer"
    }
}"#;

/// Revision under which the fixture schema is served
pub const REVISION: &str = "https://hg.example.org/central/rev/0123abcd";

pub fn schema_entries() -> SchemaEntries {
    serde_json::from_str(SCHEMA_JSON).unwrap()
}

/// Source serving the fixture schema that records how often it was asked
#[derive(Default)]
pub struct CountingSource {
    fetches: AtomicUsize,
    delay: Option<Duration>,
}

impl CountingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` inside every fetch, widening the window for races
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            delay: Some(delay),
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl SchemaSource for CountingSource {
    fn fetch(&self, revision: &str) -> anyhow::Result<SchemaEntries> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        if revision != REVISION {
            anyhow::bail!("unknown revision {revision}");
        }
        Ok(schema_entries())
    }
}

/// Route tracing output through the test harness, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
