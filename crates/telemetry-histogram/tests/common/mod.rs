//! Common test utilities for telemetry-histogram tests

#![allow(dead_code)]

use telemetry_schema::{ResolverConfig, SchemaEntries, SchemaResolver, StaticSource};

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

/// Resolver serving the fixture schema as its default revision
pub fn resolver() -> SchemaResolver<StaticSource> {
    SchemaResolver::with_config(
        StaticSource::new().with_revision(REVISION, schema_entries()),
        ResolverConfig::default().with_default_revision(REVISION),
    )
}

/// Route tracing output through the test harness, honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
