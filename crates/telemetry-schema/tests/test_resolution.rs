//! Schema resolution end to end: fetch, cache, lookup

mod common;

use common::{init_tracing, CountingSource, REVISION};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use telemetry_core::{Error, HistogramDefinition, HistogramKind};
use telemetry_schema::{CachePolicy, ResolverConfig, SchemaCache, SchemaResolver};

fn resolver(source: CountingSource) -> SchemaResolver<CountingSource> {
    SchemaResolver::with_config(source, ResolverConfig::default().with_default_revision(REVISION))
}

#[test]
fn test_startup_alias_resolves_to_regular_definition() {
    init_tracing();
    let resolver = resolver(CountingSource::new());

    let regular = resolver.definition("GC_MS", None).unwrap();
    let startup = resolver.definition("STARTUP_GC_MS", None).unwrap();

    assert_eq!(regular.kind(), HistogramKind::Exponential);
    assert!(regular.same_layout(&startup));
    assert_eq!(resolver.source().fetches(), 1);
}

#[test]
fn test_parallel_lookups_fetch_once() {
    init_tracing();
    let resolver = resolver(CountingSource::with_delay(Duration::from_millis(50)));
    let names = ["GC_MS", "STARTUP_GC_MS", "PAGE_LOAD_MS", "CRASH_COUNT"];

    let definitions: Vec<Arc<HistogramDefinition>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let resolver = &resolver;
                scope.spawn(move || resolver.definition(names[i % names.len()], None))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect()
    });

    assert_eq!(definitions.len(), 8);
    assert!(definitions[0].same_layout(&definitions[1]));
    assert_eq!(definitions[2].n_buckets(), 12);
    assert_eq!(resolver.source().fetches(), 1);

    let stats = resolver.cache().stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
    assert_eq!(stats.entries, 1);
}

#[test]
fn test_failed_fetch_is_retried() {
    let resolver = resolver(CountingSource::new());

    let err = resolver.definition("GC_MS", Some("unknown-revision")).unwrap_err();
    assert!(matches!(err, Error::Source(_)));
    assert!(err.to_string().contains("unknown-revision"));

    assert!(resolver.definition("GC_MS", Some("unknown-revision")).is_err());
    assert_eq!(resolver.source().fetches(), 2);
    assert_eq!(resolver.cache().stats().entries, 0);
}

#[test]
fn test_unknown_and_unsupported_histograms() {
    let resolver = resolver(CountingSource::new());

    let err = resolver.definition("NOT_A_PROBE", None).unwrap_err();
    match err {
        Error::UnknownHistogram { name, revision } => {
            assert_eq!(name, "NOT_A_PROBE");
            assert_eq!(revision, REVISION);
        }
        other => panic!("unexpected error: {other}"),
    }

    // A bad entry does not poison the rest of the revision
    let err = resolver.definition("LEGACY_TIMER", None).unwrap_err();
    assert!(matches!(err, Error::UnsupportedKind(kind) if kind == "keyed-timer"));
    assert!(resolver.definition("CRASH_COUNT", None).is_ok());
    assert_eq!(resolver.source().fetches(), 1);
}

#[test]
fn test_resolvers_share_a_cache() {
    let cache = SchemaCache::new(CachePolicy::Unbounded);
    let config = ResolverConfig::default().with_default_revision(REVISION);
    let first = SchemaResolver::with_cache(CountingSource::new(), config.clone(), cache.clone());
    let second = SchemaResolver::with_cache(CountingSource::new(), config, cache);

    first.definition("GC_MS", None).unwrap();
    second.definition("GC_MS", None).unwrap();

    assert_eq!(first.source().fetches(), 1);
    assert_eq!(second.source().fetches(), 0);
}

#[test]
fn test_no_cache_policy_fetches_every_time() {
    let resolver = SchemaResolver::with_config(
        CountingSource::new(),
        ResolverConfig::default()
            .with_default_revision(REVISION)
            .with_cache_policy(CachePolicy::NoCache),
    );

    let a = resolver.definition("GC_MS", None).unwrap();
    let b = resolver.definition("GC_MS", None).unwrap();

    assert!(!Arc::ptr_eq(&a, &b));
    assert!(a.same_layout(&b));
    assert_eq!(resolver.source().fetches(), 2);
}

#[test]
fn test_config_from_json() {
    let config: ResolverConfig = serde_json::from_str(
        r#"{ "default_revision": "abc", "cache_policy": { "lru": { "max_entries": 4 } } }"#,
    )
    .unwrap();

    assert_eq!(config.default_revision, "abc");
    assert_eq!(config.cache_policy, CachePolicy::Lru { max_entries: 4 });
}
