//! Schema-driven telemetry histogram analysis
//!
//! Facade over the workspace crates:
//!
//! - [`core`]: histogram kinds, bucket layouts, definitions and errors
//! - [`schema`]: revision-keyed schema resolution with single-flight caching
//! - [`histogram`]: reconstruction, percentiles and combination of submissions
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use telemetry_stats::{
//!     HistogramValue, RawHistogram, ResolverConfig, SchemaEntry, SchemaResolver, StaticSource,
//! };
//!
//! let entries = HashMap::from([(
//!     "CYCLE_COLLECTOR".to_string(),
//!     SchemaEntry::ranged("exponential", 1, 10000, 50),
//! )]);
//! let resolver = SchemaResolver::with_config(
//!     StaticSource::new().with_revision("tip", entries),
//!     ResolverConfig::default().with_default_revision("tip"),
//! );
//!
//! let mut counts = vec![0.0; 50];
//! counts[0] = 3.0;
//! counts[9] = 1.0;
//! let hist = HistogramValue::resolve("CYCLE_COLLECTOR", RawHistogram::Dense(counts), &resolver, None)
//!     .unwrap();
//! assert_eq!(hist.total_count(), 4.0);
//! ```

pub use telemetry_core as core;
pub use telemetry_histogram as histogram;
pub use telemetry_schema as schema;

pub use telemetry_core::{Error, HistogramDefinition, HistogramKind, Result, SchemaEntry};
pub use telemetry_histogram::{Bucket, HistogramReading, HistogramValue, RawHistogram, SparseCounts};
pub use telemetry_schema::{
    definitions_uri, CachePolicy, CacheStats, ResolverConfig, Schema, SchemaCache, SchemaEntries,
    SchemaResolver, SchemaSource, StaticSource, DEFAULT_REVISION,
};
