//! Histogram schema resolution
//!
//! A histogram submission only carries a name and raw counts; its bucket
//! layout lives in a schema document that changes between revisions. This
//! crate turns `(name, revision)` into a [`HistogramDefinition`] through an
//! injectable [`SchemaSource`], memoizing each revision in a [`SchemaCache`].
//!
//! # Key Features
//!
//! - **Pluggable sources**: anything implementing `SchemaSource`, including closures
//! - **Single-flight caching**: parallel lookups of one revision share one fetch
//! - **Bounded memory**: LRU eviction by revision count
//! - **Startup aliases**: `STARTUP_` names resolve to their regular definition
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use telemetry_core::{HistogramKind, SchemaEntry};
//! use telemetry_schema::{ResolverConfig, SchemaResolver, StaticSource};
//!
//! let entries = HashMap::from([(
//!     "GC_MS".to_string(),
//!     SchemaEntry::ranged("exponential", 1, 10000, 50),
//! )]);
//! let source = StaticSource::new().with_revision("tip", entries);
//! let resolver = SchemaResolver::with_config(
//!     source,
//!     ResolverConfig::default().with_default_revision("tip"),
//! );
//!
//! let definition = resolver.definition("STARTUP_GC_MS", None).unwrap();
//! assert_eq!(definition.kind(), HistogramKind::Exponential);
//! assert_eq!(definition.n_buckets(), 50);
//! ```
//!
//! [`HistogramDefinition`]: telemetry_core::HistogramDefinition

pub mod cache;
pub mod config;
pub mod resolver;
pub mod source;

pub use cache::{CachePolicy, CacheStats, SchemaCache};
pub use config::{definitions_uri, ResolverConfig, DEFAULT_REVISION};
pub use resolver::SchemaResolver;
pub use source::{Schema, SchemaEntries, SchemaSource, StaticSource};
