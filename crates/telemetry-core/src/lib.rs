//! Core types for schema-driven telemetry histograms
//!
//! This crate provides the pieces every other telemetry crate builds on: the
//! unified error type, the closed set of histogram kinds, and the bucket
//! layout of a histogram as described by its schema entry.
//!
//! # Example
//!
//! ```rust
//! use telemetry_core::{HistogramDefinition, HistogramKind, SchemaEntry};
//!
//! let entry = SchemaEntry::ranged("exponential", 1, 100, 10);
//! let definition = HistogramDefinition::from_entry(&entry).unwrap();
//!
//! assert_eq!(definition.kind(), HistogramKind::Exponential);
//! assert_eq!(definition.n_buckets(), 10);
//! assert_eq!(definition.ranges()[..4], [0.0, 1.0, 2.0, 3.0]);
//! ```

pub mod definition;
pub mod error;
pub mod kind;
pub mod layout;

// Re-export core types
pub use definition::{HistogramDefinition, SchemaEntry};
pub use error::{Error, Result};
pub use kind::HistogramKind;

/// Number of summary statistics (sum, log-sum, log-sum-squared, min, max)
/// that may trail the bucket counts of a dense submission
pub const TRAILING_STATISTICS: usize = 5;

/// Prefix marking a histogram recorded during startup
pub const STARTUP_PREFIX: &str = "STARTUP_";

/// Name under which a histogram is declared in the schema
///
/// Startup histograms share the definition of their regular counterpart.
pub fn schema_name(name: &str) -> &str {
    name.strip_prefix(STARTUP_PREFIX).unwrap_or(name)
}
