//! Error types for telemetry histogram handling
//!
//! Provides a unified error type for all telemetry crates.

use crate::kind::HistogramKind;
use thiserror::Error;

/// Core error type for histogram reconstruction and analysis
#[derive(Error, Debug)]
pub enum Error {
    /// The schema reported a kind outside the recognized set
    #[error("Unsupported histogram kind: {0}")]
    UnsupportedKind(String),

    /// Operation is not defined for this histogram kind
    #[error("Invalid kind: {operation} is not supported for {kind} histograms")]
    InvalidKind {
        kind: HistogramKind,
        operation: &'static str,
    },

    /// Invalid argument provided to a query
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two histograms with different bucket layouts were combined
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Raw submission data does not fit the definition
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Bucket layout or boundaries cannot form a valid definition
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    /// Histogram name not present in the resolved schema
    #[error("Unknown histogram {name} at revision {revision}")]
    UnknownHistogram { name: String, revision: String },

    /// Failure reported by the schema source
    #[error("Schema source error: {0}")]
    Source(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for a percentile outside [0, 100]
    pub fn invalid_percentile(p: f64) -> Self {
        Self::InvalidArgument(format!("Percentile {p} must be in [0, 100]"))
    }

    /// Create an error for a dense sequence of the wrong length
    pub fn dense_length(n_buckets: usize, actual: usize) -> Self {
        Self::MalformedInput(format!(
            "Dense sequence of length {actual} does not fit {n_buckets} buckets (expected {n_buckets} or {})",
            n_buckets + crate::TRAILING_STATISTICS
        ))
    }

    /// Create an error for a sparse bucket index outside the layout
    pub fn bucket_out_of_range(index: i64, n_buckets: usize) -> Self {
        Self::MalformedInput(format!(
            "Bucket index {index} is outside 0..{n_buckets}"
        ))
    }

    /// Create an error for a negative or non-finite count
    pub fn invalid_count(position: usize, count: f64) -> Self {
        Self::MalformedInput(format!(
            "Count {count} at bucket position {position} must be finite and non-negative"
        ))
    }

    /// Create an error for a definition parameter that is required but absent
    pub fn missing_field(kind: HistogramKind, field: &str) -> Self {
        Self::InvalidDefinition(format!("{kind} histograms require `{field}`"))
    }
}
