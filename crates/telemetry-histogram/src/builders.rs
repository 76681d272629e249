//! Construction of histograms from raw submissions
//!
//! Submissions arrive in one of two shapes:
//!
//! - **Dense**: one count per bucket, optionally followed by the five summary
//!   statistics (sum, log-sum, log-sum-squared, min, max), which are dropped.
//! - **Sparse**: a `values` map from stringified bucket index to count; any
//!   bucket not mentioned has a count of zero.

use crate::types::HistogramValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use telemetry_core::{Error, HistogramDefinition, Result, TRAILING_STATISTICS};
use tracing::{debug, trace};

/// Raw histogram data as submitted
///
/// Deserializes from either a JSON array (dense) or an object carrying a
/// `values` map (sparse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawHistogram {
    /// Counts in bucket order, possibly followed by summary statistics
    Dense(Vec<f64>),
    /// Counts keyed by bucket index
    Sparse(SparseCounts),
}

impl From<Vec<f64>> for RawHistogram {
    fn from(counts: Vec<f64>) -> Self {
        Self::Dense(counts)
    }
}

impl From<SparseCounts> for RawHistogram {
    fn from(sparse: SparseCounts) -> Self {
        Self::Sparse(sparse)
    }
}

/// Sparse submission: bucket index (as a string) to count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseCounts {
    pub values: BTreeMap<String, f64>,
}

impl SparseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the count of the bucket at `index`
    pub fn with_count(mut self, index: usize, count: f64) -> Self {
        self.values.insert(index.to_string(), count);
        self
    }
}

impl FromIterator<(usize, f64)> for SparseCounts {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |sparse, (index, count)| sparse.with_count(index, count))
    }
}

impl HistogramValue {
    /// Build a histogram from a raw submission and its definition
    ///
    /// # Errors
    ///
    /// `MalformedInput` when a dense sequence has neither `n_buckets` nor
    /// `n_buckets + 5` elements, when a sparse key is not an index inside the
    /// layout, or when a count is negative or not finite.
    pub fn new(
        name: impl Into<String>,
        raw: RawHistogram,
        definition: Arc<HistogramDefinition>,
    ) -> Result<Self> {
        match raw {
            RawHistogram::Dense(values) => Self::from_dense(name, &values, definition),
            RawHistogram::Sparse(sparse) => Self::from_sparse(name, &sparse, definition),
        }
    }

    /// Build a histogram from counts in bucket order
    pub fn from_dense(
        name: impl Into<String>,
        values: &[f64],
        definition: Arc<HistogramDefinition>,
    ) -> Result<Self> {
        let name = name.into();
        let counts = align_dense(values, definition.n_buckets())?;
        debug!(
            name = %name,
            kind = %definition.kind(),
            n_buckets = counts.len(),
            "Built histogram from dense counts"
        );
        Ok(Self::from_parts(name, definition, counts))
    }

    /// Build a histogram from counts keyed by bucket index
    ///
    /// Keys are positions (`"3"` is the fourth bucket), not lower boundaries.
    /// The two coincide for `boolean`, `flag`, `count` and `enumerated`
    /// layouts but not for `linear` or `exponential` ones. A key outside the
    /// layout is rejected rather than dropped.
    pub fn from_sparse(
        name: impl Into<String>,
        sparse: &SparseCounts,
        definition: Arc<HistogramDefinition>,
    ) -> Result<Self> {
        let name = name.into();
        let counts = align_sparse(sparse, definition.n_buckets())?;
        debug!(
            name = %name,
            kind = %definition.kind(),
            present = sparse.values.len(),
            n_buckets = counts.len(),
            "Built histogram from sparse counts"
        );
        Ok(Self::from_parts(name, definition, counts))
    }
}

fn align_dense(values: &[f64], n_buckets: usize) -> Result<Vec<f64>> {
    let counts = if values.len() == n_buckets {
        values
    } else if values.len() == n_buckets + TRAILING_STATISTICS {
        trace!(
            statistics = ?&values[n_buckets..],
            "Dropping trailing summary statistics"
        );
        &values[..n_buckets]
    } else {
        return Err(Error::dense_length(n_buckets, values.len()));
    };

    for (position, &count) in counts.iter().enumerate() {
        check_count(position, count)?;
    }
    Ok(counts.to_vec())
}

fn align_sparse(sparse: &SparseCounts, n_buckets: usize) -> Result<Vec<f64>> {
    let mut counts = vec![0.0; n_buckets];

    for (key, &count) in &sparse.values {
        let index: i64 = key.trim().parse().map_err(|_| {
            Error::MalformedInput(format!("Bucket key {key:?} is not an integer index"))
        })?;
        let position = usize::try_from(index)
            .ok()
            .filter(|&p| p < n_buckets)
            .ok_or_else(|| Error::bucket_out_of_range(index, n_buckets))?;

        check_count(position, count)?;
        counts[position] += count;
    }
    Ok(counts)
}

fn check_count(position: usize, count: f64) -> Result<()> {
    if count.is_finite() && count >= 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_count(position, count))
    }
}
