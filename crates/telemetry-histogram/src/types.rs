//! Core types for histogram representation

use std::fmt;
use std::sync::Arc;
use telemetry_core::{HistogramDefinition, HistogramKind};

/// A single bucket of a reconstructed histogram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bucket {
    /// Lower bound of the bucket, as declared by the definition
    pub lower: f64,
    /// Number of samples recorded in this bucket
    pub count: f64,
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, ...): count={}", self.lower, self.count)
    }
}

/// A telemetry histogram with counts aligned to its definition's boundaries
///
/// Values are immutable: combining two histograms produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramValue {
    /// Name as submitted, including any `STARTUP_` prefix
    name: String,
    /// Shared bucket layout and kind
    definition: Arc<HistogramDefinition>,
    /// One count per boundary of `definition`, in boundary order
    counts: Vec<f64>,
}

impl HistogramValue {
    /// Assemble a histogram from counts already aligned to `definition`
    pub(crate) fn from_parts(
        name: String,
        definition: Arc<HistogramDefinition>,
        counts: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(counts.len(), definition.n_buckets());
        Self {
            name,
            definition,
            counts,
        }
    }

    /// Name as submitted
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> HistogramKind {
        self.definition.kind()
    }

    /// Definition this histogram was built against
    pub fn definition(&self) -> &Arc<HistogramDefinition> {
        &self.definition
    }

    /// Number of buckets (always the definition's bucket count)
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bucket lower bounds
    pub fn ranges(&self) -> &[f64] {
        self.definition.ranges()
    }

    /// Counts in boundary order
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Buckets in ascending boundary order
    pub fn buckets(&self) -> impl Iterator<Item = Bucket> + '_ {
        self.ranges()
            .iter()
            .zip(&self.counts)
            .map(|(&lower, &count)| Bucket { lower, count })
    }

    /// Count of the bucket starting at `lower`, if such a bucket exists
    pub fn count_at(&self, lower: f64) -> Option<f64> {
        self.ranges()
            .iter()
            .position(|&b| b == lower)
            .map(|i| self.counts[i])
    }

    /// Sum of all bucket counts
    pub fn total_count(&self) -> f64 {
        self.counts.iter().sum()
    }
}

impl fmt::Display for HistogramValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.kind())?;

        let labels: Vec<String> = self.ranges().iter().map(|b| b.to_string()).collect();
        let width = labels.iter().map(String::len).max().unwrap_or(0);
        for (label, count) in labels.iter().zip(&self.counts) {
            writeln!(f, "{label:<width$}    {count}")?;
        }
        Ok(())
    }
}
