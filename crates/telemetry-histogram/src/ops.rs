//! Readings and operations on histograms

use crate::types::{Bucket, HistogramValue};
use std::ops::Add;
use std::sync::Arc;
use telemetry_core::{Error, HistogramKind, Result};
use tracing::trace;

/// What a histogram reports, depending on its kind
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramReading {
    /// Full bucket distribution in boundary order
    Distribution(Vec<Bucket>),
    /// A single number: a count, or a median
    Scalar(f64),
    /// Whether a flag histogram was set
    Flag(bool),
}

impl HistogramReading {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(set) => Some(*set),
            _ => None,
        }
    }

    pub fn as_distribution(&self) -> Option<&[Bucket]> {
        match self {
            Self::Distribution(buckets) => Some(buckets),
            _ => None,
        }
    }
}

impl HistogramValue {
    /// Value of the histogram as its kind defines it
    ///
    /// Distribution kinds return every bucket, or the median when
    /// `only_median` is set. `count` histograms return the count in the first
    /// bucket and `flag` histograms whether the second bucket holds exactly 1;
    /// both ignore `only_median`.
    pub fn value(&self, only_median: bool) -> Result<HistogramReading> {
        match self.kind() {
            HistogramKind::Exponential
            | HistogramKind::Linear
            | HistogramKind::Enumerated
            | HistogramKind::Boolean => {
                if only_median {
                    self.median().map(HistogramReading::Scalar)
                } else {
                    Ok(HistogramReading::Distribution(self.buckets().collect()))
                }
            }
            HistogramKind::Count => Ok(HistogramReading::Scalar(self.counts()[0])),
            HistogramKind::Flag => Ok(HistogramReading::Flag(
                self.counts().get(1).is_some_and(|&count| count == 1.0),
            )),
        }
    }

    /// 50th percentile
    pub fn median(&self) -> Result<f64> {
        self.percentile(50.0)
    }

    /// The `p`th percentile, interpolated linearly inside its bucket
    ///
    /// Walks the buckets in order until the cumulative count reaches
    /// `p / 100` of the total. If that happens in the last bucket there is no
    /// upper boundary to interpolate towards and the result is NaN. A stopping
    /// bucket with a zero count (e.g. an empty histogram) divides by zero and
    /// yields NaN or infinity rather than an error.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `p` is outside `[0, 100]`, `InvalidKind` for
    /// `count` and `flag` histograms.
    pub fn percentile(&self, p: f64) -> Result<f64> {
        if !(0.0..=100.0).contains(&p) {
            return Err(Error::invalid_percentile(p));
        }
        if !self.kind().supports_percentile() {
            return Err(Error::InvalidKind {
                kind: self.kind(),
                operation: "percentile",
            });
        }

        Ok(walk_percentile(self.ranges(), self.counts(), p))
    }

    /// Elementwise sum of two histograms with the same bucket boundaries
    ///
    /// The result keeps this histogram's name and definition.
    pub fn combine(&self, other: &Self) -> Result<Self> {
        let same_layout = Arc::ptr_eq(self.definition(), other.definition())
            || self.definition().same_layout(other.definition());
        if !same_layout {
            return Err(Error::ShapeMismatch(format!(
                "{} ({} buckets) and {} ({} buckets) have different bucket boundaries",
                self.name(),
                self.len(),
                other.name(),
                other.len()
            )));
        }

        let counts = self
            .counts()
            .iter()
            .zip(other.counts())
            .map(|(a, b)| a + b)
            .collect();

        Ok(Self::from_parts(
            self.name().to_string(),
            Arc::clone(self.definition()),
            counts,
        ))
    }
}

impl Add for &HistogramValue {
    type Output = Result<HistogramValue>;

    fn add(self, other: &HistogramValue) -> Self::Output {
        self.combine(other)
    }
}

fn walk_percentile(ranges: &[f64], counts: &[f64], p: f64) -> f64 {
    let total: f64 = counts.iter().sum();
    let mut remaining = (p / 100.0) * total;

    let mut bucket = 0;
    for (i, &freq) in counts.iter().enumerate() {
        bucket = i;
        if remaining - freq <= 0.0 {
            break;
        }
        remaining -= freq;
    }

    if bucket + 1 >= counts.len() {
        trace!(p, total, "Percentile saturates in the last bucket");
        return f64::NAN;
    }

    let lower = ranges[bucket];
    let width = ranges[bucket + 1] - lower;
    lower + width * remaining / counts[bucket]
}
