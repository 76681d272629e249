//! Histogram definitions: kind plus bucket boundaries

use crate::kind::HistogramKind;
use crate::layout::{exponential_buckets, linear_buckets, TWO_STATE_RANGES};
use crate::{Error, Result};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single histogram record as handed back by a schema source
///
/// Only the fields needed to derive bucket boundaries are kept; anything else
/// present in the schema document is ignored during deserialization.
/// Numeric parameters may be written as numbers or as numeric strings
/// (`"high": "60000"`); any other string fails to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaEntry {
    /// Kind as spelled in the schema (`"exponential"`, `"flag"`, ...)
    pub kind: String,
    /// Lower bound of the first non-underflow bucket (defaults to 1)
    #[serde(default, deserialize_with = "number_or_string")]
    pub low: Option<i64>,
    /// Upper bound of the layout
    #[serde(default, deserialize_with = "number_or_string")]
    pub high: Option<i64>,
    /// Number of buckets, including the underflow bucket
    #[serde(default, deserialize_with = "number_or_string")]
    pub n_buckets: Option<usize>,
    /// Number of values of an enumerated histogram
    #[serde(default, deserialize_with = "number_or_string")]
    pub n_values: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString<T> {
    Number(T),
    Text(String),
}

fn number_or_string<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: fmt::Display,
{
    match Option::<NumberOrString<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(value)) => Ok(Some(value)),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid number {text:?}: {e}"))),
    }
}

impl SchemaEntry {
    /// Create an entry with only the kind set
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            low: None,
            high: None,
            n_buckets: None,
            n_values: None,
        }
    }

    /// Entry for an exponential or linear histogram
    pub fn ranged(kind: impl Into<String>, low: i64, high: i64, n_buckets: usize) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
            n_buckets: Some(n_buckets),
            ..Self::new(kind)
        }
    }

    /// Entry for an enumerated histogram
    pub fn enumerated(n_values: usize) -> Self {
        Self {
            n_values: Some(n_values),
            ..Self::new(HistogramKind::Enumerated.as_str())
        }
    }
}

/// Bucket layout and semantic kind of a histogram
///
/// Immutable once built; resolvers share definitions behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramDefinition {
    kind: HistogramKind,
    ranges: Vec<f64>,
}

impl HistogramDefinition {
    /// Create a definition from explicit bucket lower bounds
    ///
    /// The boundaries must be non-empty, finite and strictly increasing.
    pub fn new(kind: HistogramKind, ranges: Vec<f64>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::InvalidDefinition(
                "bucket boundaries must not be empty".to_string(),
            ));
        }
        if ranges.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidDefinition(
                "bucket boundaries must be finite".to_string(),
            ));
        }
        if let Some(i) = ranges.windows(2).position(|w| w[0] >= w[1]) {
            return Err(Error::InvalidDefinition(format!(
                "bucket boundaries must be strictly increasing ({} followed by {} at position {})",
                ranges[i],
                ranges[i + 1],
                i + 1
            )));
        }

        Ok(Self { kind, ranges })
    }

    /// Derive a definition from a schema entry
    ///
    /// Fails with `UnsupportedKind` when the entry's kind is not recognized.
    pub fn from_entry(entry: &SchemaEntry) -> Result<Self> {
        let kind: HistogramKind = entry.kind.parse()?;

        let ranges = match kind {
            HistogramKind::Boolean | HistogramKind::Flag | HistogramKind::Count => {
                TWO_STATE_RANGES.to_vec()
            }
            HistogramKind::Enumerated => {
                let n_values = entry
                    .n_values
                    .ok_or_else(|| Error::missing_field(kind, "n_values"))?;
                let high = i64::try_from(n_values).map_err(|_| {
                    Error::InvalidDefinition(format!("n_values {n_values} is too large"))
                })?;
                checked_layout(kind, 1, high, n_values + 1)?;
                linear_buckets(1, high, n_values + 1)
            }
            HistogramKind::Linear | HistogramKind::Exponential => {
                let low = entry.low.unwrap_or(1);
                let high = entry.high.ok_or_else(|| Error::missing_field(kind, "high"))?;
                let n_buckets = entry
                    .n_buckets
                    .ok_or_else(|| Error::missing_field(kind, "n_buckets"))?;
                checked_layout(kind, low, high, n_buckets)?;

                if kind == HistogramKind::Linear {
                    linear_buckets(low, high, n_buckets)
                } else {
                    exponential_buckets(low, high, n_buckets)
                }
            }
        };

        Self::new(kind, ranges)
    }

    /// Semantic kind of the histogram
    pub fn kind(&self) -> HistogramKind {
        self.kind
    }

    /// Number of buckets
    pub fn n_buckets(&self) -> usize {
        self.ranges.len()
    }

    /// Bucket lower bounds in ascending order
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Whether another definition has exactly the same bucket boundaries
    pub fn same_layout(&self, other: &Self) -> bool {
        self.ranges == other.ranges
    }
}

impl fmt::Display for HistogramDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} histogram ({} buckets, [{}, {}])",
            self.kind,
            self.n_buckets(),
            self.ranges[0],
            self.ranges[self.ranges.len() - 1]
        )
    }
}

fn checked_layout(kind: HistogramKind, low: i64, high: i64, n_buckets: usize) -> Result<()> {
    if n_buckets < 3 {
        return Err(Error::InvalidDefinition(format!(
            "{kind} histograms need at least 3 buckets, got {n_buckets}"
        )));
    }
    if high <= low {
        return Err(Error::InvalidDefinition(format!(
            "{kind} histograms need high > low, got low={low} high={high}"
        )));
    }
    if kind == HistogramKind::Exponential && low < 1 {
        return Err(Error::InvalidDefinition(format!(
            "exponential histograms need low >= 1, got {low}"
        )));
    }
    Ok(())
}
