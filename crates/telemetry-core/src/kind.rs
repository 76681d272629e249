//! Histogram kinds

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic interpretation of a bucketed measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistogramKind {
    /// Exponentially spaced buckets
    Exponential,
    /// Evenly spaced buckets
    Linear,
    /// One bucket per enumerated value
    Enumerated,
    /// Two-valued distribution
    Boolean,
    /// A single counter stored in the first bucket
    Count,
    /// A set-once flag stored in the second bucket
    Flag,
}

impl HistogramKind {
    /// All recognized kinds
    pub const ALL: [HistogramKind; 6] = [
        Self::Exponential,
        Self::Linear,
        Self::Enumerated,
        Self::Boolean,
        Self::Count,
        Self::Flag,
    ];

    /// Schema spelling of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exponential => "exponential",
            Self::Linear => "linear",
            Self::Enumerated => "enumerated",
            Self::Boolean => "boolean",
            Self::Count => "count",
            Self::Flag => "flag",
        }
    }

    /// Whether the kind represents a distribution that percentiles can be taken over
    pub fn supports_percentile(&self) -> bool {
        match self {
            Self::Exponential | Self::Linear | Self::Enumerated | Self::Boolean => true,
            Self::Count | Self::Flag => false,
        }
    }
}

impl FromStr for HistogramKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnsupportedKind(s.to_string()))
    }
}

impl fmt::Display for HistogramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_schema_spelling() {
        for kind in HistogramKind::ALL {
            assert_eq!(kind.as_str().parse::<HistogramKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "keyed".parse::<HistogramKind>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedKind(ref k) if k == "keyed"));

        // Schema spelling is lowercase only
        assert!("Linear".parse::<HistogramKind>().is_err());
    }

    #[test]
    fn test_percentile_eligibility() {
        assert!(HistogramKind::Exponential.supports_percentile());
        assert!(HistogramKind::Linear.supports_percentile());
        assert!(HistogramKind::Enumerated.supports_percentile());
        assert!(HistogramKind::Boolean.supports_percentile());
        assert!(!HistogramKind::Count.supports_percentile());
        assert!(!HistogramKind::Flag.supports_percentile());
    }
}
