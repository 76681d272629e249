//! Telemetry histogram reconstruction and analysis
//!
//! A telemetry submission records a histogram as bare counts: either a dense
//! list (possibly followed by summary statistics) or a sparse map of bucket
//! index to count. This crate aligns those counts to the boundaries of a
//! [`HistogramDefinition`] and answers questions about the result.
//!
//! # Key Features
//!
//! - **Both submission shapes**: dense and sparse input, decided by an explicit enum
//! - **Kind-aware readings**: distributions, counts and flags via [`HistogramValue::value`]
//! - **Percentiles**: cumulative walk with linear interpolation inside the bucket
//! - **Combination**: elementwise sums of histograms with the same layout
//! - **Schema integration**: with the `schema` feature, build straight from a resolver
//!
//! # Examples
//!
//! ## Building from a definition
//!
//! ```rust
//! use std::sync::Arc;
//! use telemetry_core::{HistogramDefinition, SchemaEntry};
//! use telemetry_histogram::{HistogramValue, RawHistogram};
//!
//! let definition = Arc::new(
//!     HistogramDefinition::from_entry(&SchemaEntry::ranged("linear", 1, 100, 12)).unwrap(),
//! );
//! let mut counts = vec![0.0; 12];
//! counts[2] = 4.0;
//! counts[3] = 4.0;
//!
//! let hist = HistogramValue::new("PAGE_LOAD", RawHistogram::Dense(counts), definition).unwrap();
//! // Half of the mass is used up exactly at the top of bucket [11, 21)
//! assert_eq!(hist.median().unwrap(), 21.0);
//! ```
//!
//! ## Flags, counts and combination
//!
//! ```rust
//! use std::sync::Arc;
//! use telemetry_core::{HistogramDefinition, SchemaEntry};
//! use telemetry_histogram::{HistogramReading, HistogramValue};
//!
//! let flag = Arc::new(HistogramDefinition::from_entry(&SchemaEntry::new("flag")).unwrap());
//! let hist = HistogramValue::from_dense("A11Y_FLAG", &[0.0, 1.0, 0.0], flag).unwrap();
//! assert_eq!(hist.value(false).unwrap(), HistogramReading::Flag(true));
//!
//! let count = Arc::new(HistogramDefinition::from_entry(&SchemaEntry::new("count")).unwrap());
//! let a = HistogramValue::from_dense("CRASHES", &[2.0, 0.0, 0.0], count.clone()).unwrap();
//! let b = HistogramValue::from_dense("CRASHES", &[3.0, 0.0, 0.0], count).unwrap();
//! let total = (&a + &b).unwrap();
//! assert_eq!(total.value(true).unwrap(), HistogramReading::Scalar(5.0));
//! ```
//!
//! [`HistogramDefinition`]: telemetry_core::HistogramDefinition

pub mod builders;
pub mod ops;
#[cfg(feature = "schema")]
pub mod resolve;
pub mod types;

// Re-export main types
pub use builders::{RawHistogram, SparseCounts};
pub use ops::HistogramReading;
pub use types::{Bucket, HistogramValue};

pub use telemetry_core::{Error, Result};
