//! Dataset handling for the threatfolio dashboard
//!
//! This crate loads the incident dataset once and derives everything the
//! dashboard shows from it. The loaded [`dataset::Dataset`] is never mutated;
//! every view recomputes its own structures on demand.
//!
//! # Overview
//!
//! ## Loading and Describing
//!
//! 1. **Load** ([`dataset::Dataset`]): Parse a delimited file, normalize missing markers and
//!    drop auto-generated index columns
//! 2. **Classify** ([`column::ColumnClassification`]): Partition columns into numeric and
//!    categorical
//! 3. **Describe** ([`column::describe_columns`]): Kind and missing percentage per column
//!
//! ## Statistics
//!
//! 1. **Coerce** ([`numeric::NumericSample`]): Read a column as numbers, counting dropped cells
//! 2. **Summarize** ([`summary::summarize`]): One [`summary::SummaryRecord`] per column
//! 3. **Bound** ([`summary::mean_interval`]): Student-t confidence interval for a mean
//! 4. **Compare** ([`comparison::compare_groups`]): Welch's t-test between two labelled groups
//!
//! ## Display Data
//!
//! - **Sample** ([`sample::sample_rows`]): Deterministic seeded subsample for charts
//! - **Cache** ([`cache::DatasetCache`]): Load-once dataset and memoized samples
//! - **Charts** ([`chart`]): Histogram bins and grouped box plot summaries
//!
//! # Examples
//!
//! ```
//! use threatfolio_data::{
//!     comparison::{self, ComparisonOutcome},
//!     dataset::Dataset,
//! };
//! use threatfolio_stats::confidence::Significance;
//!
//! let dataset = Dataset::from_rows(
//!     ["Loss", "Type"],
//!     [["10", "A"], ["20", "A"], ["30", "A"], ["40", "B"], ["50", "B"]],
//! )
//! .unwrap();
//!
//! let outcome =
//!     comparison::compare_groups(&dataset, "Loss", "Type", "A", "B", Significance::default())
//!         .unwrap();
//! assert!(matches!(outcome, ComparisonOutcome::Skipped { count_a: 3, count_b: 2, .. }));
//! ```

pub mod cache;
pub mod chart;
pub mod column;
pub mod comparison;
pub mod dataset;
pub mod numeric;
pub mod sample;
pub mod summary;

/// Error raised when a query names columns the dataset cannot answer for.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum QueryError {
    #[display("unknown column '{name}'")]
    UnknownColumn { name: String },
    #[display("column '{name}' is not numeric")]
    NonNumericColumn { name: String },
    #[display("no columns selected")]
    EmptySelection,
}
