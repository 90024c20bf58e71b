//! Five-number summaries for box plots.
//!
//! Quartiles use linear interpolation ([`compute_percentile`]). Whiskers
//! extend to the most extreme observations within 1.5 IQR of the box
//! (Tukey fences); observations beyond the fences are reported as outliers.

use serde::Serialize;

use crate::percentiles::compute_percentile;

/// Multiplier applied to the interquartile range to place the fences.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Box plot summary of a numeric sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxPlotSummary {
    /// Number of values in the sample.
    pub count: usize,
    /// First quartile (P25).
    pub q1: f64,
    /// Median (P50).
    pub median: f64,
    /// Third quartile (P75).
    pub q3: f64,
    /// Lowest observation not below `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Highest observation not above `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
    /// Observations outside the whiskers, in ascending order.
    pub outliers: Vec<f64>,
}

impl BoxPlotSummary {
    /// Computes a box plot summary from unsorted values.
    ///
    /// Returns `None` for an empty sample.
    ///
    /// ```
    /// # use threatfolio_stats::box_plot::BoxPlotSummary;
    /// let summary = BoxPlotSummary::new([1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
    /// assert_eq!(summary.outliers, vec![100.0]);
    /// assert_eq!(summary.upper_whisker, 5.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes a box plot summary from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let q1 = compute_percentile(sorted_values, 25.0)?;
        let median = compute_percentile(sorted_values, 50.0)?;
        let q3 = compute_percentile(sorted_values, 75.0)?;
        let iqr = q3 - q1;
        let lower_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let upper_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let within = |v: &f64| (lower_fence..=upper_fence).contains(v);
        // The quartiles always lie inside the fences, so both searches succeed
        let lower_whisker = sorted_values.iter().copied().find(within).unwrap_or(q1);
        let upper_whisker = sorted_values.iter().copied().rev().find(within).unwrap_or(q3);
        let outliers = sorted_values
            .iter()
            .copied()
            .filter(|v| !within(v))
            .collect();

        Some(Self {
            count: sorted_values.len(),
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}
