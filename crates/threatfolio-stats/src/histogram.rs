use std::ops::Range;

use serde::Serialize;

/// Default number of bins used by the dashboard histogram.
pub const DEFAULT_NUM_BINS: usize = 30;

/// A histogram representation of a sample's distribution.
///
/// The observed range `[min, max]` is divided into equal-width bins. The last
/// bin's end is nudged just past `max` so that the maximum value is counted.
#[derive(Debug, Clone, Serialize)]
pub struct Histogram {
    /// The bins comprising the histogram, in ascending order.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin's range.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram from unsorted values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use threatfolio_stats::histogram::Histogram;
    /// let values = [5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, 6.0, 10.0];
    /// let histogram = Histogram::new(values, 5);
    /// assert_eq!(histogram.bins.len(), 5);
    /// assert_eq!(histogram.total(), 10);
    /// ```
    #[must_use]
    pub fn new<I>(values: I, num_bins: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, num_bins)
    }

    /// Creates a histogram from pre-sorted values.
    ///
    /// An empty sample or zero bins yield an empty histogram. A sample whose
    /// values are all equal yields a single unit-wide bin centred on the value.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], num_bins: usize) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let (Some(&min), Some(&max)) = (sorted_values.first(), sorted_values.last()) else {
            return Self { bins: vec![] };
        };
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let range = max - min;
        if range < f64::EPSILON * max.abs().max(1.0) {
            return Self {
                bins: vec![HistogramBin {
                    range: (min - 0.5)..(min + 0.5),
                    count: sorted_values.len() as u64,
                }],
            };
        }

        let bin_width = range / num_bins as f64;
        let mut bins = (0..num_bins)
            .map(|bin_idx| {
                // Recompute each boundary from `min` to avoid accumulating rounding errors
                let start = min + range * (bin_idx as f64) / num_bins as f64;
                let end = if bin_idx + 1 == num_bins {
                    max.next_up()
                } else {
                    min + range * ((bin_idx + 1) as f64) / num_bins as f64
                };
                HistogramBin {
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for &val in sorted_values {
            let idx = (((val - min) / bin_width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted across all bins.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        assert!(Histogram::new([], 10).bins.is_empty());
        assert!(Histogram::new([1.0, 2.0], 0).bins.is_empty());
    }

    #[test]
    fn test_constant_values_single_bin() {
        let histogram = Histogram::new([4.0, 4.0, 4.0], 30);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].count, 3);
        assert!(histogram.bins[0].range.contains(&4.0));
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let histogram = Histogram::new([0.0, 1.0, 2.0, 3.0, 4.0], 4);
        let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert!(histogram.bins[3].range.contains(&4.0));
    }

    #[test]
    fn test_every_value_is_in_its_bin_range() {
        let values = (0..100).map(|i| f64::from(i) * 0.37 - 5.0).collect::<Vec<_>>();
        let histogram = Histogram::new(values.iter().copied(), 30);
        assert_eq!(histogram.total(), 100);
        for v in values {
            assert!(histogram.bins.iter().any(|b| b.range.contains(&v)));
        }
    }
}
