use serde::Serialize;

/// Descriptive statistics summarizing a numeric sample.
///
/// Dispersion measures use the sample (`n - 1`) denominator and are only
/// defined when the sample holds at least two values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// Number of values in the sample.
    pub count: usize,
    /// The arithmetic mean of the sample.
    pub mean: f64,
    /// The median of the sample (midpoint of the two middle values for even counts).
    pub median: f64,
    /// The minimum value in the sample.
    pub min: f64,
    /// The maximum value in the sample.
    pub max: f64,
    /// The sample variance, `None` when `count <= 1`.
    pub variance: Option<f64>,
    /// The sample standard deviation, `None` when `count <= 1`.
    pub std_dev: Option<f64>,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the sample contains at least one value
    /// * `None` - if the sample is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use threatfolio_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// assert_eq!(stats.variance, Some(2.5));
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// Use this when the values are already sorted to skip the sorting step.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use threatfolio_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[7.0]).unwrap();
    /// assert_eq!(stats.mean, 7.0);
    /// assert_eq!(stats.std_dev, None);
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let mean = mean(sorted_values)?;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            f64::midpoint(sorted_values[mid - 1], sorted_values[mid])
        } else {
            sorted_values[mid]
        };
        // A constant sample has exactly zero spread, even when the mean is not
        // representable without rounding.
        #[expect(clippy::float_cmp)]
        let variance = if min == max && count > 1 {
            Some(0.0)
        } else {
            sample_variance_with_mean(sorted_values, mean)
        };
        let std_dev = variance.map(f64::sqrt);

        Some(Self {
            count,
            mean,
            median,
            min,
            max,
            variance,
            std_dev,
        })
    }
}

#[expect(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[expect(clippy::cast_precision_loss)]
fn sample_variance_with_mean(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() <= 1 {
        return None;
    }
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_empty_sample_has_no_stats() {
        assert!(DescriptiveStats::new([]).is_none());
        assert_eq!(mean(&[]), None);
        assert_eq!(sample_variance_with_mean(&[4.0], 4.0), None);
    }

    #[test]
    fn test_single_value_has_no_dispersion() {
        let stats = DescriptiveStats::new([42.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.variance, None);
        assert_eq!(stats.std_dev, None);
    }

    #[test]
    fn test_even_count_median_is_midpoint() {
        let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn test_sample_denominator() {
        let stats = DescriptiveStats::new([10.0, 20.0, 30.0, 40.0, 50.0]).unwrap();
        assert_eq!(stats.mean, 30.0);
        assert_relative_eq!(stats.variance.unwrap(), 250.0);
        assert_relative_eq!(stats.std_dev.unwrap(), 250.0_f64.sqrt());
    }

    #[test]
    fn test_constant_sample_has_zero_std_dev() {
        let stats = DescriptiveStats::new(std::iter::repeat_n(0.1, 10)).unwrap();
        assert_eq!(stats.std_dev, Some(0.0));
        assert_eq!(stats.variance, Some(0.0));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = DescriptiveStats::new([3.5, -1.0, 8.25, 0.0]).unwrap();
        let b = DescriptiveStats::new([8.25, 0.0, 3.5, -1.0]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "values must be sorted in ascending order")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[2.0, 1.0]);
    }
}
