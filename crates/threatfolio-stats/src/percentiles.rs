//! Percentiles of sorted samples.

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: the k-th
/// percentile lies at fractional position `(n - 1) * k / 100`.
///
/// Returns `None` if the input is empty.
///
/// # Examples
///
/// ```
/// use threatfolio_stats::percentiles::compute_percentile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(compute_percentile(&values, 50.0), Some(2.5));
/// assert_eq!(compute_percentile(&values, 25.0), Some(1.75));
/// assert_eq!(compute_percentile(&[], 50.0), None);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let position = (last as f64 * percentile.clamp(0.0, 100.0)) / 100.0;
    let lower = (position.floor() as usize).min(last);
    let upper = (position.ceil() as usize).min(last);
    let fraction = position - lower as f64;
    let lo = sorted_values[lower];
    let hi = sorted_values[upper];
    Some(lo + (hi - lo) * fraction)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_extremes_are_min_and_max() {
        let values = [3.0, 9.0, 27.0];
        assert_eq!(compute_percentile(&values, 0.0), Some(3.0));
        assert_eq!(compute_percentile(&values, 100.0), Some(27.0));
    }

    #[test]
    fn test_out_of_range_percentile_is_clamped() {
        let values = [3.0, 9.0, 27.0];
        assert_eq!(compute_percentile(&values, -10.0), Some(3.0));
        assert_eq!(compute_percentile(&values, 250.0), Some(27.0));
    }

    #[test]
    fn test_interpolates_between_ranks() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        assert_relative_eq!(compute_percentile(&values, 75.0).unwrap(), 47.5);
    }

    #[test]
    fn test_empty_sample_has_no_percentile() {
        assert_eq!(compute_percentile(&[], 25.0), None);
    }

    #[test]
    fn test_single_value_is_every_percentile() {
        assert_eq!(compute_percentile(&[4.0], 10.0), Some(4.0));
        assert_eq!(compute_percentile(&[4.0], 90.0), Some(4.0));
    }
}
