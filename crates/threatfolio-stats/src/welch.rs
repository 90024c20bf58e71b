//! Welch's unequal-variance two-sample t-test.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

use crate::descriptive::DescriptiveStats;

/// Result of a two-sided Welch t-test between samples `a` and `b`.
///
/// Variances are never pooled; the degrees of freedom follow the
/// Welch-Satterthwaite approximation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WelchTTest {
    /// `(mean_a - mean_b) / sqrt(var_a / n_a + var_b / n_b)`.
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Two-sided p-value `2 * P(T > |t|)`.
    pub p_value: f64,
}

impl WelchTTest {
    /// Runs the test on two raw samples.
    ///
    /// Returns `None` if either sample has fewer than two values.
    ///
    /// When both samples have zero variance the statistic is undefined:
    /// `t` is NaN (equal means) or infinite, and both the degrees of freedom
    /// and the p-value are NaN.
    ///
    /// # Examples
    ///
    /// ```
    /// use threatfolio_stats::welch::WelchTTest;
    ///
    /// let a = [19.8, 20.4, 19.6, 17.8, 18.5, 18.9, 18.3, 18.9, 19.5, 22.0];
    /// let b = [28.2, 26.6, 20.1, 23.3, 25.2, 22.1, 17.7, 27.6, 20.6, 13.7];
    /// let test = WelchTTest::from_samples(&a, &b).unwrap();
    /// assert!((test.t_statistic - -2.0740).abs() < 1e-3);
    /// assert!((test.p_value - 0.0643).abs() < 1e-3);
    /// ```
    #[must_use]
    pub fn from_samples(a: &[f64], b: &[f64]) -> Option<Self> {
        let a = DescriptiveStats::new(a.iter().copied())?;
        let b = DescriptiveStats::new(b.iter().copied())?;
        Self::from_stats(&a, &b)
    }

    /// Runs the test from precomputed descriptive statistics.
    ///
    /// Returns `None` if either side lacks a sample variance.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_stats(a: &DescriptiveStats, b: &DescriptiveStats) -> Option<Self> {
        let var_a = a.variance?;
        let var_b = b.variance?;
        let n_a = a.count as f64;
        let n_b = b.count as f64;

        let se2_a = var_a / n_a;
        let se2_b = var_b / n_b;
        let se2 = se2_a + se2_b;

        let t_statistic = (a.mean - b.mean) / se2.sqrt();
        let degrees_of_freedom =
            se2.powi(2) / (se2_a.powi(2) / (n_a - 1.0) + se2_b.powi(2) / (n_b - 1.0));
        let p_value = two_sided_p_value(t_statistic, degrees_of_freedom);

        Some(Self {
            t_statistic,
            degrees_of_freedom,
            p_value,
        })
    }

    /// Returns whether the difference is significant at level `alpha`.
    #[must_use]
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

fn two_sided_p_value(t: f64, freedom: f64) -> f64 {
    if t.is_nan() || freedom.is_nan() {
        return f64::NAN;
    }
    match StudentsT::new(0.0, 1.0, freedom) {
        Ok(dist) => (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_requires_two_values_per_sample() {
        assert!(WelchTTest::from_samples(&[1.0], &[1.0, 2.0]).is_none());
        assert!(WelchTTest::from_samples(&[1.0, 2.0], &[]).is_none());
    }

    #[test]
    fn test_swapping_samples_negates_t() {
        let a = [3.1, 4.7, 2.2, 5.9, 4.4, 3.3, 6.1];
        let b = [7.5, 6.2, 9.8, 8.1, 7.7, 6.9];
        let ab = WelchTTest::from_samples(&a, &b).unwrap();
        let ba = WelchTTest::from_samples(&b, &a).unwrap();
        assert_eq!(ab.t_statistic, -ba.t_statistic);
        assert_eq!(ab.p_value, ba.p_value);
        assert_eq!(ab.degrees_of_freedom, ba.degrees_of_freedom);
    }

    #[test]
    fn test_identical_samples_not_significant() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let test = WelchTTest::from_samples(&a, &a).unwrap();
        assert_eq!(test.t_statistic, 0.0);
        assert_abs_diff_eq!(test.p_value, 1.0, epsilon = 1e-6);
        assert!(!test.is_significant(0.05));
    }

    #[test]
    fn test_unequal_variance_degrees_of_freedom() {
        // var_a = 2.5 (n=5), var_b = 250 (n=5)
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [10.0, 20.0, 30.0, 40.0, 50.0];
        let test = WelchTTest::from_samples(&a, &b).unwrap();
        let (se_a, se_b) = (2.5 / 5.0, 250.0 / 5.0);
        let expected_df =
            f64::powi(se_a + se_b, 2) / (f64::powi(se_a, 2) / 4.0 + f64::powi(se_b, 2) / 4.0);
        assert_abs_diff_eq!(test.degrees_of_freedom, expected_df, epsilon = 1e-12);
        assert_abs_diff_eq!(test.t_statistic, -27.0 / 50.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        let test = WelchTTest::from_samples(&[2.0, 2.0, 2.0], &[5.0, 5.0]).unwrap();
        assert!(test.t_statistic.is_infinite());
        assert!(test.degrees_of_freedom.is_nan());
        assert!(test.p_value.is_nan());
        assert!(!test.is_significant(0.05));
    }
}
