//! Student-t confidence intervals for a population mean.
//!
//! The interval is always built from the t-distribution with `n - 1`
//! degrees of freedom, whatever the sample size. When the sample cannot
//! bound the mean (fewer than two values, or zero spread) only the point
//! estimate is reported.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF as _, StudentsT};

use crate::descriptive::DescriptiveStats;

/// Significance level used when none is given (95% confidence).
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Significance level `alpha` of a two-sided interval, strictly within `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Significance(f64);

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("significance level must be within (0, 1), got {alpha}")]
pub struct SignificanceError {
    alpha: f64,
}

impl Default for Significance {
    fn default() -> Self {
        Self(DEFAULT_ALPHA)
    }
}

impl Significance {
    /// Creates a significance level, rejecting values outside `(0, 1)` and NaN.
    ///
    /// ```
    /// # use threatfolio_stats::confidence::Significance;
    /// let alpha = Significance::new(0.01).unwrap();
    /// assert_eq!(alpha.confidence_level(), 0.99);
    /// assert!(Significance::new(1.0).is_err());
    /// ```
    pub fn new(alpha: f64) -> Result<Self, SignificanceError> {
        if alpha > 0.0 && alpha < 1.0 {
            Ok(Self(alpha))
        } else {
            Err(SignificanceError { alpha })
        }
    }

    #[must_use]
    pub fn alpha(self) -> f64 {
        self.0
    }

    /// Confidence level `1 - alpha`.
    #[must_use]
    pub fn confidence_level(self) -> f64 {
        1.0 - self.0
    }
}

/// Lower and upper bound of an interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

/// Point estimate of a mean with its (possibly undefined) confidence bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConfidenceInterval {
    /// Sample mean, `None` for an empty sample.
    pub mean: Option<f64>,
    /// Interval bounds, `None` when the sample has fewer than two values or zero spread.
    pub bounds: Option<Bounds>,
    /// Confidence level the bounds were computed at.
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Computes the confidence interval for the mean of `values`.
    ///
    /// NaN entries are treated as missing and skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use threatfolio_stats::confidence::{ConfidenceInterval, Significance};
    ///
    /// let ci = ConfidenceInterval::for_mean([10.0, 20.0, 30.0, 40.0, 50.0], Significance::default());
    /// let bounds = ci.bounds.unwrap();
    /// assert_eq!(ci.mean, Some(30.0));
    /// assert!((bounds.lower - 10.368).abs() < 1e-3);
    /// assert!((bounds.upper - 49.632).abs() < 1e-3);
    ///
    /// let constant = ConfidenceInterval::for_mean([3.0, 3.0, 3.0], Significance::default());
    /// assert_eq!(constant.mean, Some(3.0));
    /// assert_eq!(constant.bounds, None);
    /// ```
    #[must_use]
    pub fn for_mean<I>(values: I, significance: Significance) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let stats = DescriptiveStats::new(values.into_iter().filter(|v| !v.is_nan()));
        Self::from_stats(stats.as_ref(), significance)
    }

    /// Builds the interval from already computed descriptive statistics.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_stats(stats: Option<&DescriptiveStats>, significance: Significance) -> Self {
        let confidence_level = significance.confidence_level();
        let Some(stats) = stats else {
            return Self {
                mean: None,
                bounds: None,
                confidence_level,
            };
        };

        let bounds = stats
            .std_dev
            .filter(|s| s.is_finite() && *s > 0.0)
            .and_then(|s| {
                let freedom = (stats.count - 1) as f64;
                let dist = StudentsT::new(0.0, 1.0, freedom).ok()?;
                let critical = dist.inverse_cdf(1.0 - significance.alpha() / 2.0);
                let margin = critical * s / (stats.count as f64).sqrt();
                margin.is_finite().then_some(Bounds {
                    lower: stats.mean - margin,
                    upper: stats.mean + margin,
                })
            });

        Self {
            mean: Some(stats.mean),
            bounds,
            confidence_level,
        }
    }

    /// Returns whether `value` lies within the bounds (inclusive).
    ///
    /// An interval without bounds contains nothing.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.bounds
            .is_some_and(|b| (b.lower..=b.upper).contains(&value))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng as _;
    use rand_distr::{Distribution as _, Normal};
    use rand_pcg::Pcg64;

    use super::*;

    #[test]
    fn test_empty_sample_has_no_mean() {
        let ci = ConfidenceInterval::for_mean([], Significance::default());
        assert_eq!(ci.mean, None);
        assert_eq!(ci.bounds, None);
        assert!(!ci.contains(0.0));
    }

    #[test]
    fn test_single_value_has_no_bounds() {
        let ci = ConfidenceInterval::for_mean([12.5], Significance::default());
        assert_eq!(ci.mean, Some(12.5));
        assert_eq!(ci.bounds, None);
    }

    #[test]
    fn test_nan_is_skipped() {
        let ci = ConfidenceInterval::for_mean([1.0, f64::NAN, 3.0], Significance::default());
        assert_eq!(ci.mean, Some(2.0));
        assert!(ci.bounds.is_some());
    }

    #[test]
    fn test_two_values_use_t_distribution() {
        // s = sqrt(2) and n = 2, so the margin is exactly t(0.975, df=1)
        let ci = ConfidenceInterval::for_mean([0.0, 2.0], Significance::default());
        let bounds = ci.bounds.unwrap();
        let margin = 12.706_204_736;
        assert_abs_diff_eq!(bounds.lower, 1.0 - margin, epsilon = 1e-4);
        assert_abs_diff_eq!(bounds.upper, 1.0 + margin, epsilon = 1e-4);
    }

    #[test]
    fn test_wider_confidence_gives_wider_interval() {
        let values = [4.1, 5.3, 3.8, 6.0, 5.5, 4.9];
        let narrow = ConfidenceInterval::for_mean(values, Significance::new(0.10).unwrap());
        let wide = ConfidenceInterval::for_mean(values, Significance::new(0.01).unwrap());
        let (n, w) = (narrow.bounds.unwrap(), wide.bounds.unwrap());
        assert!(w.lower < n.lower);
        assert!(w.upper > n.upper);
        assert_abs_diff_eq!(wide.confidence_level, 0.99);
    }

    #[test]
    fn test_invalid_significance() {
        assert!(Significance::new(0.0).is_err());
        assert!(Significance::new(-0.5).is_err());
        assert!(Significance::new(f64::NAN).is_err());
        assert_eq!(Significance::default().alpha(), DEFAULT_ALPHA);
    }

    #[test]
    fn test_coverage_close_to_nominal() {
        const TRIALS: usize = 2000;
        const TRUE_MEAN: f64 = 50.0;

        let mut rng = Pcg64::seed_from_u64(42);
        let normal = Normal::new(TRUE_MEAN, 8.0).unwrap();
        let covered = (0..TRIALS)
            .filter(|_| {
                let sample = (0..12).map(|_| normal.sample(&mut rng)).collect::<Vec<_>>();
                ConfidenceInterval::for_mean(sample, Significance::default()).contains(TRUE_MEAN)
            })
            .count();

        #[expect(clippy::cast_precision_loss)]
        let rate = covered as f64 / TRIALS as f64;
        assert!((0.93..=0.97).contains(&rate), "coverage {rate}");
    }
}
