//! Statistical routines behind the threatfolio dashboard.
//!
//! This crate provides the numeric core used to describe incident datasets:
//!
//! - **Descriptive statistics**: count, mean, median, sample variance and standard deviation
//! - **Confidence intervals**: Student-t intervals for a population mean
//! - **Welch's t-test**: unequal-variance comparison of two samples
//! - **Percentiles**: linearly interpolated quantiles
//! - **Chart summaries**: equal-width histograms and box plot five-number summaries
//!
//! Every function here is pure: the same input always produces the same output.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing samples
//! - [`confidence`]: Confidence intervals for the mean
//! - [`welch`]: Welch's two-sample t-test
//! - [`percentiles`]: Linearly interpolated percentiles of sorted samples
//! - [`histogram`]: Histogram construction for distribution charts
//! - [`box_plot`]: Box plot summaries with Tukey outliers
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use threatfolio_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.variance, Some(2.5));
//! ```
//!
//! ## Bounding a mean
//!
//! ```
//! use threatfolio_stats::confidence::{ConfidenceInterval, Significance};
//!
//! let ci = ConfidenceInterval::for_mean([9.5, 10.1, 10.4, 9.8, 10.2], Significance::default());
//! assert!(ci.contains(10.0));
//! ```
//!
//! ## Comparing two samples
//!
//! ```
//! use threatfolio_stats::welch::WelchTTest;
//!
//! let low = [10.0, 12.0, 11.0, 13.0, 12.0, 11.0];
//! let high = [30.0, 33.0, 29.0, 31.0, 35.0, 32.0];
//! let test = WelchTTest::from_samples(&low, &high).unwrap();
//! assert!(test.t_statistic < 0.0);
//! assert!(test.p_value < 0.05);
//! ```

pub mod box_plot;
pub mod confidence;
pub mod descriptive;
pub mod histogram;
pub mod percentiles;
pub mod welch;
