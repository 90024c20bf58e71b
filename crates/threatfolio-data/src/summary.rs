//! Per-column summary records and confidence intervals.

use serde::Serialize;
use threatfolio_stats::{
    confidence::{ConfidenceInterval, Significance},
    descriptive::DescriptiveStats,
};

use crate::{
    QueryError,
    dataset::{Column, Dataset},
    numeric::NumericSample,
};

/// Number of numeric columns selected by default in the summary view.
pub const DEFAULT_SUMMARY_COLUMNS: usize = 3;

/// Summary statistics of one column after numeric coercion.
///
/// Every statistic is `None` when the column has no numeric value;
/// `std_dev` and `variance` are also `None` when it has only one.
/// `count + missing` always equals the number of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRecord {
    pub column: String,
    pub count: usize,
    /// Rows without a numeric value (missing or non-numeric cells).
    pub missing: usize,
    /// Present cells dropped because they were not numeric.
    pub non_numeric: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub variance: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl SummaryRecord {
    /// Summarizes a single column.
    #[must_use]
    pub fn from_column(column: &Column) -> Self {
        let sample = NumericSample::from_column(column);
        if sample.non_numeric > 0 {
            log::debug!(
                "Column {:?}: {} non-numeric cells treated as missing",
                column.name(),
                sample.non_numeric
            );
        }
        let stats = DescriptiveStats::new(sample.values.iter().copied());
        Self {
            column: column.name().to_owned(),
            count: sample.count(),
            missing: sample.dropped(),
            non_numeric: sample.non_numeric,
            mean: stats.as_ref().map(|s| s.mean),
            median: stats.as_ref().map(|s| s.median),
            std_dev: stats.as_ref().and_then(|s| s.std_dev),
            variance: stats.as_ref().and_then(|s| s.variance),
            min: stats.as_ref().map(|s| s.min),
            max: stats.as_ref().map(|s| s.max),
        }
    }
}

/// Summarizes each selected column of `dataset`, in selection order.
///
/// # Examples
///
/// ```
/// use threatfolio_data::{dataset::Dataset, summary};
///
/// let dataset = Dataset::from_rows(["Loss"], [["10"], ["20"], ["n/a"], ["x"]]).unwrap();
/// let records = summary::summarize(&dataset, &["Loss"]).unwrap();
///
/// assert_eq!(records[0].count, 2);
/// assert_eq!(records[0].missing, 2);
/// assert_eq!(records[0].non_numeric, 1);
/// assert_eq!(records[0].mean, Some(15.0));
/// ```
pub fn summarize<S>(dataset: &Dataset, columns: &[S]) -> Result<Vec<SummaryRecord>, QueryError>
where
    S: AsRef<str>,
{
    if columns.is_empty() {
        return Err(QueryError::EmptySelection);
    }
    columns
        .iter()
        .map(|name| {
            dataset
                .require_column(name.as_ref())
                .map(SummaryRecord::from_column)
        })
        .collect()
}

/// Confidence interval for the mean of a column after numeric coercion.
pub fn mean_interval(
    dataset: &Dataset,
    column: &str,
    significance: Significance,
) -> Result<ConfidenceInterval, QueryError> {
    let sample = NumericSample::from_column(dataset.require_column(column)?);
    Ok(ConfidenceInterval::for_mean(sample.values, significance))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_rows(
            ["Loss", "Constant", "Single", "Empty", "Country"],
            [
                ["10", "5", "1", "", "China"],
                ["20", "5", "", "", "India"],
                ["30", "5", "", "", "UK"],
                ["oops", "5", "", "", "Brazil"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_count_plus_missing_is_total_rows() {
        let dataset = dataset();
        let names = dataset.column_names().collect::<Vec<_>>();
        for record in summarize(&dataset, &names).unwrap() {
            assert_eq!(record.count + record.missing, dataset.num_rows());
        }
    }

    #[test]
    fn test_summary_values() {
        let records = summarize(&dataset(), &["Loss"]).unwrap();
        let loss = &records[0];
        assert_eq!(loss.count, 3);
        assert_eq!(loss.non_numeric, 1);
        assert_eq!(loss.mean, Some(20.0));
        assert_eq!(loss.median, Some(20.0));
        assert_relative_eq!(loss.variance.unwrap(), 100.0);
        assert_relative_eq!(loss.std_dev.unwrap(), 10.0);
        assert_eq!((loss.min, loss.max), (Some(10.0), Some(30.0)));
    }

    #[test]
    fn test_undefined_statistics() {
        let records = summarize(&dataset(), &["Single", "Empty", "Country"]).unwrap();
        assert_eq!(records[0].mean, Some(1.0));
        assert_eq!(records[0].std_dev, None);
        assert_eq!(records[0].variance, None);
        for record in &records[1..] {
            assert_eq!(record.count, 0);
            assert_eq!(record.mean, None);
            assert_eq!(record.median, None);
            assert_eq!(record.min, None);
        }
    }

    #[test]
    fn test_constant_column() {
        let records = summarize(&dataset(), &["Constant"]).unwrap();
        assert_eq!(records[0].std_dev, Some(0.0));
        let ci = mean_interval(&dataset(), "Constant", Significance::default()).unwrap();
        assert_eq!(ci.mean, Some(5.0));
        assert_eq!(ci.bounds, None);
    }

    #[test]
    fn test_selection_errors() {
        let dataset = dataset();
        assert!(matches!(
            summarize::<&str>(&dataset, &[]),
            Err(QueryError::EmptySelection)
        ));
        assert!(matches!(
            summarize(&dataset, &["Nope"]),
            Err(QueryError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_summarize_is_deterministic() {
        let dataset = dataset();
        assert_eq!(
            summarize(&dataset, &["Loss", "Constant"]).unwrap(),
            summarize(&dataset, &["Loss", "Constant"]).unwrap()
        );
    }
}
