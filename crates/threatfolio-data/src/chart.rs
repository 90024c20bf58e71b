//! Chart data computed from the display dataset.

use serde::Serialize;
use threatfolio_stats::{box_plot::BoxPlotSummary, histogram::Histogram};

use crate::{QueryError, comparison, dataset::Dataset, numeric::NumericSample};

/// Box plot of a metric for one group label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupBoxPlot {
    pub label: String,
    pub summary: BoxPlotSummary,
}

/// Equal-width histogram of the numeric values of `column`.
pub fn histogram(dataset: &Dataset, column: &str, num_bins: usize) -> Result<Histogram, QueryError> {
    let column = comparison::require_metric(dataset, column)?;
    Ok(Histogram::new(NumericSample::from_column(column).values, num_bins))
}

/// Box plot summaries of `metric` for every label of `group`.
///
/// Groups follow the first-appearance order of their labels. Labels
/// without any numeric value are left out.
///
/// ```
/// use threatfolio_data::{chart, dataset::Dataset};
///
/// let dataset = Dataset::from_rows(
///     ["Type", "Loss"],
///     [["B", "5"], ["A", "1"], ["A", "3"], ["B", "7"], ["C", "NA"]],
/// )
/// .unwrap();
/// let plots = chart::box_plot_by_group(&dataset, "Type", "Loss").unwrap();
/// assert_eq!(plots.len(), 2);
/// assert_eq!(plots[0].label, "B");
/// assert_eq!(plots[0].summary.median, 6.0);
/// assert_eq!(plots[1].summary.median, 2.0);
/// ```
pub fn box_plot_by_group(
    dataset: &Dataset,
    group: &str,
    metric: &str,
) -> Result<Vec<GroupBoxPlot>, QueryError> {
    let metric_column = comparison::require_metric(dataset, metric)?;
    let group_column = dataset.require_column(group)?;
    let plots = comparison::grouped_values(metric_column, group_column)
        .into_iter()
        .filter_map(|(label, values)| {
            let summary = BoxPlotSummary::new(values)?;
            Some(GroupBoxPlot {
                label: label.to_owned(),
                summary,
            })
        })
        .collect();
    Ok(plots)
}

#[cfg(test)]
mod tests {
    use threatfolio_stats::histogram::DEFAULT_NUM_BINS;

    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_rows(
            ["Type", "Loss"],
            (0..40).map(|i| {
                let label = if i % 4 == 0 { "Phishing" } else { "DDoS" };
                [label.to_owned(), i.to_string()]
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let histogram = histogram(&dataset(), "Loss", DEFAULT_NUM_BINS).unwrap();
        assert_eq!(histogram.bins.len(), DEFAULT_NUM_BINS);
        assert_eq!(histogram.total(), 40);
    }

    #[test]
    fn test_histogram_rejects_text_column() {
        assert!(matches!(
            histogram(&dataset(), "Type", DEFAULT_NUM_BINS),
            Err(QueryError::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn test_box_plots_follow_label_order() {
        let plots = box_plot_by_group(&dataset(), "Type", "Loss").unwrap();
        let labels = plots.iter().map(|p| p.label.as_str()).collect::<Vec<_>>();
        assert_eq!(labels, ["Phishing", "DDoS"]);
        assert_eq!(plots[0].summary.count, 10);
        assert_eq!(plots[1].summary.count, 30);
    }

    #[test]
    fn test_box_plot_per_distinct_label() {
        let dataset = Dataset::from_rows(
            ["Id", "Loss"],
            (0..5000).map(|i| [format!("incident-{i}"), i.to_string()]),
        )
        .unwrap();
        let plots = box_plot_by_group(&dataset, "Id", "Loss").unwrap();
        assert_eq!(plots.len(), 5000);
        assert_eq!(plots[4999].label, "incident-4999");
        assert_eq!(plots[4999].summary.median, 4999.0);
    }
}
