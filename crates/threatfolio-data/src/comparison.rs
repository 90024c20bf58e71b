//! Welch comparison of a numeric metric between two labelled groups.
//!
//! Group membership is decided by exact text equality between the grouping
//! cell and the label; rows with a missing grouping cell belong to no group.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use threatfolio_stats::{
    confidence::{ConfidenceInterval, Significance},
    descriptive::DescriptiveStats,
    welch::WelchTTest,
};

use crate::{
    QueryError,
    dataset::{Column, Dataset},
    numeric,
};

/// Minimum number of numeric observations each group needs to be compared.
pub const MIN_GROUP_OBSERVATIONS: usize = 6;

/// Mean and confidence interval of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub mean: f64,
    pub interval: ConfidenceInterval,
}

/// Completed comparison of group `a` against group `b`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub metric: String,
    pub group_column: String,
    pub a: GroupSummary,
    pub b: GroupSummary,
    pub test: WelchTTest,
}

/// Outcome of [`compare_groups`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Compared(ComparisonResult),
    /// At least one group has fewer than [`MIN_GROUP_OBSERVATIONS`] values.
    Skipped {
        label_a: String,
        count_a: usize,
        label_b: String,
        count_b: usize,
    },
}

impl ComparisonOutcome {
    #[must_use]
    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            Self::Compared(result) => Some(result),
            Self::Skipped { .. } => None,
        }
    }
}

/// Runs Welch's t-test on `metric` between rows labelled `a` and `b` in `group`.
///
/// Non-numeric metric cells are dropped per row. A group that ends up with
/// too few values yields [`ComparisonOutcome::Skipped`] rather than an error.
/// Swapping `a` and `b` negates the t-statistic and keeps the p-value.
pub fn compare_groups(
    dataset: &Dataset,
    metric: &str,
    group: &str,
    a: &str,
    b: &str,
    significance: Significance,
) -> Result<ComparisonOutcome, QueryError> {
    let metric_column = require_metric(dataset, metric)?;
    let group_column = dataset.require_column(group)?;

    let values_a = group_values(metric_column, group_column, a);
    let values_b = group_values(metric_column, group_column, b);

    let compared = summarize_group(a, &values_a, significance)
        .zip(summarize_group(b, &values_b, significance))
        .and_then(|((summary_a, stats_a), (summary_b, stats_b))| {
            let test = WelchTTest::from_stats(&stats_a, &stats_b)?;
            Some(ComparisonResult {
                metric: metric.to_owned(),
                group_column: group.to_owned(),
                a: summary_a,
                b: summary_b,
                test,
            })
        });

    match compared {
        Some(result) => Ok(ComparisonOutcome::Compared(result)),
        None => {
            log::debug!(
                "Skipping comparison of {metric:?} by {group:?}: {a:?} has {}, {b:?} has {}",
                values_a.len(),
                values_b.len()
            );
            Ok(ComparisonOutcome::Skipped {
                label_a: a.to_owned(),
                count_a: values_a.len(),
                label_b: b.to_owned(),
                count_b: values_b.len(),
            })
        }
    }
}

/// Distinct non-missing labels of `group`, in order of first appearance.
///
/// ```
/// use threatfolio_data::{comparison, dataset::Dataset};
///
/// let dataset = Dataset::from_rows(["Type"], [["B"], ["A"], [""], ["B"], ["C"]]).unwrap();
/// assert_eq!(comparison::group_labels(&dataset, "Type").unwrap(), ["B", "A", "C"]);
/// ```
pub fn group_labels(dataset: &Dataset, group: &str) -> Result<Vec<String>, QueryError> {
    let column = dataset.require_column(group)?;
    let mut seen = HashSet::new();
    let labels = column
        .cells()
        .flatten()
        .filter(|label| seen.insert(*label))
        .map(str::to_owned)
        .collect();
    Ok(labels)
}

/// Looks up a metric column, rejecting one whose present cells are all non-numeric.
///
/// Mixed columns are accepted; their non-numeric cells are dropped during coercion.
pub(crate) fn require_metric<'a>(
    dataset: &'a Dataset,
    name: &str,
) -> Result<&'a Column, QueryError> {
    let column = dataset.require_column(name)?;
    let mut present = column.cells().flatten().peekable();
    if present.peek().is_some()
        && !numeric::is_boolean_column(column)
        && !present.any(numeric::is_numeric_text)
    {
        return Err(QueryError::NonNumericColumn {
            name: name.to_owned(),
        });
    }
    Ok(column)
}

fn group_values(metric: &Column, group: &Column, label: &str) -> Vec<f64> {
    let parse = numeric::cell_parser(metric);
    metric
        .cells()
        .zip(group.cells())
        .filter(|(_, g)| *g == Some(label))
        .filter_map(|(m, _)| m.and_then(parse))
        .collect()
}

/// Numeric metric values of every group label, in one pass over the rows.
///
/// Groups follow the first-appearance order of their labels; labels whose
/// rows hold no numeric value are left out.
pub(crate) fn grouped_values<'a>(
    metric: &Column,
    group: &'a Column,
) -> Vec<(&'a str, Vec<f64>)> {
    let parse = numeric::cell_parser(metric);
    let mut index = HashMap::new();
    let mut groups: Vec<(&str, Vec<f64>)> = vec![];
    let rows = metric.cells().zip(group.cells());
    for (value, label) in rows.filter_map(|(m, g)| Some((parse(m?)?, g?))) {
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push((label, vec![]));
            groups.len() - 1
        });
        groups[slot].1.push(value);
    }
    groups
}

fn summarize_group(
    label: &str,
    values: &[f64],
    significance: Significance,
) -> Option<(GroupSummary, DescriptiveStats)> {
    if values.len() < MIN_GROUP_OBSERVATIONS {
        return None;
    }
    let stats = DescriptiveStats::new(values.iter().copied())?;
    let summary = GroupSummary {
        label: label.to_owned(),
        count: stats.count,
        mean: stats.mean,
        interval: ConfidenceInterval::from_stats(Some(&stats), significance),
    };
    Some((summary, stats))
}
