//! Plain-text tables for the report subcommands.

use threatfolio_data::{column::ColumnDescriptor, dataset::Dataset, summary::SummaryRecord};
use threatfolio_stats::confidence::ConfidenceInterval;

use crate::util::{format_stat, truncate};

const NAME_WIDTH: usize = 32;
const CELL_WIDTH: usize = 16;

pub(super) fn print_title(title: &str) {
    println!("{title}");
    println!("{}", "=".repeat(title.chars().count()));
}

fn print_separator(width: usize) {
    println!("  {}", "-".repeat(width));
}

/// Print column kinds and missing percentages
pub(super) fn print_descriptors(descriptors: &[ColumnDescriptor]) {
    println!(
        "  {:<NAME_WIDTH$} {:<12} {:>8} {:>10}",
        "Column", "Kind", "Missing", "Missing%"
    );
    print_separator(NAME_WIDTH + 33);
    for descriptor in descriptors {
        println!(
            "  {:<NAME_WIDTH$} {:<12} {:>8} {:>9.2}%",
            truncate(&descriptor.name, NAME_WIDTH),
            descriptor.kind.to_string(),
            descriptor.missing,
            descriptor.missing_pct,
        );
    }
}

/// Print the first rows of a dataset, one fixed-width cell per column
pub(super) fn print_rows(dataset: &Dataset) {
    let header = dataset
        .column_names()
        .map(|name| format!("{:<CELL_WIDTH$}", truncate(name, CELL_WIDTH)))
        .collect::<Vec<_>>()
        .join(" ");
    println!("  {:>5} {header}", "#");
    print_separator(6 + dataset.num_columns() * (CELL_WIDTH + 1));
    for row in 0..dataset.num_rows() {
        let cells = dataset
            .row(row)
            .map(|cell| format!("{:<CELL_WIDTH$}", truncate(cell.unwrap_or("N/A"), CELL_WIDTH)))
            .collect::<Vec<_>>()
            .join(" ");
        println!("  {row:>5} {cells}");
    }
}

/// Print one line of summary statistics per column
pub(super) fn print_summary(records: &[SummaryRecord]) {
    println!(
        "  {:<NAME_WIDTH$} {:>7} {:>7} {:>7} {:>12} {:>12} {:>12} {:>14} {:>12} {:>12}",
        "Column", "Count", "Missing", "NonNum", "Mean", "Median", "StdDev", "Variance", "Min", "Max",
    );
    print_separator(NAME_WIDTH + 112);
    for record in records {
        println!(
            "  {:<NAME_WIDTH$} {:>7} {:>7} {:>7} {:>12} {:>12} {:>12} {:>14} {:>12} {:>12}",
            truncate(&record.column, NAME_WIDTH),
            record.count,
            record.missing,
            record.non_numeric,
            format_stat(record.mean, 2),
            format_stat(record.median, 2),
            format_stat(record.std_dev, 2),
            format_stat(record.variance, 2),
            format_stat(record.min, 2),
            format_stat(record.max, 2),
        );
    }
    if records.iter().any(|r| r.non_numeric > 0) {
        println!();
        println!("  NonNum: present cells that were not numeric and were treated as missing");
    }
}

/// Format a confidence interval as `mean [lower, upper]`
pub(super) fn format_interval(interval: &ConfidenceInterval) -> String {
    let bounds = interval.bounds.map_or("not enough data".to_string(), |b| {
        format!("[{:.2}, {:.2}]", b.lower, b.upper)
    });
    format!("{} {bounds}", format_stat(interval.mean, 2))
}

/// Format a confidence level as a percentage with at most one decimal
pub(super) fn format_level(confidence_level: f64) -> String {
    let pct = (confidence_level * 1000.0).round() / 10.0;
    format!("{pct}")
}

#[cfg(test)]
mod tests {
    use threatfolio_stats::confidence::Significance;

    use super::*;

    #[test]
    fn test_format_interval() {
        let ci = ConfidenceInterval::for_mean([10.0, 20.0, 30.0, 40.0, 50.0], Significance::default());
        assert_eq!(format_interval(&ci), "30.00 [10.37, 49.63]");

        let single = ConfidenceInterval::for_mean([4.0], Significance::default());
        assert_eq!(format_interval(&single), "4.00 not enough data");
    }

    #[test]
    fn test_format_level() {
        assert_eq!(format_level(0.95), "95");
        assert_eq!(format_level(0.995), "99.5");
    }
}
