use serde::Serialize;
use threatfolio_data::summary;
use threatfolio_stats::confidence::ConfidenceInterval;

use crate::command::{
    args::{DatasetArg, OutputArg, SignificanceArg},
    table,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct IntervalArg {
    /// Numeric column whose mean is bounded
    column: String,
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    significance: SignificanceArg,
    #[clap(flatten)]
    output: OutputArg,
}

#[derive(Debug, Serialize)]
struct IntervalReport<'a> {
    column: &'a str,
    alpha: f64,
    #[serde(flatten)]
    interval: ConfidenceInterval,
}

pub(crate) fn run(arg: &IntervalArg) -> anyhow::Result<()> {
    let IntervalArg {
        column,
        dataset,
        significance,
        output,
    } = arg;

    let (_cache, dataset) = dataset.load()?;
    let interval = summary::mean_interval(&dataset, column, significance.alpha)?;
    let report = IntervalReport {
        column,
        alpha: significance.alpha.alpha(),
        interval,
    };

    if output.emit_json(&report)? {
        return Ok(());
    }

    table::print_title(&format!("Confidence Interval: {column}"));
    println!();
    println!(
        "  {}% CI for the mean: {}",
        table::format_level(interval.confidence_level),
        table::format_interval(&interval)
    );

    Ok(())
}
