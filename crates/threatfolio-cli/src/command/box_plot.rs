use threatfolio_data::chart;

use crate::{
    command::{
        args::{DatasetArg, OutputArg, SampleArg},
        table,
    },
    util::truncate,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoxPlotArg {
    /// Categorical grouping column
    #[arg(long)]
    group: String,
    /// Numeric metric column
    #[arg(long)]
    metric: String,
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    sample: SampleArg,
    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &BoxPlotArg) -> anyhow::Result<()> {
    let BoxPlotArg {
        group,
        metric,
        dataset,
        sample,
        output,
    } = arg;

    let (cache, _) = dataset.load()?;
    let display = sample.display_dataset(&cache)?;
    let plots = chart::box_plot_by_group(&display, group, metric)?;

    if output.emit_json(&plots)? {
        return Ok(());
    }

    table::print_title(&format!("Box plot: {metric} by {group}"));
    println!();
    println!(
        "  {:<24} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "Group", "Count", "Low", "Q1", "Median", "Q3", "High", "Outliers"
    );
    println!("  {}", "-".repeat(96));
    for plot in &plots {
        let summary = &plot.summary;
        println!(
            "  {:<24} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>9}",
            truncate(&plot.label, 24),
            summary.count,
            summary.lower_whisker,
            summary.q1,
            summary.median,
            summary.q3,
            summary.upper_whisker,
            summary.outliers.len(),
        );
    }

    Ok(())
}
