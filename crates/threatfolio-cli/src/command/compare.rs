use anyhow::Context as _;
use threatfolio_data::comparison::{self, ComparisonOutcome, ComparisonResult, GroupSummary};

use crate::{
    command::{
        args::{DatasetArg, OutputArg, SampleArg, SignificanceArg},
        table,
    },
    util::format_stat,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Numeric metric column
    #[arg(long)]
    pub(crate) metric: String,
    /// Categorical grouping column
    #[arg(long)]
    pub(crate) group: String,
    /// First group label (defaults to the first label in the data)
    #[arg(long)]
    pub(crate) a: Option<String>,
    /// Second group label (defaults to the second label in the data)
    #[arg(long)]
    pub(crate) b: Option<String>,
    #[clap(flatten)]
    pub(crate) sample: SampleArg,
    #[clap(flatten)]
    significance: SignificanceArg,
    #[clap(flatten)]
    pub(crate) output: OutputArg,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let CompareArg {
        dataset,
        metric,
        group,
        a,
        b,
        sample,
        significance,
        output,
    } = arg;

    let (cache, _) = dataset.load()?;
    let display = sample.display_dataset(&cache)?;

    let labels = comparison::group_labels(&display, group)?;
    let a = a
        .clone()
        .or_else(|| labels.first().cloned())
        .with_context(|| format!("Column '{group}' has no labels"))?;
    let b = b
        .clone()
        .or_else(|| labels.get(1).cloned())
        .with_context(|| format!("Column '{group}' needs at least two labels"))?;

    let outcome =
        comparison::compare_groups(&display, metric, group, &a, &b, significance.alpha)?;

    if output.emit_json(&outcome)? {
        return Ok(());
    }

    table::print_title(&format!("Welch t-test: {metric} by {group}"));
    println!();
    println!(
        "Rows used: {} ({})",
        display.num_rows(),
        if sample.no_sample { "full dataset" } else { "sample" }
    );
    println!();

    match &outcome {
        ComparisonOutcome::Compared(result) => print_result(result),
        ComparisonOutcome::Skipped {
            label_a,
            count_a,
            label_b,
            count_b,
        } => {
            println!("  Not enough data: each group needs more than 5 numeric values.");
            println!("  {label_a}: {count_a}, {label_b}: {count_b}");
        }
    }

    Ok(())
}

fn print_group(group: &GroupSummary) {
    println!(
        "  {:<24} {:>8} {:>12.2} {:>30}",
        group.label,
        group.count,
        group.mean,
        table::format_interval(&group.interval),
    );
}

fn print_result(result: &ComparisonResult) {
    println!(
        "  {:<24} {:>8} {:>12} {:>30}",
        "Group",
        "Count",
        "Mean",
        format!("{}% CI", table::format_level(result.a.interval.confidence_level)),
    );
    println!("  {}", "-".repeat(77));
    print_group(&result.a);
    print_group(&result.b);
    println!();
    println!(
        "  t = {}, df = {}, p-value = {}",
        format_stat(Some(result.test.t_statistic), 3),
        format_stat(Some(result.test.degrees_of_freedom), 2),
        format_stat(Some(result.test.p_value), 4),
    );
}
