use clap::builder::TypedValueParser;
use threatfolio_data::chart;
use threatfolio_stats::histogram::DEFAULT_NUM_BINS;

use crate::command::{
    args::{DatasetArg, OutputArg, SampleArg},
    table,
};

const BAR_WIDTH: u64 = 40;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct HistogramArg {
    /// Numeric column to bin
    column: String,
    /// Number of equal-width bins
    #[arg(long, default_value_t = DEFAULT_NUM_BINS, value_parser = clap::value_parser!(u16).range(1..=500).map(usize::from))]
    bins: usize,
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    sample: SampleArg,
    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &HistogramArg) -> anyhow::Result<()> {
    let HistogramArg {
        column,
        bins,
        dataset,
        sample,
        output,
    } = arg;

    let (cache, _) = dataset.load()?;
    let display = sample.display_dataset(&cache)?;
    let histogram = chart::histogram(&display, column, *bins)?;

    if output.emit_json(&histogram)? {
        return Ok(());
    }

    table::print_title(&format!("Histogram: {column}"));
    println!();
    if histogram.bins.is_empty() {
        println!("  Not enough data: the column has no numeric values.");
        return Ok(());
    }

    let max_count = histogram.bins.iter().map(|bin| bin.count).max().unwrap_or(0);
    println!("  {:>12} {:>12} {:>8}", "From", "To", "Count");
    println!("  {}", "-".repeat(34 + BAR_WIDTH as usize));
    for bin in &histogram.bins {
        println!(
            "  {:>12.2} {:>12.2} {:>8} {}",
            bin.range.start,
            bin.range.end,
            bin.count,
            "#".repeat(bar_length(bin.count, max_count)),
        );
    }
    println!();
    println!("  Total: {}", histogram.total());

    Ok(())
}

fn bar_length(count: u64, max_count: u64) -> usize {
    if max_count == 0 {
        return 0;
    }
    usize::try_from(count * BAR_WIDTH / max_count).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_length_scales_to_max() {
        assert_eq!(bar_length(10, 10), 40);
        assert_eq!(bar_length(5, 10), 20);
        assert_eq!(bar_length(0, 10), 0);
        assert_eq!(bar_length(0, 0), 0);
    }
}
