use clap::{Parser, Subcommand};

use self::{
    box_plot::BoxPlotArg, compare::CompareArg, dashboard::DashboardArg, describe::DescribeArg,
    histogram::HistogramArg, interval::IntervalArg, summary::SummaryArg,
};

mod args;
mod box_plot;
mod compare;
mod dashboard;
mod describe;
mod histogram;
mod interval;
mod summary;
mod table;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Open the interactive dashboard (default)
    Dashboard(#[clap(flatten)] DashboardArg),
    /// Print dataset shape, head rows and column types
    Describe(#[clap(flatten)] DescribeArg),
    /// Print descriptive statistics of numeric columns
    Summary(#[clap(flatten)] SummaryArg),
    /// Print the confidence interval for the mean of a column
    Interval(#[clap(flatten)] IntervalArg),
    /// Compare a metric between two groups with Welch's t-test
    Compare(#[clap(flatten)] CompareArg),
    /// Print histogram bins of a numeric column
    Histogram(#[clap(flatten)] HistogramArg),
    /// Print box plot summaries of a metric by group
    BoxPlot(#[clap(flatten)] BoxPlotArg),
}

impl Mode {
    fn default_log_level(&self) -> &'static str {
        match self {
            Mode::Dashboard(_) => "warn",
            _ => "info",
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args
        .mode
        .unwrap_or_else(|| Mode::Dashboard(DashboardArg::default()));

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(mode.default_log_level()),
    )
    .init();

    match mode {
        Mode::Dashboard(arg) => dashboard::run(&arg)?,
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Summary(arg) => summary::run(&arg)?,
        Mode::Interval(arg) => interval::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Histogram(arg) => histogram::run(&arg)?,
        Mode::BoxPlot(arg) => box_plot::run(&arg)?,
    }
    Ok(())
}
