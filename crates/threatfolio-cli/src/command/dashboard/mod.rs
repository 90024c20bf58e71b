use std::path::PathBuf;

use anyhow::Context as _;
use threatfolio_data::{cache::DatasetCache, dataset::LoadOptions};

use self::{app::DashboardApp, state::Settings};
use crate::{
    command::args::{DatasetArg, RowLimitArg, SampleArg, SignificanceArg},
    profile::Profile,
    tui,
};

mod app;
mod screens;
mod state;

#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct DashboardArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Compute descriptive statistics at startup instead of on request
    #[arg(long)]
    full_stats: bool,
    #[clap(flatten)]
    sample: SampleArg,
    #[clap(flatten)]
    rows: RowLimitArg,
    #[clap(flatten)]
    significance: SignificanceArg,
    /// JSON file with the biography pages to show instead of the built-in ones
    #[arg(long)]
    profile: Option<PathBuf>,
}

pub(crate) fn run(arg: &DashboardArg) -> anyhow::Result<()> {
    let DashboardArg {
        dataset,
        full_stats,
        sample,
        rows,
        significance,
        profile,
    } = arg;

    let profile = Profile::load(profile.as_deref())?;
    let cache = DatasetCache::new(
        &dataset.dataset,
        LoadOptions {
            delimiter: dataset.delimiter,
        },
    );
    let settings = Settings {
        light_mode: !full_stats,
        use_sample: !sample.no_sample,
        sample_size: sample.sample_size,
        row_limit: rows.rows,
        seed: sample.seed,
        significance: significance.alpha,
    };

    let mut app = DashboardApp::new(profile, cache, settings)
        .with_context(|| format!("Failed to load dataset: {}", dataset.dataset.display()))?;
    log::info!(
        "Loaded {} rows from {}",
        app.info.dataset.num_rows(),
        dataset.dataset.display()
    );
    tui::run(&mut app)
}
