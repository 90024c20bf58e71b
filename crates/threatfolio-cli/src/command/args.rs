//! Argument groups shared by several subcommands.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use threatfolio_data::{
    cache::DatasetCache,
    dataset::{Dataset, LoadOptions},
    sample::DEFAULT_SEED,
};
use threatfolio_stats::confidence::Significance;

use crate::util::Output;

pub(crate) const DEFAULT_DATASET_PATH: &str = "Global_Cybersecurity_Threats_2015-2024.csv";

/// Bounded integer setting adjusted in fixed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slider {
    pub min: usize,
    pub max: usize,
    pub step: usize,
    pub default: usize,
}

pub(crate) const SAMPLE_SIZE: Slider = Slider {
    min: 500,
    max: 20_000,
    step: 500,
    default: 3000,
};

pub(crate) const ROW_LIMIT: Slider = Slider {
    min: 5,
    max: 200,
    step: 5,
    default: 20,
};

impl Slider {
    /// Parses `value`, accepting only in-range values on the step grid.
    pub(crate) fn parse(&self, value: &str) -> Result<usize, String> {
        let value = value
            .parse::<usize>()
            .map_err(|e| format!("invalid number: {e}"))?;
        if !(self.min..=self.max).contains(&value) {
            return Err(format!("must be within {}..={}", self.min, self.max));
        }
        if (value - self.min) % self.step != 0 {
            return Err(format!(
                "must be {} plus a multiple of {}",
                self.min, self.step
            ));
        }
        Ok(value)
    }

    pub(crate) fn increase(&self, value: usize) -> usize {
        value.saturating_add(self.step).min(self.max)
    }

    pub(crate) fn decrease(&self, value: usize) -> usize {
        value.saturating_sub(self.step).max(self.min)
    }
}

fn parse_sample_size(value: &str) -> Result<usize, String> {
    SAMPLE_SIZE.parse(value)
}

fn parse_row_limit(value: &str) -> Result<usize, String> {
    ROW_LIMIT.parse(value)
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value.as_bytes() {
        [byte] => Ok(*byte),
        _ if value == "\\t" => Ok(b'\t'),
        _ => Err("delimiter must be a single ASCII character".to_owned()),
    }
}

fn parse_significance(value: &str) -> Result<Significance, String> {
    let alpha = value
        .parse::<f64>()
        .map_err(|e| format!("invalid number: {e}"))?;
    Significance::new(alpha).map_err(|e| e.to_string())
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DatasetArg {
    /// Path to the incidents CSV file
    #[arg(long, default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,
    /// Field delimiter of the dataset file (`\t` for tabs)
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

impl Default for DatasetArg {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            delimiter: LoadOptions::default().delimiter,
        }
    }
}

impl DatasetArg {
    /// Creates the cache and loads the dataset into it.
    pub(crate) fn load(&self) -> anyhow::Result<(DatasetCache, Arc<Dataset>)> {
        let cache = DatasetCache::new(
            &self.dataset,
            LoadOptions {
                delimiter: self.delimiter,
            },
        );
        let dataset = cache
            .dataset()
            .with_context(|| format!("Failed to load dataset: {}", self.dataset.display()))?;
        Ok((cache, dataset))
    }
}

#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct OutputArg {
    /// Print results as pretty JSON instead of tables
    #[arg(long)]
    pub json: bool,
    /// Write the JSON output to this file instead of stdout
    #[arg(long, short, requires = "json")]
    pub output: Option<PathBuf>,
}

impl OutputArg {
    /// Writes `value` as JSON when requested, returning whether it did.
    pub(crate) fn emit_json<T>(&self, value: &T) -> anyhow::Result<bool>
    where
        T: serde::Serialize,
    {
        if !self.json {
            return Ok(false);
        }
        Output::save_json(value, self.output.as_deref())?;
        Ok(true)
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleArg {
    /// Use the full dataset for charts and comparisons
    #[arg(long)]
    pub no_sample: bool,
    /// Number of sampled rows (500..=20000, step 500)
    #[arg(long, default_value_t = SAMPLE_SIZE.default, value_parser = parse_sample_size)]
    pub sample_size: usize,
    /// Seed of the row sampler
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

impl Default for SampleArg {
    fn default() -> Self {
        Self {
            no_sample: false,
            sample_size: SAMPLE_SIZE.default,
            seed: DEFAULT_SEED,
        }
    }
}

impl SampleArg {
    pub(crate) fn display_dataset(&self, cache: &DatasetCache) -> anyhow::Result<Arc<Dataset>> {
        cache
            .display_dataset(!self.no_sample, self.sample_size, self.seed)
            .with_context(|| format!("Failed to load dataset: {}", cache.path().display()))
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SignificanceArg {
    /// Significance level of confidence intervals and tests, within (0, 1)
    #[arg(long, default_value = "0.05", value_parser = parse_significance)]
    pub alpha: Significance,
}

impl Default for SignificanceArg {
    fn default() -> Self {
        Self {
            alpha: Significance::default(),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RowLimitArg {
    /// Number of rows shown in data tables (5..=200, step 5)
    #[arg(long, default_value_t = ROW_LIMIT.default, value_parser = parse_row_limit)]
    pub rows: usize,
}

impl Default for RowLimitArg {
    fn default() -> Self {
        Self {
            rows: ROW_LIMIT.default,
        }
    }
}
