use threatfolio_data::{
    column::ColumnClassification,
    summary::{self, DEFAULT_SUMMARY_COLUMNS},
};

use crate::command::{
    args::{DatasetArg, OutputArg},
    table,
};

#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct SummaryArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    /// Columns to summarize (comma-separated, defaults to the first three numeric columns)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,
    #[clap(flatten)]
    output: OutputArg,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg {
        dataset,
        columns,
        output,
    } = arg;

    let (_cache, dataset) = dataset.load()?;
    let columns = if columns.is_empty() {
        ColumnClassification::classify(&dataset)
            .numeric
            .into_iter()
            .take(DEFAULT_SUMMARY_COLUMNS)
            .collect()
    } else {
        columns.clone()
    };

    let records = summary::summarize(&dataset, &columns)?;

    if output.emit_json(&records)? {
        return Ok(());
    }

    table::print_title("Descriptive Statistics");
    println!();
    println!("Rows: {}", dataset.num_rows());
    println!();
    table::print_summary(&records);

    Ok(())
}
