use serde::Serialize;
use threatfolio_data::column::{self, ColumnClassification, ColumnDescriptor};

use crate::command::{
    args::{DatasetArg, OutputArg, RowLimitArg},
    table,
};

#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct DescribeArg {
    #[clap(flatten)]
    dataset: DatasetArg,
    #[clap(flatten)]
    limit: RowLimitArg,
    #[clap(flatten)]
    output: OutputArg,
}

#[derive(Debug, Serialize)]
struct DescribeReport {
    rows: usize,
    columns: usize,
    classification: ColumnClassification,
    descriptors: Vec<ColumnDescriptor>,
    head: Vec<Vec<Option<String>>>,
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let DescribeArg {
        dataset,
        limit,
        output,
    } = arg;

    let (_cache, dataset) = dataset.load()?;
    let head = dataset.head(limit.rows);
    let report = DescribeReport {
        rows: dataset.num_rows(),
        columns: dataset.num_columns(),
        classification: ColumnClassification::classify(&dataset),
        descriptors: column::describe_columns(&dataset),
        head: (0..head.num_rows())
            .map(|row| head.row(row).map(|cell| cell.map(str::to_owned)).collect())
            .collect(),
    };

    if output.emit_json(&report)? {
        return Ok(());
    }

    table::print_title("Dataset Overview");
    println!();
    println!("Shape: {} rows x {} columns", report.rows, report.columns);
    println!("Numeric columns: {}", report.classification.numeric.join(", "));
    println!(
        "Categorical columns: {}",
        report.classification.categorical.join(", ")
    );
    println!();

    println!("First {} rows:", head.num_rows());
    table::print_rows(&head);
    println!();

    println!("Column types and missing values:");
    table::print_descriptors(&report.descriptors);

    Ok(())
}
