//! Column classification and descriptors.
//!
//! A column is numeric when every present cell reads as a number, or when
//! every present cell is a boolean literal; all other columns (including
//! mixed ones) are categorical. A column with no present cells at all is
//! numeric.

use serde::Serialize;

use crate::{
    dataset::{Column, Dataset},
    numeric,
};

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    #[display("numeric")]
    Numeric,
    #[display("categorical")]
    Categorical,
}

impl ColumnKind {
    /// Infers the kind of `column` from its present cells.
    #[must_use]
    pub fn infer(column: &Column) -> Self {
        if numeric::is_boolean_column(column)
            || column.cells().flatten().all(numeric::is_numeric_text)
        {
            Self::Numeric
        } else {
            Self::Categorical
        }
    }
}

/// Name, kind and missing-value statistics of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub kind: ColumnKind,
    /// Number of missing cells.
    pub missing: usize,
    /// Missing cells as a percentage of rows, rounded to two decimals (0 for an empty dataset).
    pub missing_pct: f64,
}

/// Column names partitioned by kind, each list in original column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnClassification {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnClassification {
    /// Partitions the columns of `dataset`; every column appears in exactly one list.
    ///
    /// ```
    /// use threatfolio_data::{column::ColumnClassification, dataset::Dataset};
    ///
    /// let dataset = Dataset::from_rows(
    ///     ["Year", "Country", "Loss"],
    ///     [["2019", "Brazil", "12.5"], ["2020", "UK", "?"]],
    /// )
    /// .unwrap();
    /// let classes = ColumnClassification::classify(&dataset);
    /// assert_eq!(classes.numeric, ["Year"]);
    /// assert_eq!(classes.categorical, ["Country", "Loss"]);
    /// ```
    #[must_use]
    pub fn classify(dataset: &Dataset) -> Self {
        let mut classes = Self::default();
        for column in dataset.columns() {
            let list = match ColumnKind::infer(column) {
                ColumnKind::Numeric => &mut classes.numeric,
                ColumnKind::Categorical => &mut classes.categorical,
            };
            list.push(column.name().to_owned());
        }
        classes
    }
}

/// Builds a descriptor for every column of `dataset`, in column order.
#[must_use]
pub fn describe_columns(dataset: &Dataset) -> Vec<ColumnDescriptor> {
    let rows = dataset.num_rows();
    dataset
        .columns()
        .iter()
        .map(|column| {
            let missing = column.missing_count();
            ColumnDescriptor {
                name: column.name().to_owned(),
                kind: ColumnKind::infer(column),
                missing,
                missing_pct: missing_percentage(missing, rows),
            }
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn missing_percentage(missing: usize, rows: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    let pct = missing as f64 / rows as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
