//! In-memory tabular dataset loaded from a delimited file.
//!
//! A [`Dataset`] is a read-only, column-oriented table of text cells. It is
//! loaded once and shared (usually behind an `Arc`) by every view of the
//! dashboard; derived structures never mutate it.
//!
//! Columns whose header looks like an auto-generated index (`Unnamed: 0`,
//! or an empty header) are removed while loading. Repeated headers get a
//! `.1`, `.2`, ... suffix so every column can be looked up by name.

use std::{
    collections::{HashMap, HashSet},
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use crate::QueryError;

/// Cell texts treated as missing values, in addition to the empty string.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header prefix of auto-generated index columns.
pub const INDEX_COLUMN_PREFIX: &str = "Unnamed";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to open dataset {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse dataset {}", path.display())]
    Parse { path: PathBuf, source: csv::Error },
    #[display("dataset {} has no header row", path.display())]
    MissingHeader { path: PathBuf },
    #[display("row {row} has {found} fields, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Options controlling how a delimited file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

/// A named column of optional text cells (`None` is a missing value).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    cells: Vec<Option<String>>,
}

impl Column {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cell at `row`, `None` when missing or out of range.
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(Option::as_deref)
    }

    /// Iterates over all cells in row order.
    pub fn cells(&self) -> impl ExactSizeIterator<Item = Option<&str>> + '_ {
        self.cells.iter().map(Option::as_deref)
    }

    /// Number of missing cells.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }
}

/// Immutable table of rows x named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Vec<Column>,
    num_rows: usize,
}

impl Dataset {
    /// Loads a comma-separated file.
    pub fn from_path<P>(path: P) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        Self::load(path, LoadOptions::default())
    }

    /// Loads a delimited file with a header row.
    ///
    /// The whole file is parsed before returning; any malformed record fails
    /// the load and no partial dataset is produced.
    pub fn load<P>(path: P, options: LoadOptions) -> Result<Self, LoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        log::info!("Loading dataset from {}", path.display());

        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let parse_error = |source| LoadError::Parse {
            path: path.to_owned(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(true)
            .flexible(false)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(parse_error)?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if headers.is_empty() {
            return Err(LoadError::MissingHeader {
                path: path.to_owned(),
            });
        }

        let mut rows = vec![];
        for record in reader.records() {
            let record = record.map_err(parse_error)?;
            rows.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
        }

        let dataset = Self::from_rows(headers, rows)?;
        log::info!(
            "Loaded {} rows x {} columns",
            dataset.num_rows(),
            dataset.num_columns()
        );
        Ok(dataset)
    }

    /// Builds a dataset from a header row and data rows of text cells.
    ///
    /// Cells equal to the empty string or one of [`MISSING_MARKERS`] become
    /// missing values. Index-like columns are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use threatfolio_data::dataset::Dataset;
    ///
    /// let dataset = Dataset::from_rows(
    ///     ["Unnamed: 0", "Country", "Loss"],
    ///     [["0", "Brazil", "12.5"], ["1", "India", "NA"]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(dataset.shape(), (2, 2));
    /// assert_eq!(dataset.column_names().collect::<Vec<_>>(), ["Country", "Loss"]);
    /// assert_eq!(dataset.column("Loss").unwrap().get(1), None);
    /// ```
    pub fn from_rows<H, R, C>(headers: H, rows: R) -> Result<Self, LoadError>
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        let mut columns = headers
            .into_iter()
            .map(|name| Column {
                name: name.into(),
                cells: vec![],
            })
            .collect::<Vec<_>>();
        let expected = columns.len();

        let mut num_rows = 0;
        for (row, record) in rows.into_iter().enumerate() {
            let mut found = 0;
            for cell in record {
                let cell = cell.into();
                if let Some(column) = columns.get_mut(found) {
                    column.cells.push(normalize_cell(cell));
                }
                found += 1;
            }
            if found != expected {
                return Err(LoadError::RaggedRow {
                    row,
                    expected,
                    found,
                });
            }
            num_rows += 1;
        }

        columns.retain(|column| {
            let keep = !is_index_column_name(&column.name);
            if !keep {
                log::debug!("Dropping index column {:?}", column.name);
            }
            keep
        });
        deduplicate_names(&mut columns);

        Ok(Self { columns, num_rows })
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.num_rows, self.columns.len())
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(Column::name)
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Self::column`], but reports an unknown name as an error.
    pub fn require_column(&self, name: &str) -> Result<&Column, QueryError> {
        self.column(name).ok_or_else(|| QueryError::UnknownColumn {
            name: name.to_owned(),
        })
    }

    /// Iterates over the cells of one row, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.columns.iter().map(move |c| c.get(row))
    }

    /// Returns a dataset holding the first `limit` rows.
    #[must_use]
    pub fn head(&self, limit: usize) -> Self {
        self.select_rows(&(0..limit.min(self.num_rows)).collect::<Vec<_>>())
    }

    /// Returns a dataset holding the given rows, in the given order.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|column| Column {
                name: column.name.clone(),
                cells: indices.iter().map(|&i| column.cells[i].clone()).collect(),
            })
            .collect();
        Self {
            columns,
            num_rows: indices.len(),
        }
    }
}

/// Returns whether `name` is the header of an auto-generated index column.
#[must_use]
pub fn is_index_column_name(name: &str) -> bool {
    name.is_empty() || name.starts_with(INDEX_COLUMN_PREFIX)
}

/// Renames repeated headers to `name.1`, `name.2`, ... skipping names already taken.
fn deduplicate_names(columns: &mut [Column]) {
    let mut taken = columns
        .iter()
        .map(|c| c.name.clone())
        .collect::<HashSet<_>>();
    let mut first_seen = HashSet::new();
    let mut suffixes = HashMap::<String, usize>::new();
    for column in columns {
        if first_seen.insert(column.name.clone()) {
            continue;
        }
        let suffix = suffixes.entry(column.name.clone()).or_insert(0);
        let renamed = loop {
            *suffix += 1;
            let candidate = format!("{}.{suffix}", column.name);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        log::debug!("Renaming repeated column {:?} to {renamed:?}", column.name);
        taken.insert(renamed.clone());
        column.name = renamed;
    }
}

/// Returns whether a raw cell text denotes a missing value.
#[must_use]
pub fn is_missing_marker(cell: &str) -> bool {
    cell.is_empty() || MISSING_MARKERS.contains(&cell)
}

fn normalize_cell(cell: String) -> Option<String> {
    (!is_missing_marker(&cell)).then_some(cell)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_strips_index_columns() {
        let file = write_csv(
            ",Country,Attack Type,Financial Loss (in Million $),Unnamed: 5\n\
             0,China,Phishing,80.53,x\n\
             1,India,Ransomware,62.19,y\n",
        );
        let dataset = Dataset::from_path(file.path()).unwrap();

        assert_eq!(dataset.shape(), (2, 3));
        assert!(dataset.column_names().all(|name| !is_index_column_name(name)));
        assert_eq!(
            dataset.row(1).collect::<Vec<_>>(),
            [Some("India"), Some("Ransomware"), Some("62.19")]
        );
    }

    #[test]
    fn test_blank_header_is_kept() {
        let dataset = Dataset::from_rows(["", " ", "Loss"], [["0", "x", "1"]]).unwrap();
        assert_eq!(dataset.column_names().collect::<Vec<_>>(), [" ", "Loss"]);
        assert!(is_index_column_name(""));
        assert!(!is_index_column_name(" "));
    }

    #[test]
    fn test_repeated_headers_are_renamed() {
        let dataset = Dataset::from_rows(
            ["Loss", "Loss", "Loss.1", "Loss"],
            [["1", "2", "3", "4"]],
        )
        .unwrap();
        assert_eq!(
            dataset.column_names().collect::<Vec<_>>(),
            ["Loss", "Loss.2", "Loss.1", "Loss.3"]
        );
        assert_eq!(dataset.column("Loss.2").unwrap().get(0), Some("2"));
        assert_eq!(dataset.column("Loss.3").unwrap().get(0), Some("4"));
    }

    #[test]
    fn test_load_with_custom_delimiter() {
        let file = write_csv("a;b\n1;2\n3;\n");
        let dataset = Dataset::load(file.path(), LoadOptions { delimiter: b';' }).unwrap();
        assert_eq!(dataset.shape(), (2, 2));
        assert_eq!(dataset.column("b").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::from_path(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_ragged_file_is_load_error() {
        let file = write_csv("a,b\n1,2\n3\n");
        let err = Dataset::from_path(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_empty_file_is_load_error() {
        let file = write_csv("");
        let err = Dataset::from_path(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader { .. }));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        let err = Dataset::from_rows(["a", "b"], [vec!["1", "2"], vec!["3", "4", "5"]]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::RaggedRow {
                row: 1,
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn test_missing_markers() {
        let dataset =
            Dataset::from_rows(["x"], [["NaN"], [""], ["null"], ["0"], ["none"]]).unwrap();
        let column = dataset.column("x").unwrap();
        assert_eq!(column.missing_count(), 3);
        assert_eq!(column.get(3), Some("0"));
        assert_eq!(column.get(4), Some("none"));
    }

    #[test]
    fn test_head_and_select_rows() {
        let dataset = Dataset::from_rows(["x"], [["a"], ["b"], ["c"]]).unwrap();
        assert_eq!(dataset.head(2).shape(), (2, 1));
        assert_eq!(dataset.head(10), dataset);
        let picked = dataset.select_rows(&[2, 0]);
        assert_eq!(picked.column("x").unwrap().get(0), Some("c"));
        assert_eq!(picked.column("x").unwrap().get(1), Some("a"));
    }

    #[test]
    fn test_require_column() {
        let dataset = Dataset::from_rows(["x"], [["a"]]).unwrap();
        assert!(dataset.require_column("x").is_ok());
        assert!(matches!(
            dataset.require_column("y"),
            Err(QueryError::UnknownColumn { .. })
        ));
    }
}
