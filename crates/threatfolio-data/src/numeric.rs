//! Numeric coercion of text cells.
//!
//! Cells that cannot be read as a number are treated as missing, never as
//! an error. The number of such cells is kept so callers can report how
//! many values were dropped.
//!
//! A column whose present cells are all boolean literals (`True`, `false`,
//! ...) is numeric too, reading as 1 and 0.

use crate::dataset::Column;

/// Parses a cell as a number, `None` if it is not numeric or is NaN.
#[must_use]
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Returns whether a present cell can be interpreted as a number.
#[must_use]
pub fn is_numeric_text(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok()
}

/// Reads a boolean literal as 1 or 0.
#[must_use]
pub fn parse_bool(cell: &str) -> Option<f64> {
    match cell.trim() {
        "True" | "TRUE" | "true" => Some(1.0),
        "False" | "FALSE" | "false" => Some(0.0),
        _ => None,
    }
}

/// Returns whether `column` has present cells and all of them are boolean literals.
#[must_use]
pub fn is_boolean_column(column: &Column) -> bool {
    let mut present = column.cells().flatten().peekable();
    present.peek().is_some() && present.all(|cell| parse_bool(cell).is_some())
}

/// Parser to coerce the cells of `column` with.
#[must_use]
pub fn cell_parser(column: &Column) -> fn(&str) -> Option<f64> {
    if is_boolean_column(column) {
        parse_bool
    } else {
        parse_number
    }
}

/// Numeric values of a column after coercion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericSample {
    /// Coerced values in row order.
    pub values: Vec<f64>,
    /// Cells that were missing before coercion.
    pub missing: usize,
    /// Present cells that could not be coerced to a number.
    pub non_numeric: usize,
}

impl NumericSample {
    /// Coerces a sequence of optional cells.
    ///
    /// ```
    /// use threatfolio_data::numeric::NumericSample;
    ///
    /// let sample = NumericSample::from_cells([Some("1.5"), None, Some("n/a?"), Some(" 2 ")]);
    /// assert_eq!(sample.values, [1.5, 2.0]);
    /// assert_eq!(sample.missing, 1);
    /// assert_eq!(sample.non_numeric, 1);
    /// ```
    pub fn from_cells<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        Self::coerce(cells, parse_number)
    }

    /// Coerces every cell of `column`.
    #[must_use]
    pub fn from_column(column: &Column) -> Self {
        Self::coerce(column.cells(), cell_parser(column))
    }

    fn coerce<'a, I>(cells: I, parse: fn(&str) -> Option<f64>) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut sample = Self::default();
        for cell in cells {
            match cell {
                None => sample.missing += 1,
                Some(text) => match parse(text) {
                    Some(value) => sample.values.push(value),
                    None => sample.non_numeric += 1,
                },
            }
        }
        sample
    }

    /// Number of usable values.
    #[must_use]
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Cells without a usable value (`missing + non_numeric`).
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.missing + self.non_numeric
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("-3.5e2"), Some(-350.0));
        assert_eq!(parse_number(" 7 "), Some(7.0));
        assert_eq!(parse_number("inf"), Some(f64::INFINITY));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("12 USD"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_boolean_column_reads_as_ones_and_zeros() {
        let dataset = Dataset::from_rows(["flag"], [["True"], ["False"], [""], ["true"]]).unwrap();
        let column = dataset.column("flag").unwrap();
        assert!(is_boolean_column(column));
        let sample = NumericSample::from_column(column);
        assert_eq!(sample.values, [1.0, 0.0, 1.0]);
        assert_eq!(sample.missing, 1);
        assert_eq!(sample.non_numeric, 0);
    }

    #[test]
    fn test_mixed_boolean_column_is_not_boolean() {
        let dataset = Dataset::from_rows(["flag"], [["True"], ["1"], ["yes"]]).unwrap();
        let column = dataset.column("flag").unwrap();
        assert!(!is_boolean_column(column));
        assert_eq!(NumericSample::from_column(column).values, [1.0]);
        assert_eq!(parse_bool(" FALSE "), Some(0.0));
        assert_eq!(parse_bool("0"), None);
    }

    #[test]
    fn test_count_plus_dropped_is_total() {
        let cells = [Some("1"), None, Some("x"), Some("4"), None, Some("nan")];
        let sample = NumericSample::from_cells(cells);
        assert_eq!(sample.count() + sample.dropped(), cells.len());
        assert_eq!(sample.non_numeric, 2);
    }
}
