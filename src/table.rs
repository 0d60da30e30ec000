//! Table adapter: turns raw extracted tables into rectangular grids.

use crate::model::{Grid, RawTable};
use crate::text::normalize_str;
use std::fmt;

/// Size bounds a target places on tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
    /// Maximum rows, header included
    pub max_rows: Option<usize>,
    /// Maximum columns
    pub max_columns: Option<usize>,
}

impl TableLimits {
    /// No size limits (word-processing target).
    pub const fn unbounded() -> Self {
        Self {
            max_rows: None,
            max_columns: None,
        }
    }

    /// Limits for the slide target: at most 50 rows and 10 columns.
    pub const fn slides() -> Self {
        Self {
            max_rows: Some(50),
            max_columns: Some(10),
        }
    }
}

impl Default for TableLimits {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Why a table was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRejection {
    /// No rows, or an empty first row
    Empty,
    /// More rows than the target allows
    TooManyRows(usize),
    /// More columns than the target allows
    TooManyColumns(usize),
}

impl fmt::Display for TableRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableRejection::Empty => write!(f, "table has no columns"),
            TableRejection::TooManyRows(n) => write!(f, "table has too many rows ({})", n),
            TableRejection::TooManyColumns(n) => write!(f, "table has too many columns ({})", n),
        }
    }
}

/// Normalize `raw` into a grid, or report why it cannot be placed.
///
/// The column count comes from the first row. Missing cells and cells past
/// the end of a short row become empty strings; cells past the column
/// count of a long row are dropped.
pub fn adapt(raw: &RawTable, limits: TableLimits) -> Result<Grid, TableRejection> {
    let columns = raw.column_count();
    if columns == 0 {
        return Err(TableRejection::Empty);
    }
    if let Some(max) = limits.max_rows {
        if raw.row_count() > max {
            return Err(TableRejection::TooManyRows(raw.row_count()));
        }
    }
    if let Some(max) = limits.max_columns {
        if columns > max {
            return Err(TableRejection::TooManyColumns(columns));
        }
    }

    let rows = raw
        .rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| {
                    row.get(i)
                        .and_then(|cell| cell.as_deref())
                        .map(normalize_str)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    Grid::new(columns, rows).ok_or(TableRejection::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(rows: usize, cols: usize) -> RawTable {
        RawTable::new(
            (0..rows)
                .map(|r| (0..cols).map(|c| Some(format!("{}-{}", r, c))).collect())
                .collect(),
        )
    }

    #[test]
    fn test_empty_tables_rejected() {
        assert_eq!(
            adapt(&RawTable::default(), TableLimits::unbounded()),
            Err(TableRejection::Empty)
        );
        let empty_first_row = RawTable::new(vec![vec![], vec![Some("x".into())]]);
        assert_eq!(
            adapt(&empty_first_row, TableLimits::unbounded()),
            Err(TableRejection::Empty)
        );
    }

    #[test]
    fn test_ragged_rows_padded_and_truncated() {
        let raw = RawTable::new(vec![
            vec![Some("Name".into()), Some("Age".into())],
            vec![Some("Alice".into())],
            vec![None, Some("25".into()), Some("extra".into())],
        ]);
        let grid = adapt(&raw, TableLimits::unbounded()).unwrap();
        assert_eq!(grid.column_count(), 2);
        assert_eq!(grid.rows()[1], ["Alice", ""]);
        assert_eq!(grid.rows()[2], ["", "25"]);
    }

    #[test]
    fn test_cells_are_normalized() {
        let raw = RawTable::new(vec![vec![Some("  a \t b\0 ".into()), Some(" ".into())]]);
        let grid = adapt(&raw, TableLimits::unbounded()).unwrap();
        assert_eq!(grid.header(), ["a b", ""]);
    }

    #[test]
    fn test_slide_limits() {
        assert!(adapt(&sized(50, 10), TableLimits::slides()).is_ok());
        assert_eq!(
            adapt(&sized(51, 2), TableLimits::slides()),
            Err(TableRejection::TooManyRows(51))
        );
        assert_eq!(
            adapt(&sized(2, 11), TableLimits::slides()),
            Err(TableRejection::TooManyColumns(11))
        );
    }

    #[test]
    fn test_unbounded_accepts_large_tables() {
        assert!(adapt(&sized(51, 11), TableLimits::unbounded()).is_ok());
    }
}
