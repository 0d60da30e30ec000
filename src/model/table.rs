//! Table types: raw extracted tables and normalized grids.

use serde::{Deserialize, Serialize};

/// A table as extracted from a page: rows of optional cell values.
///
/// Rows may be ragged; the first row defines the column count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Rows in source order
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create a table from rows.
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Create a table where every cell is present.
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|c| Some(c.into())).collect())
                .collect(),
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A rectangular table ready for layout.
///
/// The first row is the header row; every row has exactly `columns` cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    columns: usize,
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Build a grid from rows that are already `columns` wide.
    ///
    /// Returns `None` for a grid without rows or columns, or with a row
    /// of the wrong width.
    pub fn new(columns: usize, rows: Vec<Vec<String>>) -> Option<Self> {
        if columns == 0 || rows.is_empty() || rows.iter().any(|r| r.len() != columns) {
            return None;
        }
        Some(Self { columns, rows })
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// Number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The header row.
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// Rows after the header.
    pub fn body(&self) -> &[Vec<String>] {
        &self.rows[1..]
    }

    /// All rows, header first.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
