#![deny(unsafe_code)]

//! In-memory tabular data.
//!
//! A [`Table`] is an ordered list of column names plus rows aligned to them.
//! Tables are built once by ingestion and only read afterwards; every
//! filtering operation returns a new table.

use std::fmt;

use chrono::{NaiveDateTime, Timelike};

/// A single cell of a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Verbatim field text.
    Text(String),
    /// A parsed date/time.
    Date(NaiveDateTime),
    /// A date field whose text could not be parsed. Keeps the raw text.
    InvalidDate(String),
    /// Empty field, or column absent from the row's source.
    Missing,
}

impl CellValue {
    /// Builds a cell from a raw CSV field; empty fields become [`CellValue::Missing`].
    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            Self::Missing
        } else {
            Self::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric interpretation of a text cell. Non-numeric text yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let trimmed = self.as_text()?.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Date(value) if value.time().num_seconds_from_midnight() == 0 => {
                write!(f, "{}", value.format("%Y-%m-%d"))
            }
            Self::Date(value) => write!(f, "{}", value.format("%Y-%m-%d %H:%M:%S")),
            Self::InvalidDate(raw) => write!(f, "<invalid date: {raw}>"),
            Self::Missing => Ok(()),
        }
    }
}

/// Ordered columns with rows aligned to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// A table with zero rows and zero columns.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a row, padding it with missing cells up to the table width.
    ///
    /// Cells beyond the table width are dropped. Readers that must reject
    /// wide rows check them before pushing.
    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Missing);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Renames the first column called `from`. Returns false if it does not exist.
    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Rewrites every column name with `rename`.
    pub fn rename_columns_with(&mut self, mut rename: impl FnMut(&str) -> String) {
        for column in &mut self.columns {
            *column = rename(column);
        }
    }

    /// Iterates the cells of a column, `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Replaces every cell of a column with `f(cell)`. Returns false if the column does not exist.
    pub fn map_column(&mut self, name: &str, mut f: impl FnMut(&CellValue) -> CellValue) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        true
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[idx])
    }

    /// Column name and value pairs of one row.
    pub fn record(&self, row: usize) -> Option<Vec<(&str, &CellValue)>> {
        let cells = self.rows.get(row)?;
        Some(
            self.columns
                .iter()
                .map(String::as_str)
                .zip(cells.iter())
                .collect(),
        )
    }

    /// New table with the same columns and only the rows matching `keep`.
    pub fn filter_rows(&self, mut keep: impl FnMut(&[CellValue]) -> bool) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| keep(row))
                .cloned()
                .collect(),
        }
    }
}
