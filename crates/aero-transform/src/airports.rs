//! Lookups against the airport reference table.

use aero_model::columns::{DENOMINACION, LOCAL};
use aero_model::{CellValue, Table};

use crate::error::{QueryError, Result};

/// One row of the airport reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct AirportDetail {
    /// Row index within the reference table.
    pub row: usize,
    /// All columns of the row, in table order.
    pub fields: Vec<(String, CellValue)>,
    /// The `local` code, when present.
    pub code: Option<String>,
}

impl AirportDetail {
    pub fn field(&self, column: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }
}

/// Finds the first row whose `denominacion` equals `name` exactly.
pub fn lookup_airport(table: &Table, name: &str) -> Result<Option<AirportDetail>> {
    let name_idx = table
        .column_index(DENOMINACION)
        .ok_or_else(|| QueryError::missing_column(DENOMINACION))?;
    let code_idx = table
        .column_index(LOCAL)
        .ok_or_else(|| QueryError::missing_column(LOCAL))?;

    let Some(row) = table
        .rows()
        .iter()
        .position(|cells| cells[name_idx].as_text() == Some(name))
    else {
        return Ok(None);
    };

    let fields = table
        .record(row)
        .unwrap_or_default()
        .into_iter()
        .map(|(column, value)| (column.to_string(), value.clone()))
        .collect();
    let code = table.rows()[row][code_idx].as_text().map(str::to_string);
    Ok(Some(AirportDetail { row, fields, code }))
}

/// Distinct `denominacion` values in table order.
pub fn airport_names(table: &Table) -> Result<Vec<String>> {
    let cells = table
        .column(DENOMINACION)
        .ok_or_else(|| QueryError::missing_column(DENOMINACION))?;
    let mut names: Vec<String> = Vec::new();
    for name in cells.filter_map(CellValue::as_text) {
        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
