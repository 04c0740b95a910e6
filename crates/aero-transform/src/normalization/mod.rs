//! Schema and value normalization applied to every loaded source.

pub mod columns;
pub mod datetime;

pub use columns::normalize_columns;
pub use datetime::{parse_date_cell, parse_day_first};

use aero_model::SourceTables;

/// Normalizes the column names of every source table.
#[must_use]
pub fn normalize_sources(tables: SourceTables) -> SourceTables {
    tables.map_tables(normalize_columns)
}
