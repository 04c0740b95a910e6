//! Column-name reconciliation across yearly report schemas.

use std::collections::HashSet;

use aero_model::Table;
use aero_model::columns::{FECHA, FECHA_UTC, PASAJEROS, PAX};
use tracing::debug;

/// Normalizes column names of one source table.
///
/// 1. Leading/trailing whitespace is stripped from every name. A name that
///    collides with an earlier one after stripping gets a `.N` suffix.
/// 2. `Fecha UTC` becomes `Fecha`, unless a `Fecha` column already exists.
/// 3. `PAX` becomes `Pasajeros`, unless a `Pasajeros` column already exists.
///
/// Rows and all other columns are untouched. Applying it twice yields the
/// same names as applying it once.
#[must_use]
pub fn normalize_columns(mut table: Table) -> Table {
    let mut seen: HashSet<String> = HashSet::new();
    table.rename_columns_with(|name| {
        let base = name.trim();
        let mut candidate = base.to_string();
        let mut suffix = 1usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        candidate
    });

    if !table.has_column(FECHA) && table.rename_column(FECHA_UTC, FECHA) {
        debug!(from = FECHA_UTC, to = FECHA, "renamed column");
    }
    if !table.has_column(PASAJEROS) && table.rename_column(PAX, PASAJEROS) {
        debug!(from = PAX, to = PASAJEROS, "renamed column");
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_model::CellValue;

    fn table(columns: &[&str]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        table.push_row(
            (0..columns.len())
                .map(|idx| CellValue::Text(idx.to_string()))
                .collect(),
        );
        table
    }

    #[test]
    fn trims_names() {
        let normalized = normalize_columns(table(&["  Aeropuerto ", "Aeronave\t"]));
        assert_eq!(normalized.columns(), ["Aeropuerto", "Aeronave"]);
    }

    #[test]
    fn renames_fecha_utc_after_trimming() {
        let normalized = normalize_columns(table(&[" Fecha UTC ", "PAX"]));
        assert_eq!(normalized.columns(), ["Fecha", "Pasajeros"]);
    }

    #[test]
    fn existing_fecha_is_preserved() {
        let normalized = normalize_columns(table(&["Fecha", "Fecha UTC"]));
        assert_eq!(normalized.columns(), ["Fecha", "Fecha UTC"]);
    }

    #[test]
    fn collisions_after_trimming_get_suffix() {
        let normalized = normalize_columns(table(&["A", "A ", " A"]));
        assert_eq!(normalized.columns(), ["A", "A.1", "A.2"]);
    }

    #[test]
    fn empty_table_passes_through() {
        assert_eq!(normalize_columns(Table::empty()), Table::empty());
    }
}
