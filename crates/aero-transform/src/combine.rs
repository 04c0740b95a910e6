//! Row-wise combination of the yearly flight reports.

use std::ops::Range;

use aero_model::columns::FECHA;
use aero_model::{CellValue, SourceKey, SourceTables, Table};
use tracing::{debug, info_span, warn};

use crate::normalization::parse_date_cell;

/// Rows contributed by one source to a [`CombinedTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSegment {
    pub key: SourceKey,
    pub rows: Range<usize>,
}

/// The union of all flight sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedTable {
    table: Table,
    segments: Vec<SourceSegment>,
    invalid_dates: usize,
}

impl CombinedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Row ranges per source, in combination order.
    pub fn segments(&self) -> &[SourceSegment] {
        &self.segments
    }

    /// Number of `Fecha` values that could not be parsed.
    pub fn invalid_dates(&self) -> usize {
        self.invalid_dates
    }

    /// Rows contributed by `key`, `None` if it was not combined.
    pub fn rows_for(&self, key: &SourceKey) -> Option<&[Vec<CellValue>]> {
        let segment = self.segments.iter().find(|segment| &segment.key == key)?;
        Some(&self.table.rows()[segment.rows.clone()])
    }
}

/// Parses the `Fecha` column day first, if the table has one.
#[must_use]
pub fn parse_date_column(mut table: Table) -> Table {
    table.map_column(FECHA, parse_date_cell);
    table
}

/// Concatenates the sources named in `order`.
///
/// Keys without a table are skipped. Each table gets its `Fecha` column
/// parsed, then rows are appended source by source in their original order.
/// Columns are the union of all source columns in order of first appearance;
/// cells for columns a source lacks are [`CellValue::Missing`].
pub fn combine_flight_sources(sources: &SourceTables, order: &[SourceKey]) -> CombinedTable {
    let span = info_span!("combine", sources = order.len());
    let _guard = span.enter();

    let selected: Vec<(&SourceKey, Table)> = order
        .iter()
        .filter_map(|key| {
            let table = sources.get(key)?;
            Some((key, parse_date_column(table.clone())))
        })
        .collect();

    let mut columns: Vec<String> = Vec::new();
    for (_, table) in &selected {
        for column in table.columns() {
            if !columns.contains(column) {
                columns.push(column.clone());
            }
        }
    }

    let mut combined = Table::new(columns.clone());
    let mut segments = Vec::with_capacity(selected.len());
    let mut invalid_dates = 0usize;
    for (key, table) in &selected {
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|column| table.column_index(column))
            .collect();
        let start = combined.height();
        for row in table.rows() {
            let cells = positions
                .iter()
                .map(|position| position.map_or(CellValue::Missing, |idx| row[idx].clone()))
                .collect();
            combined.push_row(cells);
        }
        let source_invalid = table
            .column(FECHA)
            .map_or(0, |cells| {
                cells
                    .filter(|cell| matches!(cell, CellValue::InvalidDate(_)))
                    .count()
            });
        if source_invalid > 0 {
            warn!(source = %key, count = source_invalid, "unparseable dates marked invalid");
        }
        invalid_dates += source_invalid;
        debug!(source = %key, rows = table.height(), "source combined");
        segments.push(SourceSegment {
            key: (*key).clone(),
            rows: start..combined.height(),
        });
    }

    CombinedTable {
        table: combined,
        segments,
        invalid_dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str) -> SourceKey {
        SourceKey::new(value).unwrap()
    }

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|v| CellValue::from_field(v)).collect());
        }
        table
    }

    #[test]
    fn unions_columns_in_order_of_appearance() {
        let mut sources = SourceTables::new();
        sources.insert(key("a"), table(&["X", "Fecha"], &[&["1", "01/01/2020"]]));
        sources.insert(key("b"), table(&["Y", "X"], &[&["y", "2"]]));

        let combined = combine_flight_sources(&sources, &[key("a"), key("b")]);
        let table = combined.table();
        assert_eq!(table.columns(), ["X", "Fecha", "Y"]);
        assert_eq!(table.value(1, "Fecha"), Some(&CellValue::Missing));
        assert_eq!(table.value(0, "Y"), Some(&CellValue::Missing));
        assert_eq!(table.value(1, "X"), Some(&CellValue::Text("2".to_string())));
    }

    #[test]
    fn follows_order_and_skips_unknown_keys() {
        let mut sources = SourceTables::new();
        sources.insert(key("2021"), table(&["N"], &[&["21"]]));
        sources.insert(key("2019"), table(&["N"], &[&["19a"], &["19b"]]));

        let combined =
            combine_flight_sources(&sources, &[key("2019"), key("2030"), key("2021")]);
        let values: Vec<String> = combined
            .table()
            .column("N")
            .unwrap()
            .map(ToString::to_string)
            .collect();
        assert_eq!(values, vec!["19a", "19b", "21"]);
        assert_eq!(combined.segments().len(), 2);
        assert_eq!(combined.segments()[1].rows, 2..3);
        assert_eq!(combined.rows_for(&key("2021")).unwrap().len(), 1);
        assert!(combined.rows_for(&key("2030")).is_none());
    }

    #[test]
    fn empty_sources_contribute_nothing() {
        let mut sources = SourceTables::new();
        sources.insert(key("a"), Table::empty());
        sources.insert(key("b"), table(&["N"], &[&["1"]]));

        let combined = combine_flight_sources(&sources, &[key("a"), key("b")]);
        assert_eq!(combined.table().height(), 1);
        assert_eq!(combined.table().columns(), ["N"]);
        assert_eq!(combined.segments()[0].rows, 0..0);
    }

    #[test]
    fn counts_invalid_dates() {
        let mut sources = SourceTables::new();
        sources.insert(
            key("a"),
            table(&["Fecha"], &[&["01/01/2020"], &["not-a-date"], &[""]]),
        );
        let combined = combine_flight_sources(&sources, &[key("a")]);
        assert_eq!(combined.invalid_dates(), 1);
        assert_eq!(combined.table().height(), 3);
    }
}
