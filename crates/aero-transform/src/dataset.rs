//! The immutable dataset handed to every view.

use aero_model::{SourceCatalog, SourceKey, SourceTables, Table};
use tracing::{info, info_span};

use crate::combine::{CombinedTable, combine_flight_sources};
use crate::normalization::normalize_sources;
use crate::query::{TableShape, shape};

/// Normalized sources plus their combination.
///
/// Built once from the loaded tables; views only borrow it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    sources: SourceTables,
    combined: CombinedTable,
    airports: Option<SourceKey>,
}

impl Dataset {
    /// Normalizes every source and combines the flight reports in catalog order.
    pub fn build(tables: SourceTables, catalog: &SourceCatalog) -> Self {
        let span = info_span!("build_dataset", sources = tables.len());
        let _guard = span.enter();

        let sources = normalize_sources(tables);
        let combined = combine_flight_sources(&sources, &catalog.flight_order);
        let combined_shape = shape(combined.table());
        info!(
            rows = combined_shape.rows,
            columns = combined_shape.columns,
            invalid_dates = combined.invalid_dates(),
            "dataset ready"
        );
        Self {
            sources,
            combined,
            airports: Some(catalog.airports.clone()),
        }
    }

    /// All normalized sources, keyed as loaded.
    pub fn sources(&self) -> &SourceTables {
        &self.sources
    }

    pub fn source(&self, key: &str) -> Option<&Table> {
        self.sources.get_str(key)
    }

    pub fn combined(&self) -> &CombinedTable {
        &self.combined
    }

    /// The combined flight table.
    pub fn flights(&self) -> &Table {
        self.combined.table()
    }

    /// The normalized airport reference table, if it was loaded.
    pub fn airports(&self) -> Option<&Table> {
        self.airports.as_ref().and_then(|key| self.sources.get(key))
    }

    /// Row count of every normalized source, in load order.
    pub fn source_row_counts(&self) -> Vec<(&SourceKey, usize)> {
        self.sources
            .iter()
            .map(|(key, table)| (key, table.height()))
            .collect()
    }

    pub fn shape(&self) -> TableShape {
        shape(self.flights())
    }
}
