//! Per-source loading with failure isolation.
//!
//! Every catalog entry is read independently. A failing source keeps its
//! error next to its key so the caller can report it, while
//! [`LoadedSources::into_tables`] substitutes an empty table for it.

use std::path::PathBuf;

use aero_model::{DatasetOptions, SourceKey, SourceTables, Table};
use tracing::{debug, info, info_span, warn};

use crate::csv::{CsvReadOptions, read_delimited_table};
use crate::error::{IngestError, Result};

/// Outcome of loading one source.
#[derive(Debug)]
pub struct SourceLoad {
    pub key: SourceKey,
    pub file_name: String,
    pub path: PathBuf,
    pub result: Result<Table>,
}

impl SourceLoad {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&IngestError> {
        self.result.as_ref().err()
    }

    /// Human-readable failure message naming the file.
    pub fn failure_message(&self) -> Option<String> {
        self.error()
            .map(|error| format!("Error loading {}: {error}", self.file_name))
    }
}

/// Load outcomes in catalog order.
#[derive(Debug, Default)]
pub struct LoadedSources {
    loads: Vec<SourceLoad>,
}

impl LoadedSources {
    pub fn loads(&self) -> &[SourceLoad] {
        &self.loads
    }

    pub fn failures(&self) -> impl Iterator<Item = &SourceLoad> {
        self.loads.iter().filter(|load| !load.is_ok())
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Logs every failure and returns the messages for display.
    pub fn report_failures(&self) -> Vec<String> {
        self.failures()
            .filter_map(|load| {
                let message = load.failure_message()?;
                warn!(source = %load.key, path = %load.path.display(), "{message}");
                Some(message)
            })
            .collect()
    }

    /// Tables keyed by source; failed sources become empty tables.
    pub fn into_tables(self) -> SourceTables {
        self.loads
            .into_iter()
            .map(|load| (load.key, load.result.unwrap_or_else(|_| Table::empty())))
            .collect()
    }
}

/// Loads every catalog source in order.
///
/// Only invalid options fail the call; per-source errors are kept in the
/// returned [`LoadedSources`].
pub fn load_sources(options: &DatasetOptions) -> Result<LoadedSources> {
    options.validate()?;
    let read_options = CsvReadOptions::from_dataset_options(options)?;
    let span = info_span!("load_sources", data_dir = %options.data_dir.display());
    let _guard = span.enter();

    let mut loads = Vec::with_capacity(options.catalog.sources.len());
    for spec in &options.catalog.sources {
        let path = options.data_dir.join(&spec.file_name);
        let result = read_delimited_table(&path, &read_options);
        match &result {
            Ok(table) => debug!(
                source = %spec.key,
                rows = table.height(),
                columns = table.width(),
                "source loaded"
            ),
            Err(error) => debug!(source = %spec.key, %error, "source failed"),
        }
        loads.push(SourceLoad {
            key: spec.key.clone(),
            file_name: spec.file_name.clone(),
            path,
            result,
        });
    }

    let loaded = LoadedSources { loads };
    info!(
        sources = loaded.loads.len(),
        failed = loaded.failure_count(),
        "sources loaded"
    );
    Ok(loaded)
}
