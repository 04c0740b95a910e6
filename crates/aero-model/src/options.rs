//! Configuration options for loading the dataset.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::SourceCatalog;
use crate::error::{ModelError, Result};

/// Default maximum size of a single input file (500 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// Options controlling where and how sources are read.
///
/// Deserializable from a JSON config file; every field is optional there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetOptions {
    /// Directory holding the catalog files.
    pub data_dir: PathBuf,
    /// Field separator of the CSV files.
    pub delimiter: char,
    /// Files larger than this are rejected without being read.
    pub max_file_size: u64,
    /// Input files and combination order.
    pub catalog: SourceCatalog,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("dataset"),
            delimiter: ';',
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            catalog: SourceCatalog::default(),
        }
    }
}

impl DatasetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: SourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// The delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ModelError::InvalidDelimiter(self.delimiter))
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        self.catalog.validate()
    }
}
