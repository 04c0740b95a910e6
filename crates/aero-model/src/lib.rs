//! Data model for the airport statistics dataset.
//!
//! - **table**: [`Table`] and [`CellValue`], the in-memory tabular form of every source
//! - **catalog**: the fixed list of input files and the flight-data subset
//! - **columns**: canonical column names
//! - **sources**: [`SourceTables`], one table per source key in load order
//! - **options**: [`DatasetOptions`], deserializable from a config file

pub mod catalog;
pub mod columns;
pub mod error;
pub mod ids;
pub mod options;
pub mod sources;
pub mod table;

pub use catalog::{AIRPORTS_KEY, SourceCatalog, SourceSpec};
pub use error::{ModelError, Result};
pub use ids::SourceKey;
pub use options::{DEFAULT_MAX_FILE_SIZE, DatasetOptions};
pub use sources::SourceTables;
pub use table::{CellValue, Table};
