//! Source ingestion for the airport statistics dataset.
//!
//! This crate reads the semicolon-delimited yearly reports and the airport
//! reference file into [`aero_model::Table`] values.
//!
//! # Features
//!
//! - **CSV Loading**: header line, BOM stripping, duplicate header disambiguation
//! - **Isolation**: one result per source; failures become empty tables downstream
//! - **Discovery**: which catalog files exist and which CSV files are unlisted
//!
//! # Example
//!
//! ```ignore
//! use aero_ingest::load_sources;
//! use aero_model::DatasetOptions;
//!
//! let loaded = load_sources(&DatasetOptions::default())?;
//! for message in loaded.report_failures() {
//!     eprintln!("{message}");
//! }
//! let tables = loaded.into_tables();
//! ```

mod csv;
mod discovery;
mod error;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use self::csv::{
    CsvReadOptions, check_file_size_with_limit, header_names, read_delimited_table,
    validate_encoding,
};

// === Source Loading ===
pub use loader::{LoadedSources, SourceLoad, load_sources};

// === File Discovery ===
pub use discovery::{CatalogEntryStatus, CatalogStatus, catalog_status, list_csv_files};
