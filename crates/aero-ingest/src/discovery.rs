//! Data directory inspection.

use std::path::{Path, PathBuf};

use aero_model::{SourceCatalog, SourceKey};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory, sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Whether a catalog file exists on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntryStatus {
    pub key: SourceKey,
    pub path: PathBuf,
    pub present: bool,
}

/// Catalog files found or missing, plus CSV files the catalog does not list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStatus {
    pub entries: Vec<CatalogEntryStatus>,
    pub unlisted: Vec<PathBuf>,
}

impl CatalogStatus {
    pub fn missing(&self) -> impl Iterator<Item = &CatalogEntryStatus> {
        self.entries.iter().filter(|entry| !entry.present)
    }
}

/// Compares the catalog against the contents of `dir`.
pub fn catalog_status(dir: &Path, catalog: &SourceCatalog) -> Result<CatalogStatus> {
    let csv_files = list_csv_files(dir)?;

    let entries = catalog
        .sources
        .iter()
        .map(|spec| {
            let path = dir.join(&spec.file_name);
            CatalogEntryStatus {
                key: spec.key.clone(),
                present: path.is_file(),
                path,
            }
        })
        .collect();

    let unlisted = csv_files
        .into_iter()
        .filter(|path| {
            let name = path.file_name().and_then(|v| v.to_str()).unwrap_or("");
            !catalog.sources.iter().any(|spec| spec.file_name == name)
        })
        .collect();

    Ok(CatalogStatus { entries, unlisted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aero_model::SourceSpec;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["2019.csv", "notes.txt", "extra.CSV"] {
            std::fs::write(dir.path().join(name), "A;B\n1;2\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_csv_files() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["2019.csv", "extra.CSV"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let result = list_csv_files(&dir.path().join("absent"));
        assert!(matches!(result, Err(IngestError::DirectoryNotFound { .. })));
    }

    #[test]
    fn test_catalog_status() {
        let dir = create_test_dir();
        let catalog = SourceCatalog {
            sources: vec![
                SourceSpec::new("2019", "2019.csv").unwrap(),
                SourceSpec::new("2020", "2020.csv").unwrap(),
            ],
            flight_order: vec![
                SourceKey::new("2019").unwrap(),
                SourceKey::new("2020").unwrap(),
            ],
            airports: SourceKey::new("aeropuertos").unwrap(),
        };

        let status = catalog_status(dir.path(), &catalog).unwrap();
        assert!(status.entries[0].present);
        let missing: Vec<_> = status.missing().map(|e| e.key.as_str()).collect();
        assert_eq!(missing, vec!["2020"]);
        assert_eq!(status.unlisted.len(), 1);
        assert!(status.unlisted[0].ends_with("extra.CSV"));
    }
}
