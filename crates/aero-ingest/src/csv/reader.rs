//! Delimited file reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use aero_model::{CellValue, DEFAULT_MAX_FILE_SIZE, DatasetOptions, Table};
use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::header::header_names;

/// Low-level options for [`read_delimited_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvReadOptions {
    /// Field separator.
    pub delimiter: u8,
    /// Files larger than this are rejected.
    pub max_file_size: u64,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl CsvReadOptions {
    pub fn from_dataset_options(options: &DatasetOptions) -> Result<Self> {
        Ok(Self {
            delimiter: options.delimiter_byte()?,
            max_file_size: options.max_file_size,
        })
    }
}

fn open_error(path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source: error,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| open_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Rejects UTF-16 files by their byte-order mark.
///
/// Invalid UTF-8 further into the file is reported by the CSV reader.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| open_error(path, e))?;

    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

fn parse_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

/// Reads a delimited file whose first line is the header.
///
/// Empty fields become [`CellValue::Missing`], short rows are padded, and
/// trailing empty fields beyond the header are dropped. Any other extra
/// field fails the whole file.
pub fn read_delimited_table(path: &Path, options: &CsvReadOptions) -> Result<Table> {
    check_file_size_with_limit(path, options.max_file_size)?;
    validate_encoding(path)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| parse_error(path, &e))?;

    let mut records = reader.records();
    let header = match records.next() {
        Some(record) => record.map_err(|e| parse_error(path, &e))?,
        None => {
            return Err(IngestError::NoColumns {
                path: path.to_path_buf(),
            });
        }
    };
    let columns = header_names(header.iter());
    let width = columns.len();
    let mut table = Table::new(columns);

    for record in records {
        let record = record.map_err(|e| parse_error(path, &e))?;
        if record.len() > width && record.iter().skip(width).any(|field| !field.is_empty()) {
            return Err(IngestError::RowTooLong {
                path: path.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }
        table.push_row(record.iter().take(width).map(CellValue::from_field).collect());
    }

    tracing::debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "read delimited table"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn read(content: &str) -> Result<Table> {
        let file = create_temp_csv(content.as_bytes());
        read_delimited_table(file.path(), &CsvReadOptions::default())
    }

    #[test]
    fn test_reads_semicolon_fields() {
        let table = read("Fecha;Pasajeros\n01/02/2020;100\n02/02/2020;\n").unwrap();
        assert_eq!(table.columns(), ["Fecha", "Pasajeros"]);
        assert_eq!(table.height(), 2);
        assert_eq!(
            table.value(0, "Pasajeros"),
            Some(&CellValue::Text("100".to_string()))
        );
        assert_eq!(table.value(1, "Pasajeros"), Some(&CellValue::Missing));
    }

    #[test]
    fn test_commas_are_not_separators() {
        let table = read("Aeropuerto;Aeronave\nEZE;Boeing 737,800\n").unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(
            table.value(0, "Aeronave"),
            Some(&CellValue::Text("Boeing 737,800".to_string()))
        );
    }

    #[test]
    fn test_pads_short_rows() {
        let table = read("A;B;C\n1\n").unwrap();
        assert_eq!(table.rows()[0][1], CellValue::Missing);
        assert_eq!(table.rows()[0][2], CellValue::Missing);
    }

    #[test]
    fn test_drops_trailing_empty_fields() {
        let table = read("A;B\n1;2;\n").unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn test_rejects_long_rows() {
        let err = read("A;B\n1;2\n1;2;3\n").unwrap_err();
        match err {
            IngestError::RowTooLong {
                line,
                expected,
                found,
                ..
            } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_file() {
        let table = read("A;B\n").unwrap();
        assert_eq!(table.width(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_empty_file_has_no_columns() {
        assert!(matches!(read(""), Err(IngestError::NoColumns { .. })));
    }

    #[test]
    fn test_strips_utf8_bom() {
        let table = read("\u{feff}Fecha;PAX\n01/01/2021;5\n").unwrap();
        assert_eq!(table.columns(), ["Fecha", "PAX"]);
    }

    #[test]
    fn test_rejects_utf16() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'A', 0x00]);
        let result = read_delimited_table(file.path(), &CsvReadOptions::default());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_parse_error() {
        let file = create_temp_csv(b"A;B\n\xC3\x28;1\n");
        let result = read_delimited_table(file.path(), &CsvReadOptions::default());
        assert!(matches!(result, Err(IngestError::CsvParse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_delimited_table(&dir.path().join("nope.csv"), &CsvReadOptions::default());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_size_limit() {
        let file = create_temp_csv(b"A;B\n1;2\n");
        let options = CsvReadOptions {
            max_file_size: 4,
            ..CsvReadOptions::default()
        };
        assert!(matches!(
            read_delimited_table(file.path(), &options),
            Err(IngestError::FileTooLarge { .. })
        ));
    }
}
