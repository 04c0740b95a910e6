//! CSV reading utilities.

mod header;
mod reader;

pub use header::header_names;
pub use reader::{
    CsvReadOptions, check_file_size_with_limit, read_delimited_table, validate_encoding,
};
