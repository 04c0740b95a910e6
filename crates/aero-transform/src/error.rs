use thiserror::Error;

/// Errors returned by view queries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The table lacks a column the query needs.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },
    /// Histogram bin count outside `1..=MAX_HISTOGRAM_BINS`.
    #[error("histogram needs between 1 and {max} bins, got {requested}")]
    InvalidBins { requested: usize, max: usize },
}

impl QueryError {
    pub fn missing_column(column: &str) -> Self {
        Self::MissingColumn {
            column: column.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QueryError>;
