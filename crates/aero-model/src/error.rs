use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid source key: {0:?}")]
    InvalidSourceKey(String),
    #[error("source '{0}' is listed more than once in the catalog")]
    DuplicateSource(String),
    #[error("flight source '{0}' is not part of the catalog")]
    UnknownFlightSource(String),
    #[error("reference source '{0}' cannot be combined as flight data")]
    ReferenceInFlightOrder(String),
    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(char),
}

pub type Result<T> = std::result::Result<T, ModelError>;
