//! Normalization, combination and views for the airport statistics dataset.
//!
//! - **normalization**: column trimming and canonical renames, day-first dates
//! - **combine**: row-wise union of the yearly flight reports
//! - **dataset**: the immutable [`Dataset`] built once per run
//! - **query**: date filters, time series and group-by aggregations
//! - **airports**: lookups against the airport reference table

pub mod airports;
pub mod combine;
pub mod dataset;
pub mod error;
pub mod normalization;
pub mod query;

pub use airports::{AirportDetail, airport_names, lookup_airport};
pub use combine::{CombinedTable, SourceSegment, combine_flight_sources, parse_date_column};
pub use dataset::Dataset;
pub use error::{QueryError, Result};
pub use normalization::{normalize_columns, normalize_sources, parse_date_cell, parse_day_first};
pub use query::{
    HistogramBin, MAX_HISTOGRAM_BINS, TableShape, count_by, date_bounds, date_histogram, filter_date_range,
    passenger_series, passengers_by_day, passengers_by_month, passengers_by_year, shape, shares,
    sum_by,
};
