//! Derived views over the combined flight table.
//!
//! Every function borrows its input and returns a new value. Queries that
//! need a column the table lacks return [`QueryError::MissingColumn`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};

use aero_model::columns::{FECHA, PASAJEROS};
use aero_model::{CellValue, Table};

use crate::error::{QueryError, Result};

/// Largest bin count [`date_histogram`] accepts.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Row and column counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableShape {
    pub rows: usize,
    pub columns: usize,
}

pub fn shape(table: &Table) -> TableShape {
    TableShape {
        rows: table.height(),
        columns: table.width(),
    }
}

fn require_column(table: &Table, column: &str) -> Result<usize> {
    table
        .column_index(column)
        .ok_or_else(|| QueryError::missing_column(column))
}

/// Rows whose `Fecha` falls on a day in `start..=end`.
///
/// Invalid and missing dates never match. A range without matches yields an
/// empty table with the same columns.
pub fn filter_date_range(table: &Table, start: NaiveDate, end: NaiveDate) -> Result<Table> {
    let idx = require_column(table, FECHA)?;
    Ok(table.filter_rows(|row| {
        row[idx]
            .as_date()
            .is_some_and(|date| (start..=end).contains(&date.date()))
    }))
}

/// Earliest and latest parsed `Fecha`, `None` when no row has a valid date.
pub fn date_bounds(table: &Table) -> Result<Option<(NaiveDateTime, NaiveDateTime)>> {
    let idx = require_column(table, FECHA)?;
    let mut dates = table.rows().iter().filter_map(|row| row[idx].as_date());
    let Some(first) = dates.next() else {
        return Ok(None);
    };
    Ok(Some(dates.fold((first, first), |(min, max), date| {
        (min.min(date), max.max(date))
    })))
}

/// `(Fecha, Pasajeros)` pairs in row order, skipping rows without a valid
/// date or a numeric passenger count.
pub fn passenger_series(table: &Table) -> Result<Vec<(NaiveDateTime, f64)>> {
    let date_idx = require_column(table, FECHA)?;
    let pax_idx = require_column(table, PASAJEROS)?;
    Ok(table
        .rows()
        .iter()
        .filter_map(|row| Some((row[date_idx].as_date()?, row[pax_idx].as_f64()?)))
        .collect())
}

/// One equal-width date bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub passengers: f64,
}

/// Sums passengers into at most `bins` equal-width buckets between the date
/// bounds.
///
/// Buckets are at least one millisecond wide, so a short span gets fewer
/// buckets and a single distinct date gets one. The last bucket includes the
/// latest date. An input without valid dates yields no buckets.
pub fn date_histogram(table: &Table, bins: usize) -> Result<Vec<HistogramBin>> {
    if bins == 0 || bins > MAX_HISTOGRAM_BINS {
        return Err(QueryError::InvalidBins {
            requested: bins,
            max: MAX_HISTOGRAM_BINS,
        });
    }
    let series = passenger_series(table)?;
    let Some((min, max)) = date_bounds(table)? else {
        return Ok(Vec::new());
    };

    let span_ms = i128::from((max - min).num_milliseconds());
    let count = usize::try_from(span_ms).map_or(bins, |span| bins.min(span.max(1)));
    let edge = |idx: usize| {
        let offset = span_ms * idx as i128 / count as i128;
        min + TimeDelta::milliseconds(i64::try_from(offset).unwrap_or(i64::MAX))
    };
    let mut result: Vec<HistogramBin> = (0..count)
        .map(|idx| HistogramBin {
            start: edge(idx),
            end: if idx + 1 == count { max } else { edge(idx + 1) },
            passengers: 0.0,
        })
        .collect();

    for (date, passengers) in series {
        let offset = i128::from((date - min).num_milliseconds());
        let idx = if span_ms == 0 {
            0
        } else {
            usize::try_from(offset * count as i128 / span_ms).unwrap_or(0)
        };
        result[idx.min(count - 1)].passengers += passengers;
    }
    Ok(result)
}

fn sum_by_date_key<K: Ord>(
    table: &Table,
    key: impl Fn(NaiveDateTime) -> K,
) -> Result<Vec<(K, f64)>> {
    let mut totals: BTreeMap<K, f64> = BTreeMap::new();
    for (date, passengers) in passenger_series(table)? {
        *totals.entry(key(date)).or_insert(0.0) += passengers;
    }
    Ok(totals.into_iter().collect())
}

/// Total passengers per calendar month (1..=12), across all years.
pub fn passengers_by_month(table: &Table) -> Result<Vec<(u32, f64)>> {
    sum_by_date_key(table, |date| date.month())
}

/// Total passengers per year.
pub fn passengers_by_year(table: &Table) -> Result<Vec<(i32, f64)>> {
    sum_by_date_key(table, |date| date.year())
}

/// Total passengers per day.
pub fn passengers_by_day(table: &Table) -> Result<Vec<(NaiveDate, f64)>> {
    sum_by_date_key(table, |date| date.date())
}

fn group_key(cell: &CellValue) -> Option<String> {
    if cell.is_missing() {
        None
    } else {
        Some(cell.to_string())
    }
}

/// Row count per distinct value of `column`, sorted by value. Missing values are dropped.
pub fn count_by(table: &Table, column: &str) -> Result<Vec<(String, usize)>> {
    let idx = require_column(table, column)?;
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in table.rows() {
        if let Some(key) = group_key(&row[idx]) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    Ok(counts.into_iter().collect())
}

/// Sum of numeric `value` cells per distinct `group` value, sorted by group.
///
/// Groups whose values are all non-numeric sum to zero.
pub fn sum_by(table: &Table, group: &str, value: &str) -> Result<Vec<(String, f64)>> {
    let group_idx = require_column(table, group)?;
    let value_idx = require_column(table, value)?;
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in table.rows() {
        if let Some(key) = group_key(&row[group_idx]) {
            let total = totals.entry(key).or_insert(0.0);
            if let Some(amount) = row[value_idx].as_f64() {
                *total += amount;
            }
        }
    }
    Ok(totals.into_iter().collect())
}

/// Converts counts into percentages of their total.
pub fn shares(counts: &[(String, usize)]) -> Vec<(String, f64)> {
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    counts
        .iter()
        .map(|(label, count)| {
            let share = if total == 0 {
                0.0
            } else {
                *count as f64 * 100.0 / total as f64
            };
            (label.clone(), share)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|v| CellValue::from_field(v)).collect());
        }
        crate::combine::parse_date_column(table)
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn flights() -> Table {
        table(
            &["Fecha", "Pasajeros", "Aeropuerto"],
            &[
                &["01/02/2020", "100", "EZE"],
                &["15/03/2021", "50", "AEP"],
                &["20/03/2021 18:30", "25", "EZE"],
                &["not-a-date", "7", ""],
                &["05/07/2021", "n/a", "COR"],
            ],
        )
    }

    #[test]
    fn filter_includes_whole_end_day() {
        let filtered = filter_date_range(&flights(), day(2021, 3, 1), day(2021, 3, 20)).unwrap();
        assert_eq!(filtered.height(), 2);
    }

    #[test]
    fn filter_accepts_the_largest_end_date() {
        let filtered = filter_date_range(&flights(), day(2021, 1, 1), NaiveDate::MAX).unwrap();
        assert_eq!(filtered.height(), 3);
        let filtered = filter_date_range(&flights(), NaiveDate::MIN, day(2020, 2, 1)).unwrap();
        assert_eq!(filtered.height(), 1);
    }

    #[test]
    fn filter_without_matches_is_empty() {
        let filtered = filter_date_range(&flights(), day(1990, 1, 1), day(1990, 12, 31)).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.width(), 3);
    }

    #[test]
    fn filter_requires_fecha() {
        let no_dates = table(&["Pasajeros"], &[&["1"]]);
        assert_eq!(
            filter_date_range(&no_dates, day(2020, 1, 1), day(2020, 1, 2)),
            Err(QueryError::missing_column("Fecha"))
        );
    }

    #[test]
    fn bounds_skip_invalid_dates() {
        let (min, max) = date_bounds(&flights()).unwrap().unwrap();
        assert_eq!(min.date(), day(2020, 2, 1));
        assert_eq!(max.date(), day(2021, 7, 5));
        let empty = table(&["Fecha"], &[&["x"]]);
        assert_eq!(date_bounds(&empty).unwrap(), None);
    }

    #[test]
    fn monthly_and_yearly_totals_ignore_non_numeric() {
        let monthly = passengers_by_month(&flights()).unwrap();
        assert_eq!(monthly, vec![(2, 100.0), (3, 75.0)]);
        let yearly = passengers_by_year(&flights()).unwrap();
        assert_eq!(yearly, vec![(2020, 100.0), (2021, 75.0)]);
        let daily = passengers_by_day(&flights()).unwrap();
        assert_eq!(daily.len(), 3);
    }

    #[test]
    fn counts_drop_missing_keys() {
        let counts = count_by(&flights(), "Aeropuerto").unwrap();
        assert_eq!(
            counts,
            vec![
                ("AEP".to_string(), 1),
                ("COR".to_string(), 1),
                ("EZE".to_string(), 2)
            ]
        );
        assert!(count_by(&flights(), "Aeronave").is_err());
    }

    #[test]
    fn sums_by_group() {
        let sums = sum_by(&flights(), "Aeropuerto", "Pasajeros").unwrap();
        assert_eq!(
            sums,
            vec![
                ("AEP".to_string(), 50.0),
                ("COR".to_string(), 0.0),
                ("EZE".to_string(), 125.0)
            ]
        );
    }

    #[test]
    fn shares_sum_to_hundred() {
        let result = shares(&[("a".to_string(), 1), ("b".to_string(), 3)]);
        assert_eq!(result[0].1, 25.0);
        assert_eq!(result[1].1, 75.0);
        assert!(shares(&[]).is_empty());
    }

    #[test]
    fn histogram_covers_all_valid_rows() {
        let bins = date_histogram(&flights(), 30).unwrap();
        assert_eq!(bins.len(), 30);
        let total: f64 = bins.iter().map(|bin| bin.passengers).sum();
        assert_eq!(total, 175.0);
        assert_eq!(bins[0].passengers, 100.0);
        assert!(bins.iter().all(|bin| bin.start <= bin.end));
        assert_eq!(bins.last().unwrap().end.date(), day(2021, 7, 5));
    }

    #[test]
    fn histogram_rejects_out_of_range_bin_counts() {
        assert_eq!(
            date_histogram(&flights(), 0),
            Err(QueryError::InvalidBins {
                requested: 0,
                max: MAX_HISTOGRAM_BINS
            })
        );
        assert!(date_histogram(&flights(), usize::MAX).is_err());
        assert!(date_histogram(&flights(), MAX_HISTOGRAM_BINS).is_ok());
    }

    #[test]
    fn histogram_of_single_date() {
        let single = table(&["Fecha", "Pasajeros"], &[&["15/03/2021", "4"], &["15/03/2021", "6"]]);
        let bins = date_histogram(&single, 30).unwrap();
        let only = NaiveDate::from_ymd_opt(2021, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            bins,
            vec![HistogramBin {
                start: only,
                end: only,
                passengers: 10.0
            }]
        );
    }

    #[test]
    fn histogram_of_short_span_never_passes_the_latest_date() {
        let short = table(
            &["Fecha", "Pasajeros"],
            &[&["15/03/2021 10:00:00", "1"], &["15/03/2021 10:00:00.005", "2"]],
        );
        let bins = date_histogram(&short, 30).unwrap();
        let (_, max) = date_bounds(&short).unwrap().unwrap();
        assert_eq!(bins.len(), 5);
        assert!(bins.iter().all(|bin| bin.start <= bin.end && bin.start <= max));
        assert_eq!(bins.last().unwrap().end, max);
        assert_eq!(bins.iter().map(|bin| bin.passengers).sum::<f64>(), 3.0);
    }
}
