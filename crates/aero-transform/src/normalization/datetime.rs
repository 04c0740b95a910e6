//! Day-first date parsing.
//!
//! Yearly reports write dates as `dd/mm/yyyy`, sometimes with a time of
//! day. Ambiguous dates are read day first: `03/04/2021` is April 3.
//!
//! Accepted shapes:
//!
//! - `d/m/Y`, `d-m-Y`, `d.m.Y` with a 4-digit or 2-digit year
//! - `Y-m-d` (ISO), also with `/` or `.` separators
//! - any of the above followed by `H:M`, `H:M:S` or `H:M:S.f`, separated by
//!   a space or `T`
//!
//! Two-digit years map to 1969..=2068. When the day-first reading is not a
//! valid date but the month-first one is (`12/25/2020`), the month-first
//! reading is used.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use aero_model::CellValue;

/// Parses a date string day first. Returns `None` when it cannot be parsed.
pub fn parse_day_first(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (date_part, time_part) = split_date_time(trimmed);
    let date = parse_date_part(date_part)?;
    let time = match time_part {
        Some(time) => parse_time_part(time)?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

/// Converts one `Fecha` cell.
///
/// Text is parsed day first; unparseable text becomes
/// [`CellValue::InvalidDate`]. Blank text and missing cells stay missing.
pub fn parse_date_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Text(raw) if raw.trim().is_empty() => CellValue::Missing,
        CellValue::Text(raw) => match parse_day_first(raw) {
            Some(parsed) => CellValue::Date(parsed),
            None => CellValue::InvalidDate(raw.clone()),
        },
        other => other.clone(),
    }
}

fn split_date_time(value: &str) -> (&str, Option<&str>) {
    if let Some((date, time)) = value.split_once(' ') {
        return (date, Some(time.trim()));
    }
    if let Some((date, time)) = value.split_once('T')
        && time.contains(':')
    {
        return (date, Some(time));
    }
    (value, None)
}

fn parse_date_part(value: &str) -> Option<NaiveDate> {
    let separator = ['/', '-', '.']
        .into_iter()
        .find(|sep| value.contains(*sep))?;
    let parts: Vec<&str> = value.split(separator).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    if ![first, second, third]
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }

    if first.len() == 4 {
        let year: i32 = first.parse().ok()?;
        let month: u32 = second.parse().ok()?;
        let day: u32 = third.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if first.len() > 2 || second.len() > 2 {
        return None;
    }

    let day: u32 = first.parse().ok()?;
    let month: u32 = second.parse().ok()?;
    let year = parse_year(third)?;
    NaiveDate::from_ymd_opt(year, month, day).or_else(|| NaiveDate::from_ymd_opt(year, day, month))
}

fn parse_year(value: &str) -> Option<i32> {
    let year: i32 = value.parse().ok()?;
    match value.len() {
        4 => Some(year),
        2 if year < 69 => Some(2000 + year),
        2 => Some(1900 + year),
        _ => None,
    }
}

fn parse_time_part(value: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .into_iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn day_comes_first() {
        assert_eq!(parse_day_first("03/04/2021"), Some(date(2021, 4, 3)));
        assert_eq!(parse_day_first("1/2/2020"), Some(date(2020, 2, 1)));
        assert_eq!(parse_day_first("15-03-2021"), Some(date(2021, 3, 15)));
        assert_eq!(parse_day_first("15.03.2021"), Some(date(2021, 3, 15)));
    }

    #[test]
    fn iso_dates_are_year_first() {
        assert_eq!(parse_day_first("2021-03-15"), Some(date(2021, 3, 15)));
        assert_eq!(parse_day_first("2021/03/04"), Some(date(2021, 3, 4)));
    }

    #[test]
    fn two_digit_years() {
        assert_eq!(parse_day_first("03/04/21"), Some(date(2021, 4, 3)));
        assert_eq!(parse_day_first("03/04/99"), Some(date(1999, 4, 3)));
    }

    #[test]
    fn falls_back_to_month_first() {
        assert_eq!(parse_day_first("12/25/2020"), Some(date(2020, 12, 25)));
    }

    #[test]
    fn with_time_of_day() {
        let parsed = parse_day_first("01/02/2020 13:45").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
        assert_eq!((parsed.hour(), parsed.minute()), (13, 45));

        let iso = parse_day_first("2020-02-01T08:30:15").unwrap();
        assert_eq!((iso.hour(), iso.minute(), iso.second()), (8, 30, 15));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_day_first("not-a-date"), None);
        assert_eq!(parse_day_first(""), None);
        assert_eq!(parse_day_first("32/13/2020"), None);
        assert_eq!(parse_day_first("01/02"), None);
        assert_eq!(parse_day_first("01/02/2020 25:00"), None);
        assert_eq!(parse_day_first("001/02/2020"), None);
    }

    #[test]
    fn cell_conversion() {
        assert_eq!(
            parse_date_cell(&CellValue::Text("15/03/2021".to_string())),
            CellValue::Date(date(2021, 3, 15))
        );
        assert_eq!(
            parse_date_cell(&CellValue::Text("nope".to_string())),
            CellValue::InvalidDate("nope".to_string())
        );
        assert_eq!(
            parse_date_cell(&CellValue::Text("  ".to_string())),
            CellValue::Missing
        );
        assert_eq!(parse_date_cell(&CellValue::Missing), CellValue::Missing);
    }
}
