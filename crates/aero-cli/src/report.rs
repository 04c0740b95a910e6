//! Terminal tables for every view.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use aero_ingest::CatalogStatus;
use aero_model::CellValue;
use aero_transform::{AirportDetail, Dataset, HistogramBin};

/// Prints the combined table shape, rows per source and load failures.
pub fn print_summary(dataset: &Dataset, load_errors: &[String]) {
    let shape = dataset.shape();
    println!("Total records: {}", shape.rows);
    println!("Total columns: {}", shape.columns);
    if dataset.combined().invalid_dates() > 0 {
        println!(
            "Unparseable dates: {}",
            dataset.combined().invalid_dates()
        );
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Records"),
        header_cell("Columns"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (key, source) in dataset.sources().iter() {
        let (records, columns) = if source.width() == 0 {
            (dim_cell("-"), dim_cell("-"))
        } else {
            (Cell::new(source.height()), Cell::new(source.width()))
        };
        table.add_row(vec![source_cell(key.as_str()), records, columns]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(shape.rows).add_attribute(Attribute::Bold),
        Cell::new(shape.columns).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_load_errors(load_errors);
}

pub fn print_load_errors(load_errors: &[String]) {
    if load_errors.is_empty() {
        return;
    }
    eprintln!("Load errors:");
    for error in load_errors {
        eprintln!("- {error}");
    }
}

pub fn print_daily(totals: &[(NaiveDate, f64)]) {
    let mut table = two_column_table("Date", "Passengers");
    for (day, passengers) in totals {
        table.add_row(vec![Cell::new(day), number_cell(*passengers)]);
    }
    println!("{table}");
}

pub fn print_points(points: &[(NaiveDateTime, f64)]) {
    let mut table = two_column_table("Fecha", "Passengers");
    for (date, passengers) in points {
        table.add_row(vec![Cell::new(format_timestamp(*date)), number_cell(*passengers)]);
    }
    println!("{table}");
}

pub fn print_monthly(totals: &[(u32, f64)]) {
    let mut table = two_column_table("Month", "Passengers");
    for (month, passengers) in totals {
        table.add_row(vec![Cell::new(month), number_cell(*passengers)]);
    }
    println!("{table}");
}

pub fn print_yearly(totals: &[(i32, f64)]) {
    let mut table = two_column_table("Year", "Passengers");
    for (year, passengers) in totals {
        table.add_row(vec![Cell::new(year), number_cell(*passengers)]);
    }
    println!("{table}");
}

pub fn print_histogram(bins: &[HistogramBin]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("From"),
        header_cell("To"),
        header_cell("Passengers"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for bin in bins {
        table.add_row(vec![
            Cell::new(format_timestamp(bin.start)),
            Cell::new(format_timestamp(bin.end)),
            number_cell(bin.passengers),
        ]);
    }
    println!("{table}");
}

/// Flight counts per airport, busiest first.
pub fn print_airport_activity(counts: &[(String, usize)]) {
    let mut ordered: Vec<&(String, usize)> = counts.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let mut table = two_column_table("Aeropuerto", "Flights");
    for (airport, flights) in ordered {
        table.add_row(vec![Cell::new(airport), Cell::new(flights)]);
    }
    println!("{table}");
}

/// Aircraft counts with their share of all flights, most common first.
pub fn print_aircraft_mix(counts: &[(String, usize)], shares: &[(String, f64)]) {
    let mut rows: Vec<(&str, usize, f64)> = counts
        .iter()
        .zip(shares)
        .map(|((aircraft, count), (_, share))| (aircraft.as_str(), *count, *share))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Aeronave"),
        header_cell("Flights"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (aircraft, count, share) in rows {
        table.add_row(vec![
            Cell::new(aircraft),
            Cell::new(count),
            Cell::new(format!("{share:.1}%")),
        ]);
    }
    println!("{table}");
}

pub fn print_airport_names(names: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("denominacion")]);
    apply_table_style(&mut table);
    for name in names {
        table.add_row(vec![Cell::new(name)]);
    }
    println!("{table}");
}

pub fn print_airport_detail(name: &str, detail: &AirportDetail) {
    println!("Selected airport: {name}");
    let mut table = two_column_table("Field", "Value");
    align_column(&mut table, 1, CellAlignment::Left);
    for (field, value) in &detail.fields {
        table.add_row(vec![Cell::new(field), value_cell(value)]);
    }
    println!("{table}");
    match &detail.code {
        Some(code) => println!("Airport code: {code}"),
        None => println!("Airport code: -"),
    }
}

pub fn print_catalog_status(status: &CatalogStatus) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("File"),
        header_cell("Present"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for entry in &status.entries {
        let present = if entry.present {
            Cell::new("✓")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("missing").fg(Color::Red)
        };
        table.add_row(vec![
            source_cell(entry.key.as_str()),
            Cell::new(entry.path.display()),
            present,
        ]);
    }
    println!("{table}");
    if !status.unlisted.is_empty() {
        println!("Unlisted CSV files:");
        for path in &status.unlisted {
            println!("- {}", path.display());
        }
    }
}

/// Formats a number with thousands separators, dropping a zero fraction.
pub fn format_numeric(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let negative = rounded < 0.0;
    let whole = rounded.abs().trunc();
    let fraction = rounded.abs() - whole;

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if fraction >= 0.005 {
        let cents = format!("{fraction:.2}");
        grouped.push_str(cents.trim_start_matches('0'));
    }
    if negative && grouped != "0" {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn format_timestamp(value: NaiveDateTime) -> String {
    if value.time().num_seconds_from_midnight() == 0 {
        value.format("%Y-%m-%d").to_string()
    } else {
        value.format("%Y-%m-%d %H:%M").to_string()
    }
}

fn two_column_table(key: &str, value: &str) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(key), header_cell(value)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn source_cell(key: &str) -> Cell {
    Cell::new(key)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn number_cell(value: f64) -> Cell {
    Cell::new(format_numeric(value))
}

fn value_cell(value: &CellValue) -> Cell {
    if value.is_missing() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(999.0), "999");
        assert_eq!(format_numeric(1_000.0), "1,000");
        assert_eq!(format_numeric(1_234_567.0), "1,234,567");
        assert_eq!(format_numeric(-45_000.0), "-45,000");
    }

    #[test]
    fn keeps_two_decimals() {
        assert_eq!(format_numeric(1_234.5), "1,234.50");
        assert_eq!(format_numeric(0.25), "0.25");
        assert_eq!(format_numeric(10.001), "10");
    }

    #[test]
    fn timestamps_omit_midnight() {
        let midnight = NaiveDate::from_ymd_opt(2021, 3, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_timestamp(midnight), "2021-03-15");
        let evening = midnight.with_hour(18).unwrap();
        assert_eq!(format_timestamp(evening), "2021-03-15 18:00");
    }
}
