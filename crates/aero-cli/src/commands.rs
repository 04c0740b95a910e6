use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use aero_cli::pipeline::PipelineRun;
use aero_cli::report::{
    print_aircraft_mix, print_airport_activity, print_airport_detail, print_airport_names,
    print_catalog_status, print_daily, print_histogram, print_load_errors, print_monthly,
    print_points, print_summary, print_yearly,
};
use aero_ingest::catalog_status;
use aero_model::DatasetOptions;
use aero_model::columns::{AERONAVE, AEROPUERTO};
use aero_transform::{
    airport_names, count_by, date_bounds, date_histogram, filter_date_range, lookup_airport,
    passenger_series, passengers_by_day, passengers_by_month, passengers_by_year, shares,
};

use crate::cli::{AirportArgs, DailyArgs};

pub fn run_summary(run: &PipelineRun) -> Result<()> {
    print_summary(&run.dataset, &run.load_errors);
    Ok(())
}

pub fn run_daily(run: &PipelineRun, args: &DailyArgs) -> Result<()> {
    let span = info_span!("daily");
    let _guard = span.enter();
    print_load_errors(&run.load_errors);

    let flights = run.dataset.flights();
    let Some((min, max)) = date_bounds(flights).context("daily passengers")? else {
        println!("No dated flights available.");
        return Ok(());
    };
    let from = args.from.unwrap_or(min.date());
    let to = args.to.unwrap_or(max.date());
    if from > to {
        bail!("--from {from} is after --to {to}");
    }

    let filtered = filter_date_range(flights, from, to)?;
    info!(%from, %to, rows = filtered.height(), "date range selected");
    if filtered.is_empty() {
        println!("No data available for the selected date range.");
        return Ok(());
    }

    if args.by_month {
        print_monthly(&passengers_by_month(&filtered)?);
    } else if let Some(bins) = args.histogram {
        print_histogram(&date_histogram(&filtered, bins)?);
    } else if args.points {
        print_points(&passenger_series(&filtered)?);
    } else {
        print_daily(&passengers_by_day(&filtered)?);
    }
    Ok(())
}

pub fn run_airports(run: &PipelineRun) -> Result<()> {
    print_load_errors(&run.load_errors);
    let counts = count_by(run.dataset.flights(), AEROPUERTO).context("airport activity")?;
    print_airport_activity(&counts);
    Ok(())
}

pub fn run_aircraft(run: &PipelineRun) -> Result<()> {
    print_load_errors(&run.load_errors);
    let counts = count_by(run.dataset.flights(), AERONAVE).context("aircraft types")?;
    print_aircraft_mix(&counts, &shares(&counts));
    Ok(())
}

pub fn run_yearly(run: &PipelineRun) -> Result<()> {
    print_load_errors(&run.load_errors);
    let totals = passengers_by_year(run.dataset.flights()).context("yearly comparison")?;
    print_yearly(&totals);
    Ok(())
}

pub fn run_airport(run: &PipelineRun, args: &AirportArgs) -> Result<()> {
    print_load_errors(&run.load_errors);
    let reference = match run.dataset.airports() {
        Some(table) if !table.is_empty() => table,
        _ => bail!("airport reference data not available"),
    };
    let Some(name) = args.name.as_deref() else {
        print_airport_names(&airport_names(reference)?);
        return Ok(());
    };
    match lookup_airport(reference, name)? {
        Some(detail) => print_airport_detail(name, &detail),
        None => println!("No airport named '{name}'."),
    }
    Ok(())
}

pub fn run_sources(options: &DatasetOptions) -> Result<()> {
    let status = catalog_status(&options.data_dir, &options.catalog)
        .with_context(|| format!("inspect {}", options.data_dir.display()))?;
    print_catalog_status(&status);
    Ok(())
}
