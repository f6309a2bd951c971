use std::path::PathBuf;

use clap::Args;
use convoy_optimizer::{
    config::DispatchConfig,
    dispatch::dispatch,
    input::tabular::{location_records, vehicle_records},
    problem::{
        time_of_day::TimeOfDay, travel_time_matrix::TravelTimeMatrix,
        vehicle_routing_problem::VehicleRoutingProblemBuilder,
    },
    solver::solver_params::Threads,
};
use tracing::info;

use crate::{
    matrix::{self, MatrixArgs},
    parsers, sheets, summary,
};

#[derive(Args)]
pub struct OptimizeSheetsArgs {
    /// Locations sheet: name, address, demand, open, close, service_minutes. First row is the depot
    #[arg(long)]
    locations: PathBuf,

    /// Vehicles sheet in dock order: id, capacity, loading_minutes
    #[arg(long)]
    vehicles: PathBuf,

    #[command(flatten)]
    matrix: MatrixArgs,

    /// Plan export (CSV), not written when no route is found
    #[arg(long, short = 'o', default_value = "routes.csv")]
    out: PathBuf,

    /// When the first vehicle starts loading
    #[arg(long, value_parser = parsers::parse_time_of_day, default_value = "07:30")]
    loading_start: TimeOfDay,

    #[arg(long, default_value_t = 1.5)]
    slowdown_factor: f64,

    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "10s")]
    timeout: jiff::SignedDuration,

    #[arg(long, default_value_t = 1)]
    threads: usize,
}

pub async fn run(args: OptimizeSheetsArgs) -> anyhow::Result<()> {
    info!("Loading sheets");
    let locations = location_records(&sheets::read_table_file(&args.locations)?)?;
    let vehicles = vehicle_records(&sheets::read_table_file(&args.vehicles)?)?;
    info!(
        locations = locations.len(),
        vehicles = vehicles.len(),
        "Sheets loaded"
    );

    let config = DispatchConfig {
        loading_start: args.loading_start,
        slowdown_factor: args.slowdown_factor,
        time_budget: args.timeout,
        ..DispatchConfig::default()
    };
    config.validate()?;

    let addresses = locations
        .iter()
        .map(|location| location.address.clone())
        .collect::<Vec<_>>();
    let travel_times = matrix::travel_minutes(&args.matrix, &addresses, config.slowdown_factor).await?;

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .add_location_records(&locations)
        .add_vehicle_records(&vehicles)
        .set_travel_times(TravelTimeMatrix::try_from_rows(travel_times)?);
    let problem = builder.build()?;

    let result = dispatch(problem, &config, Threads::Multi(args.threads))?;
    summary::print(&result);

    if let Some(plan) = result.outcome.plan() {
        sheets::export_plan(&args.out, plan)?;
    }

    Ok(())
}
