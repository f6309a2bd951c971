use std::{fs::File, io::BufReader, path::PathBuf};

use clap::Args;
use convoy_optimizer::{
    dispatch::dispatch, json::types::JsonDispatchProblem, solver::solver_params::Threads,
};
use tracing::info;

use crate::{
    matrix::{self, MatrixArgs},
    parsers, sheets, summary,
};

#[derive(Args)]
pub struct OptimizeArgs {
    /// The dispatch document
    #[arg(short = 'i', long)]
    input: PathBuf,

    // used when the document has no travel times
    #[command(flatten)]
    matrix: MatrixArgs,

    /// Overrides the time budget of the document
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Plan export (CSV)
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Prints the full result as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: OptimizeArgs) -> anyhow::Result<()> {
    let f = File::open(&args.input)?;
    let mut content: JsonDispatchProblem = serde_json::from_reader(BufReader::new(f))?;
    info!("Loaded {}", args.input.display());

    if let Some(timeout) = args.timeout {
        content.config.time_budget = timeout;
    }

    if content.travel_times.is_none() {
        let travel_times = matrix::travel_minutes(
            &args.matrix,
            &content.addresses(),
            content.config.slowdown_factor,
        )
        .await?;
        content.travel_times = Some(travel_times);
    }

    let problem = content.build_problem()?;
    let result = dispatch(problem, &content.config, Threads::Multi(args.threads))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        summary::print(&result);
    }

    if let (Some(out), Some(plan)) = (&args.out, result.outcome.plan()) {
        sheets::export_plan(out, plan)?;
    }

    Ok(())
}
