use std::sync::Arc;

use serde::Serialize;
use tracing::{Level, info, instrument, warn};

use crate::{
    config::DispatchConfig,
    error::DispatchError,
    model::routing_model::RoutingModel,
    plan::route_plan::RoutePlan,
    problem::{release_schedule::ReleaseSchedule, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        infeasibility::Infeasibility,
        solution::assignment::Assignment,
        solver::{SolveOutcome, Solver},
        solver_params::{SolverParams, Termination, Threads},
    },
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Planned {
        assignment: Assignment,
        plan: RoutePlan,
    },
    Infeasible {
        infeasibility: Infeasibility,
    },
}

impl DispatchOutcome {
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            DispatchOutcome::Planned { plan, .. } => Some(plan),
            DispatchOutcome::Infeasible { .. } => None,
        }
    }
}

/// Release schedule and outcome of one dispatch run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispatchResult {
    pub releases: ReleaseSchedule,
    pub outcome: DispatchOutcome,
}

/// Solves the problem within `config.time_budget`.
pub fn dispatch(
    problem: VehicleRoutingProblem,
    config: &DispatchConfig,
    threads: Threads,
) -> Result<DispatchResult, DispatchError> {
    let params = SolverParams {
        terminations: vec![Termination::Duration(config.time_budget)],
        search_threads: threads,
        ..SolverParams::default()
    };

    dispatch_with_params(problem, config, params)
}

/// Same as [`dispatch`], with the search driven by `params` only.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn dispatch_with_params(
    problem: VehicleRoutingProblem,
    config: &DispatchConfig,
    params: SolverParams,
) -> Result<DispatchResult, DispatchError> {
    config.validate()?;

    info!(
        locations = problem.locations().len(),
        vehicles = problem.vehicles().len(),
        total_demand = problem.total_demand(),
        total_capacity = problem.total_capacity(),
        "Computing staggered departures"
    );
    let releases = ReleaseSchedule::for_problem(&problem, config.loading_start);
    let model = Arc::new(RoutingModel::new(
        Arc::new(problem),
        releases.clone(),
        &config.time_dimension,
    ));

    let outcome = match Solver::new(Arc::clone(&model), params).solve()? {
        SolveOutcome::Solved(assignment) => {
            let plan = RoutePlan::extract(model.problem(), model.releases(), &assignment);
            info!(
                objective = assignment.objective(),
                vehicles_used = plan.routes().len(),
                "Solution found"
            );
            plan.log_summary();

            DispatchOutcome::Planned { assignment, plan }
        }
        SolveOutcome::Infeasible(infeasibility) => {
            warn!(%infeasibility, "No feasible solution");
            DispatchOutcome::Infeasible { infeasibility }
        }
    };

    Ok(DispatchResult { releases, outcome })
}
