use std::sync::Arc;

use serde::Serialize;
use tracing::{Level, debug, info, instrument, warn};

use crate::{
    error::SolverError,
    model::routing_model::RoutingModel,
    solver::{
        construction::{
            backtracking::{BacktrackingOutcome, backtrack_solution},
            construct_solution::construct_solution,
        },
        guided_local_search::GuidedLocalSearch,
        infeasibility::{Infeasibility, check_feasibility},
        solution::assignment::Assignment,
        solver_params::SolverParams,
        termination::TerminationTracker,
    },
    timed_phase,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveOutcome {
    Solved(Assignment),
    Infeasible(Infeasibility),
}

impl SolveOutcome {
    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            SolveOutcome::Solved(assignment) => Some(assignment),
            SolveOutcome::Infeasible(_) => None,
        }
    }
}

pub struct Solver {
    model: Arc<RoutingModel>,
    params: SolverParams,
}

impl Solver {
    pub fn new(model: Arc<RoutingModel>, params: SolverParams) -> Self {
        Solver { model, params }
    }

    pub fn model(&self) -> &Arc<RoutingModel> {
        &self.model
    }

    /// Runs the pre-checks, the construction and the guided local search until a
    /// termination is met. Deterministic for a given problem and iteration budget.
    ///
    /// Stops the greedy construction cannot place trigger a backtracking search. They
    /// are only reported as unroutable once that search is exhausted or runs out of time.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn solve(&self) -> Result<SolveOutcome, SolverError> {
        if let Some(infeasibility) = check_feasibility(&self.model) {
            warn!(%infeasibility, "Problem rejected before search");
            return Ok(SolveOutcome::Infeasible(infeasibility));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.params.search_threads.number_of_threads())
            .build()?;

        let mut tracker = TerminationTracker::new(&self.params.terminations);

        let mut initial = timed_phase!("Construction", construct_solution(&self.model));
        if initial.has_unassigned() {
            debug!(
                unassigned = initial.unassigned_stops().count(),
                "Construction left stops over, backtracking"
            );
            match timed_phase!("Backtracking", backtrack_solution(&self.model, &tracker)) {
                BacktrackingOutcome::Found(solution) => initial = solution,
                outcome => {
                    let problem = self.model.problem();
                    let stops = initial
                        .unassigned_stops()
                        .map(|stop| problem.location(stop).name().to_owned())
                        .collect();
                    let infeasibility = Infeasibility::UnroutableStops { stops };
                    warn!(%infeasibility, ?outcome, "No route places every stop");
                    return Ok(SolveOutcome::Infeasible(infeasibility));
                }
            }
        }

        let initial_cost = initial.total_cost();
        let (best, statistics) = pool.install(|| {
            let mut search =
                GuidedLocalSearch::new(Arc::clone(&self.model), self.params.gls_lambda_coefficient);
            search.run(initial, &mut tracker)
        });

        let assignment = Assignment::from_solution(&best)?;

        info!(
            initial_cost,
            objective = assignment.objective(),
            vehicles_used = assignment.vehicles_used(),
            moves = statistics.moves,
            penalizations = statistics.penalizations,
            elapsed = ?tracker.elapsed(),
            "Search finished"
        );

        Ok(SolveOutcome::Solved(assignment))
    }
}
