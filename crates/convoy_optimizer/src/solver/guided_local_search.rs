use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    model::routing_model::RoutingModel,
    problem::time_of_day::Minutes,
    solver::{
        arc_penalties::ArcPenalties,
        ls::{
            local_search::{IMPROVEMENT_EPSILON, LocalSearch},
            search_context::SearchContext,
        },
        solution::working_solution::WorkingSolution,
        termination::TerminationTracker,
    },
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStatistics {
    pub moves: usize,
    pub penalizations: usize,
    pub improvements: usize,
}

/// Guided local search over arc features.
///
/// The descent minimises `cost + lambda * penalty` summed over the arcs of the
/// solution. At every local optimum the arcs with the highest utility
/// `cost / (1 + penalty)` get their penalty increased, which pushes the descent away
/// from them. `lambda` is fixed at the first local optimum to
/// `coefficient * cost / arcs`. The best solution by true cost is kept throughout.
pub struct GuidedLocalSearch {
    model: Arc<RoutingModel>,
    local_search: LocalSearch,
    penalties: ArcPenalties,
    lambda: Option<f64>,
    lambda_coefficient: f64,
}

impl GuidedLocalSearch {
    pub fn new(model: Arc<RoutingModel>, lambda_coefficient: f64) -> Self {
        let num_locations = model.problem().locations().len();
        let num_routes = model.num_vehicles();

        GuidedLocalSearch {
            model,
            local_search: LocalSearch::new(num_routes),
            penalties: ArcPenalties::new(num_locations),
            lambda: None,
            lambda_coefficient,
        }
    }

    pub fn lambda(&self) -> Option<f64> {
        self.lambda
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn run(
        &mut self,
        initial: WorkingSolution,
        tracker: &mut TerminationTracker,
    ) -> (WorkingSolution, SearchStatistics) {
        let mut statistics = SearchStatistics::default();
        let mut best_cost = initial.total_cost();
        let mut best = initial.clone();
        let mut current = initial;

        while !tracker.should_terminate() {
            let context = SearchContext::new(&self.model, &self.penalties, self.lambda.unwrap_or(0.0));

            if self.local_search.run_iteration(&context, &mut current).is_some() {
                statistics.moves += 1;

                let cost = current.total_cost();
                let improved = cost < best_cost;
                if improved {
                    debug!(cost, previous = best_cost, "New best solution");
                    best_cost = cost;
                    best = current.clone();
                    statistics.improvements += 1;
                }
                tracker.record_iteration(improved);
                continue;
            }

            if self.lambda.is_none() {
                match self.initial_lambda(&current) {
                    Some(lambda) => {
                        debug!(lambda, "Guided local search penalty weight");
                        self.lambda = Some(lambda);
                    }
                    None => break,
                }
            }

            if !self.penalize(&current) {
                debug!("No arc left to penalize");
                break;
            }
            statistics.penalizations += 1;
            tracker.record_iteration(false);
        }

        debug!(
            best_cost,
            moves = statistics.moves,
            penalizations = statistics.penalizations,
            iterations = tracker.iterations(),
            "Guided local search done"
        );

        (best, statistics)
    }

    /// `None` when the solution has no positive-cost arc, nothing can be improved.
    fn initial_lambda(&self, solution: &WorkingSolution) -> Option<f64> {
        let depot = solution.problem().depot();
        let arcs = solution
            .non_empty_routes_iter()
            .map(|route| route.arcs(depot).count())
            .sum::<usize>();
        let cost = solution.total_cost();

        (arcs > 0 && cost > 0).then(|| self.lambda_coefficient * cost as f64 / arcs as f64)
    }

    /// Increments the penalty of every arc of maximum utility. Returns `false` when no
    /// arc has a positive utility.
    fn penalize(&mut self, solution: &WorkingSolution) -> bool {
        let depot = solution.problem().depot();
        let utility = |penalties: &ArcPenalties, from, to| {
            let cost: Minutes = self.model.arc_cost(from, to);
            cost as f64 / (1.0 + f64::from(penalties.get(from, to)))
        };

        let arcs = solution
            .non_empty_routes_iter()
            .flat_map(|route| route.arcs(depot))
            .collect::<Vec<_>>();

        let max_utility = arcs
            .iter()
            .map(|&(from, to)| utility(&self.penalties, from, to))
            .fold(0.0, f64::max);

        if max_utility <= 0.0 {
            return false;
        }

        let selected = arcs
            .iter()
            .copied()
            .filter(|&(from, to)| {
                utility(&self.penalties, from, to) >= max_utility - IMPROVEMENT_EPSILON
            })
            .collect::<Vec<_>>();

        for (from, to) in selected {
            self.penalties.increment(from, to);
        }

        true
    }
}
