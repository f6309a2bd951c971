use crate::{
    model::routing_model::RoutingModel,
    problem::location::LocationIdx,
    solver::{arc_penalties::ArcPenalties, ls::r#move::RouteChange, solution::working_solution::WorkingSolution},
};

/// Read-only view used to score moves: arc costs augmented with the guided local
/// search penalties, `cost + lambda * penalty`.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    model: &'a RoutingModel,
    penalties: &'a ArcPenalties,
    lambda: f64,
}

impl<'a> SearchContext<'a> {
    pub fn new(model: &'a RoutingModel, penalties: &'a ArcPenalties, lambda: f64) -> Self {
        SearchContext {
            model,
            penalties,
            lambda,
        }
    }

    pub fn model(&self) -> &RoutingModel {
        self.model
    }

    #[inline(always)]
    pub fn weight(&self, from: LocationIdx, to: LocationIdx) -> f64 {
        let cost = self.model.arc_cost(from, to) as f64;
        if self.lambda == 0.0 {
            cost
        } else {
            cost + self.lambda * f64::from(self.penalties.get(from, to))
        }
    }

    /// Augmented weight of `depot -> stops -> depot`.
    pub fn route_weight(&self, stops: &[LocationIdx]) -> f64 {
        if stops.is_empty() {
            return 0.0;
        }

        let depot = self.model.problem().depot();
        let mut weight = 0.0;
        let mut previous = depot;
        for &stop in stops {
            weight += self.weight(previous, stop);
            previous = stop;
        }

        weight + self.weight(previous, depot)
    }

    pub fn delta(&self, solution: &WorkingSolution, changes: &[RouteChange]) -> f64 {
        changes
            .iter()
            .map(|change| {
                self.route_weight(&change.stops)
                    - self.route_weight(solution.route(change.route_id).stops())
            })
            .sum()
    }

    pub fn is_feasible(&self, solution: &WorkingSolution, changes: &[RouteChange]) -> bool {
        changes.iter().all(|change| {
            let vehicle_id = solution.route(change.route_id).vehicle_id();
            self.model.is_route_feasible(vehicle_id, &change.stops)
        })
    }
}
