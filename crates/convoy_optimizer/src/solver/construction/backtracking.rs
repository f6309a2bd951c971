use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    model::{routing_model::RoutingModel, time_dimension::CumulRange},
    problem::{Units, location::LocationIdx, time_of_day::Minutes, vehicle::VehicleIdx},
    solver::{
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
        termination::TerminationTracker,
    },
};

/// Wall clock is only read every this many search nodes.
const TIME_CHECK_INTERVAL: usize = 1024;

#[derive(Debug)]
pub enum BacktrackingOutcome {
    Found(WorkingSolution),
    /// Every assignment was enumerated, none is feasible.
    Exhausted,
    OutOfTime,
}

/// Depth-first search for a first feasible solution, used when the greedy
/// construction leaves stops over.
///
/// Routes are built one vehicle at a time, in fleet order, by appending stops, cheapest
/// arc first. A branch is cut when the appended stop empties the forward time domain,
/// overflows the vehicle, or leaves more demand than the remaining vehicles can carry.
/// None of these cuts drops a prefix of a feasible route, so an exhausted search proves
/// that no solution exists. The search gives up once a wall-clock termination is met.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn backtrack_solution(
    model: &Arc<RoutingModel>,
    tracker: &TerminationTracker,
) -> BacktrackingOutcome {
    let mut search = Backtracking::new(model, tracker);
    let start = search.start_range(0);
    let found = search.extend(0, start, model.problem().depot(), 0);

    debug!(nodes = search.nodes, found, out_of_time = search.out_of_time, "Backtracking done");

    if found {
        let mut solution = WorkingSolution::new(Arc::clone(model));
        for (index, stops) in search.routes.into_iter().enumerate() {
            for (position, stop) in stops.into_iter().enumerate() {
                solution.insert(RouteIdx::new(index), position, stop);
            }
        }
        BacktrackingOutcome::Found(solution)
    } else if search.out_of_time {
        BacktrackingOutcome::OutOfTime
    } else {
        BacktrackingOutcome::Exhausted
    }
}

struct Backtracking<'a> {
    model: &'a RoutingModel,
    tracker: &'a TerminationTracker<'a>,
    routes: Vec<Vec<LocationIdx>>,
    visited: Vec<bool>,
    remaining_stops: usize,
    remaining_demand: Units,
    /// Capacity of the vehicles after each vehicle.
    capacity_after: Vec<Units>,
    nodes: usize,
    out_of_time: bool,
}

impl<'a> Backtracking<'a> {
    fn new(model: &'a RoutingModel, tracker: &'a TerminationTracker<'a>) -> Self {
        let problem = model.problem();
        let num_vehicles = model.num_vehicles();

        let mut capacity_after = vec![0; num_vehicles];
        for index in (0..num_vehicles.saturating_sub(1)).rev() {
            capacity_after[index] = capacity_after[index + 1]
                + model
                    .capacity_dimension()
                    .capacity(VehicleIdx::new(index + 1));
        }

        Backtracking {
            model,
            tracker,
            routes: vec![Vec::new(); num_vehicles],
            visited: vec![false; problem.locations().len()],
            remaining_stops: problem.num_stops(),
            remaining_demand: problem.total_demand(),
            capacity_after,
            nodes: 0,
            out_of_time: false,
        }
    }

    fn start_range(&self, vehicle: usize) -> CumulRange {
        self.model
            .time_dimension()
            .start_range(VehicleIdx::new(vehicle))
    }

    /// Grows the route of `vehicle` whose last node is `last`, reachable within `range`.
    fn extend(&mut self, vehicle: usize, range: CumulRange, last: LocationIdx, load: Units) -> bool {
        if self.nodes % TIME_CHECK_INTERVAL == 0 && self.tracker.is_out_of_time() {
            self.out_of_time = true;
        }
        if self.out_of_time {
            return false;
        }
        self.nodes += 1;

        let model = self.model;
        let vehicle_id = VehicleIdx::new(vehicle);
        if self.remaining_stops == 0 {
            return model.is_route_feasible(vehicle_id, &self.routes[vehicle]);
        }

        let problem = model.problem();
        let capacity = model.capacity_dimension().capacity(vehicle_id);

        // Stable sort keeps ascending location index among equal costs.
        let mut candidates = problem
            .stops()
            .filter(|stop| !self.visited[stop.get()])
            .filter(|&stop| load + problem.demand(stop) <= capacity)
            .filter_map(|stop| {
                model
                    .time_dimension()
                    .extend(problem, range, last, stop)
                    .map(|next| (model.arc_cost(last, stop), stop, next))
            })
            .collect::<Vec<(Minutes, LocationIdx, CumulRange)>>();
        candidates.sort_by_key(|&(cost, _, _)| cost);

        for (_, stop, next) in candidates {
            let demand = problem.demand(stop);
            self.visit(vehicle, stop, demand);

            if self.extend(vehicle, next, stop, load + demand) {
                return true;
            }

            self.unvisit(vehicle, stop, demand);
            if self.out_of_time {
                return false;
            }
        }

        let next_vehicle = vehicle + 1;
        if next_vehicle < self.routes.len()
            && self.remaining_demand <= self.capacity_after[vehicle]
            && model.is_route_feasible(vehicle_id, &self.routes[vehicle])
        {
            let start = self.start_range(next_vehicle);
            return self.extend(next_vehicle, start, problem.depot(), 0);
        }

        false
    }

    fn visit(&mut self, vehicle: usize, stop: LocationIdx, demand: Units) {
        self.routes[vehicle].push(stop);
        self.visited[stop.get()] = true;
        self.remaining_stops -= 1;
        self.remaining_demand -= demand;
    }

    fn unvisit(&mut self, vehicle: usize, stop: LocationIdx, demand: Units) {
        self.routes[vehicle].pop();
        self.visited[stop.get()] = false;
        self.remaining_stops += 1;
        self.remaining_demand += demand;
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::{
        solver::{construction::construct_solution::construct_solution, solver_params::Termination},
        test_utils::{self, TestStop},
    };

    /// Greedy fills the first vehicle with stops 2 and 4 (load 9), the second one takes
    /// stop 3 and stop 1 fits nowhere. {1, 4} and {2, 3} is the only valid split.
    fn greedy_dead_end() -> Arc<RoutingModel> {
        let problem = test_utils::create_problem(
            vec![
                TestStop::with_demand(6),
                TestStop::with_demand(5),
                TestStop::with_demand(5),
                TestStop::with_demand(4),
            ],
            vec![(10, 20), (10, 15)],
            test_utils::line_matrix(&[0, 20, 1, 10, 2]),
        );
        test_utils::create_model(problem, 450)
    }

    #[test]
    fn test_greedy_dead_end() {
        let solution = construct_solution(&greedy_dead_end());

        assert_eq!(
            solution.unassigned_stops().collect::<Vec<_>>(),
            test_utils::location_ids(&[1])
        );
    }

    #[test]
    fn test_finds_solution_greedy_misses() {
        let model = greedy_dead_end();
        let terminations = [Termination::Duration(SignedDuration::from_secs(60))];
        let tracker = TerminationTracker::new(&terminations);

        let BacktrackingOutcome::Found(solution) = backtrack_solution(&model, &tracker) else {
            panic!("expected a solution");
        };

        assert!(!solution.has_unassigned());
        assert_eq!(solution.routes()[0].stops(), test_utils::location_ids(&[2, 3]));
        assert_eq!(solution.routes()[1].stops(), test_utils::location_ids(&[4, 1]));
        for route in solution.routes() {
            assert!(route.load() <= 10);
            assert!(model.is_route_feasible(route.vehicle_id(), route.stops()));
        }
    }

    #[test]
    fn test_exhausted_when_no_solution() {
        // One vehicle released at 07:30 cannot reach both stops before 07:50.
        let problem = test_utils::create_problem(
            vec![TestStop::window(460, 470), TestStop::window(460, 470)],
            vec![(10, 0)],
            test_utils::line_matrix(&[0, 10, -10]),
        );
        let model = test_utils::create_model(problem, 450);
        let tracker = TerminationTracker::new(&[]);

        assert!(matches!(
            backtrack_solution(&model, &tracker),
            BacktrackingOutcome::Exhausted
        ));
    }

    #[test]
    fn test_stops_when_out_of_time() {
        let model = greedy_dead_end();
        let terminations = [Termination::Duration(SignedDuration::ZERO)];
        let tracker = TerminationTracker::new(&terminations);

        assert!(matches!(
            backtrack_solution(&model, &tracker),
            BacktrackingOutcome::OutOfTime
        ));
    }

    #[test]
    fn test_backtracks_from_cheapest_first_stop() {
        // Stop 2 is the cheapest first stop but stop 1 closes before it can be reached
        // from there. Only 1 -> 2 works.
        let problem = test_utils::create_problem(
            vec![TestStop::window(500, 520), TestStop::window(540, 560)],
            vec![(10, 0)],
            test_utils::create_matrix(vec![vec![0, 30, 5], vec![30, 0, 30], vec![5, 30, 0]]),
        );
        let model = test_utils::create_model(problem, 450);
        let tracker = TerminationTracker::new(&[]);

        let BacktrackingOutcome::Found(solution) = backtrack_solution(&model, &tracker) else {
            panic!("expected a solution");
        };

        assert_eq!(solution.routes()[0].stops(), test_utils::location_ids(&[1, 2]));
    }
}
