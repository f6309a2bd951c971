use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    model::routing_model::RoutingModel,
    problem::{location::LocationIdx, time_of_day::Minutes},
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// Builds the first solution.
///
/// Each vehicle, in fleet order, is extended from its last node with the cheapest
/// feasible unvisited stop until none fits. Stops left over are then placed at their
/// cheapest feasible position in any route. Stops that cannot be placed at all stay
/// unassigned.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_solution(model: &Arc<RoutingModel>) -> WorkingSolution {
    let mut solution = WorkingSolution::new(Arc::clone(model));

    path_cheapest_arc(model, &mut solution);

    if solution.has_unassigned() {
        debug!(
            unassigned = solution.unassigned_stops().count(),
            "Path cheapest arc left stops unassigned, repairing"
        );
        cheapest_insertion(model, &mut solution);
    }

    debug!(
        cost = solution.total_cost(),
        routes = solution.non_empty_routes_count(),
        unassigned = solution.unassigned_stops().count(),
        "Initial solution"
    );

    solution
}

fn path_cheapest_arc(model: &RoutingModel, solution: &mut WorkingSolution) {
    let depot = model.problem().depot();

    for vehicle_id in model.problem().vehicle_ids() {
        let route_id = RouteIdx::from(vehicle_id);

        while solution.has_unassigned() {
            let route = solution.route(route_id);
            let last = route.stops().last().copied().unwrap_or(depot);

            // Stable sort keeps ascending location index among equal costs.
            let mut candidates = solution
                .unassigned_stops()
                .map(|stop| (model.arc_cost(last, stop), stop))
                .collect::<Vec<(Minutes, LocationIdx)>>();
            candidates.sort_by_key(|&(cost, _)| cost);

            let mut stops = route.stops().to_vec();
            let next = candidates.into_iter().find_map(|(_, stop)| {
                stops.push(stop);
                let feasible = model.is_route_feasible(vehicle_id, &stops);
                stops.pop();
                feasible.then_some(stop)
            });

            match next {
                Some(stop) => {
                    let position = solution.route(route_id).len();
                    solution.insert(route_id, position, stop);
                }
                None => break,
            }
        }

        if !solution.has_unassigned() {
            break;
        }
    }
}

struct InsertionCandidate {
    delta: Minutes,
    route_id: RouteIdx,
    position: usize,
    stop: LocationIdx,
}

fn cheapest_insertion(model: &RoutingModel, solution: &mut WorkingSolution) {
    let depot = model.problem().depot();

    loop {
        let mut best: Option<InsertionCandidate> = None;

        for stop in solution.unassigned_stops() {
            for (route_index, route) in solution.routes().iter().enumerate() {
                let mut stops = route.stops().to_vec();

                for position in 0..=route.len() {
                    let previous = route.previous_location(position, depot);
                    let next = route.location_at(position, depot);
                    let delta = model.arc_cost(previous, stop) + model.arc_cost(stop, next)
                        - model.arc_cost(previous, next);

                    if best.as_ref().is_some_and(|best| best.delta <= delta) {
                        continue;
                    }

                    stops.insert(position, stop);
                    let feasible = model.is_route_feasible(route.vehicle_id(), &stops);
                    stops.remove(position);

                    if feasible {
                        best = Some(InsertionCandidate {
                            delta,
                            route_id: RouteIdx::new(route_index),
                            position,
                            stop,
                        });
                    }
                }
            }
        }

        match best {
            Some(candidate) => {
                solution.insert(candidate.route_id, candidate.position, candidate.stop)
            }
            None => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, TestStop};

    fn stops(ids: &[usize]) -> Vec<LocationIdx> {
        ids.iter().copied().map(LocationIdx::new).collect()
    }

    #[test]
    fn test_path_cheapest_arc_follows_nearest_neighbour() {
        let problem = test_utils::create_problem(
            vec![Default::default(); 4],
            vec![(10, 0), (10, 0)],
            test_utils::line_matrix(&[0, 30, 10, 40, 20]),
        );
        let model = test_utils::create_model(problem, 0);

        let solution = construct_solution(&model);

        assert!(!solution.has_unassigned());
        assert_eq!(solution.routes()[0].stops(), stops(&[2, 4, 1, 3]));
        assert!(solution.routes()[1].is_empty());
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let problem = test_utils::create_problem(
            vec![Default::default(); 3],
            vec![(10, 0)],
            test_utils::constant_matrix(4, 10),
        );
        let model = test_utils::create_model(problem, 0);

        let solution = construct_solution(&model);

        assert_eq!(solution.routes()[0].stops(), stops(&[1, 2, 3]));
    }

    #[test]
    fn test_capacity_opens_next_vehicle() {
        let problem = test_utils::create_problem(
            vec![
                TestStop::with_demand(6),
                TestStop::with_demand(6),
                TestStop::with_demand(3),
            ],
            vec![(10, 0), (10, 0)],
            test_utils::line_matrix(&[0, 10, 20, 30]),
        );
        let model = test_utils::create_model(problem, 0);

        let solution = construct_solution(&model);

        assert!(!solution.has_unassigned());
        assert_eq!(solution.routes()[0].stops(), stops(&[1, 3]));
        assert_eq!(solution.routes()[1].stops(), stops(&[2]));
    }

    #[test]
    fn test_repair_inserts_in_the_middle() {
        // Path cheapest arc visits 1 then 3 and cannot reach 2 afterwards because of
        // its window. Insertion places it between 1 and 3.
        let problem = test_utils::create_problem(
            vec![
                TestStop::window(480, 600),
                TestStop::window(480, 540),
                TestStop::window(480, 900),
            ],
            vec![(10, 0)],
            test_utils::create_matrix(vec![
                vec![0, 10, 60, 60],
                vec![10, 0, 20, 5],
                vec![60, 20, 0, 5],
                vec![60, 5, 60, 0],
            ]),
        );
        let model = test_utils::create_model(problem, 480);

        let solution = construct_solution(&model);

        assert!(!solution.has_unassigned());
        assert_eq!(solution.routes()[0].stops(), stops(&[1, 2, 3]));
    }

    #[test]
    fn test_unroutable_stop_stays_unassigned() {
        let problem = test_utils::create_problem(
            vec![TestStop::default(), TestStop::window(300, 360)],
            vec![(10, 0)],
            test_utils::constant_matrix(3, 10),
        );
        let model = test_utils::create_model(problem, 480);

        let solution = construct_solution(&model);

        assert!(solution.is_unassigned(2.into()));
        assert_eq!(solution.routes()[0].stops(), stops(&[1]));
    }
}
