use smallvec::{SmallVec, smallvec};

use crate::{
    problem::Units,
    solver::{
        ls::r#move::{LocalSearchOperator, RouteChange, RouteChanges},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route 2-Opt\***
///
/// Cuts both routes and exchanges their tails. `first_cut` and `second_cut` are the
/// lengths of the kept prefixes.
///
/// ```text
/// BEFORE:
///    R1: (A1) -> (B1) | (C1) -> (D1)
///    R2: (A2) | (B2) -> (C2)
///
/// AFTER:
///    R1: (A1) -> (B1) -> (B2) -> (C2)
///    R2: (A2) -> (C1) -> (D1)
/// ```
#[derive(Debug)]
pub struct InterTwoOptStarOperator {
    params: InterTwoOptStarOperatorParams,
}

#[derive(Debug)]
pub struct InterTwoOptStarOperatorParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first_cut: usize,
    pub second_cut: usize,
}

impl InterTwoOptStarOperator {
    pub fn new(params: InterTwoOptStarOperatorParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);
        Self { params }
    }
}

fn prefix_loads(solution: &WorkingSolution, route_id: RouteIdx) -> Vec<Units> {
    let problem = solution.problem();
    std::iter::once(0)
        .chain(solution.route(route_id).stops().iter().scan(0, |load, &stop| {
            *load += problem.demand(stop);
            Some(*load)
        }))
        .collect()
}

impl LocalSearchOperator for InterTwoOptStarOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 >= r2 {
            return;
        }

        let first_route = solution.route(r1);
        let second_route = solution.route(r2);
        if first_route.is_empty() && second_route.is_empty() {
            return;
        }

        let capacities = solution.model().capacity_dimension();
        let first_capacity = capacities.capacity(first_route.vehicle_id());
        let second_capacity = capacities.capacity(second_route.vehicle_id());
        let first_prefix = prefix_loads(solution, r1);
        let second_prefix = prefix_loads(solution, r2);

        for first_cut in 0..=first_route.len() {
            for second_cut in 0..=second_route.len() {
                if first_cut == first_route.len() && second_cut == second_route.len() {
                    continue;
                }

                let first_load =
                    first_prefix[first_cut] + second_route.load() - second_prefix[second_cut];
                let second_load =
                    second_prefix[second_cut] + first_route.load() - first_prefix[first_cut];
                if first_load > first_capacity || second_load > second_capacity {
                    continue;
                }

                consumer(InterTwoOptStarOperator::new(InterTwoOptStarOperatorParams {
                    first_route_id: r1,
                    second_route_id: r2,
                    first_cut,
                    second_cut,
                }));
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges {
        let InterTwoOptStarOperatorParams {
            first_route_id,
            second_route_id,
            first_cut,
            second_cut,
        } = self.params;

        let first = solution.route(first_route_id).stops();
        let second = solution.route(second_route_id).stops();

        let first_stops = first[..first_cut]
            .iter()
            .chain(&second[second_cut..])
            .copied()
            .collect();
        let second_stops = second[..second_cut]
            .iter()
            .chain(&first[first_cut..])
            .copied()
            .collect();

        smallvec![
            RouteChange {
                route_id: first_route_id,
                stops: first_stops,
            },
            RouteChange {
                route_id: second_route_id,
                stops: second_stops,
            },
        ]
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.first_route_id, self.params.second_route_id]
    }
}
