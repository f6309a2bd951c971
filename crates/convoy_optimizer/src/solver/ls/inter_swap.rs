use smallvec::{SmallVec, smallvec};

use crate::solver::{
    ls::r#move::{LocalSearchOperator, RouteChange, RouteChanges},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Inter-Route Swap**
///
/// Exchanges the stop at `first` in `first_route_id` with the stop at `second` in
/// `second_route_id`.
///
/// ```text
/// BEFORE:
///    R1: (A) -> [first] -> (B)
///    R2: (X) -> [second] -> (Y)
///
/// AFTER:
///    R1: (A) -> [second] -> (B)
///    R2: (X) -> [first] -> (Y)
/// ```
#[derive(Debug)]
pub struct InterSwapOperator {
    params: InterSwapOperatorParams,
}

#[derive(Debug)]
pub struct InterSwapOperatorParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl InterSwapOperator {
    pub fn new(params: InterSwapOperatorParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);
        Self { params }
    }
}

impl LocalSearchOperator for InterSwapOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        // Symmetric, each unordered pair is visited once.
        if r1 >= r2 {
            return;
        }

        let model = solution.model();
        let problem = model.problem();
        let first_route = solution.route(r1);
        let second_route = solution.route(r2);
        let first_capacity = model.capacity_dimension().capacity(first_route.vehicle_id());
        let second_capacity = model.capacity_dimension().capacity(second_route.vehicle_id());

        for (first, &first_stop) in first_route.stops().iter().enumerate() {
            for (second, &second_stop) in second_route.stops().iter().enumerate() {
                let exchanged = problem.demand(second_stop) - problem.demand(first_stop);
                if first_route.load() + exchanged > first_capacity
                    || second_route.load() - exchanged > second_capacity
                {
                    continue;
                }

                consumer(InterSwapOperator::new(InterSwapOperatorParams {
                    first_route_id: r1,
                    second_route_id: r2,
                    first,
                    second,
                }));
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges {
        let InterSwapOperatorParams {
            first_route_id,
            second_route_id,
            first,
            second,
        } = self.params;

        let mut first_stops = solution.route(first_route_id).stops().to_vec();
        let mut second_stops = solution.route(second_route_id).stops().to_vec();
        std::mem::swap(&mut first_stops[first], &mut second_stops[second]);

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
