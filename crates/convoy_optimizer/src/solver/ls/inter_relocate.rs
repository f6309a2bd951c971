use smallvec::{SmallVec, smallvec};

use crate::solver::{
    ls::r#move::{LocalSearchOperator, RouteChange, RouteChanges},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Inter-Route Relocate**
///
/// Removes the stop at `from` in `from_route_id` and inserts it at `to` in
/// `to_route_id`. The target route may be empty, which puts an idle vehicle to use.
///
/// ```text
/// BEFORE:
///    R1: (A) -> [from] -> (B)
///    R2: (X) -> (Y)
///
/// AFTER:
///    R1: (A) -> (B)
///    R2: (X) -> [from] -> (Y)
/// ```
#[derive(Debug)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        debug_assert_ne!(params.from_route_id, params.to_route_id);
        Self { params }
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 == r2 {
            return;
        }

        let model = solution.model();
        let from_route = solution.route(r1);
        let to_route = solution.route(r2);
        let capacity = model.capacity_dimension().capacity(to_route.vehicle_id());

        for (from, &stop) in from_route.stops().iter().enumerate() {
            if to_route.load() + model.problem().demand(stop) > capacity {
                continue;
            }

            for to in 0..=to_route.len() {
                consumer(InterRelocateOperator::new(InterRelocateParams {
                    from_route_id: r1,
                    to_route_id: r2,
                    from,
                    to,
                }));
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges {
        let InterRelocateParams {
            from_route_id,
            to_route_id,
            from,
            to,
        } = self.params;

        let mut from_stops = solution.route(from_route_id).stops().to_vec();
        let stop = from_stops.remove(from);

        let mut to_stops = solution.route(to_route_id).stops().to_vec();
        to_stops.insert(to, stop);

        smallvec![
            RouteChange {
                route_id: from_route_id,
                stops: from_stops,
            },
            RouteChange {
                route_id: to_route_id,
                stops: to_stops,
            },
        ]
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.from_route_id, self.params.to_route_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        solver::{arc_penalties::ArcPenalties, ls::search_context::SearchContext},
        test_utils::{self, TestStop},
    };

    #[test]
    fn test_inter_relocate() {
        let problem = test_utils::create_problem(
            vec![Default::default(); 4],
            vec![(10, 0), (10, 0)],
            test_utils::line_matrix(&[0, 10, 20, 30, 40]),
        );
        let model = test_utils::create_model(problem, 0);
        let penalties = ArcPenalties::new(5);
        let context = SearchContext::new(&model, &penalties, 0.0);
        let mut solution = test_utils::create_test_working_solution(
            model.clone(),
            vec![vec![1, 4], vec![2, 3]],
        );

        let operator = InterRelocateOperator::new(InterRelocateParams {
            from_route_id: RouteIdx::new(0),
            to_route_id: RouteIdx::new(1),
            from: 1,
            to: 2,
        });

        let before = solution.total_cost();
        let delta = context.delta(&solution, &operator.route_changes(&solution));
        operator.apply(&mut solution);

        // 0-1-4-0 + 0-2-3-0 = 80 + 60, 0-1-0 + 0-2-3-4-0 = 20 + 80
        assert_eq!(before, 140);
        assert_eq!(delta, -40.0);
        assert_eq!(solution.total_cost(), 100);
        assert_eq!(solution.route(RouteIdx::new(0)).stops(), test_utils::location_ids(&[1]));
        assert_eq!(
            solution.route(RouteIdx::new(1)).stops(),
            test_utils::location_ids(&[2, 3, 4])
        );
    }

    #[test]
    fn test_generate_moves_skips_over_capacity() {
        let problem = test_utils::create_problem(
            vec![
                TestStop::with_demand(5),
                TestStop::with_demand(2),
                TestStop::with_demand(4),
            ],
            vec![(10, 0), (6, 0)],
            test_utils::constant_matrix(4, 10),
        );
        let model = test_utils::create_model(problem, 0);
        let solution =
            test_utils::create_test_working_solution(model, vec![vec![1, 2], vec![3]]);

        let mut moved = Vec::new();
        InterRelocateOperator::generate_moves(
            &solution,
            (RouteIdx::new(0), RouteIdx::new(1)),
            |op| moved.push(op.params.from),
        );

        // only stop 2 (demand 2) fits next to the 4 units already on the second vehicle
        assert_eq!(moved, vec![1, 1]);
    }
}
