use smallvec::{SmallVec, smallvec};

use crate::solver::{
    ls::r#move::{LocalSearchOperator, RouteChange, RouteChanges},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Intra-Route Swap**
///
/// Exchanges the stops at `first` and `second`, with `first < second`.
///
/// ```text
/// BEFORE: (A) -> [first] -> (B) ... (X) -> [second] -> (Y)
/// AFTER:  (A) -> [second] -> (B) ... (X) -> [first] -> (Y)
/// ```
#[derive(Debug)]
pub struct SwapOperator {
    params: SwapOperatorParams,
}

#[derive(Debug)]
pub struct SwapOperatorParams {
    pub route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl SwapOperator {
    pub fn new(params: SwapOperatorParams) -> Self {
        debug_assert!(params.first < params.second);
        Self { params }
    }
}

impl LocalSearchOperator for SwapOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();
        for first in 0..len {
            for second in first + 1..len {
                consumer(SwapOperator::new(SwapOperatorParams {
                    route_id: r1,
                    first,
                    second,
                }));
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges {
        let SwapOperatorParams {
            route_id,
            first,
            second,
        } = self.params;

        let mut stops = solution.route(route_id).stops().to_vec();
        stops.swap(first, second);

        smallvec![RouteChange { route_id, stops }]
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.route_id]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        solver::{arc_penalties::ArcPenalties, ls::search_context::SearchContext},
        test_utils,
    };

    #[test]
    fn test_swap() {
        let problem = test_utils::create_problem(
            vec![Default::default(); 4],
            vec![(10, 0)],
            test_utils::line_matrix(&[0, 10, 20, 30, 40]),
        );
        let model = test_utils::create_model(problem, 0);
        let penalties = ArcPenalties::new(5);
        let context = SearchContext::new(&model, &penalties, 0.0);
        let mut solution =
            test_utils::create_test_working_solution(model.clone(), vec![vec![1, 3, 2, 4]]);

        let operator = SwapOperator::new(SwapOperatorParams {
            route_id: RouteIdx::new(0),
            first: 1,
            second: 2,
        });

        let before = solution.total_cost();
        let delta = context.delta(&solution, &operator.route_changes(&solution));
        operator.apply(&mut solution);

        // 0-1-3-2-4-0 = 100, 0-1-2-3-4-0 = 80
        assert_eq!(before, 100);
        assert_eq!(delta, -20.0);
        assert_eq!(solution.total_cost(), 80);
        assert_eq!(
            solution.route(RouteIdx::new(0)).stops(),
            test_utils::location_ids(&[1, 2, 3, 4])
        );
    }
}
