use smallvec::{SmallVec, smallvec};

use crate::solver::{
    ls::r#move::{LocalSearchOperator, RouteChange, RouteChanges},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Intra-Route 2-Opt**
///
/// Reverses the segment `from..=to` of a route.
///
/// ```text
/// BEFORE: (A) -> [from] -> (B) -> (C) -> [to] -> (D)
/// AFTER:  (A) -> [to] -> (C) -> (B) -> [from] -> (D)
///
/// Edges Removed: (A->from), (to->D)
/// Edges Created: (A->to),   (from->D)
/// ```
///
/// Inner arcs change direction, which matters with asymmetric travel times.
#[derive(Debug)]
pub struct TwoOptOperator {
    params: TwoOptOperatorParams,
}

#[derive(Debug)]
pub struct TwoOptOperatorParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptOperatorParams) -> Self {
        debug_assert!(params.from < params.to);
        Self { params }
    }
}

impl LocalSearchOperator for TwoOptOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();
        // Segments of length 2 are already covered by swap.
        for from in 0..len {
            for to in from + 2..len {
                consumer(TwoOptOperator::new(TwoOptOperatorParams {
                    route_id: r1,
                    from,
                    to,
                }));
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges {
        let TwoOptOperatorParams { route_id, from, to } = self.params;

        let mut stops = solution.route(route_id).stops().to_vec();
        stops[from..=to].reverse();

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
    fn test_two_opt_removes_crossing() {
        let problem = test_utils::create_problem(
            vec![Default::default(); 5],
            vec![(10, 0)],
            test_utils::line_matrix(&[0, 10, 20, 30, 40, 50]),
        );
        let model = test_utils::create_model(problem, 0);
        let penalties = ArcPenalties::new(6);
        let context = SearchContext::new(&model, &penalties, 0.0);
        let mut solution =
            test_utils::create_test_working_solution(model.clone(), vec![vec![1, 4, 3, 2, 5]]);

        let operator = TwoOptOperator::new(TwoOptOperatorParams {
            route_id: RouteIdx::new(0),
            from: 1,
            to: 3,
        });

        let before = solution.total_cost();
        let delta = context.delta(&solution, &operator.route_changes(&solution));
        operator.apply(&mut solution);

        assert_eq!(before, 140);
        assert_eq!(delta, -40.0);
        assert_eq!(solution.total_cost(), 100);
        assert_eq!(
            solution.route(RouteIdx::new(0)).stops(),
            test_utils::location_ids(&[1, 2, 3, 4, 5])
        );
    }

    #[test]
    fn test_asymmetric_delta_counts_reversed_arcs() {
        let problem = test_utils::create_problem(
            vec![Default::default(); 3],
            vec![(10, 0)],
            test_utils::create_matrix(vec![
                vec![0, 10, 10, 10],
                vec![10, 0, 1, 50],
                vec![10, 50, 0, 1],
                vec![10, 1, 50, 0],
            ]),
        );
        let model = test_utils::create_model(problem, 0);
        let penalties = ArcPenalties::new(4);
        let context = SearchContext::new(&model, &penalties, 0.0);
        let solution = test_utils::create_test_working_solution(model.clone(), vec![vec![1, 2, 3]]);

        let operator = TwoOptOperator::new(TwoOptOperatorParams {
            route_id: RouteIdx::new(0),
            from: 0,
            to: 2,
        });

        // 0-1-2-3-0 = 22, 0-3-2-1-0 = 120
        assert_eq!(context.delta(&solution, &operator.route_changes(&solution)), 98.0);
    }
}
