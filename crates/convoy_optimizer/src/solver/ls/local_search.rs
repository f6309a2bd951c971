use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::trace;

use crate::solver::{
    ls::{
        inter_relocate::InterRelocateOperator,
        inter_swap::InterSwapOperator,
        inter_two_opt_star::InterTwoOptStarOperator,
        r#move::{LocalSearchMove, LocalSearchOperator},
        relocate::RelocateOperator,
        search_context::SearchContext,
        swap::SwapOperator,
        two_opt::TwoOptOperator,
    },
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// A move must lower the augmented objective by more than this to be accepted.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

type RoutePair = (RouteIdx, RouteIdx);

/// Best-improvement descent over all route pairs.
///
/// Pairs are evaluated in parallel on the current rayon pool. The winning move is the
/// one with the lowest delta; ties go to the lowest pair index, then to the operator
/// generated first, so the outcome does not depend on the number of threads.
pub struct LocalSearch {
    pairs: Vec<RoutePair>,
}

impl LocalSearch {
    pub fn new(num_routes: usize) -> Self {
        let pairs = (0..num_routes)
            .flat_map(|r1| (0..num_routes).map(move |r2| (RouteIdx::new(r1), RouteIdx::new(r2))))
            .collect();

        LocalSearch { pairs }
    }

    /// Applies the best improving move and returns its delta, `None` at a local optimum.
    pub fn run_iteration(
        &self,
        context: &SearchContext,
        solution: &mut WorkingSolution,
    ) -> Option<f64> {
        let (delta, best_move) = self.find_best_move(context, solution)?;

        trace!(
            operator = best_move.operator_name(),
            delta,
            routes = ?best_move.updated_routes(),
            "Applying move"
        );
        best_move.apply(solution);

        Some(delta)
    }

    pub fn find_best_move(
        &self,
        context: &SearchContext,
        solution: &WorkingSolution,
    ) -> Option<(f64, LocalSearchMove)> {
        let results = self
            .pairs
            .par_iter()
            .map(|&pair| Self::best_move_for_pair(context, solution, pair))
            .collect::<Vec<_>>();

        results
            .into_iter()
            .flatten()
            .fold(None, |best, candidate| match best {
                Some(best) if best.0 <= candidate.0 => Some(best),
                _ => Some(candidate),
            })
    }

    fn best_move_for_pair(
        context: &SearchContext,
        solution: &WorkingSolution,
        (r1, r2): RoutePair,
    ) -> Option<(f64, LocalSearchMove)> {
        if solution.route(r1).is_empty() && solution.route(r2).is_empty() {
            return None;
        }

        let mut best_delta = -IMPROVEMENT_EPSILON;
        let mut best_move: Option<LocalSearchMove> = None;

        RelocateOperator::generate_moves(solution, (r1, r2), |op| {
            if let Some(delta) = op.evaluate(context, solution, best_delta) {
                best_delta = delta;
                best_move = Some(LocalSearchMove::Relocate(op));
            }
        });

        SwapOperator::generate_moves(solution, (r1, r2), |op| {
            if let Some(delta) = op.evaluate(context, solution, best_delta) {
                best_delta = delta;
                best_move = Some(LocalSearchMove::Swap(op));
            }
        });

        TwoOptOperator::generate_moves(solution, (r1, r2), |op| {
            if let Some(delta) = op.evaluate(context, solution, best_delta) {
                best_delta = delta;
                best_move = Some(LocalSearchMove::TwoOpt(op));
            }
        });

        InterRelocateOperator::generate_moves(solution, (r1, r2), |op| {
            if let Some(delta) = op.evaluate(context, solution, best_delta) {
                best_delta = delta;
                best_move = Some(LocalSearchMove::InterRelocate(op));
            }
        });

        InterSwapOperator::generate_moves(solution, (r1, r2), |op| {
            if let Some(delta) = op.evaluate(context, solution, best_delta) {
                best_delta = delta;
                best_move = Some(LocalSearchMove::InterSwap(op));
            }
        });

        InterTwoOptStarOperator::generate_moves(solution, (r1, r2), |op| {
            if let Some(delta) = op.evaluate(context, solution, best_delta) {
                best_delta = delta;
                best_move = Some(LocalSearchMove::InterTwoOptStar(op));
            }
        });

        best_move.map(|best_move| (best_delta, best_move))
    }
}
