use smallvec::SmallVec;

use crate::{
    problem::location::LocationIdx,
    solver::{
        ls::{
            inter_relocate::InterRelocateOperator, inter_swap::InterSwapOperator,
            inter_two_opt_star::InterTwoOptStarOperator, relocate::RelocateOperator,
            search_context::SearchContext, swap::SwapOperator, two_opt::TwoOptOperator,
        },
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// New stop sequence for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub route_id: RouteIdx,
    pub stops: Vec<LocationIdx>,
}

pub type RouteChanges = SmallVec<[RouteChange; 2]>;

pub trait LocalSearchOperator: Sized {
    /// Calls `consumer` with every move of this kind between the routes of the pair.
    fn generate_moves<C>(solution: &WorkingSolution, pair: (RouteIdx, RouteIdx), consumer: C)
    where
        C: FnMut(Self);

    /// Routes as they would be after applying the move.
    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges;

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]>;

    /// Returns the delta when the move is feasible and strictly better than `threshold`.
    fn evaluate(
        &self,
        context: &SearchContext,
        solution: &WorkingSolution,
        threshold: f64,
    ) -> Option<f64> {
        let changes = self.route_changes(solution);
        let delta = context.delta(solution, &changes);

        (delta < threshold && context.is_feasible(solution, &changes)).then_some(delta)
    }

    fn apply(&self, solution: &mut WorkingSolution) {
        for change in self.route_changes(solution) {
            solution.replace_route(change.route_id, change.stops);
        }
    }
}

#[derive(Debug)]
pub enum LocalSearchMove {
    /// Moves one stop to another position of the same route.
    Relocate(RelocateOperator),
    /// Exchanges two stops of the same route.
    Swap(SwapOperator),
    /// Reverses a segment of a route.
    TwoOpt(TwoOptOperator),
    /// Moves one stop to another route.
    InterRelocate(InterRelocateOperator),
    /// Exchanges two stops of different routes.
    InterSwap(InterSwapOperator),
    /// Exchanges the tails of two routes.
    InterTwoOptStar(InterTwoOptStarOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate(_) => "Relocate",
            LocalSearchMove::Swap(_) => "Swap",
            LocalSearchMove::TwoOpt(_) => "Two-Opt",
            LocalSearchMove::InterRelocate(_) => "Inter-Relocate",
            LocalSearchMove::InterSwap(_) => "Inter-Swap",
            LocalSearchMove::InterTwoOptStar(_) => "Inter-2-Opt*",
        }
    }

    pub fn apply(&self, solution: &mut WorkingSolution) {
        match self {
            LocalSearchMove::Relocate(op) => op.apply(solution),
            LocalSearchMove::Swap(op) => op.apply(solution),
            LocalSearchMove::TwoOpt(op) => op.apply(solution),
            LocalSearchMove::InterRelocate(op) => op.apply(solution),
            LocalSearchMove::InterSwap(op) => op.apply(solution),
            LocalSearchMove::InterTwoOptStar(op) => op.apply(solution),
        }
    }

    pub fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        match self {
            LocalSearchMove::Relocate(op) => op.updated_routes(),
            LocalSearchMove::Swap(op) => op.updated_routes(),
            LocalSearchMove::TwoOpt(op) => op.updated_routes(),
            LocalSearchMove::InterRelocate(op) => op.updated_routes(),
            LocalSearchMove::InterSwap(op) => op.updated_routes(),
            LocalSearchMove::InterTwoOptStar(op) => op.updated_routes(),
        }
    }
}
