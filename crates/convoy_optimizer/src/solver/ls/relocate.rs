use smallvec::{SmallVec, smallvec};

use crate::solver::{
    ls::r#move::{LocalSearchOperator, RouteChange, RouteChanges},
    solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

/// **Intra-Route Relocate**
///
/// Moves the stop at `from` so that it is visited right before the stop currently at
/// `to` (or last when `to == len`).
///
/// ```text
/// BEFORE:
///    Route: ... (A) -> [from] -> (C) ... (X) -> (Y) ...
///
/// AFTER:
///    Route: ... (A) -> (C) ... (X) -> [from] -> (Y) ...
///
/// Edges Removed: (A->from), (from->C), (X->Y)
/// Edges Created: (A->C),    (X->from), (from->Y)
/// ```
#[derive(Debug)]
pub struct RelocateOperator {
    params: RelocateOperatorParams,
}

#[derive(Debug)]
pub struct RelocateOperatorParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateOperatorParams) -> Self {
        debug_assert!(params.from != params.to && params.from + 1 != params.to);
        Self { params }
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn generate_moves<C>(solution: &WorkingSolution, (r1, r2): (RouteIdx, RouteIdx), mut consumer: C)
    where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();
        for from in 0..len {
            for to in 0..=len {
                if to == from || to == from + 1 {
                    continue;
                }

                consumer(RelocateOperator::new(RelocateOperatorParams {
                    route_id: r1,
                    from,
                    to,
                }));
            }
        }
    }

    fn route_changes(&self, solution: &WorkingSolution) -> RouteChanges {
        let RelocateOperatorParams { route_id, from, to } = self.params;

        let mut stops = solution.route(route_id).stops().to_vec();
        let stop = stops.remove(from);
        let position = if to > from { to - 1 } else { to };
        stops.insert(position, stop);

        smallvec![RouteChange { route_id, stops }]
    }

    fn updated_routes(&self) -> SmallVec<[RouteIdx; 2]> {
        smallvec![self.params.route_id]
    }
}
