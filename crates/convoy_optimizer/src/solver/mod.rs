pub mod arc_penalties;
pub mod construction;
pub mod guided_local_search;
pub mod infeasibility;
pub mod ls;
pub mod solution;
pub mod solver;
pub mod solver_params;
pub mod termination;
