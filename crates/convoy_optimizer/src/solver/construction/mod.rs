pub mod backtracking;
pub mod construct_solution;
