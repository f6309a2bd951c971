pub mod config;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod json;
pub mod model;
pub mod plan;
pub mod problem;
pub mod solver;
mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
