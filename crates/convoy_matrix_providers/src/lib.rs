pub mod as_the_crow_flies;
pub mod cache;
pub mod distance_matrix_api;
pub mod error;
pub mod travel_time_client;
pub mod travel_time_provider;
pub mod travel_times;
