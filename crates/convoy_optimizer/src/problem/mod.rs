pub mod location;
pub mod release_schedule;
pub mod time_of_day;
pub mod time_window;
pub mod travel_time_matrix;
pub mod vehicle;
pub mod vehicle_routing_problem;

/// Units of goods (boxes, pallets...) carried by a vehicle.
pub type Units = i64;
