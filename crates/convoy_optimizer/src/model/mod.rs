pub mod capacity_dimension;
pub mod routing_model;
pub mod time_dimension;
