pub mod route_plan;
