use std::sync::Arc;

use crate::{
    model::{routing_model::RoutingModel, time_dimension::TimeDimensionParams},
    problem::{
        Units,
        location::{LocationBuilder, LocationIdx},
        release_schedule::ReleaseSchedule,
        time_of_day::{MINUTES_PER_DAY, Minutes, TimeOfDay},
        time_window::TimeWindow,
        travel_time_matrix::TravelTimeMatrix,
        vehicle::VehicleBuilder,
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

pub fn constant_matrix(num_locations: usize, time: Minutes) -> TravelTimeMatrix {
    TravelTimeMatrix::from_constant(num_locations, time)
}

pub fn create_matrix(rows: Vec<Vec<Minutes>>) -> TravelTimeMatrix {
    TravelTimeMatrix::try_new(rows).unwrap()
}

/// Locations on a line, travel time is the distance between positions.
pub fn line_matrix(positions: &[Minutes]) -> TravelTimeMatrix {
    let rows = positions
        .iter()
        .map(|from| positions.iter().map(|to| (from - to).abs()).collect())
        .collect();

    TravelTimeMatrix::try_new(rows).unwrap()
}

#[derive(Debug, Clone)]
pub struct TestStop {
    pub demand: Units,
    pub open: Minutes,
    pub close: Minutes,
    pub service: Minutes,
}

impl Default for TestStop {
    fn default() -> Self {
        TestStop {
            demand: 1,
            open: 0,
            close: MINUTES_PER_DAY,
            service: 0,
        }
    }
}

impl TestStop {
    pub fn with_demand(demand: Units) -> Self {
        TestStop {
            demand,
            ..TestStop::default()
        }
    }

    pub fn with_service(service: Minutes) -> Self {
        TestStop {
            service,
            ..TestStop::default()
        }
    }

    pub fn window(open: Minutes, close: Minutes) -> Self {
        TestStop {
            open,
            close,
            ..TestStop::default()
        }
    }

    pub fn demand(mut self, demand: Units) -> Self {
        self.demand = demand;
        self
    }

    pub fn service(mut self, service: Minutes) -> Self {
        self.service = service;
        self
    }
}

/// Builds a problem with a depot at index 0 followed by `stops`.
/// Vehicles are given as `(capacity, loading_minutes)`.
pub fn create_problem(
    stops: Vec<TestStop>,
    vehicles: Vec<(Units, Minutes)>,
    travel_times: TravelTimeMatrix,
) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();

    let mut depot = LocationBuilder::default();
    depot.set_name("Depot");
    builder.add_location(depot.build());

    for (index, stop) in stops.iter().enumerate() {
        let mut location = LocationBuilder::default();
        location
            .set_name(format!("S{}", index + 1))
            .set_demand(stop.demand)
            .set_time_window(TimeWindow::from_minutes(stop.open, stop.close))
            .set_service_duration(stop.service);
        builder.add_location(location.build());
    }

    for (index, &(capacity, loading)) in vehicles.iter().enumerate() {
        let mut vehicle = VehicleBuilder::default();
        vehicle
            .set_vehicle_id(format!("V{}", index + 1))
            .set_capacity(capacity)
            .set_loading_duration(loading);
        builder.add_vehicle(vehicle.build());
    }

    builder.set_travel_times(travel_times);
    builder.build().unwrap()
}

pub fn create_model(problem: VehicleRoutingProblem, loading_start: Minutes) -> Arc<RoutingModel> {
    let releases =
        ReleaseSchedule::for_problem(&problem, TimeOfDay::from_minutes(loading_start));
    Arc::new(RoutingModel::new(
        Arc::new(problem),
        releases,
        &TimeDimensionParams::default(),
    ))
}

pub fn location_ids(ids: &[usize]) -> Vec<LocationIdx> {
    ids.iter().copied().map(LocationIdx::new).collect()
}

/// Stop ids per vehicle, in visiting order.
pub fn create_test_working_solution(
    model: Arc<RoutingModel>,
    routes: Vec<Vec<usize>>,
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(model);

    for (route_id, stops) in routes.iter().enumerate() {
        for (position, &stop) in stops.iter().enumerate() {
            solution.insert(RouteIdx::new(route_id), position, LocationIdx::new(stop));
        }
    }

    solution
}
