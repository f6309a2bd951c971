use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    model::{
        capacity_dimension::CapacityDimension,
        time_dimension::{TimeDimension, TimeDimensionParams},
    },
    problem::{
        Units, location::LocationIdx, release_schedule::ReleaseSchedule, time_of_day::Minutes,
        vehicle::VehicleIdx, vehicle_routing_problem::VehicleRoutingProblem,
    },
};

/// Cumul values of a feasible route, start and end depot included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCumuls {
    pub loads: Vec<Units>,
    pub times: Vec<Minutes>,
}

/// The problem together with its release schedule and the two dimensions that every
/// route must satisfy. The arc cost is the time transit.
#[derive(Debug)]
pub struct RoutingModel {
    problem: Arc<VehicleRoutingProblem>,
    releases: ReleaseSchedule,
    capacity: CapacityDimension,
    time: TimeDimension,
}

impl RoutingModel {
    pub fn new(
        problem: Arc<VehicleRoutingProblem>,
        releases: ReleaseSchedule,
        params: &TimeDimensionParams,
    ) -> Self {
        for (vehicle, release) in problem.vehicles().iter().zip(releases.releases()) {
            if release.release > params.horizon {
                warn!(
                    vehicle = vehicle.external_id(),
                    release = release.release,
                    horizon = params.horizon,
                    "Vehicle is released after the horizon and cannot serve any stop"
                );
            }
        }

        let capacity = CapacityDimension::new(&problem);
        let time = TimeDimension::new(&releases, params);

        debug!(
            slack_max = params.slack_max,
            horizon = params.horizon,
            "Routing model ready"
        );

        RoutingModel {
            problem,
            releases,
            capacity,
            time,
        }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    pub fn releases(&self) -> &ReleaseSchedule {
        &self.releases
    }

    pub fn capacity_dimension(&self) -> &CapacityDimension {
        &self.capacity
    }

    pub fn time_dimension(&self) -> &TimeDimension {
        &self.time
    }

    pub fn num_vehicles(&self) -> usize {
        self.problem.vehicles().len()
    }

    #[inline(always)]
    pub fn arc_cost(&self, from: LocationIdx, to: LocationIdx) -> Minutes {
        self.time.transit(&self.problem, from, to)
    }

    /// Cost of `depot -> stops -> depot`, 0 for an unused vehicle.
    pub fn route_cost(&self, stops: &[LocationIdx]) -> Minutes {
        if stops.is_empty() {
            return 0;
        }

        let depot = self.problem.depot();
        let mut cost = 0;
        let mut previous = depot;
        for &stop in stops {
            cost += self.arc_cost(previous, stop);
            previous = stop;
        }

        cost + self.arc_cost(previous, depot)
    }

    pub fn route_load(&self, stops: &[LocationIdx]) -> Units {
        self.capacity.route_load(&self.problem, stops.iter().copied())
    }

    /// An unused vehicle never violates a dimension.
    pub fn is_route_feasible(&self, vehicle_id: VehicleIdx, stops: &[LocationIdx]) -> bool {
        if stops.is_empty() {
            return true;
        }

        self.capacity
            .is_satisfied(vehicle_id, self.route_load(stops))
            && self
                .time
                .is_feasible(&self.problem, vehicle_id, stops.iter().copied())
    }

    pub fn route_cumuls(&self, vehicle_id: VehicleIdx, stops: &[LocationIdx]) -> Option<RouteCumuls> {
        let loads = self.capacity.cumuls(&self.problem, stops);
        if !self.capacity.is_satisfied(vehicle_id, loads[loads.len() - 1]) {
            return None;
        }

        let times = if stops.is_empty() {
            let start = self.time.start_range(vehicle_id).min;
            vec![start, start]
        } else {
            self.time.schedule(&self.problem, vehicle_id, stops)?
        };

        Some(RouteCumuls { loads, times })
    }
}
