use serde::Serialize;
use tracing::info;

use crate::problem::{
    time_of_day::{Minutes, TimeOfDay},
    vehicle::VehicleIdx,
    vehicle_routing_problem::VehicleRoutingProblem,
};

/// Loading slot of one vehicle at the shared dock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VehicleRelease {
    pub load_start: Minutes,
    /// Earliest departure: loading is finished.
    pub release: Minutes,
}

/// Per-vehicle loading start and release times for a single loading dock
/// that serves vehicles one after the other, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSchedule {
    releases: Vec<VehicleRelease>,
}

impl ReleaseSchedule {
    /// `load_start[0] = start`, `load_start[v] = release[v - 1]`,
    /// `release[v] = load_start[v] + loading_duration[v]`.
    pub fn compute(start: Minutes, loading_durations: impl IntoIterator<Item = Minutes>) -> Self {
        let mut current = start;
        let releases = loading_durations
            .into_iter()
            .map(|duration| {
                let load_start = current;
                current = load_start + duration;
                VehicleRelease {
                    load_start,
                    release: current,
                }
            })
            .collect();

        ReleaseSchedule { releases }
    }

    pub fn for_problem(problem: &VehicleRoutingProblem, loading_start: TimeOfDay) -> Self {
        let schedule = Self::compute(
            loading_start.minutes(),
            problem
                .vehicles()
                .iter()
                .map(|vehicle| vehicle.loading_duration()),
        );

        for (vehicle, release) in problem.vehicles().iter().zip(&schedule.releases) {
            info!(
                "Vehicle {} starts loading at {} and can leave from {}",
                vehicle.external_id(),
                TimeOfDay::from_minutes(release.load_start),
                TimeOfDay::from_minutes(release.release),
            );
        }

        schedule
    }

    pub fn get(&self, vehicle_id: VehicleIdx) -> &VehicleRelease {
        &self.releases[vehicle_id.get()]
    }

    pub fn load_start(&self, vehicle_id: VehicleIdx) -> Minutes {
        self.get(vehicle_id).load_start
    }

    pub fn release(&self, vehicle_id: VehicleIdx) -> Minutes {
        self.get(vehicle_id).release
    }

    pub fn releases(&self) -> &[VehicleRelease] {
        &self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}
