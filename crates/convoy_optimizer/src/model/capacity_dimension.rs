use crate::problem::{
    Units, location::LocationIdx, vehicle::VehicleIdx,
    vehicle_routing_problem::VehicleRoutingProblem,
};

/// Cumulative load along a route. Starts at 0 on the depot, grows by the demand of
/// every visited stop and is bounded by the vehicle capacity. No slack.
#[derive(Debug, Clone)]
pub struct CapacityDimension {
    capacities: Vec<Units>,
}

impl CapacityDimension {
    pub fn new(problem: &VehicleRoutingProblem) -> Self {
        CapacityDimension {
            capacities: problem
                .vehicles()
                .iter()
                .map(|vehicle| vehicle.capacity())
                .collect(),
        }
    }

    pub fn capacity(&self, vehicle_id: VehicleIdx) -> Units {
        self.capacities[vehicle_id.get()]
    }

    /// Load added when entering `to`.
    #[inline(always)]
    pub fn transit(&self, problem: &VehicleRoutingProblem, to: LocationIdx) -> Units {
        problem.demand(to)
    }

    /// Load is monotonic along a route, so checking the final cumul is enough.
    #[inline(always)]
    pub fn is_satisfied(&self, vehicle_id: VehicleIdx, load: Units) -> bool {
        (0..=self.capacity(vehicle_id)).contains(&load)
    }

    pub fn route_load(
        &self,
        problem: &VehicleRoutingProblem,
        stops: impl IntoIterator<Item = LocationIdx>,
    ) -> Units {
        stops
            .into_iter()
            .map(|stop| self.transit(problem, stop))
            .sum()
    }

    /// Cumul values for start, every stop and end.
    pub fn cumuls(&self, problem: &VehicleRoutingProblem, stops: &[LocationIdx]) -> Vec<Units> {
        let mut cumuls = Vec::with_capacity(stops.len() + 2);
        let mut load = 0;
        cumuls.push(load);
        for &stop in stops {
            load += self.transit(problem, stop);
            cumuls.push(load);
        }
        cumuls.push(load);
        cumuls
    }
}
