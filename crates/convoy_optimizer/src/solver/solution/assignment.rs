use serde::Serialize;

use crate::{
    error::SolverError,
    problem::{Units, location::LocationIdx, time_of_day::Minutes, vehicle::VehicleIdx},
    solver::solution::working_solution::WorkingSolution,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteVisit {
    pub location_id: LocationIdx,
    /// Cumulative load after serving this node.
    pub load: Units,
    /// Arrival time, in minutes after midnight.
    pub time: Minutes,
}

/// Visits of one vehicle, start and end depot included. An unused vehicle has exactly
/// two visits, both on the depot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignedRoute {
    pub vehicle_id: VehicleIdx,
    pub visits: Vec<RouteVisit>,
}

impl AssignedRoute {
    pub fn is_used(&self) -> bool {
        self.visits.len() > 2
    }

    pub fn start(&self) -> &RouteVisit {
        &self.visits[0]
    }

    pub fn end(&self) -> &RouteVisit {
        &self.visits[self.visits.len() - 1]
    }

    /// Visits strictly between the start and end depot.
    pub fn stops(&self) -> &[RouteVisit] {
        &self.visits[1..self.visits.len() - 1]
    }

    pub fn total_load(&self) -> Units {
        self.end().load
    }

    pub fn duration(&self) -> Minutes {
        self.end().time - self.start().time
    }
}

/// A complete solution with concrete cumul values, one route per vehicle in fleet order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    routes: Vec<AssignedRoute>,
    objective: Minutes,
}

impl Assignment {
    pub fn from_solution(solution: &WorkingSolution) -> Result<Self, SolverError> {
        let model = solution.model();
        let depot = model.problem().depot();

        let routes = solution
            .routes()
            .iter()
            .map(|route| -> Result<AssignedRoute, SolverError> {
                let vehicle_id = route.vehicle_id();
                let cumuls = model
                    .route_cumuls(vehicle_id, route.stops())
                    .ok_or_else(|| SolverError::InconsistentRoute {
                        vehicle: model.problem().vehicle(vehicle_id).external_id().to_owned(),
                    })?;

                let nodes = std::iter::once(depot)
                    .chain(route.stops().iter().copied())
                    .chain(std::iter::once(depot));

                let visits = nodes
                    .zip(cumuls.loads)
                    .zip(cumuls.times)
                    .map(|((location_id, load), time)| RouteVisit {
                        location_id,
                        load,
                        time,
                    })
                    .collect();

                Ok(AssignedRoute { vehicle_id, visits })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Assignment {
            routes,
            objective: solution.total_cost(),
        })
    }

    pub fn routes(&self) -> &[AssignedRoute] {
        &self.routes
    }

    pub fn route(&self, vehicle_id: VehicleIdx) -> &AssignedRoute {
        &self.routes[vehicle_id.get()]
    }

    pub fn objective(&self) -> Minutes {
        self.objective
    }

    pub fn vehicles_used(&self) -> usize {
        self.routes.iter().filter(|route| route.is_used()).count()
    }
}
