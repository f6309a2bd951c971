use std::sync::Arc;

use fxhash::FxHashSet;

use crate::{
    model::routing_model::RoutingModel,
    problem::{
        location::LocationIdx, time_of_day::Minutes,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
};

#[derive(Clone, Debug)]
pub struct WorkingSolution {
    model: Arc<RoutingModel>,
    routes: Vec<WorkingSolutionRoute>,
    unassigned_stops: FxHashSet<LocationIdx>,
}

impl WorkingSolution {
    pub fn new(model: Arc<RoutingModel>) -> Self {
        let routes = model
            .problem()
            .vehicle_ids()
            .map(WorkingSolutionRoute::empty)
            .collect();
        let unassigned_stops = model.problem().stops().collect();

        WorkingSolution {
            model,
            routes,
            unassigned_stops,
        }
    }

    pub fn model(&self) -> &Arc<RoutingModel> {
        &self.model
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        self.model.problem()
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &WorkingSolutionRoute> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    pub fn non_empty_routes_count(&self) -> usize {
        self.non_empty_routes_iter().count()
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned_stops.is_empty()
    }

    pub fn is_unassigned(&self, location_id: LocationIdx) -> bool {
        self.unassigned_stops.contains(&location_id)
    }

    /// Unassigned stops in ascending index order.
    pub fn unassigned_stops(&self) -> impl Iterator<Item = LocationIdx> + '_ {
        self.problem()
            .stops()
            .filter(|stop| self.unassigned_stops.contains(stop))
    }

    /// Sum of the arc costs of all routes.
    pub fn total_cost(&self) -> Minutes {
        self.routes.iter().map(|route| route.cost()).sum()
    }

    pub fn insert(&mut self, route_id: RouteIdx, position: usize, location_id: LocationIdx) {
        self.routes[route_id].insert(&self.model, position, location_id);
        self.unassigned_stops.remove(&location_id);
    }

    /// Replaces the stop sequence of a route. Stops must be moved between routes,
    /// never dropped.
    pub fn replace_route(&mut self, route_id: RouteIdx, stops: Vec<LocationIdx>) {
        debug_assert!(stops.iter().all(|stop| !self.is_unassigned(*stop)));
        self.routes[route_id].replace_stops(&self.model, stops);
    }
}
