use crate::{
    model::routing_model::RoutingModel,
    problem::{Units, location::LocationIdx, time_of_day::Minutes, vehicle::VehicleIdx},
};

/// Ordered stops served by one vehicle, depots excluded. Load and cost are cached
/// and refreshed on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSolutionRoute {
    vehicle_id: VehicleIdx,
    stops: Vec<LocationIdx>,
    load: Units,
    cost: Minutes,
}

impl WorkingSolutionRoute {
    pub fn empty(vehicle_id: VehicleIdx) -> Self {
        WorkingSolutionRoute {
            vehicle_id,
            stops: Vec::new(),
            load: 0,
            cost: 0,
        }
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn stops(&self) -> &[LocationIdx] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn load(&self) -> Units {
        self.load
    }

    pub fn cost(&self) -> Minutes {
        self.cost
    }

    #[inline]
    pub fn location_at(&self, position: usize, depot: LocationIdx) -> LocationIdx {
        self.stops.get(position).copied().unwrap_or(depot)
    }

    /// Node visited before `position`, the depot for the first stop.
    #[inline]
    pub fn previous_location(&self, position: usize, depot: LocationIdx) -> LocationIdx {
        if position == 0 {
            depot
        } else {
            self.stops[position - 1]
        }
    }

    /// Arcs `depot -> stops -> depot`, nothing for an empty route.
    pub fn arcs(&self, depot: LocationIdx) -> impl Iterator<Item = (LocationIdx, LocationIdx)> + '_ {
        let nodes = if self.stops.is_empty() {
            None
        } else {
            Some(
                std::iter::once(depot)
                    .chain(self.stops.iter().copied())
                    .chain(std::iter::once(depot)),
            )
        };

        let mut previous: Option<LocationIdx> = None;
        nodes.into_iter().flatten().filter_map(move |node| {
            let arc = previous.map(|from| (from, node));
            previous = Some(node);
            arc
        })
    }

    pub(super) fn insert(&mut self, model: &RoutingModel, position: usize, location_id: LocationIdx) {
        self.stops.insert(position, location_id);
        self.refresh(model);
    }

    pub(super) fn replace_stops(&mut self, model: &RoutingModel, stops: Vec<LocationIdx>) {
        self.stops = stops;
        self.refresh(model);
    }

    fn refresh(&mut self, model: &RoutingModel) {
        self.load = model.route_load(&self.stops);
        self.cost = model.route_cost(&self.stops);
    }
}
