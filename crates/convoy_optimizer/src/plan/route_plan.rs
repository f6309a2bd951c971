use serde::Serialize;
use tracing::info;

use crate::{
    problem::{
        Units, release_schedule::ReleaseSchedule, time_of_day::{Minutes, TimeOfDay},
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::assignment::{AssignedRoute, Assignment},
};

pub const PLAN_HEADER: [&str; 7] = [
    "vehicle_id",
    "sequence",
    "location_name",
    "load_start_time",
    "arrival_time",
    "departure_time",
    "cumulative_load",
];

/// One row of the dispatch plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitEvent {
    pub vehicle_id: String,
    pub sequence: usize,
    pub location_name: String,
    /// Only set on the depot departure.
    pub load_start_time: Option<TimeOfDay>,
    /// Empty on the depot departure.
    pub arrival_time: Option<TimeOfDay>,
    /// Empty on the depot return.
    pub departure_time: Option<TimeOfDay>,
    pub cumulative_load: Units,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlanRecord {
    Visit(VisitEvent),
    /// Blank row between two dispatched vehicles.
    Separator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub vehicle_id: String,
    pub capacity: Units,
    pub stops: usize,
    pub total_load: Units,
    pub departure_time: TimeOfDay,
    pub return_time: TimeOfDay,
    /// Minutes between depot departure and return.
    pub total_time: Minutes,
}

/// The dispatch plan derived from an assignment: ordered visit records for every used
/// vehicle, and the vehicles that are not required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    records: Vec<PlanRecord>,
    routes: Vec<RouteSummary>,
    not_required: Vec<String>,
}

impl RoutePlan {
    /// Pure function of its inputs, extracting twice yields the same plan.
    pub fn extract(
        problem: &VehicleRoutingProblem,
        releases: &ReleaseSchedule,
        assignment: &Assignment,
    ) -> Self {
        let mut records = Vec::new();
        let mut routes = Vec::new();
        let mut not_required = Vec::new();

        for route in assignment.routes() {
            let vehicle = problem.vehicle(route.vehicle_id);

            if !route.is_used() {
                not_required.push(vehicle.external_id().to_owned());
                continue;
            }

            if !routes.is_empty() {
                records.push(PlanRecord::Separator);
            }

            records.extend(
                Self::route_events(problem, releases, route)
                    .into_iter()
                    .map(PlanRecord::Visit),
            );

            routes.push(RouteSummary {
                vehicle_id: vehicle.external_id().to_owned(),
                capacity: vehicle.capacity(),
                stops: route.stops().len(),
                total_load: route.total_load(),
                departure_time: TimeOfDay::from_minutes(route.start().time),
                return_time: TimeOfDay::from_minutes(route.end().time),
                total_time: route.duration(),
            });
        }

        RoutePlan {
            records,
            routes,
            not_required,
        }
    }

    fn route_events(
        problem: &VehicleRoutingProblem,
        releases: &ReleaseSchedule,
        route: &AssignedRoute,
    ) -> Vec<VisitEvent> {
        let vehicle_id = problem.vehicle(route.vehicle_id).external_id();
        let depot_name = problem.location(problem.depot()).name();
        let mut events = Vec::with_capacity(route.visits.len());

        events.push(VisitEvent {
            vehicle_id: vehicle_id.to_owned(),
            sequence: 0,
            location_name: depot_name.to_owned(),
            load_start_time: Some(TimeOfDay::from_minutes(
                releases.load_start(route.vehicle_id),
            )),
            arrival_time: None,
            departure_time: Some(TimeOfDay::from_minutes(route.start().time)),
            cumulative_load: 0,
        });

        let mut load = 0;
        for (index, visit) in route.stops().iter().enumerate() {
            let location = problem.location(visit.location_id);
            load += location.demand();

            events.push(VisitEvent {
                vehicle_id: vehicle_id.to_owned(),
                sequence: index + 1,
                location_name: location.name().to_owned(),
                load_start_time: None,
                arrival_time: Some(TimeOfDay::from_minutes(visit.time)),
                departure_time: Some(TimeOfDay::from_minutes(
                    visit.time + location.service_duration(),
                )),
                cumulative_load: load,
            });
        }

        events.push(VisitEvent {
            vehicle_id: vehicle_id.to_owned(),
            sequence: route.stops().len() + 1,
            location_name: depot_name.to_owned(),
            load_start_time: None,
            arrival_time: Some(TimeOfDay::from_minutes(route.end().time)),
            departure_time: None,
            cumulative_load: load,
        });

        events
    }

    pub fn records(&self) -> &[PlanRecord] {
        &self.records
    }

    pub fn events(&self) -> impl Iterator<Item = &VisitEvent> {
        self.records.iter().filter_map(|record| match record {
            PlanRecord::Visit(event) => Some(event),
            PlanRecord::Separator => None,
        })
    }

    pub fn routes(&self) -> &[RouteSummary] {
        &self.routes
    }

    pub fn not_required(&self) -> &[String] {
        &self.not_required
    }

    pub fn has_routes(&self) -> bool {
        !self.routes.is_empty()
    }

    /// Export table: header first, one row per event, a blank row per separator.
    pub fn rows(&self) -> Vec<[String; 7]> {
        let header = PLAN_HEADER.map(str::to_owned);
        let time = |value: Option<TimeOfDay>| value.map(|time| time.to_string()).unwrap_or_default();

        std::iter::once(header)
            .chain(self.records.iter().map(|record| match record {
                PlanRecord::Visit(event) => [
                    event.vehicle_id.clone(),
                    event.sequence.to_string(),
                    event.location_name.clone(),
                    time(event.load_start_time),
                    time(event.arrival_time),
                    time(event.departure_time),
                    event.cumulative_load.to_string(),
                ],
                PlanRecord::Separator => Default::default(),
            }))
            .collect()
    }

    pub fn log_summary(&self) {
        for event in self.events() {
            info!(
                vehicle = %event.vehicle_id,
                sequence = event.sequence,
                location = %event.location_name,
                arrival = %OptionalTime(event.arrival_time),
                departure = %OptionalTime(event.departure_time),
                load = event.cumulative_load,
                "Visit"
            );
        }

        for route in &self.routes {
            info!(
                vehicle = %route.vehicle_id,
                capacity = route.capacity,
                stops = route.stops,
                total_load = route.total_load,
                departure = %route.departure_time,
                return_time = %route.return_time,
                total_time = route.total_time,
                "Route"
            );
        }

        for vehicle in &self.not_required {
            info!(%vehicle, "Vehicle not required, it will not be dispatched");
        }
    }
}

struct OptionalTime(Option<TimeOfDay>);

impl std::fmt::Display for OptionalTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(time) => write!(f, "{time}"),
            None => f.write_str("-"),
        }
    }
}
