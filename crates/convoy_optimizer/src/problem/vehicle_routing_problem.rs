use tracing::debug;

use crate::{
    error::{ProblemError, ValidationError},
    input::records::{LocationRecord, VehicleRecord},
    problem::{
        Units,
        location::{Location, LocationBuilder, LocationIdx},
        time_of_day::Minutes,
        time_window::TimeWindow,
        travel_time_matrix::TravelTimeMatrix,
        vehicle::{Vehicle, VehicleBuilder, VehicleIdx},
    },
};

pub const DEPOT: LocationIdx = LocationIdx::new(0);

/// Immutable single-depot CVRPTW instance. The depot is always location 0.
#[derive(Debug)]
pub struct VehicleRoutingProblem {
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    travel_times: TravelTimeMatrix,
    total_demand: Units,
}

impl VehicleRoutingProblem {
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, location_id: LocationIdx) -> &Location {
        &self.locations[location_id]
    }

    /// Every location except the depot, in input order.
    pub fn stops(&self) -> impl Iterator<Item = LocationIdx> + '_ {
        LocationIdx::range(1..self.locations.len())
    }

    pub fn num_stops(&self) -> usize {
        self.locations.len() - 1
    }

    pub fn depot(&self) -> LocationIdx {
        DEPOT
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleIdx> + '_ {
        VehicleIdx::range(0..self.vehicles.len())
    }

    #[inline(always)]
    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> Minutes {
        self.travel_times.travel_time(from, to)
    }

    pub fn travel_times(&self) -> &TravelTimeMatrix {
        &self.travel_times
    }

    #[inline(always)]
    pub fn demand(&self, location_id: LocationIdx) -> Units {
        self.locations[location_id].demand()
    }

    #[inline(always)]
    pub fn service_duration(&self, location_id: LocationIdx) -> Minutes {
        self.locations[location_id].service_duration()
    }

    pub fn total_demand(&self) -> Units {
        self.total_demand
    }

    pub fn total_capacity(&self) -> Units {
        self.vehicles.iter().map(|vehicle| vehicle.capacity()).sum()
    }

    pub fn max_capacity(&self) -> Units {
        self.vehicles
            .iter()
            .map(|vehicle| vehicle.capacity())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    travel_times: Option<TravelTimeMatrix>,
}

impl VehicleRoutingProblemBuilder {
    pub fn add_location(&mut self, location: Location) -> &mut VehicleRoutingProblemBuilder {
        self.locations.push(location);
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles.push(vehicle);
        self
    }

    pub fn set_travel_times(
        &mut self,
        travel_times: TravelTimeMatrix,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.travel_times = Some(travel_times);
        self
    }

    pub fn add_location_records(
        &mut self,
        records: &[LocationRecord],
    ) -> &mut VehicleRoutingProblemBuilder {
        for record in records {
            let mut builder = LocationBuilder::default();
            builder
                .set_name(record.name.clone())
                .set_address(record.address.clone())
                .set_demand(record.demand)
                .set_time_window(TimeWindow::new(record.open, record.close))
                .set_service_duration(record.service_minutes);
            self.add_location(builder.build());
        }
        self
    }

    pub fn add_vehicle_records(
        &mut self,
        records: &[VehicleRecord],
    ) -> &mut VehicleRoutingProblemBuilder {
        for record in records {
            let mut builder = VehicleBuilder::default();
            builder
                .set_vehicle_id(record.id.clone())
                .set_capacity(record.capacity)
                .set_loading_duration(record.loading_minutes);
            self.add_vehicle(builder.build());
        }
        self
    }

    fn validate_locations(locations: &[Location]) -> Result<(), ValidationError> {
        let depot = locations.first().ok_or(ValidationError::NoLocations)?;

        if depot.demand() != 0 {
            return Err(ValidationError::DepotNotFirst {
                name: depot.name().to_owned(),
                reason: "the depot cannot have a demand",
            });
        }

        if depot.service_duration() != 0 {
            return Err(ValidationError::DepotNotFirst {
                name: depot.name().to_owned(),
                reason: "the depot cannot have a service duration",
            });
        }

        for location in locations {
            if location.demand() < 0 {
                return Err(ValidationError::NegativeLocationValue {
                    name: location.name().to_owned(),
                    field: "demand",
                    value: location.demand(),
                });
            }

            if location.service_duration() < 0 {
                return Err(ValidationError::NegativeLocationValue {
                    name: location.name().to_owned(),
                    field: "service duration",
                    value: location.service_duration(),
                });
            }

            let window = location.time_window();
            if window.is_inverted() {
                return Err(ValidationError::InvertedTimeWindow {
                    name: location.name().to_owned(),
                    open: window.open(),
                    close: window.close(),
                });
            }
        }

        Ok(())
    }

    fn validate_vehicles(vehicles: &[Vehicle]) -> Result<(), ValidationError> {
        if vehicles.is_empty() {
            return Err(ValidationError::NoVehicles);
        }

        for vehicle in vehicles {
            if vehicle.capacity() <= 0 {
                return Err(ValidationError::NonPositiveCapacity {
                    id: vehicle.external_id().to_owned(),
                    capacity: vehicle.capacity(),
                });
            }

            if vehicle.loading_duration() < 0 {
                return Err(ValidationError::NegativeLoadingDuration {
                    id: vehicle.external_id().to_owned(),
                    minutes: vehicle.loading_duration(),
                });
            }
        }

        Ok(())
    }

    pub fn build(self) -> Result<VehicleRoutingProblem, ProblemError> {
        Self::validate_locations(&self.locations)?;
        Self::validate_vehicles(&self.vehicles)?;

        let travel_times = self.travel_times.ok_or(ValidationError::MatrixDimension {
            expected: self.locations.len(),
            actual: 0,
        })?;

        if travel_times.num_locations() != self.locations.len() {
            return Err(ValidationError::MatrixDimension {
                expected: self.locations.len(),
                actual: travel_times.num_locations(),
            }
            .into());
        }

        let total_demand = self.locations.iter().map(|location| location.demand()).sum();

        debug!(
            locations = self.locations.len(),
            vehicles = self.vehicles.len(),
            total_demand,
            "Built vehicle routing problem"
        );

        Ok(VehicleRoutingProblem {
            locations: self.locations,
            vehicles: self.vehicles,
            travel_times,
            total_demand,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{problem::time_of_day::TimeOfDay, test_utils};

    fn record(name: &str, demand: Units, service: Minutes) -> LocationRecord {
        LocationRecord {
            name: name.to_owned(),
            address: name.to_owned(),
            demand,
            open: TimeOfDay::parse("08:00").unwrap(),
            close: TimeOfDay::parse("18:00").unwrap(),
            service_minutes: service,
        }
    }

    fn vehicle(id: &str, capacity: Units) -> VehicleRecord {
        VehicleRecord {
            id: id.to_owned(),
            capacity,
            loading_minutes: 10,
        }
    }

    #[test]
    fn test_build_from_records() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&[record("Depot", 0, 0), record("A", 4, 10)])
            .add_vehicle_records(&[vehicle("T1", 10), vehicle("T2", 20)])
            .set_travel_times(TravelTimeMatrix::try_new(vec![vec![0, 7], vec![8, 0]]).unwrap());

        let problem = builder.build().unwrap();

        assert_eq!(problem.num_stops(), 1);
        assert_eq!(problem.total_demand(), 4);
        assert_eq!(problem.total_capacity(), 30);
        assert_eq!(problem.max_capacity(), 20);
        assert_eq!(problem.location(1.into()).name(), "A");
        assert_eq!(problem.travel_time(1.into(), 0.into()), 8);
        assert_eq!(problem.vehicle(1.into()).external_id(), "T2");
    }

    #[test]
    fn test_matrix_dimension_mismatch() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&[record("Depot", 0, 0), record("A", 4, 10)])
            .add_vehicle_records(&[vehicle("T1", 10)])
            .set_travel_times(test_utils::constant_matrix(3, 5));

        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::Validation(ValidationError::MatrixDimension {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_depot_must_come_first() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&[record("A", 4, 10), record("Depot", 0, 0)])
            .add_vehicle_records(&[vehicle("T1", 10)])
            .set_travel_times(test_utils::constant_matrix(2, 5));

        assert!(matches!(
            builder.build().unwrap_err(),
            ProblemError::Validation(ValidationError::DepotNotFirst { .. })
        ));
    }

    #[test]
    fn test_vehicle_capacity_must_be_positive() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&[record("Depot", 0, 0)])
            .add_vehicle_records(&[vehicle("T1", 0)])
            .set_travel_times(test_utils::constant_matrix(1, 0));

        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::Validation(ValidationError::NonPositiveCapacity {
                id: "T1".to_owned(),
                capacity: 0
            })
        );
    }

    #[test]
    fn test_inverted_window() {
        let mut inverted = record("A", 1, 0);
        inverted.open = TimeOfDay::parse("12:00").unwrap();
        inverted.close = TimeOfDay::parse("09:00").unwrap();

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&[record("Depot", 0, 0), inverted])
            .add_vehicle_records(&[vehicle("T1", 10)])
            .set_travel_times(test_utils::constant_matrix(2, 5));

        assert!(matches!(
            builder.build().unwrap_err(),
            ProblemError::Validation(ValidationError::InvertedTimeWindow { .. })
        ));
    }

    #[test]
    fn test_empty_inputs() {
        let builder = VehicleRoutingProblemBuilder::default();
        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::Validation(ValidationError::NoLocations)
        );

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.add_location_records(&[record("Depot", 0, 0)]);
        assert_eq!(
            builder.build().unwrap_err(),
            ProblemError::Validation(ValidationError::NoVehicles)
        );
    }
}
