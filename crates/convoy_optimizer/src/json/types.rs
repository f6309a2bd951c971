use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    config::DispatchConfig,
    error::{ProblemError, ValidationError},
    input::records::{LocationRecord, VehicleRecord},
    problem::{
        time_of_day::Minutes,
        travel_time_matrix::TravelTimeMatrix,
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
};

/// A complete dispatch problem as a single JSON document. The first location is the
/// depot. `travel_times` may be left out and fetched from a provider before building.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "DispatchProblem")]
pub struct JsonDispatchProblem {
    pub locations: Vec<LocationRecord>,
    pub vehicles: Vec<VehicleRecord>,
    /// Square matrix in minutes, `null` for an entry that could not be obtained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_times: Option<Vec<Vec<Option<Minutes>>>>,
    #[serde(default)]
    pub config: DispatchConfig,
}

impl JsonDispatchProblem {
    pub fn addresses(&self) -> Vec<String> {
        self.locations
            .iter()
            .map(|location| location.address.clone())
            .collect()
    }

    #[instrument(skip_all, level = "debug")]
    pub fn build_problem(&self) -> Result<VehicleRoutingProblem, ProblemError> {
        self.config.validate()?;

        let rows = self
            .travel_times
            .clone()
            .ok_or(ValidationError::MatrixDimension {
                expected: self.locations.len(),
                actual: 0,
            })?;
        if rows.len() != self.locations.len() {
            return Err(ValidationError::MatrixDimension {
                expected: self.locations.len(),
                actual: rows.len(),
            }
            .into());
        }

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&self.locations)
            .add_vehicle_records(&self.vehicles)
            .set_travel_times(TravelTimeMatrix::try_from_rows(rows)?);

        builder.build()
    }
}
