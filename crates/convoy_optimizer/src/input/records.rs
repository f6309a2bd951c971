use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::{Units, time_of_day::Minutes, time_of_day::TimeOfDay};

/// One row of the locations sheet. Row 0 is the depot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Location")]
pub struct LocationRecord {
    pub name: String,
    /// Street address or `lat,lon` coordinate handed to the travel time source.
    pub address: String,
    pub demand: Units,
    pub open: TimeOfDay,
    pub close: TimeOfDay,
    pub service_minutes: Minutes,
}

/// One row of the vehicles sheet. Row order is the loading dock order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Vehicle")]
pub struct VehicleRecord {
    pub id: String,
    pub capacity: Units,
    pub loading_minutes: Minutes,
}
