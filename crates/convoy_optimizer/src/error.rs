use thiserror::Error;

use crate::problem::time_of_day::TimeOfDayError;

/// Input data that cannot form a problem. Always fatal, raised before any solve attempt.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("table '{table}' is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        table: &'static str,
        columns: Vec<String>,
    },

    #[error("table '{table}', row {row}, column '{column}': invalid value '{value}' ({reason})")]
    InvalidValue {
        table: &'static str,
        row: usize,
        column: &'static str,
        value: String,
        reason: String,
    },

    #[error("at least one location (the depot) is required")]
    NoLocations,

    #[error("at least one vehicle is required")]
    NoVehicles,

    #[error("location '{name}' (row 0) must be the depot: {reason}")]
    DepotNotFirst { name: String, reason: &'static str },

    #[error("location '{name}' has a time window closing at {close} before it opens at {open}")]
    InvertedTimeWindow { name: String, open: i64, close: i64 },

    #[error("location '{name}' has a negative {field}: {value}")]
    NegativeLocationValue {
        name: String,
        field: &'static str,
        value: i64,
    },

    #[error("vehicle '{id}' must have a positive capacity, got {capacity}")]
    NonPositiveCapacity { id: String, capacity: i64 },

    #[error("vehicle '{id}' has a negative loading duration: {minutes}")]
    NegativeLoadingDuration { id: String, minutes: i64 },

    #[error("travel time matrix has {actual} rows but there are {expected} locations")]
    MatrixDimension { expected: usize, actual: usize },

    #[error("travel time matrix row {row} has {actual} entries, expected {expected}")]
    MatrixRowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("travel time from location {index} to itself must be 0, got {value}")]
    MatrixDiagonal { index: usize, value: i64 },

    #[error("travel time from location {from} to {to} is negative: {value}")]
    NegativeTravelTime { from: usize, to: usize, value: i64 },

    #[error("configuration '{field}' is invalid: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    #[error(transparent)]
    TimeOfDay(#[from] TimeOfDayError),
}

/// A travel-time entry could not be obtained; the whole matrix is unusable.
#[derive(Debug, Error, PartialEq)]
#[error("travel time from location {origin} to location {destination} is missing")]
pub struct MatrixIncompleteError {
    pub origin: usize,
    pub destination: usize,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProblemError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    MatrixIncomplete(#[from] MatrixIncompleteError),
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to build the search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("route of vehicle {vehicle} violates its constraints")]
    InconsistentRoute { vehicle: String },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Problem(#[from] ProblemError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

impl From<ValidationError> for DispatchError {
    fn from(error: ValidationError) -> Self {
        DispatchError::Problem(error.into())
    }
}
