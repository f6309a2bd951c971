use jiff::SignedDuration;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    model::time_dimension::TimeDimensionParams,
    problem::time_of_day::TimeOfDay,
    solver::solver_params::DEFAULT_TIME_BUDGET,
};

/// Parameters of one dispatch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// When the first vehicle starts loading at the dock.
    #[serde(default = "default_loading_start")]
    pub loading_start: TimeOfDay,

    /// Multiplier applied to car travel times to account for trucks. At least 1.
    #[serde(default = "default_slowdown_factor")]
    pub slowdown_factor: f64,

    /// Wall-clock budget of the search.
    #[serde(default = "default_time_budget")]
    pub time_budget: SignedDuration,

    #[serde(default)]
    pub time_dimension: TimeDimensionParams,
}

fn default_loading_start() -> TimeOfDay {
    TimeOfDay::from_minutes(7 * 60 + 30)
}

fn default_slowdown_factor() -> f64 {
    1.5
}

fn default_time_budget() -> SignedDuration {
    DEFAULT_TIME_BUDGET
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            loading_start: default_loading_start(),
            slowdown_factor: default_slowdown_factor(),
            time_budget: default_time_budget(),
            time_dimension: TimeDimensionParams::default(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.slowdown_factor.is_finite() || self.slowdown_factor < 1.0 {
            return Err(ValidationError::InvalidConfig {
                field: "slowdown_factor",
                reason: format!("must be a number >= 1, got {}", self.slowdown_factor),
            });
        }

        if self.time_budget.is_negative() || self.time_budget.is_zero() {
            return Err(ValidationError::InvalidConfig {
                field: "time_budget",
                reason: format!("must be positive, got {:?}", self.time_budget),
            });
        }

        if self.time_dimension.slack_max < 0 {
            return Err(ValidationError::InvalidConfig {
                field: "time_dimension.slack_max",
                reason: format!("must be >= 0, got {}", self.time_dimension.slack_max),
            });
        }

        if self.time_dimension.horizon <= 0 {
            return Err(ValidationError::InvalidConfig {
                field: "time_dimension.horizon",
                reason: format!("must be positive, got {}", self.time_dimension.horizon),
            });
        }

        Ok(())
    }
}
