use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::{
    model::routing_model::RoutingModel,
    problem::{Units, vehicle_routing_problem::VehicleRoutingProblem},
};

/// Reason why no solution was found. Input data is valid; the problem is just too tight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Infeasibility {
    /// The fleet cannot carry the total demand.
    InsufficientCapacity {
        total_demand: Units,
        total_capacity: Units,
    },
    /// A single stop needs more than the largest vehicle carries.
    StopExceedsCapacity {
        stop: String,
        demand: Units,
        max_capacity: Units,
    },
    /// No vehicle can serve the stop within its window, even on a dedicated route.
    UnreachableStop { stop: String },
    /// The search could not place these stops.
    UnroutableStops { stops: Vec<String> },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::InsufficientCapacity {
                total_demand,
                total_capacity,
            } => write!(
                f,
                "total demand {total_demand} exceeds the fleet capacity {total_capacity}"
            ),
            Infeasibility::StopExceedsCapacity {
                stop,
                demand,
                max_capacity,
            } => write!(
                f,
                "stop '{stop}' has a demand of {demand}, the largest vehicle carries {max_capacity}"
            ),
            Infeasibility::UnreachableStop { stop } => {
                write!(f, "stop '{stop}' cannot be served within its time window by any vehicle")
            }
            Infeasibility::UnroutableStops { stops } => {
                write!(f, "no feasible routes found for stops: {}", stops.join(", "))
            }
        }
    }
}

/// Necessary conditions checked before searching. Passing them does not guarantee that
/// a solution exists.
pub fn check_feasibility(model: &RoutingModel) -> Option<Infeasibility> {
    let problem: &VehicleRoutingProblem = model.problem();

    if problem.total_demand() > problem.total_capacity() {
        return Some(Infeasibility::InsufficientCapacity {
            total_demand: problem.total_demand(),
            total_capacity: problem.total_capacity(),
        });
    }

    let max_capacity = problem.max_capacity();
    for stop in problem.stops() {
        let location = problem.location(stop);

        if location.demand() > max_capacity {
            return Some(Infeasibility::StopExceedsCapacity {
                stop: location.name().to_owned(),
                demand: location.demand(),
                max_capacity,
            });
        }

        let reachable = problem
            .vehicle_ids()
            .any(|vehicle_id| model.is_route_feasible(vehicle_id, &[stop]));
        if !reachable {
            return Some(Infeasibility::UnreachableStop {
                stop: location.name().to_owned(),
            });
        }
    }

    debug!("Feasibility pre-checks passed");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, TestStop};

    #[test]
    fn test_insufficient_capacity() {
        let problem = test_utils::create_problem(
            vec![TestStop::with_demand(6), TestStop::with_demand(6)],
            vec![(5, 0), (5, 0)],
            test_utils::constant_matrix(3, 10),
        );
        let model = test_utils::create_model(problem, 450);

        assert_eq!(
            check_feasibility(&model),
            Some(Infeasibility::InsufficientCapacity {
                total_demand: 12,
                total_capacity: 10
            })
        );
    }

    #[test]
    fn test_stop_exceeds_capacity() {
        let problem = test_utils::create_problem(
            vec![TestStop::with_demand(8), TestStop::with_demand(1)],
            vec![(5, 0), (5, 0)],
            test_utils::constant_matrix(3, 10),
        );
        let model = test_utils::create_model(problem, 450);

        assert_eq!(
            check_feasibility(&model),
            Some(Infeasibility::StopExceedsCapacity {
                stop: "S1".to_owned(),
                demand: 8,
                max_capacity: 5
            })
        );
    }

    #[test]
    fn test_window_before_release() {
        let problem = test_utils::create_problem(
            vec![TestStop::window(360, 420)],
            vec![(5, 20)],
            test_utils::constant_matrix(2, 10),
        );
        let model = test_utils::create_model(problem, 450);

        assert_eq!(
            check_feasibility(&model),
            Some(Infeasibility::UnreachableStop {
                stop: "S1".to_owned()
            })
        );
    }

    #[test]
    fn test_feasible() {
        let problem = test_utils::create_problem(
            vec![TestStop::window(480, 600), TestStop::with_demand(3)],
            vec![(5, 20)],
            test_utils::constant_matrix(3, 10),
        );
        let model = test_utils::create_model(problem, 450);

        assert_eq!(check_feasibility(&model), None);
    }
}
