use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::problem::{
    location::LocationIdx,
    release_schedule::ReleaseSchedule,
    time_of_day::{MINUTES_PER_DAY, Minutes},
    vehicle::VehicleIdx,
    vehicle_routing_problem::VehicleRoutingProblem,
};

pub const DEFAULT_SLACK_MAX: Minutes = 60;
pub const DEFAULT_HORIZON: Minutes = MINUTES_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TimeDimensionParams {
    /// Longest a vehicle may wait at a node before travelling to the next one.
    #[serde(default = "default_slack_max")]
    pub slack_max: Minutes,
    /// Upper bound of every time cumul.
    #[serde(default = "default_horizon")]
    pub horizon: Minutes,
}

fn default_slack_max() -> Minutes {
    DEFAULT_SLACK_MAX
}

fn default_horizon() -> Minutes {
    DEFAULT_HORIZON
}

impl Default for TimeDimensionParams {
    fn default() -> Self {
        TimeDimensionParams {
            slack_max: DEFAULT_SLACK_MAX,
            horizon: DEFAULT_HORIZON,
        }
    }
}

/// Closed domain of a time cumul.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CumulRange {
    pub min: Minutes,
    pub max: Minutes,
}

/// Elapsed time along a route.
///
/// For consecutive nodes `i -> j` of a route:
/// `cumul(j) = cumul(i) + travel(i, j) + service(i) + slack(i)` with `0 <= slack(i) <= slack_max`.
/// Stops are bounded by their time window, every cumul by `[0, horizon]` and the route
/// start by the vehicle release time.
#[derive(Debug, Clone)]
pub struct TimeDimension {
    slack_max: Minutes,
    horizon: Minutes,
    start_min: Vec<Minutes>,
}

impl TimeDimension {
    pub fn new(releases: &ReleaseSchedule, params: &TimeDimensionParams) -> Self {
        TimeDimension {
            slack_max: params.slack_max,
            horizon: params.horizon,
            start_min: releases
                .releases()
                .iter()
                .map(|release| release.release)
                .collect(),
        }
    }

    pub fn slack_max(&self) -> Minutes {
        self.slack_max
    }

    pub fn horizon(&self) -> Minutes {
        self.horizon
    }

    /// Service time is charged on the node being left.
    #[inline(always)]
    pub fn transit(
        &self,
        problem: &VehicleRoutingProblem,
        from: LocationIdx,
        to: LocationIdx,
    ) -> Minutes {
        problem.travel_time(from, to) + problem.service_duration(from)
    }

    pub fn start_range(&self, vehicle_id: VehicleIdx) -> CumulRange {
        CumulRange {
            min: self.start_min[vehicle_id.get()].max(0),
            max: self.horizon,
        }
    }

    pub fn node_range(&self, problem: &VehicleRoutingProblem, location_id: LocationIdx) -> CumulRange {
        if location_id == problem.depot() {
            return CumulRange {
                min: 0,
                max: self.horizon,
            };
        }

        let window = problem.location(location_id).time_window();
        CumulRange {
            min: window.open().max(0),
            max: window.close().min(self.horizon),
        }
    }

    #[inline(always)]
    fn propagate(&self, range: CumulRange, transit: Minutes, bounds: CumulRange) -> Option<CumulRange> {
        let next = CumulRange {
            min: (range.min + transit).max(bounds.min),
            max: (range.max + transit + self.slack_max).min(bounds.max),
        };

        (next.min <= next.max).then_some(next)
    }

    /// Domain of `to` when it follows `from` whose domain is `range`. Every prefix of a
    /// feasible route has a non-empty forward domain.
    pub fn extend(
        &self,
        problem: &VehicleRoutingProblem,
        range: CumulRange,
        from: LocationIdx,
        to: LocationIdx,
    ) -> Option<CumulRange> {
        self.propagate(range, self.transit(problem, from, to), self.node_range(problem, to))
    }

    /// Checks that `depot -> stops -> depot` admits a cumul assignment. Propagating the
    /// reachable interval forward is exact on a chain of difference constraints.
    pub fn is_feasible(
        &self,
        problem: &VehicleRoutingProblem,
        vehicle_id: VehicleIdx,
        stops: impl IntoIterator<Item = LocationIdx>,
    ) -> bool {
        let start = self.start_range(vehicle_id);
        if start.min > start.max {
            return false;
        }

        let depot = problem.depot();
        let mut range = start;
        let mut previous = depot;

        for stop in stops.into_iter().chain(std::iter::once(depot)) {
            match self.extend(problem, range, previous, stop) {
                Some(next) => range = next,
                None => return false,
            }
            previous = stop;
        }

        true
    }

    /// Earliest feasible cumul for start, every stop and end, or `None` if the route
    /// violates the dimension.
    ///
    /// Domains are narrowed forward then backward; taking the smallest value of each
    /// narrowed domain is a valid assignment and also the one with the earliest return.
    pub fn schedule(
        &self,
        problem: &VehicleRoutingProblem,
        vehicle_id: VehicleIdx,
        stops: &[LocationIdx],
    ) -> Option<Vec<Minutes>> {
        let depot = problem.depot();
        let nodes: Vec<LocationIdx> = std::iter::once(depot)
            .chain(stops.iter().copied())
            .chain(std::iter::once(depot))
            .collect();

        let transits: Vec<Minutes> = nodes
            .windows(2)
            .map(|arc| self.transit(problem, arc[0], arc[1]))
            .collect();

        let start = self.start_range(vehicle_id);
        if start.min > start.max {
            return None;
        }

        let mut ranges = Vec::with_capacity(nodes.len());
        ranges.push(start);
        for (k, &node) in nodes.iter().enumerate().skip(1) {
            let next = self.propagate(ranges[k - 1], transits[k - 1], self.node_range(problem, node))?;
            ranges.push(next);
        }

        for k in (0..ranges.len() - 1).rev() {
            let next = ranges[k + 1];
            let range = &mut ranges[k];
            range.max = range.max.min(next.max - transits[k]);
            range.min = range.min.max(next.min - transits[k] - self.slack_max);
        }

        let mut cumuls = Vec::with_capacity(nodes.len());
        cumuls.push(ranges[0].min);
        for k in 1..ranges.len() {
            cumuls.push(ranges[k].min.max(cumuls[k - 1] + transits[k - 1]));
        }

        Some(cumuls)
    }
}
