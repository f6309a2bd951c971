use serde::{Deserialize, Serialize};

/// Travel times in seconds, one row per origin in input order.
/// A `None` entry is a pair the provider could not route.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TravelTimes {
    pub seconds: Vec<Vec<Option<f64>>>,
}

impl TravelTimes {
    pub fn new(seconds: Vec<Vec<Option<f64>>>) -> Self {
        TravelTimes { seconds }
    }

    pub fn num_locations(&self) -> usize {
        self.seconds.len()
    }

    /// Truck minutes: `floor(seconds / 60 * slowdown_factor) + 1`, diagonal forced to 0.
    pub fn to_minutes(&self, slowdown_factor: f64) -> Vec<Vec<Option<i64>>> {
        self.seconds
            .iter()
            .enumerate()
            .map(|(origin, row)| {
                row.iter()
                    .enumerate()
                    .map(|(destination, seconds)| {
                        if origin == destination {
                            Some(0)
                        } else {
                            seconds.map(|seconds| (seconds / 60.0 * slowdown_factor).floor() as i64 + 1)
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl std::hash::Hash for TravelTimes {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for row in &self.seconds {
            state.write_usize(row.len());
            for seconds in row {
                match seconds {
                    Some(seconds) => state.write_u64(seconds.to_bits()),
                    None => state.write_u8(0),
                }
            }
        }
    }
}
