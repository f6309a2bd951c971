use serde::{Deserialize, Serialize};

use crate::{distance_matrix_api::TravelMode, travel_times::TravelTimes};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TravelTimeProvider {
    /// Google Distance Matrix API, one request per origin.
    DistanceMatrixApi {
        #[serde(default)]
        mode: TravelMode,
    },
    /// Haversine distance at a constant speed, addresses must be `lat,lng`.
    AsTheCrowFlies { speed_kmh: f64 },
    Custom { travel_times: TravelTimes },
}

impl Default for TravelTimeProvider {
    fn default() -> Self {
        TravelTimeProvider::DistanceMatrixApi {
            mode: TravelMode::default(),
        }
    }
}

impl std::hash::Hash for TravelTimeProvider {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            TravelTimeProvider::DistanceMatrixApi { mode } => {
                state.write_u8(0);
                mode.hash(state);
            }
            TravelTimeProvider::AsTheCrowFlies { speed_kmh } => {
                state.write_u8(1);
                state.write_u64(speed_kmh.to_bits());
            }
            TravelTimeProvider::Custom { travel_times } => {
                state.write_u8(2);
                travel_times.hash(state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider() {
        let provider: TravelTimeProvider =
            serde_json::from_str(r#"{ "type": "as_the_crow_flies", "speed_kmh": 40.0 }"#).unwrap();
        assert!(matches!(
            provider,
            TravelTimeProvider::AsTheCrowFlies { speed_kmh } if speed_kmh == 40.0
        ));

        let provider: TravelTimeProvider =
            serde_json::from_str(r#"{ "type": "distance_matrix_api" }"#).unwrap();
        assert!(matches!(
            provider,
            TravelTimeProvider::DistanceMatrixApi {
                mode: TravelMode::Driving
            }
        ));
    }
}
