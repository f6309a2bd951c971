use futures::future::try_join_all;
use tracing::{info, instrument};

use crate::{
    as_the_crow_flies::as_the_crow_flies_travel_times,
    distance_matrix_api::{DistanceMatrixClient, TravelMode},
    error::TravelTimeError,
    travel_time_provider::TravelTimeProvider,
    travel_times::TravelTimes,
};

pub const API_KEY_ENV_VAR: &str = "CONVOY_MAPS_API_KEY";

pub struct TravelTimeClient {
    distance_matrix_client: Option<DistanceMatrixClient>,
}

impl TravelTimeClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            distance_matrix_client: api_key.map(DistanceMatrixClient::new),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV_VAR).ok())
    }

    #[instrument(skip_all, fields(locations = addresses.len()))]
    pub async fn fetch(
        &self,
        addresses: &[String],
        provider: TravelTimeProvider,
    ) -> Result<TravelTimes, TravelTimeError> {
        match provider {
            TravelTimeProvider::DistanceMatrixApi { mode } => {
                self.fetch_distance_matrix(addresses, mode).await
            }
            TravelTimeProvider::AsTheCrowFlies { speed_kmh } => {
                as_the_crow_flies_travel_times(addresses, speed_kmh)
            }
            TravelTimeProvider::Custom { travel_times } => Ok(travel_times),
        }
    }

    /// One request per origin, all in flight together. Rows keep the input order.
    async fn fetch_distance_matrix(
        &self,
        addresses: &[String],
        mode: TravelMode,
    ) -> Result<TravelTimes, TravelTimeError> {
        let client = self
            .distance_matrix_client
            .as_ref()
            .ok_or(TravelTimeError::MissingApiKey(API_KEY_ENV_VAR))?;

        info!(%mode, "Fetching travel times from the Distance Matrix API");
        let rows = try_join_all(addresses.iter().enumerate().map(|(index, origin)| async move {
            info!(
                "Computing travel times from origin {}/{}: {}",
                index + 1,
                addresses.len(),
                origin
            );
            client.fetch_row(origin, addresses, mode).await
        }))
        .await?;

        info!("Travel times fetched");
        Ok(TravelTimes::new(rows))
    }
}
