use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use convoy_matrix_providers::{
    cache::TravelTimesCache, distance_matrix_api::TravelMode,
    travel_time_client::TravelTimeClient, travel_time_provider::TravelTimeProvider,
};
use convoy_optimizer::problem::time_of_day::Minutes;
use tracing::{info, warn};

use crate::sheets;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProviderArg {
    /// Google Distance Matrix API (needs CONVOY_MAPS_API_KEY)
    Api,
    /// Straight line distance, addresses must be "lat,lng"
    Crow,
}

#[derive(Args)]
pub struct MatrixArgs {
    /// Square CSV of travel minutes, first row and column are location names
    #[arg(long)]
    matrix: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ProviderArg::Api)]
    provider: ProviderArg,

    /// Speed used by the straight line provider
    #[arg(long, default_value_t = 30.0)]
    speed_kmh: f64,
}

impl MatrixArgs {
    fn provider(&self) -> TravelTimeProvider {
        match self.provider {
            ProviderArg::Api => TravelTimeProvider::DistanceMatrixApi {
                mode: TravelMode::Driving,
            },
            ProviderArg::Crow => TravelTimeProvider::AsTheCrowFlies {
                speed_kmh: self.speed_kmh,
            },
        }
    }
}

/// Travel minutes for `addresses`, either read from `--matrix` or fetched and slowed down.
pub async fn travel_minutes(
    args: &MatrixArgs,
    addresses: &[String],
    slowdown_factor: f64,
) -> Result<Vec<Vec<Option<Minutes>>>, anyhow::Error> {
    if let Some(path) = &args.matrix {
        info!("Reading travel times from {}", path.display());
        return read_matrix_file(path);
    }

    let provider = args.provider();
    let cache = TravelTimesCache::from_env()?;

    let cached = match &cache {
        Some(cache) => cache.load(addresses, &provider)?,
        None => None,
    };

    let travel_times = match cached {
        Some(travel_times) => {
            info!("Using cached travel times");
            travel_times
        }
        None => {
            let travel_times = TravelTimeClient::from_env()
                .fetch(addresses, provider.clone())
                .await?;
            if let Some(cache) = &cache {
                if let Err(err) = cache.store(addresses, &provider, &travel_times) {
                    warn!(%err, "Could not cache travel times");
                }
            }
            travel_times
        }
    };

    info!(slowdown_factor, "Converting travel times to truck minutes");
    Ok(travel_times.to_minutes(slowdown_factor))
}

fn read_matrix_file(path: &Path) -> Result<Vec<Vec<Option<Minutes>>>, anyhow::Error> {
    let table = sheets::read_table_file(path)?;
    parse_matrix(&table.rows)
}

/// Skips the leading name column; an empty cell is a missing entry.
fn parse_matrix(rows: &[Vec<String>]) -> Result<Vec<Vec<Option<Minutes>>>, anyhow::Error> {
    rows.iter()
        .enumerate()
        .map(|(origin, row)| {
            row.iter()
                .skip(1)
                .map(|cell| {
                    if cell.is_empty() {
                        Ok(None)
                    } else {
                        cell.parse::<Minutes>().map(Some).map_err(|err| {
                            anyhow::anyhow!("Invalid travel time '{cell}' in row {origin}: {err}")
                        })
                    }
                })
                .collect()
        })
        .collect()
}
