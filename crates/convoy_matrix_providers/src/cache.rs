use std::{
    hash::{Hash, Hasher},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use fxhash::FxHasher64;
use tracing::debug;

use crate::{
    error::TravelTimeError, travel_time_provider::TravelTimeProvider, travel_times::TravelTimes,
};

pub const CACHE_FOLDER_ENV_VAR: &str = "CONVOY_CACHE_FOLDER";

/// Travel times stored as JSON files keyed by a hash of the addresses and the provider.
pub struct TravelTimesCache {
    folder: PathBuf,
}

impl TravelTimesCache {
    pub fn new(folder: impl Into<PathBuf>) -> Result<Self, TravelTimeError> {
        let folder = folder.into();
        if !folder.is_dir() {
            return Err(TravelTimeError::Cache(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Path {} is not a directory", folder.display()),
            )));
        }

        Ok(TravelTimesCache { folder })
    }

    /// `None` when the environment variable is not set.
    pub fn from_env() -> Result<Option<Self>, TravelTimeError> {
        match std::env::var(CACHE_FOLDER_ENV_VAR) {
            Ok(folder) => Self::new(folder).map(Some),
            Err(_) => Ok(None),
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn file_path(&self, addresses: &[String], provider: &TravelTimeProvider) -> PathBuf {
        let mut hasher = FxHasher64::default();
        addresses.hash(&mut hasher);
        provider.hash(&mut hasher);

        self.folder.join(format!("{:016x}.json", hasher.finish()))
    }

    pub fn store(
        &self,
        addresses: &[String],
        provider: &TravelTimeProvider,
        travel_times: &TravelTimes,
    ) -> Result<(), TravelTimeError> {
        let path = self.file_path(addresses, provider);

        let file = std::fs::File::create(&path)?;
        let mut writer = BufWriter::with_capacity(64 * 1024, file);
        serde_json::to_writer(&mut writer, travel_times)?;
        writer.flush()?;

        debug!(path = %path.display(), "Stored travel times");
        Ok(())
    }

    pub fn load(
        &self,
        addresses: &[String],
        provider: &TravelTimeProvider,
    ) -> Result<Option<TravelTimes>, TravelTimeError> {
        let path = self.file_path(addresses, provider);
        if !path.is_file() {
            return Ok(None);
        }

        let file = std::fs::File::open(&path)?;
        let travel_times: TravelTimes = serde_json::from_reader(file)?;

        debug!(path = %path.display(), "Loaded cached travel times");
        Ok(Some(travel_times))
    }
}
