use std::{io, path::PathBuf};

use tracing::warn;

use crate::{
    dataset::{DataSource, Error},
    network::WeightMode,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub stations_path: PathBuf,
    /// Symmetric pair list, weighted by geography.
    pub connections_path: PathBuf,
    /// Directed pairs with travel-time statistics.
    pub enhanced_connections_path: PathBuf,
    pub mode: WeightMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stations_path: "data/train_station/dataset_gares.json".into(),
            connections_path: "data/train_station/dataset_liaisons.json".into(),
            enhanced_connections_path: "data/train_station/dataset_liaisons_enhanced.json".into(),
            mode: WeightMode::Time,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_stations_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stations_path = path.into();
        self
    }

    pub fn with_connections_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.connections_path = path.into();
        self
    }

    pub fn with_enhanced_connections_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.enhanced_connections_path = path.into();
        self
    }

    pub fn with_mode(mut self, mode: WeightMode) -> Self {
        self.mode = mode;
        self
    }

    /// Picks the connection dataset to load and the weighting it implies.
    ///
    /// Time mode prefers the enhanced dataset and falls back to the legacy one
    /// (weighted by distance) when it is missing. Distance mode prefers the
    /// legacy dataset.
    pub fn data_source(&self) -> Result<(DataSource, WeightMode), Error> {
        let enhanced = self.enhanced_connections_path.is_file();
        let legacy = self.connections_path.is_file();
        match (self.mode, enhanced, legacy) {
            (WeightMode::Time, true, _) => Ok((
                DataSource::Enhanced(self.enhanced_connections_path.clone()),
                WeightMode::Time,
            )),
            (WeightMode::Time, false, true) => {
                warn!(
                    "No enhanced connections at {}, falling back to distances from {}",
                    self.enhanced_connections_path.display(),
                    self.connections_path.display()
                );
                Ok((
                    DataSource::Legacy(self.connections_path.clone()),
                    WeightMode::Distance,
                ))
            }
            (WeightMode::Distance, _, true) => Ok((
                DataSource::Legacy(self.connections_path.clone()),
                WeightMode::Distance,
            )),
            (WeightMode::Distance, true, false) => Ok((
                DataSource::Enhanced(self.enhanced_connections_path.clone()),
                WeightMode::Distance,
            )),
            (_, false, false) => Err(Error::Configuration {
                path: self.enhanced_connections_path.clone(),
                source: io::Error::new(
                    io::ErrorKind::NotFound,
                    format!(
                        "no connection dataset found (also looked at {})",
                        self.connections_path.display()
                    ),
                ),
            }),
        }
    }
}
