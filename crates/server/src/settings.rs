use std::{env, path::PathBuf};

use thor_routing::{dataset::Config, network::WeightMode};

const DEFAULT_PORT: u16 = 3000;

pub struct Settings {
    pub config: Config,
    pub port: u16,
}

impl Settings {
    /// Reads the settings from the command line and the `THOR_*` variables.
    ///
    /// The first argument is an optional data directory holding the three
    /// datasets under their usual names. Variables override single files.
    pub fn from_env<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let mut config = Config::default();
        if let Some(dir) = args.next().map(PathBuf::from) {
            config = config
                .with_stations_path(dir.join("dataset_gares.json"))
                .with_connections_path(dir.join("dataset_liaisons.json"))
                .with_enhanced_connections_path(dir.join("dataset_liaisons_enhanced.json"));
        }
        if let Ok(path) = env::var("THOR_STATIONS") {
            config = config.with_stations_path(path);
        }
        if let Ok(path) = env::var("THOR_CONNECTIONS") {
            config = config.with_connections_path(path);
        }
        if let Ok(path) = env::var("THOR_ENHANCED_CONNECTIONS") {
            config = config.with_enhanced_connections_path(path);
        }
        if let Ok(mode) = env::var("THOR_MODE") {
            config = config.with_mode(mode.parse::<WeightMode>()?);
        }

        let port = match env::var("THOR_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|err| format!("invalid THOR_PORT '{port}': {err}"))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { config, port })
    }
}
