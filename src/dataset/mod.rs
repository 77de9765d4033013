use std::{
    fmt::Display,
    fs::File,
    io::{self, BufReader, Read},
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::{DateTime, Local, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

mod config;
pub mod models;
pub use config::*;
use models::*;

use crate::{
    network::{Commune, Edge, ServiceClass, Station, StationIndex},
    shared::geo::{Coordinate, Distance},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Data source {path} is unreachable: {source}")]
    Configuration {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed data in {source_name}: {message}")]
    DataFormat {
        source_name: String,
        message: String,
    },
}

impl Error {
    fn format(source_name: &str, message: impl Into<String>) -> Self {
        Self::DataFormat {
            source_name: source_name.to_string(),
            message: message.into(),
        }
    }
}

/// The two supported connection dataset shapes. Both produce the same
/// normalized [`Edge`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// `[{ depart, arrivee }, ...]`, one entry per direction.
    Legacy(PathBuf),
    /// `{ metadata, liaisons: [...] }` with travel-time statistics.
    Enhanced(PathBuf),
}

impl DataSource {
    pub fn path(&self) -> &Path {
        match self {
            DataSource::Legacy(path) | DataSource::Enhanced(path) => path,
        }
    }
}

impl Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Legacy(path) => write!(f, "legacy connections at {}", path.display()),
            DataSource::Enhanced(path) => write!(f, "enhanced connections at {}", path.display()),
        }
    }
}

/// Loads the station dataset, indexing every alias code.
///
/// Stations without any code cannot be linked and are skipped. Any other
/// record missing a required field fails the whole load.
pub fn load_stations<P: AsRef<Path>>(path: P) -> Result<StationIndex, self::Error> {
    let path = path.as_ref();
    debug!("Loading stations...");
    let now = Instant::now();
    let stations = parse_stations(open(path)?, &path.display().to_string())?;
    debug!(
        "Loading {} stations ({} codes) took {:?}",
        stations.len(),
        stations.code_count(),
        now.elapsed()
    );
    Ok(stations)
}

pub fn parse_stations<R: Read>(reader: R, source_name: &str) -> Result<StationIndex, self::Error> {
    let records = parse_array(reader, source_name)?;
    let mut stations = Vec::with_capacity(records.len());
    for (i, value) in records.into_iter().enumerate() {
        let raw = serde_json::from_value::<RawStation>(value)
            .map_err(|err| Error::format(source_name, format!("station #{i}: {err}")))?;
        match into_station(raw) {
            Ok(Some(station)) => stations.push(station),
            Ok(None) => warn!("Skipping station #{i} in {source_name}: no station code"),
            Err(message) => {
                return Err(Error::format(source_name, format!("station #{i}: {message}")));
            }
        }
    }
    Ok(StationIndex::new(stations))
}

fn into_station(raw: RawStation) -> Result<Option<Station>, String> {
    if raw.display_name.trim().is_empty() {
        return Err("empty display name".into());
    }
    let codes: Vec<String> = raw
        .codes
        .iter()
        .map(|code| code.to_string())
        .filter(|code| !code.is_empty())
        .collect();
    if codes.is_empty() {
        return Ok(None);
    }
    let commune = Commune::new(raw.commune.id.to_string(), raw.commune.name.trim());
    let coordinate = Coordinate::new(raw.position.lat, raw.position.lon);
    Ok(Some(Station::new(
        codes,
        raw.display_name.trim(),
        commune,
        coordinate,
    )))
}

/// Loads the connection dataset.
///
/// Malformed records are skipped with a warning, only a source that cannot
/// be parsed at all fails.
pub fn load_connections(source: &DataSource) -> Result<Vec<Edge>, self::Error> {
    let path = source.path();
    let source_name = path.display().to_string();
    debug!("Loading {source}...");
    let now = Instant::now();
    let reader = open(path)?;
    let edges = match source {
        DataSource::Legacy(_) => parse_legacy_connections(reader, &source_name)?,
        DataSource::Enhanced(_) => parse_enhanced_connections(reader, &source_name)?,
    };
    debug!("Loading {} connections took {:?}", edges.len(), now.elapsed());
    Ok(edges)
}

pub fn parse_legacy_connections<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<Edge>, self::Error> {
    let records = parse_array(reader, source_name)?;
    collect_records(records, source_name, |link: LegacyLink| {
        Edge::new(link.depart.to_string(), link.arrivee.to_string())
    })
}

pub fn parse_enhanced_connections<R: Read>(
    reader: R,
    source_name: &str,
) -> Result<Vec<Edge>, self::Error> {
    let records = match parse_json(reader, source_name)? {
        Value::Array(records) => records,
        Value::Object(mut object) => {
            if let Some(metadata) = object.remove("metadata") {
                match serde_json::from_value::<DatasetMetadata>(metadata) {
                    Ok(metadata) => log_metadata(&metadata, source_name),
                    Err(err) => warn!("Ignoring unreadable metadata in {source_name}: {err}"),
                }
            }
            match object.remove("liaisons") {
                Some(Value::Array(records)) => records,
                _ => {
                    return Err(Error::format(
                        source_name,
                        "expected a 'liaisons' array of connections",
                    ));
                }
            }
        }
        _ => {
            return Err(Error::format(
                source_name,
                "expected an object or an array of connections",
            ));
        }
    };
    collect_records(records, source_name, into_edge)
}

fn into_edge(link: EnhancedLink) -> Edge {
    let label = link.type_train.as_deref().unwrap_or("Autre");
    Edge::new(link.depart.to_string(), link.arrivee.to_string())
        .with_mean_minutes(link.temps_moyen_min.unwrap_or_default())
        .with_min_max_minutes(link.temps_min_min, link.temps_max_min)
        .with_daily_trains(link.nb_trains.unwrap_or_default())
        .with_distance(Distance::from_kilometers(
            link.distance_km.unwrap_or_default(),
        ))
        .with_service_class(ServiceClass::from_label(label))
        .with_breakdown(link.types_details)
}

/// Deserializes every record, skipping the ones that do not fit `T`.
fn collect_records<T, F>(
    records: Vec<Value>,
    source_name: &str,
    into_edge: F,
) -> Result<Vec<Edge>, self::Error>
where
    T: DeserializeOwned,
    F: Fn(T) -> Edge,
{
    let total = records.len();
    let edges: Vec<Edge> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(into_edge(record)),
            Err(err) => {
                warn!("Skipping connection #{i} in {source_name}: {err}");
                None
            }
        })
        .collect();

    if total > 0 && edges.is_empty() {
        return Err(Error::format(
            source_name,
            format!("none of the {total} connections could be read"),
        ));
    }
    if edges.len() < total {
        warn!(
            "Skipped {} of {total} connections in {source_name}",
            total - edges.len()
        );
    }
    Ok(edges)
}

fn log_metadata(metadata: &DatasetMetadata, source_name: &str) {
    match metadata.generated_at.as_deref().and_then(parse_timestamp) {
        Some(generated_at) => {
            let age = Local::now().naive_local() - generated_at;
            info!(
                "{source_name} was generated at {generated_at} ({} days ago)",
                age.num_days()
            );
        }
        None => debug!("{source_name} carries no generation date"),
    }
    if let Some(source_file) = &metadata.source_file {
        debug!("{source_name} was derived from {source_file}");
    }
    match (metadata.total_liaisons, metadata.unique_gares) {
        (Some(total), Some(stations)) => {
            debug!("{source_name} announces {total} connections between {stations} stations")
        }
        (Some(total), None) => debug!("{source_name} announces {total} connections"),
        (None, Some(stations)) => debug!("{source_name} announces {stations} stations"),
        (None, None) => {}
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|date| date.naive_local())
        })
}

fn open(path: &Path) -> Result<BufReader<File>, self::Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Configuration {
            path: path.to_path_buf(),
            source,
        })
}

fn parse_json<R: Read>(reader: R, source_name: &str) -> Result<Value, self::Error> {
    serde_json::from_reader(reader).map_err(|err| Error::format(source_name, err.to_string()))
}

fn parse_array<R: Read>(reader: R, source_name: &str) -> Result<Vec<Value>, self::Error> {
    match parse_json(reader, source_name)? {
        Value::Array(records) => Ok(records),
        _ => Err(Error::format(source_name, "expected an array of records")),
    }
}

#[test]
fn timestamps_from_the_generator() {
    assert!(parse_timestamp("2025-01-15T10:23:45.123456").is_some());
    assert!(parse_timestamp("2025-01-15T10:23:45").is_some());
    assert!(parse_timestamp("2025-01-15T10:23:45+01:00").is_some());
    assert!(parse_timestamp("yesterday").is_none());
}
