use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    network::{Network, ServiceClass, WeightMode},
    router::ShortestPath,
    shared::geo::{Distance, round_to},
};

/// Why a query produced no route. Never raised, only reported in
/// [`RouteMetadata::error`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteError {
    #[error("Origin could not be resolved to a station")]
    OriginNotFound,
    #[error("Destination could not be resolved to a station")]
    DestinationNotFound,
    #[error("No path between the resolved stations")]
    NoPath,
}

/// The answer to a single query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Origin text as given by the caller.
    pub origin: String,
    pub destination: String,
    /// Display names of the stations along the path, empty on failure.
    pub steps: Vec<String>,
    pub total_distance_km: f64,
    /// Sum of the mean travel times, service penalties excluded.
    pub total_time_min: f64,
    pub metadata: RouteMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteMetadata {
    pub origin_code: Option<String>,
    pub destination_code: Option<String>,
    pub path_codes: Vec<String>,
    pub num_stations: usize,
    pub mode: WeightMode,
    pub segments: Vec<Segment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RouteError>,
    /// Human readable explanation of `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// One hop of a route.
///
/// Hops without a matching connection record (possible in distance mode)
/// only carry the great-circle distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: String,
    pub to: String,
    pub from_code: String,
    pub to_code: String,
    pub time_min: Option<f64>,
    pub distance_km: f64,
    pub daily_trains: Option<u32>,
    pub service_class: Option<ServiceClass>,
    pub service_class_breakdown: BTreeMap<String, u32>,
}

impl Route {
    /// A route without steps reporting why it could not be found.
    pub fn failure(
        origin: &str,
        destination: &str,
        mode: WeightMode,
        error: RouteError,
        origin_code: Option<&str>,
        destination_code: Option<&str>,
    ) -> Self {
        let message = match error {
            RouteError::OriginNotFound => format!("Origin '{origin}' matches no station"),
            RouteError::DestinationNotFound => {
                format!("Destination '{destination}' matches no station")
            }
            RouteError::NoPath => format!("No path from '{origin}' to '{destination}'"),
        };
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            steps: vec![],
            total_distance_km: 0.0,
            total_time_min: 0.0,
            metadata: RouteMetadata {
                origin_code: origin_code.map(str::to_string),
                destination_code: destination_code.map(str::to_string),
                path_codes: vec![],
                num_stations: 0,
                mode,
                segments: vec![],
                error: Some(error),
                message: Some(message),
            },
        }
    }

    pub fn is_found(&self) -> bool {
        self.metadata.error.is_none()
    }

    pub fn error(&self) -> Option<RouteError> {
        self.metadata.error
    }
}

/// Builds the route of a path found in the network's graph.
///
/// Totals use the raw connection statistics: the penalized search weights
/// never leak into the output.
pub fn compose(path: &ShortestPath, network: &Network, origin: &str, destination: &str) -> Route {
    let stations = network.stations();
    let name_of = |code: &str| {
        stations
            .by_code(code)
            .map(|station| station.name.to_string())
            .unwrap_or_else(|| code.to_string())
    };

    let steps: Vec<String> = path.codes.iter().map(|code| name_of(code.as_ref())).collect();
    let segments: Vec<Segment> = path
        .codes
        .windows(2)
        .map(|pair| {
            let (from, to) = (pair[0].as_ref(), pair[1].as_ref());
            let edge = network.edge(from, to);
            let distance = network.hop_distance(from, to).unwrap_or_default();
            Segment {
                from: name_of(from),
                to: name_of(to),
                from_code: from.to_string(),
                to_code: to.to_string(),
                time_min: edge.and_then(|edge| edge.mean_minutes),
                distance_km: distance.as_kilometers(),
                daily_trains: edge.and_then(|edge| edge.daily_trains),
                service_class: edge.and_then(|edge| edge.service_class),
                service_class_breakdown: edge
                    .map(|edge| {
                        edge.breakdown
                            .iter()
                            .map(|(label, count)| (label.to_string(), *count))
                            .collect()
                    })
                    .unwrap_or_default(),
            }
        })
        .collect();

    // `Sum for f64` starts at -0.0, which would leak into the JSON.
    let total_time = segments
        .iter()
        .filter_map(|segment| segment.time_min)
        .fold(0.0, |acc, minutes| acc + minutes);
    let total_distance: Distance = segments
        .iter()
        .map(|segment| Distance::from_kilometers(segment.distance_km))
        .sum();
    let segments = segments
        .into_iter()
        .map(|segment| Segment {
            distance_km: round_to(segment.distance_km, 2),
            ..segment
        })
        .collect();

    Route {
        origin: origin.to_string(),
        destination: destination.to_string(),
        total_distance_km: round_to(total_distance.as_kilometers(), 2),
        total_time_min: round_to(total_time, 1),
        metadata: RouteMetadata {
            origin_code: path.codes.first().map(|code| code.to_string()),
            destination_code: path.codes.last().map(|code| code.to_string()),
            path_codes: path.codes.iter().map(|code| code.to_string()).collect(),
            num_stations: steps.len(),
            mode: network.mode(),
            segments,
            error: None,
            message: None,
        },
        steps,
    }
}

#[test]
fn failures_name_the_culprit() {
    let route = Route::failure(
        "Atlantis",
        "Lyon",
        WeightMode::Time,
        RouteError::OriginNotFound,
        None,
        None,
    );
    assert!(route.steps.is_empty());
    assert!(!route.is_found());
    assert_eq!(route.error(), Some(RouteError::OriginNotFound));
    assert!(route.metadata.message.is_some_and(|m| m.contains("Atlantis")));
}

#[test]
fn errors_serialize_as_codes() {
    let json = serde_json::to_value(RouteError::NoPath).unwrap();
    assert_eq!(json, serde_json::json!("no_path"));
}
