mod entities;
pub mod graph;

pub use entities::*;
pub use graph::{Graph, Link, WeightMode};

use std::{collections::HashMap, sync::Arc, time::Instant};

use tracing::{debug, info, warn};

use crate::{
    dataset,
    shared::{self, geo::Distance},
};

/// Every station, reachable through any of its codes.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    stations: Box<[Station]>,
    /// Code -> station index.
    code_lookup: HashMap<Arc<str>, u32>,
    /// `(code, station index)` sorted by code.
    entries: Box<[(Arc<str>, u32)]>,
}

impl StationIndex {
    /// Indexes every alias code of every station.
    ///
    /// When two stations claim the same code the later one wins, like it
    /// does in the source datasets.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut code_lookup: HashMap<Arc<str>, u32> = HashMap::new();
        let stations: Box<[Station]> = stations
            .into_iter()
            .enumerate()
            .map(|(i, mut station)| {
                station.index = i as u32;
                station
            })
            .collect();

        for station in stations.iter() {
            for code in station.codes.iter() {
                if let Some(previous) = code_lookup.insert(code.clone(), station.index) {
                    warn!(
                        "Code {code} is shared by '{}' and '{}', keeping the latter",
                        stations[previous as usize].name, station.name
                    );
                }
            }
        }

        let mut entries: Vec<(Arc<str>, u32)> = code_lookup
            .iter()
            .map(|(code, index)| (code.clone(), *index))
            .collect();
        entries.sort_unstable();

        Self {
            stations,
            code_lookup,
            entries: entries.into(),
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Every `(code, station)` pair ordered by code.
    pub fn entries(&self) -> impl Iterator<Item = (&Arc<str>, &Station)> {
        self.entries
            .iter()
            .map(|(code, index)| (code, &self.stations[*index as usize]))
    }

    /// Same as [`StationIndex::entries`] but as a slice for parallel scans.
    pub(crate) fn raw_entries(&self) -> &[(Arc<str>, u32)] {
        &self.entries
    }

    pub fn by_index(&self, index: u32) -> Option<&Station> {
        self.stations.get(index as usize)
    }

    /// Get the station registered under the given code.
    /// Any alias of a station resolves to the same station.
    pub fn by_code(&self, code: &str) -> Option<&Station> {
        let index = self.code_lookup.get(code)?;
        self.by_index(*index)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.code_lookup.contains_key(code)
    }

    /// Number of distinct stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Number of indexed codes, aliases included.
    pub fn code_count(&self) -> usize {
        self.code_lookup.len()
    }
}

/// The loaded stations, the connections between them and the search graph
/// built from both. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct Network {
    stations: StationIndex,
    edges: Box<[Edge]>,
    /// from -> to -> index of the lightest edge of the pair.
    edge_lookup: HashMap<Arc<str>, HashMap<Arc<str>, usize>>,
    graph: Graph,
    mode: WeightMode,
}

impl Network {
    /// Loads both datasets described by the configuration and builds the graph.
    pub fn load(config: &dataset::Config) -> Result<Self, dataset::Error> {
        let (source, mode) = config.data_source()?;
        info!("Using {source} with {mode} weighting");
        let stations = dataset::load_stations(&config.stations_path)?;
        let edges = dataset::load_connections(&source)?;
        let network = Self::build(stations, edges, mode);
        if network.graph.node_count() == 0 {
            return Err(dataset::Error::DataFormat {
                source_name: source.path().display().to_string(),
                message: "no connection links two known stations".into(),
            });
        }
        Ok(network)
    }

    /// Builds the weighted graph.
    ///
    /// Edges whose endpoints are not both known stations are dropped. This is
    /// a pure function of its inputs.
    pub fn build(stations: StationIndex, edges: Vec<Edge>, mode: WeightMode) -> Self {
        debug!("Building graph...");
        let now = Instant::now();
        let edges: Box<[Edge]> = edges
            .into_iter()
            .filter(|edge| {
                let known = stations.contains(&edge.from) && stations.contains(&edge.to);
                if !known {
                    warn!(
                        "Skipping connection {} -> {}: unknown station code",
                        edge.from, edge.to
                    );
                }
                known
            })
            .collect();

        let weights: Vec<Option<f64>> = edges
            .iter()
            .map(|edge| {
                let from = stations.by_code(&edge.from)?;
                let to = stations.by_code(&edge.to)?;
                Some(weight(edge, from, to, mode))
            })
            .collect();

        // The search takes the lightest link of a pair, so the hop is
        // described by that record. Later records win ties.
        let mut edge_lookup: HashMap<Arc<str>, HashMap<Arc<str>, usize>> = HashMap::new();
        for (i, edge) in edges.iter().enumerate() {
            let Some(weight) = weights[i] else {
                continue;
            };
            let targets = edge_lookup.entry(edge.from.clone()).or_default();
            match targets.get(&edge.to) {
                Some(&kept) if weights[kept].is_some_and(|lighter| lighter < weight) => {}
                _ => {
                    targets.insert(edge.to.clone(), i);
                }
            }
        }

        let graph = Graph::from_links(edges.iter().zip(&weights).filter_map(|(edge, weight)| {
            Some((edge.from.clone(), edge.to.clone(), (*weight)?))
        }));

        info!(
            "Built {mode} graph with {} nodes and {} links from {} stations in {:?}",
            graph.node_count(),
            graph.link_count(),
            stations.len(),
            now.elapsed()
        );

        Self {
            stations,
            edges,
            edge_lookup,
            graph,
            mode,
        }
    }

    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn mode(&self) -> WeightMode {
        self.mode
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The connection `from -> to` if the datasets contain one.
    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        let index = self.edge_lookup.get(from)?.get(to)?;
        Some(&self.edges[*index])
    }

    /// Distance of a hop, the stored one when known.
    pub fn hop_distance(&self, from: &str, to: &str) -> Option<Distance> {
        let stored = self.edge(from, to).and_then(|edge| edge.distance);
        if stored.is_some() {
            return stored;
        }
        let from = self.stations.by_code(from)?;
        let to = self.stations.by_code(to)?;
        Some(from.coordinate.great_circle_distance(&to.coordinate))
    }

    /// Does a fuzzy search on all the stations, comparing their name to the needle.
    pub fn search_stations<'a>(&'a self, needle: &str) -> Vec<&'a Station> {
        shared::search(needle, self.stations.stations())
    }
}

/// Search weight of an edge.
///
/// Time mode uses the mean travel time, or the great-circle distance when no
/// statistic exists, multiplied by the service class penalty. Distance mode
/// uses the great-circle distance alone.
pub fn weight(edge: &Edge, from: &Station, to: &Station, mode: WeightMode) -> f64 {
    let great_circle = || {
        from.coordinate
            .great_circle_distance(&to.coordinate)
            .as_kilometers()
    };
    match mode {
        WeightMode::Time => edge.mean_minutes.unwrap_or_else(great_circle) * edge.penalty(),
        WeightMode::Distance => great_circle(),
    }
}
