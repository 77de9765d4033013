use std::{
    sync::{Arc, Mutex, OnceLock, PoisonError},
    time::Instant,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    dataset,
    network::{Network, Station, WeightMode},
    resolver::StationResolver,
    router::{self, Route, RouteError, itinerary},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("The engine has not been initialized")]
    NotInitialized,
    #[error(transparent)]
    Dataset(#[from] dataset::Error),
}

/// Sizes of the loaded network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Distinct physical stations.
    pub stations: usize,
    /// Station codes, aliases included.
    pub codes: usize,
    pub nodes: usize,
    /// Directed links of the graph.
    pub links: usize,
    pub mode: WeightMode,
}

/// Owns the network and answers route queries.
///
/// The network is built once by [`Engine::initialize`] and never mutated
/// afterwards, queries only borrow it and can run from any thread.
#[derive(Debug, Default)]
pub struct Engine {
    config: dataset::Config,
    network: OnceLock<Network>,
    init: Mutex<()>,
}

impl Engine {
    pub fn new(config: dataset::Config) -> Self {
        Self {
            config,
            network: OnceLock::new(),
            init: Mutex::new(()),
        }
    }

    /// An engine serving an already built network.
    pub fn with_network(network: Network) -> Self {
        Self {
            config: Default::default(),
            network: OnceLock::from(network),
            init: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &dataset::Config {
        &self.config
    }

    /// Loads the datasets and builds the graph.
    ///
    /// Calling it again once it succeeded is a no-op. Concurrent first
    /// callers wait for a single build. A failure leaves the engine
    /// uninitialized and is not retried.
    pub fn initialize(&self) -> Result<(), self::Error> {
        if self.is_initialized() {
            return Ok(());
        }
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if self.is_initialized() {
            return Ok(());
        }

        let now = Instant::now();
        let network = Network::load(&self.config)?;
        info!(
            "Engine ready in {:?}: {} stations, {} nodes, {} links, {} mode",
            now.elapsed(),
            network.stations().len(),
            network.graph().node_count(),
            network.graph().link_count(),
            network.mode()
        );
        // Only ever set while holding the guard.
        let _ = self.network.set(network);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.network.get().is_some()
    }

    pub fn network(&self) -> Result<&Network, self::Error> {
        self.network.get().ok_or(self::Error::NotInitialized)
    }

    /// Resolves both places and searches the best path between them.
    ///
    /// Unresolvable places and disconnected stations are reported in the
    /// returned route, the only error is querying an uninitialized engine.
    pub fn find_route(&self, origin: &str, destination: &str) -> Result<Route, self::Error> {
        let network = self.network()?;
        let mode = network.mode();
        let resolver = StationResolver::new(network);

        let Some(origin_code) = resolver.resolve(origin) else {
            warn!("Origin '{origin}' not found");
            return Ok(Route::failure(
                origin,
                destination,
                mode,
                RouteError::OriginNotFound,
                None,
                None,
            ));
        };
        let Some(destination_code) = resolver.resolve(destination) else {
            warn!("Destination '{destination}' not found");
            return Ok(Route::failure(
                origin,
                destination,
                mode,
                RouteError::DestinationNotFound,
                Some(&*origin_code),
                None,
            ));
        };
        debug!("Routing {origin_code} -> {destination_code}");

        let now = Instant::now();
        let Some(path) = router::find_shortest_path(network.graph(), &origin_code, &destination_code)
        else {
            info!("No path between {origin_code} and {destination_code}");
            return Ok(Route::failure(
                origin,
                destination,
                mode,
                RouteError::NoPath,
                Some(&*origin_code),
                Some(&*destination_code),
            ));
        };
        let route = itinerary::compose(&path, network, origin, destination);
        info!(
            "Found route: {origin} -> {destination} ({} stops, {:.0} min, {:.1} km) in {:?}",
            route.steps.len(),
            route.total_time_min,
            route.total_distance_km,
            now.elapsed()
        );
        Ok(route)
    }

    /// Station code a free-text place name resolves to.
    pub fn resolve(&self, text: &str) -> Result<Option<Arc<str>>, self::Error> {
        Ok(StationResolver::new(self.network()?).resolve(text))
    }

    /// Stations whose name looks like the needle, best match first.
    pub fn search_stations(&self, needle: &str, limit: usize) -> Result<Vec<&Station>, self::Error> {
        let mut stations = self.network()?.search_stations(needle);
        stations.truncate(limit);
        Ok(stations)
    }

    pub fn stats(&self) -> Result<EngineStats, self::Error> {
        let network = self.network()?;
        Ok(EngineStats {
            stations: network.stations().len(),
            codes: network.stations().code_count(),
            nodes: network.graph().node_count(),
            links: network.graph().link_count(),
            mode: network.mode(),
        })
    }
}

#[test]
fn queries_need_an_initialized_engine() {
    let engine = Engine::default();
    assert!(matches!(
        engine.find_route("Paris", "Lyon"),
        Err(Error::NotInitialized)
    ));
    assert!(matches!(engine.stats(), Err(Error::NotInitialized)));
}
