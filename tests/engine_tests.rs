mod common;

use std::{sync::Arc, thread};

use common::*;
use thor_routing::{
    dataset::{self, Config},
    engine::{Engine, Error},
    network::WeightMode,
};

#[test]
fn queries_before_initialize_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::new(write_datasets(dir.path(), true));
    assert!(!engine.is_initialized());
    assert!(matches!(
        engine.find_route("Paris", "Lyon"),
        Err(Error::NotInitialized)
    ));
    assert!(matches!(engine.resolve("Lyon"), Err(Error::NotInitialized)));
}

#[test]
fn initialize_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::new(write_datasets(dir.path(), true));
    engine.initialize().unwrap();
    let first = engine.network().unwrap() as *const _;
    engine.initialize().unwrap();
    assert_eq!(engine.network().unwrap() as *const _, first);

    let route = engine.find_route("Paris", "Marseille").unwrap();
    assert_eq!(
        route.steps,
        ["Paris Gare de Lyon", "Lyon Part-Dieu", "Marseille Saint-Charles"]
    );
    assert_eq!(route.total_time_min, 219.5);
}

#[test]
fn concurrent_first_callers_build_once() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Arc::new(Engine::new(write_datasets(dir.path(), true)));
    thread::scope(|scope| {
        for _ in 0..8 {
            let engine = engine.clone();
            scope.spawn(move || {
                engine.initialize().unwrap();
                let route = engine.find_route("Lyon", "Marseille").unwrap();
                assert!(route.is_found());
            });
        }
    });
    assert!(engine.is_initialized());
}

#[test]
fn failed_initialization_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new()
        .with_stations_path(dir.path().join("gares.json"))
        .with_connections_path(dir.path().join("liaisons.json"))
        .with_enhanced_connections_path(dir.path().join("enhanced.json"));
    let engine = Engine::new(config);
    assert!(matches!(
        engine.initialize(),
        Err(Error::Dataset(dataset::Error::Configuration { .. }))
    ));
    assert!(!engine.is_initialized());
    assert!(matches!(
        engine.find_route("Paris", "Lyon"),
        Err(Error::NotInitialized)
    ));
}

#[test]
fn stats_describe_the_network() {
    let dir = tempfile::tempdir().unwrap();
    let engine = Engine::new(write_datasets(dir.path(), false));
    engine.initialize().unwrap();
    let stats = engine.stats().unwrap();
    assert_eq!(stats.stations, 3);
    assert_eq!(stats.codes, 4);
    assert_eq!(stats.nodes, 3);
    assert_eq!(stats.links, 4);
    assert_eq!(stats.mode, WeightMode::Distance);
}

#[test]
fn station_suggestions() {
    let engine = Engine::with_network(lyon_network());
    let stations = engine.search_stations("lyon perache", 3).unwrap();
    assert!(!stations.is_empty());
    assert!(stations.len() <= 3);
    assert_eq!(stations[0].name.as_ref(), "Lyon Perrache");

    assert!(engine.search_stations("lyon", 0).unwrap().is_empty());
}

#[test]
fn resolve_is_exposed() {
    let engine = Engine::with_network(lyon_network());
    assert_eq!(engine.resolve("Lyon").unwrap().as_deref(), Some("87723197"));
    assert_eq!(engine.resolve("Atlantis").unwrap(), None);
}
