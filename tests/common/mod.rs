#![allow(dead_code)]

use std::{fs, path::Path};

use serde_json::{Value, json};
use thor_routing::{
    dataset::Config,
    network::{Commune, Edge, Network, ServiceClass, Station, StationIndex, WeightMode},
    shared::geo::{Coordinate, Distance},
};

pub fn station(code: &str, name: &str, commune: &str, latitude: f64, longitude: f64) -> Station {
    Station::new(
        [code],
        name,
        Commune::new(commune.to_lowercase(), commune),
        Coordinate::new(latitude, longitude),
    )
}

pub fn aliased(codes: &[&str], name: &str, commune: &str, latitude: f64, longitude: f64) -> Station {
    Station::new(
        codes.iter().copied(),
        name,
        Commune::new(commune.to_lowercase(), commune),
        Coordinate::new(latitude, longitude),
    )
}

pub fn timed(from: &str, to: &str, minutes: f64, class: ServiceClass) -> Edge {
    Edge::new(from, to)
        .with_mean_minutes(minutes)
        .with_daily_trains(12)
        .with_service_class(class)
        .with_breakdown([(class.as_str(), 12)])
}

pub fn both_ways(from: &str, to: &str, minutes: f64, class: ServiceClass) -> [Edge; 2] {
    [timed(from, to, minutes, class), timed(to, from, minutes, class)]
}

pub fn network(stations: Vec<Station>, edges: Vec<Edge>, mode: WeightMode) -> Network {
    Network::build(StationIndex::new(stations), edges, mode)
}

/// A small slice of the national network around Lyon and Paris.
pub fn lyon_network() -> Network {
    let stations = vec![
        aliased(
            &["87723197", "87723198"],
            "Lyon Part-Dieu",
            "Lyon",
            45.7606,
            4.8593,
        ),
        station("87722025", "Lyon Perrache", "Lyon", 45.7485, 4.8257),
        station("87721001", "Lyon Vaise", "Lyon", 45.7802, 4.8047),
        station("87762906", "Lyon Saint-Exupéry TGV", "Colombier-Saugnieu", 45.7209, 5.0757),
        station("87686006", "Paris Gare de Lyon", "Paris 12e Arrondissement", 48.8443, 2.3744),
        station("87751008", "Marseille Saint-Charles", "Marseille 1er Arrondissement", 43.3028, 5.3806),
        station("87318964", "Villeurbanne", "Villeurbanne", 45.7665, 4.8795),
    ];
    let mut edges = vec![];
    edges.extend(both_ways("87686006", "87723197", 120.0, ServiceClass::HighSpeed));
    edges.extend(both_ways("87723197", "87751008", 100.0, ServiceClass::HighSpeed));
    edges.extend(both_ways("87723197", "87722025", 8.0, ServiceClass::Regional));
    edges.extend(both_ways("87723197", "87721001", 12.0, ServiceClass::Regional));
    edges.extend(both_ways("87723197", "87762906", 15.0, ServiceClass::Shuttle));
    edges.extend(both_ways("87762906", "87751008", 95.0, ServiceClass::HighSpeed));
    edges.extend(both_ways("87723197", "87318964", 6.0, ServiceClass::Regional));
    network(stations, edges, WeightMode::Time)
}

pub fn stations_json() -> Value {
    json!([
        {
            "uic": [87723197, "87723198"],
            "nom_gare": "Lyon Part-Dieu",
            "ville": { "id_commune": "69383", "nom_commune": "Lyon" },
            "position_geographique": { "lat": 45.7606, "lon": 4.8593 }
        },
        {
            "codes": ["87686006"],
            "display_name": "Paris Gare de Lyon",
            "commune": { "id": 75112, "name": "Paris 12e Arrondissement" },
            "position": { "lat": 48.8443, "lon": 2.3744 }
        },
        {
            "codes": ["87751008"],
            "display_name": "Marseille Saint-Charles",
            "commune": { "id": "13201", "name": "Marseille 1er Arrondissement" },
            "position": { "lat": 43.3028, "lon": 5.3806 }
        }
    ])
}

pub fn legacy_json() -> Value {
    json!([
        { "depart": "87686006", "arrivee": "87723197" },
        { "depart": "87723197", "arrivee": "87686006" },
        { "depart": "87723197", "arrivee": "87751008" },
        { "depart": "87751008", "arrivee": "87723197" }
    ])
}

pub fn enhanced_json() -> Value {
    json!({
        "metadata": {
            "generated_at": "2025-01-15T10:23:45.123456",
            "source_file": "horaires-sncf.json",
            "total_liaisons": 3,
            "unique_gares": 3,
            "stats": { "avec_temps": 3 }
        },
        "liaisons": [
            {
                "depart": "87686006",
                "arrivee": "87723197",
                "depart_nom": "Paris Gare de Lyon",
                "arrivee_nom": "Lyon Part-Dieu",
                "temps_moyen_min": 118.5,
                "temps_min_min": 112.0,
                "temps_max_min": 131.0,
                "nb_trains": 24,
                "distance_km": 427.0,
                "type_train": "TGV",
                "types_details": { "TGV": 20, "OUIGO": 4 }
            },
            {
                "depart": "87723197",
                "arrivee": "87751008",
                "temps_moyen_min": 101.0,
                "nb_trains": 18,
                "distance_km": 0,
                "type_train": "TGV",
                "types_details": { "TGV": 18 }
            },
            {
                "depart": "87723197",
                "arrivee": "99999999",
                "temps_moyen_min": 10.0,
                "type_train": "TER"
            }
        ]
    })
}

pub fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

/// Writes the datasets in `dir` and returns a config pointing at them.
/// The enhanced file is only written when asked for.
pub fn write_datasets(dir: &Path, enhanced: bool) -> Config {
    let config = Config::new()
        .with_stations_path(dir.join("dataset_gares.json"))
        .with_connections_path(dir.join("dataset_liaisons.json"))
        .with_enhanced_connections_path(dir.join("dataset_liaisons_enhanced.json"));
    write_json(&config.stations_path, &stations_json());
    write_json(&config.connections_path, &legacy_json());
    if enhanced {
        write_json(&config.enhanced_connections_path, &enhanced_json());
    }
    config
}

pub fn km(value: f64) -> Distance {
    Distance::from_kilometers(value)
}
