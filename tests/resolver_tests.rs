mod common;

use common::*;
use thor_routing::{
    network::{ServiceClass, WeightMode},
    resolver::{self, StationResolver},
};

#[test]
fn exact_name_ignores_case_and_whitespace() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("  LYON perrache ").as_deref(), Some("87722025"));
}

#[test]
fn city_prefers_the_major_hub() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("Lyon").as_deref(), Some("87723197"));
    assert_eq!(resolver.resolve("Marseille").as_deref(), Some("87751008"));
    assert_eq!(resolver.resolve("Paris").as_deref(), Some("87686006"));
}

#[test]
fn prefix_scores_follow_the_keywords() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    let candidates = resolver.candidates("lyon");
    let score_of = |code: &str| {
        candidates
            .iter()
            .find(|candidate| candidate.code.as_ref() == code)
            .map(|candidate| candidate.score)
    };
    assert_eq!(score_of("87723197"), Some(150));
    assert_eq!(score_of("87722025"), Some(150));
    assert_eq!(score_of("87762906"), Some(130));
    assert_eq!(score_of("87721001"), Some(80));
    assert_eq!(score_of("87686006"), None);
}

#[test]
fn candidates_point_at_their_station() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    for candidate in resolver.candidates("lyon") {
        let station = network.stations().by_index(candidate.station_index).unwrap();
        assert!(station.has_code(&candidate.code));
    }
}

#[test]
fn commune_matches() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(
        resolver.resolve("Colombier-Saugnieu").as_deref(),
        Some("87762906")
    );
    let station = network.stations().by_code("87762906").unwrap();
    assert_eq!(
        resolver::tier_score("colombier-saugnieu", station),
        Some(resolver::EXACT_COMMUNE_SCORE)
    );
}

#[test]
fn capital_communes_need_the_capital_name() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("arrondissement").as_deref(), Some("87751008"));
    assert_eq!(resolver.resolve("Paris 12e").as_deref(), Some("87686006"));
}

#[test]
fn falls_back_to_any_name_containing_the_query() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("part-dieu").as_deref(), Some("87723197"));
    assert_eq!(resolver.resolve("Saint-Charles").as_deref(), Some("87751008"));
}

#[test]
fn falls_back_to_names_contained_in_the_query() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(
        resolver.resolve("gare de Lyon Part-Dieu").as_deref(),
        Some("87723197")
    );
}

#[test]
fn unknown_places_are_not_found() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("Atlantis"), None);
    assert_eq!(resolver.resolve(""), None);
    assert_eq!(resolver.resolve("   "), None);
}

#[test]
fn connected_stations_beat_isolated_ones() {
    let network = network(
        vec![
            station("87481002", "Nantes", "Nantes", 47.2173, -1.5419),
            station("87481614", "Nantes Orvault", "Orvault", 47.2710, -1.6221),
            station("87484006", "Angers Saint-Laud", "Angers", 47.4645, -0.5567),
        ],
        both_ways("87481614", "87484006", 40.0, ServiceClass::Regional).to_vec(),
        WeightMode::Time,
    );
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("Nantes").as_deref(), Some("87481614"));
}

#[test]
fn isolated_stations_still_resolve() {
    let network = network(
        vec![
            station("87481002", "Nantes", "Nantes", 47.2173, -1.5419),
            station("87484006", "Angers Saint-Laud", "Angers", 47.4645, -0.5567),
        ],
        vec![],
        WeightMode::Time,
    );
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("Nantes").as_deref(), Some("87481002"));
}

#[test]
fn equal_scores_pick_the_lowest_code() {
    let mut edges = vec![];
    edges.extend(both_ways("87713040", "87713412", 20.0, ServiceClass::Regional));
    edges.extend(both_ways("87713001", "87713412", 20.0, ServiceClass::Regional));
    let network = network(
        vec![
            station("87713040", "Dijon Ville", "Dijon", 47.3234, 5.0272),
            station("87713001", "Dijon Ville", "Dijon", 47.3234, 5.0272),
            station("87713412", "Beaune", "Beaune", 47.0235, 4.8386),
        ],
        edges,
        WeightMode::Time,
    );
    let resolver = StationResolver::new(&network);
    for _ in 0..10 {
        assert_eq!(resolver.resolve("Dijon Ville").as_deref(), Some("87713001"));
        assert_eq!(resolver.resolve("Dijon").as_deref(), Some("87713001"));
    }
}

#[test]
fn every_station_resolves_to_one_of_its_codes() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    for station in network.stations().stations() {
        let code = resolver.resolve(&station.name).unwrap();
        assert!(
            station.has_code(&code),
            "'{}' resolved to {code}",
            station.name
        );
    }
}

#[test]
fn aliases_prefer_the_connected_code() {
    let network = lyon_network();
    let resolver = StationResolver::new(&network);
    assert_eq!(resolver.resolve("Lyon Part-Dieu").as_deref(), Some("87723197"));
    assert!(network.stations().by_code("87723198").is_some());
}
