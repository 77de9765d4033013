//! Free-text place name -> station code.
//!
//! Every `(code, station)` pair is scored against the query with a tiered
//! heuristic, then candidates that are part of the graph get a bonus
//! proportional to how well connected they are. Equal scores are broken by
//! the lowest code so the answer never depends on iteration order.

use std::{cmp::Ordering, sync::Arc};

use rayon::prelude::*;
use tracing::trace;

use crate::{
    network::{Network, Station},
    shared::fuzzy,
};

pub const EXACT_NAME_SCORE: i32 = 200;
pub const NAME_PREFIX_SCORE: i32 = 100;
pub const MAJOR_HUB_BONUS: i32 = 50;
pub const MAIN_LINE_BONUS: i32 = 30;
pub const SECONDARY_PENALTY: i32 = 20;
pub const EXACT_COMMUNE_SCORE: i32 = 80;
pub const PARTIAL_COMMUNE_SCORE: i32 = 40;
pub const PARTIAL_NAME_SCORE: i32 = 30;
/// Bonus per outgoing graph link of a candidate.
pub const CONNECTIVITY_BONUS: i32 = 2;

/// Principal termini of the large cities.
const MAJOR_HUB_KEYWORDS: &[&str] = &[
    "part-dieu",
    "part dieu",
    "saint-jean",
    "saint-charles",
    "perrache",
    "montparnasse",
];
const MAIN_LINE_KEYWORDS: &[&str] = &["tgv", "central", "centre"];
/// Airports, suburban and secondary stations.
const SECONDARY_KEYWORDS: &[&str] = &["aéroport", "banlieue", "rer", "gorge", "vaise", "saint-paul"];
/// Communes of the capital are split in arrondissements ("Paris 15e
/// Arrondissement"); they only match queries naming the capital.
const CAPITAL_COMMUNE: &str = "paris";

/// A scored station code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub code: Arc<str>,
    /// Index of the station in the network's station table.
    pub station_index: u32,
    pub score: i32,
}

impl Candidate {
    /// Highest score first, lowest code on ties.
    fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.code.cmp(&other.code))
    }
}

pub struct StationResolver<'a> {
    network: &'a Network,
}

impl<'a> StationResolver<'a> {
    pub fn new(network: &'a Network) -> Self {
        Self { network }
    }

    /// Resolves a free-text place name to a station code.
    ///
    /// Tries the tiered heuristic first, then a plain name lookup.
    pub fn resolve(&self, text: &str) -> Option<Arc<str>> {
        let query = fuzzy::normalize(text);
        if query.is_empty() {
            return None;
        }
        self.resolve_by_place(&query)
            .or_else(|| self.resolve_by_name(&query))
    }

    /// Tiered place resolution, preferring major and well connected stations.
    pub fn resolve_by_place(&self, query: &str) -> Option<Arc<str>> {
        let mut candidates = self.candidates(query);
        if candidates.is_empty() {
            candidates = self.scan(|station| {
                station
                    .normalized_name
                    .contains(query)
                    .then_some(PARTIAL_NAME_SCORE)
            });
        }

        let graph = self.network.graph();
        let connected: Vec<Candidate> = candidates
            .iter()
            .filter(|candidate| graph.contains(&candidate.code))
            .map(|candidate| Candidate {
                score: candidate.score
                    + CONNECTIVITY_BONUS * graph.edge_count(&candidate.code) as i32,
                ..candidate.clone()
            })
            .collect();

        let best = connected
            .into_iter()
            .min_by(Candidate::rank)
            .or_else(|| candidates.into_iter().min_by(Candidate::rank))?;
        if let Some(station) = self.network.stations().by_index(best.station_index) {
            trace!(
                "Resolved '{query}' to {} {} (score {})",
                best.code, station.name, best.score
            );
        }
        Some(best.code)
    }

    /// Plain name lookup: an exact name of a connected station, then any
    /// station whose name contains the query or is contained in it.
    /// Connected stations are preferred.
    pub fn resolve_by_name(&self, query: &str) -> Option<Arc<str>> {
        let graph = self.network.graph();
        let exact = self
            .network
            .stations()
            .entries()
            .find(|(code, station)| station.normalized_name.as_ref() == query && graph.contains(code))
            .map(|(code, _)| code.clone());
        if exact.is_some() {
            return exact;
        }

        let partial = self.scan(|station| {
            let name = station.normalized_name.as_ref();
            (name.contains(query) || query.contains(name)).then_some(0)
        });
        partial
            .iter()
            .find(|candidate| graph.contains(&candidate.code))
            .or_else(|| partial.first())
            .map(|candidate| candidate.code.clone())
    }

    /// Every candidate of the first four tiers, sorted by code.
    pub fn candidates(&self, query: &str) -> Vec<Candidate> {
        self.scan(|station| tier_score(query, station))
    }

    fn scan<F>(&self, score: F) -> Vec<Candidate>
    where
        F: Fn(&Station) -> Option<i32> + Send + Sync,
    {
        let stations = self.network.stations();
        let mut candidates: Vec<Candidate> = stations
            .raw_entries()
            .par_iter()
            .filter_map(|(code, index)| {
                let station = stations.by_index(*index)?;
                score(station).map(|score| Candidate {
                    code: code.clone(),
                    station_index: *index,
                    score,
                })
            })
            .collect();
        candidates.par_sort_unstable_by(|a, b| a.code.cmp(&b.code));
        candidates
    }
}

/// Score of the first four tiers, `None` when the station does not match.
pub fn tier_score(query: &str, station: &Station) -> Option<i32> {
    let name = station.normalized_name.as_ref();
    if name == query {
        return Some(EXACT_NAME_SCORE);
    }

    if name
        .strip_prefix(query)
        .is_some_and(|rest| rest.starts_with(' ') || rest.starts_with('-'))
    {
        let mut score = NAME_PREFIX_SCORE;
        if contains_any(name, MAJOR_HUB_KEYWORDS) {
            score += MAJOR_HUB_BONUS;
        }
        if contains_any(name, MAIN_LINE_KEYWORDS) {
            score += MAIN_LINE_BONUS;
        }
        if contains_any(name, SECONDARY_KEYWORDS) {
            score -= SECONDARY_PENALTY;
        }
        return Some(score);
    }

    let commune = station.commune.normalized_name.as_ref();
    if commune == query {
        return Some(EXACT_COMMUNE_SCORE);
    }
    let capital_mismatch =
        commune.starts_with(CAPITAL_COMMUNE) && !query.starts_with(CAPITAL_COMMUNE);
    if commune.contains(query) && !capital_mismatch {
        return Some(PARTIAL_COMMUNE_SCORE);
    }
    None
}

fn contains_any(name: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| name.contains(keyword))
}
