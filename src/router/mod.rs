//! Minimum-weight path search over the station graph.

pub mod itinerary;
mod state;

use std::sync::Arc;

use tracing::trace;

use crate::{network::Graph, router::state::SearchState};

pub use itinerary::{Route, RouteError, RouteMetadata, Segment};

/// A path found by [`find_shortest_path`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPath {
    /// Sum of the link weights along the path.
    pub weight: f64,
    /// Station codes from the start to the end, both included.
    pub codes: Vec<Arc<str>>,
}

impl ShortestPath {
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Dijkstra search between two station codes.
///
/// Returns `None` when either code is not part of the graph or when `end`
/// cannot be reached from `start`. `start == end` yields a single-node path
/// of weight zero.
pub fn find_shortest_path(graph: &Graph, start: &str, end: &str) -> Option<ShortestPath> {
    let start = graph.node(start)?;
    let end = graph.node(end)?;
    let mut state = SearchState::new(graph.node_count(), start);

    while let Some(entry) = state.pop() {
        if state.is_visited(entry.node) {
            continue;
        }
        state.visit(entry.node);

        if entry.node == end {
            let codes: Vec<Arc<str>> = state
                .backtrack(end)
                .into_iter()
                .map(|node| graph.code(node).clone())
                .collect();
            trace!("Settled target after {} hops at {}", codes.len() - 1, entry.cost);
            return Some(ShortestPath {
                weight: entry.cost,
                codes,
            });
        }

        for link in graph.links(entry.node) {
            if state.is_visited(link.to) {
                continue;
            }
            let cost = entry.cost + link.weight;
            if cost < state.best(link.to) {
                state.relax(link.to, cost, entry.node);
            }
        }
    }
    None
}

#[test]
fn prefers_the_lighter_detour() {
    let graph = Graph::from_links([("a", "b", 10.0), ("a", "c", 3.0), ("c", "b", 4.0)]);
    let path = find_shortest_path(&graph, "a", "b");
    assert_eq!(
        path,
        Some(ShortestPath {
            weight: 7.0,
            codes: vec!["a".into(), "c".into(), "b".into()],
        })
    );
}

#[test]
fn unknown_codes_have_no_path() {
    let graph = Graph::from_links([("a", "b", 1.0)]);
    assert_eq!(find_shortest_path(&graph, "x", "b"), None);
    assert_eq!(find_shortest_path(&graph, "a", "x"), None);
    assert_eq!(find_shortest_path(&graph, "b", "a"), None);
}
