use std::{collections::HashMap, fmt::Display, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

/// How edge weights are derived when the graph is built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    /// Mean travel time multiplied by the service class penalty.
    #[default]
    Time,
    /// Great-circle distance between the endpoints.
    Distance,
}

impl Display for WeightMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightMode::Time => f.write_str("time"),
            WeightMode::Distance => f.write_str("distance"),
        }
    }
}

impl FromStr for WeightMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" | "temps_reel" => Ok(WeightMode::Time),
            "distance" | "legacy" => Ok(WeightMode::Distance),
            other => Err(format!("unknown weight mode '{other}'")),
        }
    }
}

/// Outgoing link of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub to: u32,
    pub weight: f64,
}

/// Immutable weighted adjacency structure keyed by station code.
///
/// Nodes are numbered in lexicographic order of their code so node ids can
/// double as a deterministic tie-breaker during searches.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    codes: Box<[Arc<str>]>,
    lookup: HashMap<Arc<str>, u32>,
    /// Outgoing links per node, in the order the edges were given.
    adjacency: Box<[Box<[Link]>]>,
    incoming: Box<[u32]>,
}

impl Graph {
    /// Builds a graph from directed `(from, to, weight)` triples.
    ///
    /// Only the given directions are added, no reverse link is synthesized.
    pub fn from_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = (S, S, f64)>,
        S: Into<Arc<str>>,
    {
        let links: Vec<(Arc<str>, Arc<str>, f64)> = links
            .into_iter()
            .map(|(from, to, weight)| (from.into(), to.into(), weight))
            .collect();

        let mut codes: Vec<Arc<str>> = links
            .iter()
            .flat_map(|(from, to, _)| [from.clone(), to.clone()])
            .collect();
        codes.sort_unstable();
        codes.dedup();
        let lookup: HashMap<Arc<str>, u32> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| (code.clone(), i as u32))
            .collect();

        let mut adjacency: Vec<Vec<Link>> = vec![Vec::new(); codes.len()];
        let mut incoming: Vec<u32> = vec![0; codes.len()];
        for (from, to, weight) in links.iter() {
            let from = lookup[from];
            let to = lookup[to];
            adjacency[from as usize].push(Link { to, weight: *weight });
            incoming[to as usize] += 1;
        }

        Self {
            codes: codes.into(),
            lookup,
            adjacency: adjacency.into_iter().map(Into::into).collect(),
            incoming: incoming.into(),
        }
    }

    /// Number of nodes, i.e. codes with at least one incoming or outgoing link.
    pub fn node_count(&self) -> usize {
        self.codes.len()
    }

    /// Number of directed links.
    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(|links| links.len()).sum()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.lookup.contains_key(code)
    }

    pub fn node(&self, code: &str) -> Option<u32> {
        self.lookup.get(code).copied()
    }

    pub fn code(&self, node: u32) -> &Arc<str> {
        &self.codes[node as usize]
    }

    pub fn links(&self, node: u32) -> &[Link] {
        &self.adjacency[node as usize]
    }

    /// Ordered `(neighbor, weight)` list of a code, empty for unknown codes.
    pub fn neighbors(&self, code: &str) -> Vec<(&str, f64)> {
        self.node(code)
            .map(|node| {
                self.links(node)
                    .iter()
                    .map(|link| (self.code(link.to).as_ref(), link.weight))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of outgoing links of a code, zero for unknown codes.
    pub fn edge_count(&self, code: &str) -> usize {
        self.node(code)
            .map(|node| self.links(node).len())
            .unwrap_or_default()
    }

    /// Number of links arriving at a code, zero for unknown codes.
    pub fn incoming_count(&self, code: &str) -> usize {
        self.node(code)
            .map(|node| self.incoming[node as usize] as usize)
            .unwrap_or_default()
    }

    /// Weight of the lightest `from -> to` link, if any.
    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        let to = self.node(to)?;
        self.links(self.node(from)?)
            .iter()
            .filter(|link| link.to == to)
            .map(|link| link.weight)
            .min_by(f64::total_cmp)
    }
}

#[test]
fn nodes_are_numbered_by_code() {
    let graph = Graph::from_links([("b", "a", 1.0), ("c", "b", 2.0)]);
    assert_eq!(graph.node("a"), Some(0));
    assert_eq!(graph.node("b"), Some(1));
    assert_eq!(graph.node("c"), Some(2));
    assert_eq!(graph.link_count(), 2);
}

#[test]
fn sinks_are_part_of_the_graph() {
    let graph = Graph::from_links([("a", "b", 1.0)]);
    assert!(graph.contains("b"));
    assert_eq!(graph.edge_count("b"), 0);
    assert_eq!(graph.incoming_count("b"), 1);
    assert!(graph.neighbors("b").is_empty());
}

#[test]
fn no_reverse_links_are_synthesized() {
    let graph = Graph::from_links([("a", "b", 4.0)]);
    assert_eq!(graph.weight("a", "b"), Some(4.0));
    assert_eq!(graph.weight("b", "a"), None);
}
