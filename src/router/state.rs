use std::{cmp::Ordering, collections::BinaryHeap};

/// A node waiting in the priority queue with the cost it was reached at.
#[derive(Debug, Clone, Copy)]
pub struct QueueEntry {
    pub cost: f64,
    pub node: u32,
}

// Reversed so the max-heap pops the cheapest entry first. Equal costs pop
// the lowest node first, and nodes are numbered by code.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Per-query search state, indexed by node id.
///
/// Parents are kept as back-pointers into the same arena, the path is only
/// materialized once the target is settled.
#[derive(Debug)]
pub struct SearchState {
    heap: BinaryHeap<QueueEntry>,
    best: Vec<f64>,
    parents: Vec<Option<u32>>,
    visited: Vec<bool>,
}

impl SearchState {
    pub fn new(node_count: usize, start: u32) -> Self {
        let mut state = Self {
            heap: BinaryHeap::new(),
            best: vec![f64::INFINITY; node_count],
            parents: vec![None; node_count],
            visited: vec![false; node_count],
        };
        state.best[start as usize] = 0.0;
        state.heap.push(QueueEntry {
            cost: 0.0,
            node: start,
        });
        state
    }

    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.heap.pop()
    }

    pub fn is_visited(&self, node: u32) -> bool {
        self.visited[node as usize]
    }

    pub fn visit(&mut self, node: u32) {
        self.visited[node as usize] = true;
    }

    pub fn best(&self, node: u32) -> f64 {
        self.best[node as usize]
    }

    /// Records a cheaper way to reach `node` through `parent`.
    pub fn relax(&mut self, node: u32, cost: f64, parent: u32) {
        self.best[node as usize] = cost;
        self.parents[node as usize] = Some(parent);
        self.heap.push(QueueEntry { cost, node });
    }

    /// Nodes from the start to `target`, both included.
    pub fn backtrack(&self, target: u32) -> Vec<u32> {
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.parents[current as usize] {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

#[test]
fn cheapest_entry_pops_first() {
    let mut heap = BinaryHeap::new();
    heap.push(QueueEntry { cost: 3.0, node: 0 });
    heap.push(QueueEntry { cost: 1.0, node: 2 });
    heap.push(QueueEntry { cost: 1.0, node: 1 });
    assert_eq!(heap.pop().map(|entry| entry.node), Some(1));
    assert_eq!(heap.pop().map(|entry| entry.node), Some(2));
    assert_eq!(heap.pop().map(|entry| entry.node), Some(0));
}

#[test]
fn backtrack_follows_parents() {
    let mut state = SearchState::new(3, 0);
    state.relax(1, 1.0, 0);
    state.relax(2, 2.0, 1);
    assert_eq!(state.backtrack(2), vec![0, 1, 2]);
    assert_eq!(state.backtrack(0), vec![0]);
}
