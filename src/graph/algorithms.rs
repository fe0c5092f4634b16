//! Graph algorithms shared by the analysis modules

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use crate::graph::{UndirectedGraph, WeightedGraph};

impl WeightedGraph {
    /// Collapse edge direction.
    ///
    /// Each directed edge `(u, v, w)` contributes `w` to the undirected edge
    /// `{u, v}`, so reciprocal edges sum and total weight is conserved.
    pub fn undirected_projection(&self) -> UndirectedGraph {
        log::debug!("Projecting {} directed edges onto undirected graph", self.edge_count());

        let edges = (0..self.node_count)
            .flat_map(|src| self.out_edges(src).map(move |(dst, weight)| (src, dst, weight)));

        UndirectedGraph::from_edges(self.node_count, edges)
    }
}

/// Single-source shortest paths with path counts.
///
/// Edge weight is used directly as traversal cost.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub source: usize,

    /// Nodes in the order they were settled (non-decreasing distance)
    pub order: Vec<usize>,

    /// Distance from the source, `f64::INFINITY` when unreachable
    pub distance: Vec<f64>,

    /// Number of distinct shortest paths from the source
    pub sigma: Vec<f64>,

    /// Predecessors on shortest paths
    pub predecessors: Vec<Vec<usize>>,
}

impl ShortestPathTree {
    /// Number of nodes reachable from the source, the source included
    pub fn reachable_count(&self) -> usize {
        self.order.len()
    }

    /// Sum of distances to every reachable node
    pub fn distance_sum(&self) -> f64 {
        self.order.iter().map(|&v| self.distance[v]).sum()
    }
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap; node id breaks ties so settle order is deterministic
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Plain Dijkstra: distances plus the order in which nodes were settled
fn settle(graph: &WeightedGraph, source: usize) -> (Vec<usize>, Vec<f64>) {
    let n = graph.node_count;
    let mut distance = vec![f64::INFINITY; n];
    let mut settled = vec![false; n];
    let mut order = Vec::new();
    let mut heap = BinaryHeap::new();

    distance[source] = 0.0;
    heap.push(State { cost: 0.0, node: source });

    while let Some(State { cost, node }) = heap.pop() {
        if settled[node] || cost > distance[node] {
            continue;
        }
        settled[node] = true;
        order.push(node);

        for (neighbor, weight) in graph.out_edges(node) {
            let next_cost = cost + weight;
            if !settled[neighbor] && next_cost < distance[neighbor] {
                distance[neighbor] = next_cost;
                heap.push(State { cost: next_cost, node: neighbor });
            }
        }
    }

    (order, distance)
}

/// Dijkstra from `source`, recording everything Brandes' algorithm needs.
///
/// Predecessors are every in-neighbor `u` with `d(u) + w(u, v) == d(v)`, so
/// zero-weight edges between equally distant nodes count as shortest paths.
/// `order` is a topological order of that predecessor graph: nodes come out
/// in settle order, but never before all of their predecessors. A zero-weight
/// cycle has no such order; its earliest settled node is released first and
/// keeps only the predecessors already placed.
pub fn shortest_path_tree(graph: &WeightedGraph, source: usize) -> ShortestPathTree {
    let n = graph.node_count;
    let (settled, distance) = settle(graph, source);

    let mut rank = vec![usize::MAX; n];
    for (position, &v) in settled.iter().enumerate() {
        rank[v] = position;
    }

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut pending = vec![0usize; n];
    for &v in &settled {
        if v == source {
            continue;
        }
        predecessors[v] = graph
            .in_edges(v)
            .filter(|&(u, weight)| u != v && distance[u] + weight == distance[v])
            .map(|(u, _)| u)
            .collect();
        pending[v] = predecessors[v].len();
    }

    let mut sigma = vec![0.0; n];
    let mut placed = vec![false; n];
    let mut order = Vec::with_capacity(settled.len());
    let mut ready = BinaryHeap::new();
    let mut cursor = 0;
    ready.push(Reverse(rank[source]));

    while order.len() < settled.len() {
        let node = match ready.pop() {
            Some(Reverse(position)) => settled[position],
            None => {
                // Zero-weight cycle
                while placed[settled[cursor]] {
                    cursor += 1;
                }
                let node = settled[cursor];
                predecessors[node].retain(|&u| placed[u]);
                node
            }
        };
        if placed[node] {
            continue;
        }
        placed[node] = true;
        order.push(node);

        sigma[node] = if node == source {
            1.0
        } else {
            predecessors[node].iter().map(|&u| sigma[u]).sum()
        };

        for (neighbor, weight) in graph.out_edges(node) {
            if neighbor == source || neighbor == node || placed[neighbor] {
                continue;
            }
            if distance[node] + weight == distance[neighbor] {
                pending[neighbor] -= 1;
                if pending[neighbor] == 0 {
                    ready.push(Reverse(rank[neighbor]));
                }
            }
        }
    }

    ShortestPathTree {
        source,
        order,
        distance,
        sigma,
        predecessors,
    }
}
