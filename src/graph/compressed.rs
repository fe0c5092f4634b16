//! Compressed sparse row storage for weighted graphs

use std::collections::BTreeMap;
use std::mem;
use serde::{Serialize, Deserialize};

/// One direction of a weighted graph in CSR layout.
///
/// `offsets[i]..offsets[i+1]` is the slice of `targets`/`weights` that belongs
/// to node `i`. Every row is sorted by neighbor id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjacency {
    pub offsets: Vec<u32>,
    pub targets: Vec<u32>,
    pub weights: Vec<f64>,
}

impl Adjacency {
    /// Create an empty adjacency with pre-allocated capacity
    pub fn with_capacity(node_count: usize, edge_count: usize) -> Self {
        Self {
            offsets: Vec::with_capacity(node_count + 1),
            targets: Vec::with_capacity(edge_count),
            weights: Vec::with_capacity(edge_count),
        }
    }

    /// Pack per-node rows of `(neighbor, weight)` into CSR form, sorting each row
    pub fn from_rows(mut rows: Vec<Vec<(u32, f64)>>) -> Self {
        let edge_count = rows.iter().map(|row| row.len()).sum();
        let mut adjacency = Self::with_capacity(rows.len(), edge_count);

        adjacency.offsets.push(0);
        let mut offset = 0u32;
        for row in &mut rows {
            row.sort_unstable_by_key(|&(neighbor, _)| neighbor);
            for &(neighbor, weight) in row.iter() {
                adjacency.targets.push(neighbor);
                adjacency.weights.push(weight);
            }
            offset += row.len() as u32;
            adjacency.offsets.push(offset);
        }

        adjacency
    }

    fn range(&self, node: usize) -> std::ops::Range<usize> {
        self.offsets[node] as usize..self.offsets[node + 1] as usize
    }

    /// Neighbor ids of a node
    pub fn neighbors(&self, node: usize) -> &[u32] {
        &self.targets[self.range(node)]
    }

    /// Weights parallel to `neighbors(node)`
    pub fn weights_of(&self, node: usize) -> &[f64] {
        &self.weights[self.range(node)]
    }

    /// Iterate `(neighbor, weight)` pairs of a node
    pub fn edges(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.neighbors(node)
            .iter()
            .zip(self.weights_of(node))
            .map(|(&neighbor, &weight)| (neighbor as usize, weight))
    }

    pub fn degree(&self, node: usize) -> usize {
        let range = self.range(node);
        range.end - range.start
    }

    /// Sum of edge weights in a node's row
    pub fn weight_sum(&self, node: usize) -> f64 {
        self.weights_of(node).iter().sum()
    }

    /// Weight of the edge to `neighbor`, if present
    pub fn weight_to(&self, node: usize, neighbor: usize) -> Option<f64> {
        let neighbors = self.neighbors(node);
        neighbors
            .binary_search(&(neighbor as u32))
            .ok()
            .map(|pos| self.weights_of(node)[pos])
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.offsets.capacity() * mem::size_of::<u32>()
            + self.targets.capacity() * mem::size_of::<u32>()
            + self.weights.capacity() * mem::size_of::<f64>()
    }
}

/// Weighted directed graph with both outgoing and incoming views.
///
/// Immutable once built; construct it through [`crate::graph::GraphBuilder`]
/// or [`crate::graph::builder::build_from_adjacency`], which validate input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraph {
    /// Number of nodes in the graph
    pub node_count: usize,

    /// Node labels (usernames), indexed by node id
    pub labels: Vec<String>,

    /// Outgoing edges: node -> (target, weight)
    pub outgoing: Adjacency,

    /// Incoming edges: node -> (source, weight)
    pub incoming: Adjacency,
}

impl WeightedGraph {
    pub fn edge_count(&self) -> usize {
        self.outgoing.edge_count()
    }

    /// Outgoing `(target, weight)` pairs of a node
    pub fn out_edges(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.outgoing.edges(node)
    }

    /// Incoming `(source, weight)` pairs of a node
    pub fn in_edges(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.incoming.edges(node)
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.outgoing.degree(node)
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.incoming.degree(node)
    }

    /// Total weight leaving a node
    pub fn out_weight_sum(&self, node: usize) -> f64 {
        self.outgoing.weight_sum(node)
    }

    /// Weight of the edge `src -> dst`, if present
    pub fn edge_weight(&self, src: usize, dst: usize) -> Option<f64> {
        self.outgoing.weight_to(src, dst)
    }

    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.edge_weight(src, dst).is_some()
    }

    pub fn label(&self, node: usize) -> &str {
        &self.labels[node]
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> f64 {
        self.outgoing.weights.iter().sum()
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let labels = self.labels.iter().map(|s| s.capacity()).sum::<usize>();

        base + labels + self.outgoing.memory_usage() + self.incoming.memory_usage()
    }
}

/// Weighted undirected graph used for community detection.
///
/// Non-loop edges appear in both endpoints' rows; self-loop weight is kept
/// apart in `self_loops` so each loop is counted once in `total_weight`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UndirectedGraph {
    pub node_count: usize,

    /// Symmetric adjacency without self-loops
    pub adjacency: Adjacency,

    /// Self-loop weight per node
    pub self_loops: Vec<f64>,

    /// Sum of weights over undirected edges, each edge and loop counted once
    pub total_weight: f64,
}

impl UndirectedGraph {
    /// Build from undirected edges, summing the weights of repeated pairs
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        // Summed in input order; a projection fed in CSR order matches `WeightedGraph::total_weight` exactly
        let mut merged: BTreeMap<(usize, usize), f64> = BTreeMap::new();
        let mut total_weight = 0.0;
        for (u, v, weight) in edges {
            let key = if u <= v { (u, v) } else { (v, u) };
            *merged.entry(key).or_insert(0.0) += weight;
            total_weight += weight;
        }

        let mut rows: Vec<Vec<(u32, f64)>> = vec![Vec::new(); node_count];
        let mut self_loops = vec![0.0; node_count];

        for (&(u, v), &weight) in &merged {
            if u == v {
                self_loops[u] += weight;
            } else {
                rows[u].push((v as u32, weight));
                rows[v].push((u as u32, weight));
            }
        }

        Self {
            node_count,
            adjacency: Adjacency::from_rows(rows),
            self_loops,
            total_weight,
        }
    }

    /// Weighted degree `k_i`, with self-loops counted twice
    pub fn weighted_degree(&self, node: usize) -> f64 {
        self.adjacency.weight_sum(node) + 2.0 * self.self_loops[node]
    }

    /// `(neighbor, weight)` pairs excluding self-loops
    pub fn edges(&self, node: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.adjacency.edges(node)
    }

    /// Number of distinct undirected edges, loops included
    pub fn edge_count(&self) -> usize {
        self.adjacency.edge_count() / 2 + self.self_loops.iter().filter(|&&w| w != 0.0).count()
    }
}
