//! Graph construction and validation

use std::collections::HashMap;
use crate::error::MalformedGraphError;
use crate::graph::compressed::{Adjacency, WeightedGraph};

/// Builder for incrementally constructing a WeightedGraph
pub struct GraphBuilder {
    /// Number of nodes
    node_count: usize,

    /// Mapping from labels to node indices
    label_to_index: HashMap<String, u32>,

    /// Node labels
    labels: Vec<String>,

    /// Edges in insertion order: (source, target, weight)
    edges: Vec<(usize, usize, f64)>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            node_count: 0,
            label_to_index: HashMap::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
            edges: Vec::new(),
        }
    }

    /// Append a node and return its id.
    ///
    /// Labels are opaque; adding the same label twice creates two nodes, so
    /// ids stay aligned with the position in the input label list.
    pub fn add_node(&mut self, label: &str) -> u32 {
        let idx = self.node_count as u32;
        self.label_to_index.entry(label.to_string()).or_insert(idx);
        self.labels.push(label.to_string());
        self.node_count += 1;
        idx
    }

    /// Get the node for a label, creating it if needed
    pub fn get_or_create_node(&mut self, label: &str) -> u32 {
        if let Some(&idx) = self.label_to_index.get(label) {
            return idx;
        }
        self.add_node(label)
    }

    /// Add an edge by node id. Validation happens in `build`.
    pub fn add_edge(&mut self, src: usize, dst: usize, weight: f64) {
        self.edges.push((src, dst, weight));
    }

    /// Add an edge by label, creating missing nodes
    pub fn add_labeled_edge(&mut self, src: &str, dst: &str, weight: f64) {
        let src_idx = self.get_or_create_node(src) as usize;
        let dst_idx = self.get_or_create_node(dst) as usize;
        self.add_edge(src_idx, dst_idx, weight);
    }

    /// Validate every edge and build both adjacency views
    pub fn build(self) -> Result<WeightedGraph, MalformedGraphError> {
        let node_count = self.node_count;

        let mut out_rows: Vec<Vec<(u32, f64)>> = vec![Vec::new(); node_count];
        let mut in_rows: Vec<Vec<(u32, f64)>> = vec![Vec::new(); node_count];

        for &(src, dst, weight) in &self.edges {
            if src >= node_count || dst >= node_count {
                return Err(MalformedGraphError::NodeOutOfRange { src, dst, node_count });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(MalformedGraphError::InvalidWeight { src, dst, weight });
            }
            out_rows[src].push((dst as u32, weight));
            in_rows[dst].push((src as u32, weight));
        }

        let outgoing = Adjacency::from_rows(out_rows);
        let incoming = Adjacency::from_rows(in_rows);

        // Rows are sorted, so a repeated ordered pair shows up as adjacent targets
        for src in 0..node_count {
            if let Some(pair) = outgoing.neighbors(src).windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(MalformedGraphError::DuplicateEdge { src, dst: pair[0] as usize });
            }
        }

        log::debug!(
            "Built graph with {} nodes and {} edges",
            node_count,
            outgoing.edge_count()
        );

        Ok(WeightedGraph {
            node_count,
            labels: self.labels,
            outgoing,
            incoming,
        })
    }
}

/// Build a graph from parallel per-node arrays of targets and weights.
///
/// Node `i` is labelled `labels[i]`; `out_list[i][j]` is a target of `i` with
/// weight `out_weight[i][j]`.
pub fn build_from_adjacency(
    labels: &[String],
    out_list: &[Vec<usize>],
    out_weight: &[Vec<f64>],
) -> Result<WeightedGraph, MalformedGraphError> {
    let node_count = labels.len();

    if out_list.len() != node_count {
        return Err(MalformedGraphError::LengthMismatch {
            array: "outList",
            expected: node_count,
            found: out_list.len(),
        });
    }
    if out_weight.len() != node_count {
        return Err(MalformedGraphError::LengthMismatch {
            array: "outWeight",
            expected: node_count,
            found: out_weight.len(),
        });
    }

    let edge_count: usize = out_list.iter().map(|row| row.len()).sum();
    let mut builder = GraphBuilder::with_capacity(node_count);
    builder.edges.reserve(edge_count);

    for label in labels {
        builder.add_node(label);
    }

    for (src, (targets, weights)) in out_list.iter().zip(out_weight).enumerate() {
        if targets.len() != weights.len() {
            return Err(MalformedGraphError::RowLengthMismatch {
                node: src,
                targets: targets.len(),
                weights: weights.len(),
            });
        }
        for (&dst, &weight) in targets.iter().zip(weights) {
            builder.add_edge(src, dst, weight);
        }
    }

    builder.build()
}
