//! Degree centrality (unweighted counts normalized by `V - 1`)

use crate::centrality::ScoreVector;
use crate::graph::WeightedGraph;

fn normalized_counts<F>(graph: &WeightedGraph, count: F) -> ScoreVector
where
    F: Fn(usize) -> usize,
{
    let n = graph.node_count;
    if n <= 1 {
        return ScoreVector::zeros(n);
    }

    let norm = (n - 1) as f64;
    (0..n).map(|v| count(v) as f64 / norm).collect()
}

/// In-degree divided by `V - 1`
pub fn in_degree_centrality(graph: &WeightedGraph) -> ScoreVector {
    normalized_counts(graph, |v| graph.in_degree(v))
}

/// Out-degree divided by `V - 1`
pub fn out_degree_centrality(graph: &WeightedGraph) -> ScoreVector {
    normalized_counts(graph, |v| graph.out_degree(v))
}

/// Total degree (in + out) divided by `V - 1`
pub fn degree_centrality(graph: &WeightedGraph) -> ScoreVector {
    normalized_counts(graph, |v| graph.in_degree(v) + graph.out_degree(v))
}
