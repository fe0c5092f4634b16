//! Louvain community detection on the undirected projection

use std::borrow::Cow;
use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};
use crate::cluster::metrics::modularity;
use crate::cluster::Partition;
use crate::graph::UndirectedGraph;

/// Smallest gain that counts as an improvement
const MIN_GAIN: f64 = 1e-12;

/// Result of community detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityDetection {
    /// Final community of every original node
    pub partition: Partition,

    /// Modularity of `partition`
    pub modularity: f64,

    /// Number of aggregation levels that improved modularity
    pub levels: usize,
}

/// Greedy local moving on one level.
///
/// Returns dense community labels for the level's nodes, or `None` when no
/// node could improve modularity by moving.
fn local_moving(graph: &UndirectedGraph) -> Option<(Vec<usize>, usize)> {
    let n = graph.node_count;
    let two_m = 2.0 * graph.total_weight;

    let degree: Vec<f64> = (0..n).map(|v| graph.weighted_degree(v)).collect();
    let mut community: Vec<usize> = (0..n).collect();
    let mut total = degree.clone();
    let mut moved_any = false;
    let mut passes = 0;

    loop {
        let mut moved = false;
        passes += 1;

        for node in 0..n {
            let own = community[node];
            let k = degree[node];

            let mut links: BTreeMap<usize, f64> = BTreeMap::new();
            for (neighbor, weight) in graph.edges(node) {
                *links.entry(community[neighbor]).or_insert(0.0) += weight;
            }

            total[own] -= k;

            // Staying is the default; a candidate must beat it strictly.
            // Candidates are scanned by ascending id so the lowest id wins ties.
            let mut best = own;
            let mut best_gain = links.get(&own).copied().unwrap_or(0.0) - total[own] * k / two_m;
            for (&candidate, &weight) in &links {
                if candidate == own {
                    continue;
                }
                let gain = weight - total[candidate] * k / two_m;
                if gain > best_gain + MIN_GAIN {
                    best = candidate;
                    best_gain = gain;
                }
            }

            total[best] += k;
            if best != own {
                community[node] = best;
                moved = true;
            }
        }

        if !moved {
            break;
        }
        moved_any = true;
    }

    log::debug!("Local moving finished after {} passes", passes);

    if !moved_any {
        return None;
    }

    let dense = Partition::from_assignment(&community);
    Some((dense.assignment().to_vec(), dense.community_count()))
}

/// Collapse each community into one node, summing edge weights.
///
/// Weight inside a community becomes that node's self-loop.
fn aggregate(graph: &UndirectedGraph, community: &[usize], community_count: usize) -> UndirectedGraph {
    let mut edges = Vec::with_capacity(graph.adjacency.edge_count() / 2 + graph.node_count);

    for u in 0..graph.node_count {
        if graph.self_loops[u] != 0.0 {
            edges.push((community[u], community[u], graph.self_loops[u]));
        }
        for (v, weight) in graph.edges(u) {
            if u < v {
                edges.push((community[u], community[v], weight));
            }
        }
    }

    UndirectedGraph::from_edges(community_count, edges)
}

/// Detect communities by modularity optimization (Louvain).
///
/// Alternates local moving and aggregation until a level brings no move or no
/// modularity improvement. Nodes are visited in ascending id order, so the
/// result is deterministic. This is a greedy search; the partition is a local
/// optimum, not necessarily the global one.
pub fn louvain(graph: &UndirectedGraph) -> CommunityDetection {
    let n = graph.node_count;
    log::info!("Detecting communities on {} nodes", n);

    if graph.total_weight <= 0.0 {
        return CommunityDetection {
            partition: Partition::singletons(n),
            modularity: 0.0,
            levels: 0,
        };
    }

    // Community of every original node, expressed as a node id of `level_graph`
    let mut assignment: Vec<usize> = (0..n).collect();
    let mut best_modularity = modularity(graph, &Partition::singletons(n));
    let mut level_graph: Cow<'_, UndirectedGraph> = Cow::Borrowed(graph);
    let mut levels = 0;

    while let Some((community, community_count)) = local_moving(&level_graph) {
        let composed: Vec<usize> = assignment.iter().map(|&c| community[c]).collect();
        let q = modularity(graph, &Partition::from_assignment(&composed));

        if q - best_modularity <= MIN_GAIN {
            break;
        }

        levels += 1;
        log::debug!(
            "Level {}: {} communities, modularity {:.6}",
            levels,
            community_count,
            q
        );

        assignment = composed;
        best_modularity = q;
        level_graph = Cow::Owned(aggregate(&level_graph, &community, community_count));
    }

    let partition = Partition::from_assignment(&assignment);
    log::info!(
        "Found {} communities with modularity {:.4}",
        partition.community_count(),
        best_modularity
    );

    CommunityDetection {
        partition,
        modularity: best_modularity,
        levels,
    }
}
