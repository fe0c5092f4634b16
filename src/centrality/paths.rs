//! Shortest-path based centrality: betweenness and closeness
//!
//! Both use edge weight directly as the traversal cost.

use rayon::prelude::*;
use crate::centrality::ScoreVector;
use crate::graph::{shortest_path_tree, ShortestPathTree, WeightedGraph};

/// Dependency of `tree.source` on every other node (Brandes back-propagation)
fn source_dependencies(tree: &ShortestPathTree, node_count: usize) -> Vec<f64> {
    let mut delta = vec![0.0; node_count];
    let mut contribution = vec![0.0; node_count];

    for &w in tree.order.iter().rev() {
        let sigma_w = tree.sigma[w];
        if sigma_w > 0.0 {
            for &v in &tree.predecessors[w] {
                delta[v] += (tree.sigma[v] / sigma_w) * (1.0 + delta[w]);
            }
        }
        if w != tree.source {
            contribution[w] = delta[w];
        }
    }

    contribution
}

/// Weighted betweenness centrality (Brandes).
///
/// Raw accumulation over ordered pairs, no normalization. Sources run in
/// parallel and their dependency vectors are summed afterwards.
pub fn betweenness_centrality(graph: &WeightedGraph) -> ScoreVector {
    let n = graph.node_count;
    if n == 0 {
        return ScoreVector::zeros(0);
    }

    let centrality = (0..n)
        .into_par_iter()
        .map(|source| source_dependencies(&shortest_path_tree(graph, source), n))
        .reduce(
            || vec![0.0; n],
            |mut acc, partial| {
                for (total, score) in acc.iter_mut().zip(partial) {
                    *total += score;
                }
                acc
            },
        );

    ScoreVector::new(centrality)
}

/// Closeness from one tree with the Wasserman–Faust correction
fn closeness_from_tree(tree: &ShortestPathTree, node_count: usize) -> f64 {
    let total = tree.distance_sum();
    if node_count <= 1 || total <= 0.0 {
        return 0.0;
    }

    let others = (tree.reachable_count() - 1) as f64;
    (others / total) * (others / (node_count - 1) as f64)
}

/// Weighted closeness centrality over outward distances.
///
/// Unreachable nodes are left out of the distance sum; the result is scaled
/// by the reachable fraction so nodes in small components are penalized.
pub fn closeness_centrality(graph: &WeightedGraph) -> ScoreVector {
    let n = graph.node_count;

    let scores: Vec<f64> = (0..n)
        .into_par_iter()
        .map(|v| closeness_from_tree(&shortest_path_tree(graph, v), n))
        .collect();

    ScoreVector::new(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_from_adjacency;

    fn graph(out_list: &[Vec<usize>], out_weight: &[Vec<f64>]) -> WeightedGraph {
        let labels: Vec<String> = (0..out_list.len()).map(|i| i.to_string()).collect();
        build_from_adjacency(&labels, out_list, out_weight).unwrap()
    }

    #[test]
    fn test_betweenness_directed_path() {
        // 0 -> 1 -> 2 -> 3
        let g = graph(
            &[vec![1], vec![2], vec![3], vec![]],
            &[vec![1.0], vec![1.0], vec![1.0], vec![]],
        );
        let bc = betweenness_centrality(&g);

        // 1 lies on (0,2) and (0,3); 2 lies on (0,3) and (1,3)
        assert_eq!(bc.as_slice(), &[0.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_betweenness_splits_equal_paths() {
        // Two equal-cost routes from 0 to 3
        let g = graph(
            &[vec![1, 2], vec![3], vec![3], vec![]],
            &[vec![0.5, 0.5], vec![0.5], vec![0.5], vec![]],
        );
        let bc = betweenness_centrality(&g);

        assert_eq!(bc[1], 0.5);
        assert_eq!(bc[2], 0.5);
        assert_eq!(bc[0], 0.0);
    }

    #[test]
    fn test_betweenness_prefers_cheaper_route() {
        // Direct edge 0 -> 2 costs more than going through 1
        let g = graph(
            &[vec![1, 2], vec![2], vec![]],
            &[vec![0.1, 0.9], vec![0.1], vec![]],
        );
        let bc = betweenness_centrality(&g);
        assert_eq!(bc[1], 1.0);
    }

    #[test]
    fn test_betweenness_counts_zero_weight_detour() {
        // 0 -> 1 and 0 -> 2 -> 1 tie at cost 0, so 2 carries half of (0, 1)
        let g = graph(&[vec![1, 2], vec![], vec![1]], &[vec![0.0, 0.0], vec![], vec![0.0]]);
        let bc = betweenness_centrality(&g);
        assert_eq!(bc.as_slice(), &[0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_closeness_with_unreachable_nodes() {
        // 0 -> 1 (0.5), 0 -> 2 (1.0); node 3 isolated
        let g = graph(
            &[vec![1, 2], vec![], vec![], vec![]],
            &[vec![0.5, 1.0], vec![], vec![], vec![]],
        );
        let cc = closeness_centrality(&g);

        // Two reachable others at total distance 1.5, scaled by 2/3
        let expected = (2.0 / 1.5) * (2.0 / 3.0);
        assert!((cc[0] - expected).abs() < 1e-12);
        assert_eq!(cc[1], 0.0);
        assert_eq!(cc[3], 0.0);
    }

    #[test]
    fn test_empty_graph() {
        let g = graph(&[], &[]);
        assert!(betweenness_centrality(&g).is_empty());
        assert!(closeness_centrality(&g).is_empty());
    }
}
