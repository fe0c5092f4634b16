//! Partition quality and community statistics

use std::collections::HashSet;
use rayon::prelude::*;
use crate::cluster::{Community, Partition};
use crate::graph::{UndirectedGraph, WeightedGraph};

/// Newman modularity of a partition.
///
/// `Q = Σ_c [ in_c / m - (tot_c / 2m)^2 ]` where `in_c` is the edge weight
/// inside community `c` (self-loops included once) and `tot_c` the summed
/// weighted degree of its members. A graph without edge weight scores 0.
pub fn modularity(graph: &UndirectedGraph, partition: &Partition) -> f64 {
    debug_assert_eq!(graph.node_count, partition.len());

    let m = graph.total_weight;
    if m <= 0.0 {
        return 0.0;
    }

    let count = partition.community_count();
    let mut inside = vec![0.0; count];
    let mut total = vec![0.0; count];

    for u in 0..graph.node_count {
        let cu = partition.community_of(u);
        total[cu] += graph.weighted_degree(u);
        inside[cu] += graph.self_loops[u];

        for (v, weight) in graph.edges(u) {
            if u < v && partition.community_of(v) == cu {
                inside[cu] += weight;
            }
        }
    }

    let two_m = 2.0 * m;
    inside
        .iter()
        .zip(&total)
        .map(|(&in_c, &tot_c)| in_c / m - (tot_c / two_m).powi(2))
        .sum()
}

/// Calculate density (actual edges / potential edges)
pub fn calculate_density(graph: &WeightedGraph, members: &[usize]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton communities have density 1
    }

    // Potential edges = n * (n - 1) for directed graph
    let potential_edges = n * (n - 1);

    let member_set: HashSet<usize> = members.iter().copied().collect();
    let actual_edges: usize = members
        .iter()
        .map(|&src| {
            graph
                .out_edges(src)
                .filter(|(dst, _)| *dst != src && member_set.contains(dst))
                .count()
        })
        .sum();

    actual_edges as f64 / potential_edges as f64
}

/// Total degree (in + out) in the directed graph
fn total_degree(graph: &WeightedGraph, node: usize) -> usize {
    graph.in_degree(node) + graph.out_degree(node)
}

/// Describe every community of a partition.
///
/// Reports size, directed density, average member degree and the `top_k`
/// highest-degree members. Communities come back largest first; equal sizes
/// keep ascending community id.
pub fn summarize_communities(
    graph: &WeightedGraph,
    partition: &Partition,
    top_k: usize,
) -> Vec<Community> {
    log::info!("Summarizing {} communities", partition.community_count());

    let mut communities: Vec<Community> = partition
        .members()
        .into_par_iter()
        .enumerate()
        .map(|(id, members)| {
            let degrees: Vec<usize> = members.iter().map(|&v| total_degree(graph, v)).collect();
            let average_degree = if members.is_empty() {
                0.0
            } else {
                degrees.iter().sum::<usize>() as f64 / members.len() as f64
            };

            let mut by_degree: Vec<(usize, usize)> = members.iter().copied().zip(degrees).collect();
            by_degree.sort_by(|a, b| b.1.cmp(&a.1)); // stable, so ties keep ascending id
            let central_members = by_degree.iter().take(top_k).map(|&(node, _)| node).collect();

            Community {
                id,
                size: members.len(),
                density: calculate_density(graph, &members),
                average_degree,
                central_members,
                members,
            }
        })
        .collect();

    communities.sort_by(|a, b| b.size.cmp(&a.size));
    communities
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_from_adjacency;

    #[test]
    fn test_modularity_singletons_of_cycle() {
        // 4-cycle with unit weights: every community is a lone node of degree 2
        let g = UndirectedGraph::from_edges(4, vec![(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 0, 1.0)]);
        let q = modularity(&g, &Partition::singletons(4));
        assert!((q + 0.25).abs() < 1e-12);

        let whole = modularity(&g, &Partition::from_assignment(&[0, 0, 0, 0]));
        assert!(whole.abs() < 1e-12);
    }

    #[test]
    fn test_modularity_matches_pairwise_formula() {
        let g = UndirectedGraph::from_edges(
            4,
            vec![(0, 1, 0.5), (1, 2, 0.25), (2, 3, 1.0), (0, 0, 0.5)],
        );
        let partition = Partition::from_assignment(&[0, 0, 1, 1]);

        // (1/2m) Σ_ij [A_ij - k_i k_j / 2m] δ(c_i, c_j), with A_ii = 2 * loop
        let n = g.node_count;
        let two_m = 2.0 * g.total_weight;
        let mut expected = 0.0;
        for i in 0..n {
            for j in 0..n {
                if partition.community_of(i) != partition.community_of(j) {
                    continue;
                }
                let a_ij = if i == j {
                    2.0 * g.self_loops[i]
                } else {
                    g.adjacency.weight_to(i, j).unwrap_or(0.0)
                };
                expected += a_ij - g.weighted_degree(i) * g.weighted_degree(j) / two_m;
            }
        }
        expected /= two_m;

        assert!((modularity(&g, &partition) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_summaries_sorted_by_size() {
        let labels: Vec<String> = (0..5).map(|i| format!("m{}", i)).collect();
        let g = build_from_adjacency(
            &labels,
            &[vec![1, 2], vec![0], vec![0], vec![4], vec![]],
            &[vec![0.5, 0.5], vec![0.5], vec![0.5], vec![0.5], vec![]],
        )
        .unwrap();
        let partition = Partition::from_assignment(&[1, 1, 1, 2, 2]);

        let summaries = summarize_communities(&g, &partition, 2);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, 0);
        assert_eq!(summaries[0].size, 3);
        assert_eq!(summaries[0].central_members, vec![0, 1]);
        assert!((summaries[0].density - 4.0 / 6.0).abs() < 1e-12);
        assert!((summaries[0].average_degree - 8.0 / 3.0).abs() < 1e-12);
        assert_eq!(summaries[1].members, vec![3, 4]);
        assert_eq!(summaries[1].density, 0.5);
    }
}
