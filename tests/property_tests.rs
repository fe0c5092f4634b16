//! Property-based tests for the analytics engine.
//!
//! These tests check invariants that hold for any weighted directed graph:
//! - Every result covers each node exactly once
//! - PageRank mass is conserved
//! - Projection conserves edge weight
//! - Louvain never ends below the singleton partition

use proptest::prelude::*;
use std::collections::BTreeMap;

use congress_influence_analyzer::centrality::{
    betweenness_centrality, closeness_centrality, degree_centrality, in_degree_centrality,
    out_degree_centrality, pagerank,
};
use congress_influence_analyzer::cluster::{louvain, modularity, Partition};
use congress_influence_analyzer::graph::{build_from_adjacency, WeightedGraph};
use congress_influence_analyzer::viral::{viral_centrality, SpreadParams};

/// Weights in (0, 1], mixing exact binary fractions with decimals that are not
fn arb_weight() -> impl Strategy<Value = f64> {
    prop_oneof![
        (1u32..=64).prop_map(|k| k as f64 / 64.0),
        prop::sample::select(vec![0.1, 0.2, 0.3, 0.6, 0.7, 0.9]),
        (1u32..=100).prop_map(|k| k as f64 / 100.0),
    ]
}

/// Random graph with up to 12 nodes and no repeated ordered pairs
fn arb_graph() -> impl Strategy<Value = WeightedGraph> {
    (1usize..12)
        .prop_flat_map(|n| {
            prop::collection::vec(prop::collection::btree_map(0..n, arb_weight(), 0..n), n)
        })
        .prop_map(|rows: Vec<BTreeMap<usize, f64>>| {
            let labels: Vec<String> = (0..rows.len()).map(|i| format!("n{}", i)).collect();
            let out_list: Vec<Vec<usize>> = rows.iter().map(|r| r.keys().copied().collect()).collect();
            let out_weight: Vec<Vec<f64>> = rows.iter().map(|r| r.values().copied().collect()).collect();
            build_from_adjacency(&labels, &out_list, &out_weight).expect("generated graph is valid")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn scores_cover_every_node(g in arb_graph()) {
        let n = g.node_count;
        prop_assert_eq!(degree_centrality(&g).len(), n);
        prop_assert_eq!(betweenness_centrality(&g).len(), n);
        prop_assert_eq!(closeness_centrality(&g).len(), n);
        prop_assert_eq!(pagerank(&g, 0.85, 1000, 1e-9).unwrap().len(), n);

        let params = SpreadParams { max_rounds: Some(200), ..SpreadParams::default() };
        let viral = viral_centrality(&g, &params).unwrap();
        prop_assert_eq!(viral.len(), n);
        for &score in viral.iter() {
            prop_assert!(score >= 1.0 && score <= n as f64 + 1e-9);
        }
    }

    #[test]
    fn pagerank_sums_to_one(g in arb_graph()) {
        let pr = pagerank(&g, 0.85, 1000, 1e-9).unwrap();
        prop_assert!((pr.sum() - 1.0).abs() < 1e-6, "sum = {}", pr.sum());
    }

    #[test]
    fn total_degree_is_in_plus_out(g in arb_graph()) {
        prop_assume!(g.node_count >= 2);
        let norm = (g.node_count - 1) as f64;
        let total = degree_centrality(&g);
        let inc = in_degree_centrality(&g);
        let out = out_degree_centrality(&g);

        for v in 0..g.node_count {
            let expected = (g.out_degree(v) + g.in_degree(v)) as f64 / norm;
            prop_assert_eq!(total[v], expected);
            prop_assert_eq!(inc[v], g.in_degree(v) as f64 / norm);
            prop_assert_eq!(out[v], g.out_degree(v) as f64 / norm);
        }
    }

    #[test]
    fn projection_conserves_weight(g in arb_graph()) {
        let projection = g.undirected_projection();
        prop_assert_eq!(projection.total_weight, g.total_weight());

        let row_mass: f64 = (0..projection.node_count)
            .map(|v| projection.weighted_degree(v))
            .sum();
        prop_assert!((row_mass - 2.0 * g.total_weight()).abs() < 1e-9);
    }

    #[test]
    fn louvain_partition_is_complete_and_improving(g in arb_graph()) {
        let projection = g.undirected_projection();
        let result = louvain(&projection);

        prop_assert_eq!(result.partition.len(), g.node_count);
        prop_assert_eq!(result.partition.sizes().iter().sum::<usize>(), g.node_count);
        prop_assert!(result.partition.assignment().iter().all(|&c| c < result.partition.community_count()));

        let singleton_q = modularity(&projection, &Partition::singletons(g.node_count));
        prop_assert!(result.modularity >= singleton_q - 1e-12);
    }

    #[test]
    fn zero_beta_activates_only_the_seed(g in arb_graph()) {
        let params = SpreadParams { beta: 0.0, ..SpreadParams::default() };
        let viral = viral_centrality(&g, &params).unwrap();
        prop_assert!(viral.iter().all(|&s| s == 1.0));
    }
}
