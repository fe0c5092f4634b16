//! Rank-based centrality computed by power iteration: eigenvector and PageRank

use crate::centrality::ScoreVector;
use crate::error::{ConvergenceError, IterativeMeasure};
use crate::graph::WeightedGraph;

/// Kahan-compensated L1 distance between two vectors
fn l1_change(a: &[f64], b: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;

    for (ai, bi) in a.iter().zip(b) {
        let y = (ai - bi).abs() - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }

    sum
}

/// Weighted eigenvector centrality over incoming edges (left eigenvector).
///
/// Each step computes `x'[v] = x[v] + Σ_{u->v} w(u,v) x[u]` and L2-normalizes.
/// The identity shift keeps the dominant eigenvector but stops the iteration
/// from cycling on periodic graphs such as directed rings. A graph without
/// positive edge weight scores all zeros.
pub fn eigenvector_centrality(
    graph: &WeightedGraph,
    max_iter: usize,
    tol: f64,
) -> Result<ScoreVector, ConvergenceError> {
    let n = graph.node_count;
    // No edge weight to propagate; the shift alone would return a uniform vector
    if graph.total_weight() <= 0.0 {
        return Ok(ScoreVector::zeros(n));
    }

    let mut x = vec![1.0 / n as f64; n];
    let mut x_new = vec![0.0; n];
    let mut change = f64::INFINITY;

    for _ in 0..max_iter {
        for v in 0..n {
            x_new[v] = x[v] + graph.in_edges(v).map(|(u, w)| w * x[u]).sum::<f64>();
        }

        let norm = x_new.iter().map(|val| val * val).sum::<f64>().sqrt();
        for val in &mut x_new {
            *val /= norm;
        }

        change = l1_change(&x, &x_new);
        std::mem::swap(&mut x, &mut x_new);

        if change < tol {
            return Ok(ScoreVector::new(x));
        }
    }

    Err(ConvergenceError {
        measure: IterativeMeasure::Eigenvector,
        iterations: max_iter,
        last_change: change,
        partial: x,
    })
}

/// Weighted PageRank with uniform teleportation.
///
/// Mass from dangling nodes (zero total out-weight) is spread evenly over
/// every node, so the scores always sum to one.
pub fn pagerank(
    graph: &WeightedGraph,
    damping: f64,
    max_iter: usize,
    tol: f64,
) -> Result<ScoreVector, ConvergenceError> {
    let n = graph.node_count;
    if n == 0 {
        return Ok(ScoreVector::zeros(0));
    }

    let uniform = 1.0 / n as f64;
    let out_weight: Vec<f64> = (0..n).map(|u| graph.out_weight_sum(u)).collect();

    let mut ranks = vec![uniform; n];
    let mut new_ranks = vec![0.0; n];
    let mut change = f64::INFINITY;

    for _ in 0..max_iter {
        let dangling_sum: f64 = (0..n)
            .filter(|&u| out_weight[u] <= 0.0)
            .map(|u| ranks[u])
            .sum();
        let base = (1.0 - damping) * uniform + damping * dangling_sum * uniform;

        for v in 0..n {
            let inflow: f64 = graph
                .in_edges(v)
                .filter(|&(u, _)| out_weight[u] > 0.0)
                .map(|(u, w)| w / out_weight[u] * ranks[u])
                .sum();
            new_ranks[v] = base + damping * inflow;
        }

        change = l1_change(&ranks, &new_ranks);
        std::mem::swap(&mut ranks, &mut new_ranks);

        if change < tol {
            return Ok(ScoreVector::new(ranks));
        }
    }

    Err(ConvergenceError {
        measure: IterativeMeasure::PageRank,
        iterations: max_iter,
        last_change: change,
        partial: ranks,
    })
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
    fn test_pagerank_with_dangling_node_sums_to_one() {
        // Node 2 has no outgoing edges
        let g = graph(
            &[vec![1, 2], vec![2], vec![]],
            &[vec![0.3, 0.1], vec![0.7], vec![]],
        );
        let pr = pagerank(&g, 0.85, 100, 1e-10).unwrap();

        assert!((pr.sum() - 1.0).abs() < 1e-6);
        assert!(pr[2] > pr[1]);
        assert!(pr[1] > pr[0]);
    }

    #[test]
    fn test_pagerank_uses_edge_weights() {
        // 0 sends three times as much weight to 2 as to 1
        let g = graph(
            &[vec![1, 2], vec![0], vec![0]],
            &[vec![0.25, 0.75], vec![1.0], vec![1.0]],
        );
        let pr = pagerank(&g, 0.85, 100, 1e-10).unwrap();
        assert!(pr[2] > pr[1]);
    }

    #[test]
    fn test_pagerank_reports_non_convergence() {
        let g = graph(&[vec![1], vec![]], &[vec![1.0], vec![]]);
        let err = pagerank(&g, 0.85, 1, 1e-12).unwrap_err();

        assert_eq!(err.measure, IterativeMeasure::PageRank);
        assert_eq!(err.iterations, 1);
        assert_eq!(err.partial.len(), 2);
    }

    #[test]
    fn test_eigenvector_no_edges_is_zero() {
        let g = graph(&[vec![], vec![]], &[vec![], vec![]]);
        let ec = eigenvector_centrality(&g, 1000, 1e-6).unwrap();
        assert_eq!(ec.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_eigenvector_zero_weight_edges_is_zero() {
        let g = graph(&[vec![1], vec![0]], &[vec![0.0], vec![0.0]]);
        let ec = eigenvector_centrality(&g, 1000, 1e-6).unwrap();
        assert_eq!(ec.as_slice(), &[0.0, 0.0]);
    }

    #[test]
    fn test_eigenvector_favors_heavily_pointed_node() {
        // Everyone points at 0; 0 points back weakly at 1
        let g = graph(
            &[vec![1], vec![0], vec![0], vec![0]],
            &[vec![0.1], vec![0.9], vec![0.9], vec![0.9]],
        );
        let ec = eigenvector_centrality(&g, 1000, 1e-9).unwrap();

        let norm: f64 = ec.iter().map(|x| x * x).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
        assert_eq!(ec.ranking()[0], 0);
        assert!(ec[1] > ec[2]);
        assert!((ec[2] - ec[3]).abs() < 1e-12);
    }

    #[test]
    fn test_eigenvector_reports_non_convergence() {
        let g = graph(
            &[vec![1], vec![0], vec![0]],
            &[vec![0.5], vec![0.5], vec![0.5]],
        );
        let err = eigenvector_centrality(&g, 2, 1e-15).unwrap_err();
        assert_eq!(err.measure, IterativeMeasure::Eigenvector);
        assert_eq!(err.partial.len(), 3);
    }
}
