//! Centrality measures
//!
//! Every measure returns a [`ScoreVector`] with one entry per node.

pub mod degree;
pub mod paths;
pub mod spectral;
pub mod combined;

use std::ops::Index;
use itertools::Itertools;
use serde::{Serialize, Deserialize};
use crate::config::Config;
use crate::error::ConvergenceError;
use crate::graph::WeightedGraph;

pub use degree::{degree_centrality, in_degree_centrality, out_degree_centrality};
pub use paths::{betweenness_centrality, closeness_centrality};
pub use spectral::{eigenvector_centrality, pagerank};
pub use combined::combined_score;

/// Per-node scalar scores, indexed by node id
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        Self(scores)
    }

    pub fn zeros(node_count: usize) -> Self {
        Self(vec![0.0; node_count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Largest score, or `None` for an empty vector
    pub fn max(&self) -> Option<f64> {
        self.0.iter().copied().max_by(|a, b| a.total_cmp(b))
    }

    /// Node ids by descending score; equal scores keep ascending id order
    pub fn ranking(&self) -> Vec<usize> {
        (0..self.0.len())
            .sorted_by(|&a, &b| self.0[b].total_cmp(&self.0[a]))
            .collect()
    }

    /// The `n` highest `(node, score)` pairs
    pub fn top(&self, n: usize) -> Vec<(usize, f64)> {
        self.ranking()
            .into_iter()
            .take(n)
            .map(|node| (node, self.0[node]))
            .collect()
    }
}

impl Index<usize> for ScoreVector {
    type Output = f64;

    fn index(&self, node: usize) -> &f64 {
        &self.0[node]
    }
}

impl From<Vec<f64>> for ScoreVector {
    fn from(scores: Vec<f64>) -> Self {
        Self(scores)
    }
}

impl FromIterator<f64> for ScoreVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// All centrality measures for one graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralityReport {
    pub degree: ScoreVector,
    pub in_degree: ScoreVector,
    pub out_degree: ScoreVector,
    pub betweenness: ScoreVector,
    pub closeness: ScoreVector,
    pub eigenvector: ScoreVector,
    pub pagerank: ScoreVector,

    /// Sum of the measures above, scaled so the top node is 1.0
    pub combined: ScoreVector,
}

impl CentralityReport {
    /// Compute every measure with the given configuration
    pub fn compute(graph: &WeightedGraph, config: &Config) -> Result<Self, ConvergenceError> {
        log::info!("Calculating centrality measures for {} nodes", graph.node_count);

        let degree = degree_centrality(graph);
        let in_degree = in_degree_centrality(graph);
        let out_degree = out_degree_centrality(graph);

        log::info!("Calculating betweenness centrality");
        let betweenness = betweenness_centrality(graph);

        log::info!("Calculating closeness centrality");
        let closeness = closeness_centrality(graph);

        log::info!("Calculating eigenvector centrality");
        let eigenvector = eigenvector_centrality(graph, config.eigenvector_max_iter, config.tolerance)?;

        log::info!("Calculating PageRank");
        let pagerank = pagerank(graph, config.damping, config.pagerank_max_iter, config.tolerance)?;

        let combined = combined_score(&[
            &degree,
            &in_degree,
            &out_degree,
            &betweenness,
            &closeness,
            &eigenvector,
            &pagerank,
        ]);

        Ok(Self {
            degree,
            in_degree,
            out_degree,
            betweenness,
            closeness,
            eigenvector,
            pagerank,
            combined,
        })
    }

    /// Individual measures with display names, in report order
    pub fn measures(&self) -> [(&'static str, &ScoreVector); 7] {
        [
            ("Degree", &self.degree),
            ("In-Degree", &self.in_degree),
            ("Out-Degree", &self.out_degree),
            ("Betweenness", &self.betweenness),
            ("Closeness", &self.closeness),
            ("Eigenvector", &self.eigenvector),
            ("PageRank", &self.pagerank),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_breaks_ties_by_node_id() {
        let scores = ScoreVector::new(vec![0.2, 0.9, 0.2, 0.9, 0.1]);
        assert_eq!(scores.ranking(), vec![1, 3, 0, 2, 4]);
        assert_eq!(scores.top(2), vec![(1, 0.9), (3, 0.9)]);
        assert_eq!(scores.top(10).len(), 5);
    }

    #[test]
    fn test_score_vector_basics() {
        let scores: ScoreVector = vec![1.0, 3.0, 2.0].into_iter().collect();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[1], 3.0);
        assert_eq!(scores.max(), Some(3.0));
        assert_eq!(scores.sum(), 6.0);
        assert_eq!(ScoreVector::zeros(0).max(), None);
    }
}
