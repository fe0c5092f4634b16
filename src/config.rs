//! Configuration management for the influence analyzer

use serde::{Serialize, Deserialize};
use crate::viral::SpreadParams;

/// Tunables for every analysis stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PageRank damping factor
    pub damping: f64,

    /// Iteration cap for PageRank
    pub pagerank_max_iter: usize,

    /// Iteration cap for eigenvector centrality
    pub eigenvector_max_iter: usize,

    /// L1 tolerance for the power iterations
    pub tolerance: f64,

    /// Transmission probability scaling factor for viral spread
    pub viral_beta: f64,

    /// L1 tolerance for viral spread
    pub viral_tolerance: f64,

    /// Round cap for viral spread; `None` runs to convergence
    pub viral_max_rounds: Option<usize>,

    /// Entries kept in each ranked list
    pub top_n: usize,

    /// Members listed per community summary
    pub community_top_k: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: 0.85,
            pagerank_max_iter: 100,
            eigenvector_max_iter: 1000,
            tolerance: 1e-6,
            viral_beta: 1.0,
            viral_tolerance: 0.001,
            viral_max_rounds: None,
            top_n: 10,
            community_top_k: 5,
        }
    }
}

impl Config {
    /// Interpret a signed round cap, where any value `<= 0` means uncapped
    pub fn with_viral_round_cap(mut self, rounds: i64) -> Self {
        self.viral_max_rounds = if rounds > 0 { Some(rounds as usize) } else { None };
        self
    }

    /// Parameters for the viral spread model
    pub fn spread_params(&self) -> SpreadParams {
        SpreadParams {
            beta: self.viral_beta,
            tolerance: self.viral_tolerance,
            max_rounds: self.viral_max_rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cap_sentinel() {
        assert_eq!(Config::default().with_viral_round_cap(-1).viral_max_rounds, None);
        assert_eq!(Config::default().with_viral_round_cap(0).viral_max_rounds, None);
        assert_eq!(Config::default().with_viral_round_cap(25).viral_max_rounds, Some(25));
    }

    #[test]
    fn test_spread_params_follow_config() {
        let config = Config { viral_beta: 0.5, ..Config::default() }.with_viral_round_cap(3);
        let params = config.spread_params();
        assert_eq!(params.beta, 0.5);
        assert_eq!(params.tolerance, 0.001);
        assert_eq!(params.max_rounds, Some(3));
    }
}
