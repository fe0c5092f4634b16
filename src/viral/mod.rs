//! Viral centrality: expected spread of an independent cascade
//!
//! Each node is seeded on its own and activation probabilities are iterated
//! until they settle. A node's score is the expected number of activated
//! nodes, itself included.

use rayon::prelude::*;
use serde::{Serialize, Deserialize};
use crate::centrality::ScoreVector;
use crate::error::{ConvergenceError, EngineError, IterativeMeasure, MalformedGraphError};
use crate::graph::WeightedGraph;

/// Round ceiling for uncapped runs
pub const SAFETY_ROUND_LIMIT: usize = 10_000;

/// Parameters of the spread model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadParams {
    /// Scaling factor applied to every transmission probability
    pub beta: f64,

    /// Stop when the L1 change of the activation vector drops below this
    pub tolerance: f64,

    /// Stop after this many rounds; `None` runs until convergence
    pub max_rounds: Option<usize>,
}

impl Default for SpreadParams {
    fn default() -> Self {
        Self {
            beta: 1.0,
            tolerance: 0.001,
            max_rounds: None,
        }
    }
}

/// Activation state after spreading from one seed
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadOutcome {
    pub seed: usize,

    /// Activation probability of every node
    pub activation: Vec<f64>,

    /// Rounds performed
    pub rounds: usize,
}

impl SpreadOutcome {
    /// Expected number of activated nodes
    pub fn expected_activated(&self) -> f64 {
        self.activation.iter().sum()
    }
}

/// Reject parameters and weights that are not usable as probabilities
pub fn validate(graph: &WeightedGraph, params: &SpreadParams) -> Result<(), MalformedGraphError> {
    if !params.beta.is_finite() || params.beta < 0.0 {
        return Err(MalformedGraphError::InvalidParameter { name: "beta", value: params.beta });
    }
    // Convergence needs a strictly positive tolerance
    if !params.tolerance.is_finite() || params.tolerance <= 0.0 {
        return Err(MalformedGraphError::InvalidParameter {
            name: "tolerance",
            value: params.tolerance,
        });
    }
    if params.max_rounds == Some(0) {
        return Err(MalformedGraphError::InvalidParameter { name: "max_rounds", value: 0.0 });
    }

    for src in 0..graph.node_count {
        for (dst, weight) in graph.out_edges(src) {
            if !(0.0..=1.0).contains(&weight) {
                return Err(MalformedGraphError::ProbabilityOutOfRange { src, dst, weight });
            }
        }
    }

    Ok(())
}

/// One round: every active node tries each out-neighbor independently.
///
/// Reads `current`, writes `next`. The seed stays fully active.
fn spread_round(graph: &WeightedGraph, seed: usize, beta: f64, current: &[f64], next: &mut [f64]) {
    next.fill(1.0);

    for (u, &p_u) in current.iter().enumerate() {
        if p_u <= 0.0 {
            continue;
        }
        for (v, weight) in graph.out_edges(u) {
            next[v] *= (1.0 - beta * p_u * weight).max(0.0);
        }
    }

    for p in next.iter_mut() {
        *p = 1.0 - *p;
    }
    next[seed] = 1.0;
}

/// Spread from a single seed without re-validating the graph
fn spread_unchecked(
    graph: &WeightedGraph,
    seed: usize,
    params: &SpreadParams,
) -> Result<SpreadOutcome, ConvergenceError> {
    spread_with_ceiling(graph, seed, params, SAFETY_ROUND_LIMIT)
}

/// Run rounds until convergence, the caller's cap, or `ceiling` for uncapped runs
fn spread_with_ceiling(
    graph: &WeightedGraph,
    seed: usize,
    params: &SpreadParams,
    ceiling: usize,
) -> Result<SpreadOutcome, ConvergenceError> {
    let n = graph.node_count;
    let mut activation = vec![0.0; n];
    let mut next = vec![0.0; n];
    activation[seed] = 1.0;

    let limit = params.max_rounds.unwrap_or(ceiling);
    let mut rounds = 0;

    loop {
        spread_round(graph, seed, params.beta, &activation, &mut next);
        rounds += 1;

        let change: f64 = activation.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut activation, &mut next);

        if change < params.tolerance {
            break;
        }
        if rounds >= limit {
            if params.max_rounds.is_some() {
                break;
            }
            return Err(ConvergenceError {
                measure: IterativeMeasure::ViralSpread { seed },
                iterations: rounds,
                last_change: change,
                partial: activation,
            });
        }
    }

    Ok(SpreadOutcome { seed, activation, rounds })
}

/// Run the cascade from one seed
pub fn spread_from_seed(
    graph: &WeightedGraph,
    seed: usize,
    params: &SpreadParams,
) -> Result<SpreadOutcome, EngineError> {
    if seed >= graph.node_count {
        return Err(MalformedGraphError::NodeOutOfRange {
            src: seed,
            dst: seed,
            node_count: graph.node_count,
        }
        .into());
    }
    validate(graph, params)?;

    Ok(spread_unchecked(graph, seed, params)?)
}

/// Viral centrality of every node.
///
/// Seeds are independent and run in parallel, each on private vectors.
pub fn viral_centrality(graph: &WeightedGraph, params: &SpreadParams) -> Result<ScoreVector, EngineError> {
    validate(graph, params)?;
    log::info!(
        "Computing viral centrality for {} seeds (beta = {}, tolerance = {})",
        graph.node_count,
        params.beta,
        params.tolerance
    );

    let outcomes: Vec<SpreadOutcome> = (0..graph.node_count)
        .into_par_iter()
        .map(|seed| spread_unchecked(graph, seed, params))
        .collect::<Result<_, _>>()?;

    let max_rounds = outcomes.iter().map(|o| o.rounds).max().unwrap_or(0);
    log::debug!("Longest cascade took {} rounds", max_rounds);

    Ok(outcomes.iter().map(SpreadOutcome::expected_activated).collect())
}
