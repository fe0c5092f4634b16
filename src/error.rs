//! Error types for the analytics engine

use thiserror::Error;

/// Structurally invalid graph input. Always fatal to the build step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedGraphError {
    /// A per-node array does not have one entry per node
    #[error("{array} has {found} rows but there are {expected} nodes")]
    LengthMismatch {
        array: &'static str,
        expected: usize,
        found: usize,
    },

    /// Target and weight rows of a node disagree in length
    #[error("node {node} has {targets} targets but {weights} weights")]
    RowLengthMismatch {
        node: usize,
        targets: usize,
        weights: usize,
    },

    #[error("edge {src} -> {dst} references a node outside 0..{node_count}")]
    NodeOutOfRange {
        src: usize,
        dst: usize,
        node_count: usize,
    },

    #[error("edge {src} -> {dst} has invalid weight {weight}")]
    InvalidWeight {
        src: usize,
        dst: usize,
        weight: f64,
    },

    #[error("edge {src} -> {dst} appears more than once")]
    DuplicateEdge { src: usize, dst: usize },

    /// Weight cannot be read as a transmission probability
    #[error("edge {src} -> {dst} weight {weight} is not a probability in [0, 1]")]
    ProbabilityOutOfRange {
        src: usize,
        dst: usize,
        weight: f64,
    },

    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Iterative measure that can fail to converge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterativeMeasure {
    Eigenvector,
    PageRank,
    ViralSpread { seed: usize },
}

impl std::fmt::Display for IterativeMeasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IterativeMeasure::Eigenvector => write!(f, "eigenvector centrality"),
            IterativeMeasure::PageRank => write!(f, "PageRank"),
            IterativeMeasure::ViralSpread { seed } => write!(f, "viral spread from seed {}", seed),
        }
    }
}

/// An iterative algorithm hit its iteration ceiling before meeting tolerance.
///
/// `partial` holds the last working vector so callers can inspect how far
/// the iteration got before deciding whether to retry with a larger cap.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{measure} did not converge after {iterations} iterations (last change {last_change:e})")]
pub struct ConvergenceError {
    pub measure: IterativeMeasure,
    pub iterations: usize,
    pub last_change: f64,
    pub partial: Vec<f64>,
}

/// Any failure the engine can surface
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Malformed(#[from] MalformedGraphError),

    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_message_names_measure() {
        let err = ConvergenceError {
            measure: IterativeMeasure::ViralSpread { seed: 7 },
            iterations: 10,
            last_change: 0.5,
            partial: vec![1.0, 0.5],
        };
        let msg = err.to_string();
        assert!(msg.contains("seed 7"), "{}", msg);
        assert!(msg.contains("10 iterations"), "{}", msg);
    }

    #[test]
    fn test_engine_error_from_malformed() {
        let err: EngineError = MalformedGraphError::DuplicateEdge { src: 1, dst: 2 }.into();
        assert!(matches!(err, EngineError::Malformed(_)));
        assert_eq!(err.to_string(), "edge 1 -> 2 appears more than once");
    }
}
