//! Summary statistics over edge weights

use serde::{Serialize, Deserialize};
use statrs::statistics::{Data, Median, Statistics};

/// Distribution of transmission probabilities across all edges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

/// Summarize a set of edge weights; `None` when there are none
pub fn summarize_weights(weights: &[f64]) -> Option<WeightSummary> {
    if weights.is_empty() {
        return None;
    }

    let data = Data::new(weights.to_vec());
    let std_dev = if weights.len() > 1 {
        Statistics::std_dev(weights.iter())
    } else {
        0.0
    };

    Some(WeightSummary {
        count: weights.len(),
        mean: Statistics::mean(weights.iter()),
        median: data.median(),
        min: Statistics::min(weights.iter()),
        max: Statistics::max(weights.iter()),
        std_dev,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let summary = summarize_weights(&[0.5, 0.125, 0.25, 1.0]).unwrap();

        assert_eq!(summary.count, 4);
        assert!((summary.mean - 0.46875).abs() < 1e-12);
        assert!((summary.median - 0.375).abs() < 1e-12);
        assert_eq!(summary.min, 0.125);
        assert_eq!(summary.max, 1.0);
        assert!(summary.std_dev > 0.0);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(summarize_weights(&[]).is_none());

        let single = summarize_weights(&[0.3]).unwrap();
        assert_eq!(single.median, 0.3);
        assert_eq!(single.std_dev, 0.0);
    }
}
