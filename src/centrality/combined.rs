//! Aggregate influence score

use crate::centrality::ScoreVector;

/// Sum raw measures per node, then divide by the largest sum.
///
/// Measures are not rescaled against each other before summing. The top node
/// scores exactly 1.0; if every sum is zero the result is all zeros.
pub fn combined_score(measures: &[&ScoreVector]) -> ScoreVector {
    let n = measures.first().map_or(0, |m| m.len());
    debug_assert!(measures.iter().all(|m| m.len() == n));

    let mut totals = vec![0.0; n];
    for measure in measures {
        for (total, score) in totals.iter_mut().zip(measure.iter()) {
            *total += score;
        }
    }

    let max = totals.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        for total in &mut totals {
            *total /= max;
        }
    }

    ScoreVector::new(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_node_scores_one() {
        let a = ScoreVector::new(vec![1.0, 2.0, 0.0]);
        let b = ScoreVector::new(vec![3.0, 0.0, 1.0]);
        let combined = combined_score(&[&a, &b]);

        assert_eq!(combined.as_slice(), &[1.0, 0.5, 0.25]);
    }

    #[test]
    fn test_all_zero_stays_zero() {
        let a = ScoreVector::zeros(3);
        assert_eq!(combined_score(&[&a, &a]).as_slice(), &[0.0, 0.0, 0.0]);
        assert!(combined_score(&[]).is_empty());
    }
}
