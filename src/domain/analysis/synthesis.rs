//! AHP Synthesis - Combines criterion weights with per-criterion alternative priorities.

use serde::{Deserialize, Serialize};

use super::{DerivedPriorities, PriorityVector, SynthesisError};

/// What to do with criteria whose alternative matrix is inconsistent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InconsistencyPolicy {
    /// Keep every criterion; inconsistency is only reported.
    #[default]
    Report,
    /// Drop criteria above the threshold and renormalize the remaining weights.
    Exclude,
}

/// Final AHP scores plus the weights actually used to compute them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Synthesis {
    /// Score per alternative, in input order.
    pub scores: Vec<f64>,
    /// Criterion weights after any exclusion, in criterion order.
    pub effective_weights: Vec<f64>,
    /// Indices of criteria left out of the scores.
    pub excluded: Vec<usize>,
}

/// Synthesis functions.
pub struct AhpSynthesizer;

impl AhpSynthesizer {
    /// Computes `S_a = Σ_c w_c · p_c[a]` over the kept criteria.
    ///
    /// Under [`InconsistencyPolicy::Exclude`], criteria whose CR exceeds
    /// `threshold` are dropped and the remaining weights renormalized to 1.
    ///
    /// # Edge Cases
    /// - Every criterion excluded: `NoConsistentCriteria`
    /// - Priority vectors of differing length: `AlternativeCountMismatch`
    pub fn synthesize(
        criteria_weights: &PriorityVector,
        alternatives: &[DerivedPriorities],
        policy: InconsistencyPolicy,
        threshold: f64,
    ) -> Result<Synthesis, SynthesisError> {
        if alternatives.len() != criteria_weights.len() {
            return Err(SynthesisError::CriteriaCountMismatch {
                expected: criteria_weights.len(),
                actual: alternatives.len(),
            });
        }

        let alternative_count = alternatives
            .first()
            .map(|d| d.priorities.len())
            .unwrap_or(0);
        if let Some((criterion, derived)) = alternatives
            .iter()
            .enumerate()
            .find(|(_, d)| d.priorities.len() != alternative_count)
        {
            return Err(SynthesisError::AlternativeCountMismatch {
                criterion,
                expected: alternative_count,
                actual: derived.priorities.len(),
            });
        }

        let keep: Vec<bool> = alternatives
            .iter()
            .map(|d| match policy {
                InconsistencyPolicy::Report => true,
                InconsistencyPolicy::Exclude => !d.consistency.exceeds(threshold),
            })
            .collect();
        let excluded: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter(|(_, k)| !**k)
            .map(|(c, _)| c)
            .collect();

        let effective = criteria_weights
            .restricted(&keep)
            .ok_or(SynthesisError::NoConsistentCriteria { threshold })?;

        let scores = (0..alternative_count)
            .map(|a| {
                effective
                    .weights()
                    .iter()
                    .zip(alternatives)
                    .map(|(w, d)| w * d.priorities.weights()[a])
                    .sum()
            })
            .collect();

        Ok(Synthesis {
            scores,
            effective_weights: effective.into_inner(),
            excluded,
        })
    }
}
