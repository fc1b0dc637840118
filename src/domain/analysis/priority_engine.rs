//! AHP Priority Engine - Priority vectors and consistency ratios.
//!
//! Uses the row geometric-mean method: closed-form, no iteration, and stable
//! for the small matrices AHP deals with.

use serde::{Deserialize, Serialize};

use super::ComparisonMatrix;

/// Conventional acceptability bound for the consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Saaty random index, indexed by matrix size `n`.
///
/// Sizes beyond the table reuse the last entry.
static RANDOM_INDEX: [f64; 11] = [
    0.00, // n = 0 (unused)
    0.00, // n = 1
    0.00, // n = 2
    0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49,
];

/// Returns the random index for a matrix of size `n`.
pub fn random_index(n: usize) -> f64 {
    RANDOM_INDEX
        .get(n)
        .copied()
        .unwrap_or(RANDOM_INDEX[RANDOM_INDEX.len() - 1])
}

/// Normalized priority weights, one per matrix row, summing to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriorityVector(Vec<f64>);

impl PriorityVector {
    /// Normalizes non-negative raw weights so they sum to 1.
    ///
    /// Returns `None` if the weights are empty, contain a negative or
    /// non-finite value, or sum to zero.
    pub fn normalized(raw: Vec<f64>) -> Option<Self> {
        if raw.is_empty() || raw.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return None;
        }
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(Self(raw.into_iter().map(|w| w / total).collect()))
    }

    /// Keeps only the entries where `keep` is true and renormalizes them.
    pub fn restricted(&self, keep: &[bool]) -> Option<Self> {
        let raw = self
            .0
            .iter()
            .zip(keep)
            .map(|(w, k)| if *k { *w } else { 0.0 })
            .collect();
        Self::normalized(raw)
    }

    /// Returns the weights in row order.
    pub fn weights(&self) -> &[f64] {
        &self.0
    }

    /// Returns the weight at `index`.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// Returns the number of weights.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no weights.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the vector and returns the weights.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Consistency measures for one comparison matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub lambda_max: f64,
    pub ci: f64,
    pub ri: f64,
    pub cr: f64,
    /// `cr <= 0.10`
    pub consistent: bool,
}

impl ConsistencyResult {
    /// Returns true if the ratio is above a caller-chosen threshold.
    pub fn exceeds(&self, threshold: f64) -> bool {
        self.cr > threshold
    }
}

/// Priority vector and consistency measures derived from one matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedPriorities {
    pub priorities: PriorityVector,
    pub consistency: ConsistencyResult,
}

impl From<(PriorityVector, ConsistencyResult)> for DerivedPriorities {
    fn from((priorities, consistency): (PriorityVector, ConsistencyResult)) -> Self {
        Self {
            priorities,
            consistency,
        }
    }
}

/// Priority derivation functions.
pub struct PriorityEngine;

impl PriorityEngine {
    /// Derives the priority vector and consistency ratio of a matrix.
    ///
    /// # Algorithm
    /// 1. `g_i = (Π_j M[i][j])^(1/n)`, computed in log space
    /// 2. `w_i = g_i / Σ g`
    /// 3. `λmax = (1/n) Σ_i (M·w)_i / w_i`
    /// 4. `CI = (λmax - n) / (n - 1)`
    /// 5. `CR = CI / RI(n)`, or 0 when `RI(n) = 0`
    ///
    /// Inconsistency is reported, never rejected.
    pub fn derive(matrix: &ComparisonMatrix) -> (PriorityVector, ConsistencyResult) {
        let n = matrix.size();
        let n_f = n as f64;

        let geometric_means: Vec<f64> = (0..n)
            .map(|i| {
                let log_sum: f64 = (0..n).map(|j| matrix.get(i, j).ln()).sum();
                (log_sum / n_f).exp()
            })
            .collect();
        let total: f64 = geometric_means.iter().sum();
        let weights: Vec<f64> = geometric_means.iter().map(|g| g / total).collect();

        let product = matrix.multiply(&weights);
        let lambda_max = product
            .iter()
            .zip(&weights)
            .map(|(mw, w)| mw / w)
            .sum::<f64>()
            / n_f;

        let ci = if n > 1 {
            (lambda_max - n_f) / (n_f - 1.0)
        } else {
            0.0
        };
        let ri = random_index(n);
        let cr = if ri > 0.0 { ci / ri } else { 0.0 };

        let consistency = ConsistencyResult {
            lambda_max,
            ci,
            ri,
            cr,
            consistent: cr <= CONSISTENCY_THRESHOLD,
        };

        (PriorityVector(weights), consistency)
    }
}

/// Derives priorities and consistency for a validated matrix.
pub fn derive_priorities(matrix: &ComparisonMatrix) -> (PriorityVector, ConsistencyResult) {
    PriorityEngine::derive(matrix)
}
