//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::analysis::{
    InconsistencyPolicy, MatrixValidator, CONSISTENCY_THRESHOLD, DIAGONAL_TOLERANCE,
    RECIPROCAL_TOLERANCE,
};

/// Numeric tolerances and execution options for the decision engine
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Consistency ratio above which a matrix is reported as inconsistent
    #[serde(default = "default_consistency_threshold")]
    pub consistency_threshold: f64,

    /// Allowed distance of a diagonal cell from 1
    #[serde(default = "default_diagonal_tolerance")]
    pub diagonal_tolerance: f64,

    /// Allowed distance of `m[i][j] * m[j][i]` from 1
    #[serde(default = "default_reciprocal_tolerance")]
    pub reciprocal_tolerance: f64,

    /// Process per-criterion matrices on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,

    /// Keep or drop criteria whose alternatives matrix is inconsistent
    #[serde(default)]
    pub inconsistency_policy: InconsistencyPolicy,
}

fn default_consistency_threshold() -> f64 {
    CONSISTENCY_THRESHOLD
}

fn default_diagonal_tolerance() -> f64 {
    DIAGONAL_TOLERANCE
}

fn default_reciprocal_tolerance() -> f64 {
    RECIPROCAL_TOLERANCE
}

fn default_parallel() -> bool {
    true
}

impl EngineConfig {
    /// Builds the matrix validator for these tolerances
    pub fn validator(&self) -> MatrixValidator {
        MatrixValidator::new(self.diagonal_tolerance, self.reciprocal_tolerance)
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.consistency_threshold.is_finite()
            && self.consistency_threshold > 0.0
            && self.consistency_threshold <= 1.0)
        {
            return Err(ValidationError::InvalidThreshold(self.consistency_threshold));
        }
        for (name, value) in [
            ("diagonal_tolerance", self.diagonal_tolerance),
            ("reciprocal_tolerance", self.reciprocal_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_consistency_threshold(),
            diagonal_tolerance: default_diagonal_tolerance(),
            reciprocal_tolerance: default_reciprocal_tolerance(),
            parallel: default_parallel(),
            inconsistency_policy: InconsistencyPolicy::default(),
        }
    }
}
