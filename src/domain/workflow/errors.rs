//! Workflow errors.

use thiserror::Error;

use super::WorkflowStage;
use crate::domain::analysis::{MatrixError, RankingError, SynthesisError};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors that halt an AHP workflow at its current stage.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("Cannot move from {from} to {to}")]
    InvalidTransition {
        from: WorkflowStage,
        to: WorkflowStage,
    },

    #[error("Invalid {matrix}: {source}")]
    Matrix {
        matrix: String,
        #[source]
        source: MatrixError,
    },

    #[error("Expected {expected} {what}, got {actual}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Every criterion was excluded for exceeding the consistency threshold {threshold}")]
    NoConsistentCriteria { threshold: f64 },

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

impl WorkflowError {
    /// Wraps a matrix rejection with the name of the matrix it concerns.
    pub fn matrix(matrix: impl Into<String>, source: MatrixError) -> Self {
        WorkflowError::Matrix {
            matrix: matrix.into(),
            source,
        }
    }

    /// Returns the error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            WorkflowError::Matrix { source, .. } => source.code(),
            WorkflowError::CountMismatch { .. } => ErrorCode::ShapeMismatch,
            WorkflowError::Validation(err) => err.code(),
            WorkflowError::NoConsistentCriteria { .. } => ErrorCode::NoConsistentCriteria,
            WorkflowError::Ranking(err) => err.code(),
        }
    }
}

impl From<SynthesisError> for WorkflowError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::CriteriaCountMismatch { expected, actual } => {
                WorkflowError::CountMismatch {
                    what: "alternative priority vectors",
                    expected,
                    actual,
                }
            }
            SynthesisError::AlternativeCountMismatch {
                expected, actual, ..
            } => WorkflowError::CountMismatch {
                what: "alternative priorities",
                expected,
                actual,
            },
            SynthesisError::NoConsistentCriteria { threshold } => {
                WorkflowError::NoConsistentCriteria { threshold }
            }
        }
    }
}

impl From<WorkflowError> for DomainError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Matrix { matrix, source } => {
                DomainError::from(source).with_detail("matrix", matrix)
            }
            WorkflowError::Validation(err) => err.into(),
            other => DomainError::new(other.code(), other.to_string()),
        }
    }
}
