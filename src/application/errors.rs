//! Application-level errors.

use thiserror::Error;

use crate::domain::analysis::{RankingError, SawError};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::workflow::WorkflowError;

/// Any failure while running a decision command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecisionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Saw(#[from] SawError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

impl DecisionError {
    /// Returns the error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecisionError::Validation(err) => err.code(),
            DecisionError::Workflow(err) => err.code(),
            DecisionError::Saw(err) => err.code(),
            DecisionError::Ranking(err) => err.code(),
        }
    }
}

impl From<DecisionError> for DomainError {
    fn from(err: DecisionError) -> Self {
        match err {
            DecisionError::Validation(err) => err.into(),
            DecisionError::Workflow(err) => err.into(),
            DecisionError::Saw(err) => err.into(),
            DecisionError::Ranking(err) => err.into(),
        }
    }
}
