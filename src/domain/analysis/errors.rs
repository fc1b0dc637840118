//! Analysis errors.
//!
//! All variants are locally detectable input problems. None are recovered
//! automatically; the caller decides whether to surface them or ask for
//! re-entry. Consistency failures are not errors and never appear here.

use serde::Serialize;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Rejections raised by the matrix validator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("Comparison matrix size violation: {reason}")]
    SizeViolation { size: usize, reason: String },

    #[error("Cell ({row}, {column}) is not a finite number: {value}")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("Diagonal cell ({index}, {index}) must be 1, got {value}")]
    DiagonalViolation { index: usize, value: f64 },

    #[error(
        "Cells ({row}, {column}) and ({column}, {row}) are not reciprocal: {value} * {mirror} != 1"
    )]
    ReciprocalViolation {
        row: usize,
        column: usize,
        value: f64,
        mirror: f64,
    },

    #[error("Cell ({row}, {column}) must lie in [1/9, 9], got {value}")]
    RangeViolation {
        row: usize,
        column: usize,
        value: f64,
    },
}

impl MatrixError {
    pub(crate) fn size(size: usize, reason: impl Into<String>) -> Self {
        MatrixError::SizeViolation {
            size,
            reason: reason.into(),
        }
    }

    /// Returns the error code for this rejection.
    pub fn code(&self) -> ErrorCode {
        match self {
            MatrixError::SizeViolation { .. } => ErrorCode::SizeViolation,
            MatrixError::InvalidNumber { .. } => ErrorCode::InvalidNumber,
            MatrixError::DiagonalViolation { .. } => ErrorCode::DiagonalViolation,
            MatrixError::ReciprocalViolation { .. } => ErrorCode::ReciprocalViolation,
            MatrixError::RangeViolation { .. } => ErrorCode::RangeViolation,
        }
    }

    /// Returns the offending cell, if the rejection concerns one.
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self {
            MatrixError::SizeViolation { .. } => None,
            MatrixError::DiagonalViolation { index, .. } => Some((*index, *index)),
            MatrixError::InvalidNumber { row, column, .. }
            | MatrixError::ReciprocalViolation { row, column, .. }
            | MatrixError::RangeViolation { row, column, .. } => Some((*row, *column)),
        }
    }
}

impl From<MatrixError> for DomainError {
    fn from(err: MatrixError) -> Self {
        let mut domain = DomainError::new(err.code(), err.to_string());
        if let Some((row, column)) = err.cell() {
            domain = domain
                .with_detail("row", row.to_string())
                .with_detail("column", column.to_string());
        }
        domain
    }
}

/// Which half of the SAW input a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSide {
    Benefit,
    Cost,
}

impl std::fmt::Display for ScoreSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreSide::Benefit => f.write_str("benefit"),
            ScoreSide::Cost => f.write_str("cost"),
        }
    }
}

/// Rejections raised by the SAW scoring engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SawError {
    #[error("At least one alternative is required")]
    NoAlternatives,

    #[error("At least one benefit or cost criterion is required")]
    NoCriteria,

    #[error("{side} score ({row}, {column}) is not a finite number: {value}")]
    InvalidNumber {
        side: ScoreSide,
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("{side} score ({row}, {column}) must be non-negative, got {value}")]
    NegativeScore {
        side: ScoreSide,
        row: usize,
        column: usize,
        value: f64,
    },

    #[error("{side} matrix shape mismatch: {reason}")]
    ShapeMismatch { side: ScoreSide, reason: String },

    #[error("{side} weight {column} must be a positive finite number, got {value}")]
    InvalidWeight {
        side: ScoreSide,
        column: usize,
        value: f64,
    },

    #[error("Cost score ({row}, {column}) is zero and cannot be normalized")]
    DivisionByZero { row: usize, column: usize },

    #[error("{side} column {column} is degenerate: every value is zero")]
    DegenerateColumn { side: ScoreSide, column: usize },

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

impl SawError {
    /// Returns the error code for this rejection.
    pub fn code(&self) -> ErrorCode {
        match self {
            SawError::NoAlternatives | SawError::NoCriteria => ErrorCode::SizeViolation,
            SawError::InvalidNumber { .. } => ErrorCode::InvalidNumber,
            SawError::NegativeScore { .. } | SawError::InvalidWeight { .. } => {
                ErrorCode::OutOfRange
            }
            SawError::ShapeMismatch { .. } => ErrorCode::ShapeMismatch,
            SawError::DivisionByZero { .. } => ErrorCode::DivisionByZero,
            SawError::DegenerateColumn { .. } => ErrorCode::DegenerateColumn,
            SawError::Ranking(err) => err.code(),
        }
    }
}

impl From<SawError> for DomainError {
    fn from(err: SawError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Rejections raised by the ranking aggregator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    #[error("Score for entry {index} is not a finite number: {value}")]
    InvalidNumber { index: usize, value: f64 },

    #[error("Expected {expected} scores, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

impl RankingError {
    /// Returns the error code for this rejection.
    pub fn code(&self) -> ErrorCode {
        match self {
            RankingError::InvalidNumber { .. } => ErrorCode::InvalidNumber,
            RankingError::LengthMismatch { .. } => ErrorCode::ShapeMismatch,
        }
    }
}

impl From<RankingError> for DomainError {
    fn from(err: RankingError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Rejections raised while combining criterion weights with alternative priorities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("Expected {expected} alternative priority vectors, got {actual}")]
    CriteriaCountMismatch { expected: usize, actual: usize },

    #[error("Priority vector for criterion {criterion} has {actual} entries, expected {expected}")]
    AlternativeCountMismatch {
        criterion: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Every criterion was excluded for exceeding the consistency threshold {threshold}")]
    NoConsistentCriteria { threshold: f64 },
}

impl SynthesisError {
    /// Returns the error code for this rejection.
    pub fn code(&self) -> ErrorCode {
        match self {
            SynthesisError::CriteriaCountMismatch { .. }
            | SynthesisError::AlternativeCountMismatch { .. } => ErrorCode::ShapeMismatch,
            SynthesisError::NoConsistentCriteria { .. } => ErrorCode::NoConsistentCriteria,
        }
    }
}

impl From<SynthesisError> for DomainError {
    fn from(err: SynthesisError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
