//! Analysis Module - Pure decision-computation engine.
//!
//! This module contains stateless functions that turn validated numeric
//! inputs into validated numeric outputs.
//!
//! # Components
//!
//! - `MatrixValidator` - Reciprocal-matrix invariants and numeric bounds
//! - `PriorityEngine` - AHP priority vectors and consistency ratios
//! - `SawEngine` - SAW normalization and weighted aggregation
//! - `RankingAggregator` - Deterministic final ordering
//! - `AhpSynthesizer` - Criterion weights × alternative priorities
//!
//! # Design Philosophy
//!
//! All functions are pure (no side effects) and stateless. They take value
//! objects by reference and return new values. No I/O, no shared state
//! beyond the constant random-index table, so independent matrices can be
//! processed on any thread.

mod comparison_matrix;
mod errors;
mod matrix_validator;
mod priority_engine;
mod ranking;
mod saw_engine;
mod synthesis;

// Re-export all public types
pub use comparison_matrix::{
    ComparisonMatrix, MatrixInput, PairwiseComparison, MAX_SCALE_VALUE, MIN_MATRIX_SIZE,
    MIN_SCALE_VALUE,
};
pub use errors::{MatrixError, RankingError, SawError, ScoreSide, SynthesisError};
pub use matrix_validator::{
    validate_matrix, MatrixValidator, DIAGONAL_TOLERANCE, RECIPROCAL_TOLERANCE,
};
pub use priority_engine::{
    derive_priorities, random_index, ConsistencyResult, DerivedPriorities, PriorityEngine,
    PriorityVector, CONSISTENCY_THRESHOLD,
};
pub use ranking::{rank, FinalRanking, RankedAlternative, RankingAggregator};
pub use saw_engine::{
    score_saw, NormalizedScoreMatrix, SawEngine, SawOutcome, ScoreMatrix,
};
pub use synthesis::{AhpSynthesizer, InconsistencyPolicy, Synthesis};
