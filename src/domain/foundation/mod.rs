//! Foundation module - Shared domain primitives.
//!
//! Contains the named value objects, numeric guards, the stage state
//! machine trait, and error types that form the vocabulary of the
//! decision engine.

mod entity;
mod errors;
mod number;
mod state_machine;

pub use entity::{ensure_unique_names, Alternative, Criterion, CriterionCategory, EntityName};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use number::{ensure_finite, ensure_positive};
pub use state_machine::StateMachine;
