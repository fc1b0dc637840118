//! Domain layer containing the decision-analysis logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (names, criteria, errors)
//! - `analysis` - Pure numeric services (matrix validation, AHP, SAW, ranking)
//! - `workflow` - AHP decision workflow state machine

pub mod analysis;
pub mod foundation;
pub mod workflow;
