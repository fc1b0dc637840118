//! Workflow module - Staged AHP computation.
//!
//! `AhpWorkflow` moves through the `WorkflowStage` sequence one validated
//! step at a time. SAW is a single step and needs no workflow.

mod ahp_workflow;
mod errors;
mod stage;

pub use ahp_workflow::{AhpOutcome, AhpWorkflow, DecisionInput};
pub use errors::WorkflowError;
pub use stage::WorkflowStage;
