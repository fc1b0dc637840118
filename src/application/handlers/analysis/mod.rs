//! Decision-analysis command handlers.
//!
//! Each handler validates a command, drives the domain computation, and
//! returns a serializable report with any consistency warnings.

mod run_ahp;
mod run_saw;

pub use run_ahp::{AhpReport, CriterionPriorities, RunAhpCommand, RunAhpHandler};
pub use run_saw::{RunSawCommand, RunSawHandler, SawReport};
