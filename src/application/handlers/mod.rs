//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod analysis;

pub use analysis::{
    AhpReport, CriterionPriorities, RunAhpCommand, RunAhpHandler, RunSawCommand, RunSawHandler,
    SawReport,
};
