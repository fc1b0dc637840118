//! Application layer - Commands, handlers and problem files.
//!
//! This layer validates whole decision problems, runs them through the
//! domain, and shapes the results into reports for the caller.

mod errors;
pub mod handlers;
mod problem;

pub use errors::DecisionError;
pub use handlers::{
    AhpReport, CriterionPriorities, RunAhpCommand, RunAhpHandler, RunSawCommand, RunSawHandler,
    SawReport,
};
pub use problem::{
    load_problem, parse_problem, DecisionProblem, DecisionReport, DecisionService, ProblemFileError,
    ProblemFormat,
};
