//! Decision problem files.
//!
//! A problem file is a single JSON or YAML document whose `method` field
//! selects the command it holds:
//!
//! ```yaml
//! method: saw
//! criteria:
//!   - { name: Price, category: cost, weight: 0.4 }
//!   - { name: Quality, weight: 0.6 }
//! alternatives: [Vendor A, Vendor B]
//! scores: [[120, 7], [90, 5]]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::{
    AhpReport, DecisionError, RunAhpCommand, RunAhpHandler, RunSawCommand, RunSawHandler,
    SawReport,
};
use crate::config::EngineConfig;
use crate::domain::foundation::{DomainError, ErrorCode};

/// A complete decision problem, tagged by method.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DecisionProblem {
    Ahp(RunAhpCommand),
    Saw(RunSawCommand),
}

/// The report for a solved problem, tagged like the problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum DecisionReport {
    Ahp(AhpReport),
    Saw(SawReport),
}

/// Serialization format of a problem document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    Json,
    Yaml,
}

impl ProblemFormat {
    /// Picks YAML for `.yaml`/`.yml` files and JSON otherwise.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ProblemFormat::Yaml
            }
            _ => ProblemFormat::Json,
        }
    }
}

/// Errors reading or parsing a problem document.
#[derive(Debug, Error)]
pub enum ProblemFileError {
    #[error("Failed to read problem file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON problem: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML problem: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ProblemFileError> for DomainError {
    fn from(err: ProblemFileError) -> Self {
        let domain = DomainError::new(ErrorCode::InvalidFormat, err.to_string());
        match err {
            ProblemFileError::Io { path, .. } => {
                domain.with_detail("path", path.display().to_string())
            }
            _ => domain,
        }
    }
}

/// Parses a problem document held in memory.
pub fn parse_problem(text: &str, format: ProblemFormat) -> Result<DecisionProblem, ProblemFileError> {
    let problem = match format {
        ProblemFormat::Json => serde_json::from_str(text)?,
        ProblemFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(problem)
}

/// Reads and parses a problem file, choosing the format by extension.
pub fn load_problem(path: impl AsRef<Path>) -> Result<DecisionProblem, ProblemFileError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ProblemFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format = ProblemFormat::from_path(path);
    debug!(path = %path.display(), ?format, "Loaded problem file");
    parse_problem(&text, format)
}

/// Dispatches problems to the matching handler.
pub struct DecisionService {
    ahp: RunAhpHandler,
    saw: RunSawHandler,
}

impl DecisionService {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            ahp: RunAhpHandler::new(config),
            saw: RunSawHandler::new(),
        }
    }

    /// Solves one problem.
    pub fn solve(&self, problem: DecisionProblem) -> Result<DecisionReport, DecisionError> {
        match problem {
            DecisionProblem::Ahp(cmd) => self.ahp.handle(cmd).map(DecisionReport::Ahp),
            DecisionProblem::Saw(cmd) => self.saw.handle(cmd).map(DecisionReport::Saw),
        }
    }
}
