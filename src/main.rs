//! MCDA Engine binary entry point.
//!
//! Usage: `mcda-engine [PROBLEM_FILE]`
//!
//! Reads a JSON or YAML problem file (or JSON from stdin when no path or
//! `-` is given), solves it, and prints the JSON report to stdout. Logs go
//! to stderr.

use std::io::Read;
use std::process::ExitCode;

use mcda_engine::application::{
    load_problem, parse_problem, DecisionProblem, DecisionService, ProblemFileError,
    ProblemFormat,
};
use mcda_engine::config::AppConfig;
use mcda_engine::domain::foundation::DomainError;

fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        return ExitCode::from(2);
    }
    if let Err(e) = config.logging.init() {
        eprintln!("{e}");
        return ExitCode::from(2);
    }

    let problem = match read_problem(std::env::args().nth(1)) {
        Ok(problem) => problem,
        Err(e) => {
            let err = DomainError::from(e);
            tracing::error!(code = %err.code, "{}", err.message);
            return ExitCode::from(2);
        }
    };

    let service = DecisionService::new(config.engine);
    let report = match service.solve(problem) {
        Ok(report) => report,
        Err(e) => {
            let err = DomainError::from(e);
            tracing::error!(code = %err.code, details = ?err.details, "{}", err.message);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to serialize report: {e}");
            ExitCode::FAILURE
        }
    }
}

fn read_problem(path: Option<String>) -> Result<DecisionProblem, ProblemFileError> {
    match path.as_deref() {
        None | Some("-") => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| ProblemFileError::Io {
                    path: "<stdin>".into(),
                    source,
                })?;
            parse_problem(&text, ProblemFormat::Json)
        }
        Some(path) => load_problem(path),
    }
}
