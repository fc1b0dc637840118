//! RunAhpHandler - Command handler for a complete AHP computation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::DecisionError;
use crate::config::EngineConfig;
use crate::domain::analysis::{
    ComparisonMatrix, ConsistencyResult, DerivedPriorities, FinalRanking, MatrixInput, PriorityVector,
};
use crate::domain::foundation::EntityName;
use crate::domain::workflow::{AhpWorkflow, DecisionInput};

/// Command to rank alternatives with AHP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAhpCommand {
    pub criteria: Vec<EntityName>,
    pub alternatives: Vec<EntityName>,
    /// Criteria x criteria judgements.
    pub criteria_matrix: MatrixInput,
    /// One alternatives x alternatives matrix per criterion, in criterion order.
    pub alternative_matrices: Vec<MatrixInput>,
}

/// Alternative priorities derived under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionPriorities {
    pub criterion: String,
    pub weight: f64,
    pub priorities: PriorityVector,
    pub consistency: ConsistencyResult,
    /// True if the criterion was left out of the final scores.
    pub excluded: bool,
}

/// Result of a successful AHP computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpReport {
    /// Full criteria matrix, lower triangle included.
    pub criteria_matrix: ComparisonMatrix,
    /// Alternatives matrix per criterion, in criterion order.
    pub alternative_matrices: Vec<ComparisonMatrix>,
    pub criteria_weights: PriorityVector,
    pub criteria_consistency: ConsistencyResult,
    pub alternative_priorities: Vec<CriterionPriorities>,
    /// Criterion weights actually used for the scores.
    pub effective_weights: Vec<f64>,
    /// Final score per alternative, in input order.
    pub scores: Vec<f64>,
    pub ranking: FinalRanking,
    pub warnings: Vec<String>,
}

/// Handler for AHP computations.
pub struct RunAhpHandler {
    config: EngineConfig,
}

impl RunAhpHandler {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, cmd: RunAhpCommand) -> Result<AhpReport, DecisionError> {
        let threshold = self.config.consistency_threshold;
        let parallel = self.config.parallel;
        let validator = self.config.validator();

        // 1. Validate names
        let input = DecisionInput::new(cmd.criteria, cmd.alternatives)?;
        debug!(
            criteria = input.criteria().len(),
            alternatives = input.alternatives().len(),
            parallel,
            "Starting AHP computation"
        );

        // 2. Criteria level
        let workflow = AhpWorkflow::start(input)
            .submit_criteria_matrix(&cmd.criteria_matrix, &validator)?
            .derive_criteria_weights()?;

        // 3. Alternatives level, one matrix per criterion
        let workflow = workflow
            .submit_alternative_matrices(&cmd.alternative_matrices, &validator, parallel)?
            .derive_alternative_scores(parallel)?;

        // 4. Synthesis and ranking
        let outcome = workflow
            .compute_ranking(self.config.inconsistency_policy, threshold)?
            .into_outcome()?;

        let mut warnings = Vec::new();
        let criteria = &outcome.criteria;
        debug!(
            cr = criteria.consistency.cr,
            lambda_max = criteria.consistency.lambda_max,
            "Derived criteria weights"
        );
        if criteria.consistency.exceeds(threshold) {
            warn!(cr = criteria.consistency.cr, threshold, "Criteria matrix is inconsistent");
            warnings.push(format!(
                "Criteria comparison matrix is inconsistent (CR = {:.4} > {})",
                criteria.consistency.cr, threshold
            ));
        }

        let names = outcome.input.criteria();
        let mut alternative_priorities = Vec::with_capacity(names.len());
        for (c, (name, derived)) in names.iter().zip(&outcome.alternatives).enumerate() {
            let excluded = outcome.synthesis.excluded.contains(&c);
            debug!(
                criterion = %name,
                cr = derived.consistency.cr,
                "Derived alternative priorities"
            );
            if derived.consistency.exceeds(threshold) {
                warn!(criterion = %name, cr = derived.consistency.cr, threshold, "Alternatives matrix is inconsistent");
                warnings.push(format!(
                    "Alternatives matrix for '{}' is inconsistent (CR = {:.4} > {})",
                    name, derived.consistency.cr, threshold
                ));
            }
            if excluded {
                warn!(criterion = %name, "Criterion excluded from synthesis");
                warnings.push(format!(
                    "Criterion '{}' was excluded from the final scores",
                    name
                ));
            }
            alternative_priorities.push(criterion_priorities(name, c, derived, criteria, excluded));
        }

        if let Some(top) = outcome.ranking.top() {
            info!(
                top = top.name.as_deref().unwrap_or_default(),
                score = top.score,
                warnings = warnings.len(),
                "AHP ranking computed"
            );
        }

        Ok(AhpReport {
            criteria_matrix: outcome.criteria_matrix,
            alternative_matrices: outcome.alternative_matrices,
            criteria_weights: outcome.criteria.priorities.clone(),
            criteria_consistency: outcome.criteria.consistency,
            alternative_priorities,
            effective_weights: outcome.synthesis.effective_weights,
            scores: outcome.synthesis.scores,
            ranking: outcome.ranking,
            warnings,
        })
    }
}

fn criterion_priorities(
    name: &EntityName,
    index: usize,
    derived: &DerivedPriorities,
    criteria: &DerivedPriorities,
    excluded: bool,
) -> CriterionPriorities {
    CriterionPriorities {
        criterion: name.to_string(),
        weight: criteria.priorities.get(index).unwrap_or_default(),
        priorities: derived.priorities.clone(),
        consistency: derived.consistency,
        excluded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::{InconsistencyPolicy, MatrixError, PairwiseComparison};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::workflow::WorkflowError;

    fn names(list: &[&str]) -> Vec<EntityName> {
        list.iter().map(|n| EntityName::try_new(*n).unwrap()).collect()
    }

    fn pair(value: f64) -> MatrixInput {
        MatrixInput::Comparisons(vec![PairwiseComparison::new(0, 1, value)])
    }

    fn inconsistent() -> MatrixInput {
        MatrixInput::Comparisons(vec![
            PairwiseComparison::new(0, 1, 9.0),
            PairwiseComparison::new(0, 2, 1.0 / 9.0),
            PairwiseComparison::new(1, 2, 9.0),
        ])
    }

    fn consistent() -> MatrixInput {
        MatrixInput::Comparisons(vec![
            PairwiseComparison::new(0, 1, 2.0),
            PairwiseComparison::new(0, 2, 4.0),
            PairwiseComparison::new(1, 2, 2.0),
        ])
    }

    fn command() -> RunAhpCommand {
        RunAhpCommand {
            criteria: names(&["Price", "Quality"]),
            alternatives: names(&["A", "B", "C"]),
            criteria_matrix: pair(3.0),
            alternative_matrices: vec![consistent(), inconsistent()],
        }
    }

    #[test]
    fn report_contains_weights_scores_and_ranking() {
        let report = RunAhpHandler::new(EngineConfig::default())
            .handle(command())
            .unwrap();

        assert!((report.criteria_weights.weights()[0] - 0.75).abs() < 1e-12);
        assert_eq!(report.alternative_priorities.len(), 2);
        assert_eq!(report.alternative_priorities[0].criterion, "Price");
        assert!((report.alternative_priorities[0].weight - 0.75).abs() < 1e-12);
        assert_eq!(report.scores.len(), 3);
        assert!((report.scores.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert_eq!(report.ranking.len(), 3);
    }

    #[test]
    fn report_includes_submitted_matrices() {
        let report = RunAhpHandler::new(EngineConfig::default())
            .handle(command())
            .unwrap();

        assert_eq!(report.criteria_matrix.get(1, 0), 1.0 / 3.0);
        assert_eq!(report.alternative_matrices.len(), 2);
        assert_eq!(report.alternative_matrices[1].get(0, 1), 9.0);
        assert!((report.alternative_matrices[1].get(2, 0) - 9.0).abs() < 1e-12);
    }

    #[test]
    fn inconsistent_matrix_is_reported_not_rejected() {
        let report = RunAhpHandler::new(EngineConfig::default())
            .handle(command())
            .unwrap();

        assert!(!report.alternative_priorities[1].consistency.consistent);
        assert!(!report.alternative_priorities[1].excluded);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("'Quality'"));
    }

    #[test]
    fn exclude_policy_warns_and_drops_criterion() {
        let config = EngineConfig {
            inconsistency_policy: InconsistencyPolicy::Exclude,
            ..EngineConfig::default()
        };
        let report = RunAhpHandler::new(config).handle(command()).unwrap();

        assert!(report.alternative_priorities[1].excluded);
        assert_eq!(report.effective_weights, vec![1.0, 0.0]);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.ranking.order(), vec![0, 1, 2]);
    }

    #[test]
    fn sequential_mode_gives_identical_report() {
        let sequential = EngineConfig {
            parallel: false,
            ..EngineConfig::default()
        };
        let a = RunAhpHandler::new(sequential).handle(command()).unwrap();
        let b = RunAhpHandler::new(EngineConfig::default())
            .handle(command())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn invalid_names_are_rejected_before_any_matrix() {
        let mut cmd = command();
        cmd.alternatives = names(&["A", "A", "C"]);
        let err = RunAhpHandler::new(EngineConfig::default())
            .handle(cmd)
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::DuplicateName);
    }

    #[test]
    fn matrix_failure_surfaces_cell() {
        let mut cmd = command();
        cmd.criteria_matrix = MatrixInput::Rows(vec![vec![1.0, 3.0], vec![0.5, 1.0]]);
        let err = RunAhpHandler::new(EngineConfig::default())
            .handle(cmd)
            .unwrap_err();

        assert!(matches!(
            err,
            DecisionError::Workflow(WorkflowError::Matrix {
                source: MatrixError::ReciprocalViolation { row: 0, column: 1, .. },
                ..
            })
        ));
    }

    #[test]
    fn command_deserializes_from_rows_and_comparisons() {
        let json = r#"{
            "criteria": ["Price", "Quality"],
            "alternatives": ["A", "B"],
            "criteria_matrix": [[1, 3], [0.3333333333, 1]],
            "alternative_matrices": [
                [{"i": 0, "j": 1, "value": 2}],
                [{"i": 1, "j": 0, "value": 4}]
            ]
        }"#;
        let cmd: RunAhpCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd.criteria_matrix, MatrixInput::Rows(_)));
        assert!(matches!(
            cmd.alternative_matrices[1],
            MatrixInput::Comparisons(_)
        ));

        let report = RunAhpHandler::new(EngineConfig::default())
            .handle(cmd)
            .unwrap();
        // B beats A 4:1 under Quality
        assert!((report.alternative_priorities[1].priorities.weights()[1] - 0.8).abs() < 1e-12);
    }
}
