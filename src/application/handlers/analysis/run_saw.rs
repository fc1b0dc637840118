//! RunSawHandler - Command handler for a Simple Additive Weighting computation.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::DecisionError;
use crate::domain::analysis::{
    score_saw, FinalRanking, NormalizedScoreMatrix, ScoreMatrix, ScoreSide,
};
use crate::domain::foundation::{
    ensure_unique_names, Alternative, Criterion, CriterionCategory, EntityName, ValidationError,
};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Command to rank alternatives with SAW.
///
/// `scores` holds one row per alternative and one column per criterion,
/// both in input order. Each criterion carries its own category and weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSawCommand {
    pub criteria: Vec<Criterion>,
    pub alternatives: Vec<Alternative>,
    pub scores: Vec<Vec<f64>>,
}

/// Result of a successful SAW computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SawReport {
    /// Benefit criteria in the column order of `normalized_benefit`.
    pub benefit_criteria: Vec<String>,
    /// Cost criteria in the column order of `normalized_cost`.
    pub cost_criteria: Vec<String>,
    pub normalized_benefit: NormalizedScoreMatrix,
    pub normalized_cost: NormalizedScoreMatrix,
    /// Aggregate score per alternative, in input order.
    pub scores: Vec<f64>,
    pub ranking: FinalRanking,
    pub warnings: Vec<String>,
}

/// Handler for SAW computations.
#[derive(Debug, Default)]
pub struct RunSawHandler;

impl RunSawHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, cmd: RunSawCommand) -> Result<SawReport, DecisionError> {
        // 1. Validate names, weights and table shape
        ensure_unique_names("criteria", cmd.criteria.iter().map(|c| &c.name), 1)?;
        ensure_unique_names("alternatives", cmd.alternatives.iter().map(|a| &a.name), 1)?;
        let weights = cmd
            .criteria
            .iter()
            .map(Criterion::require_weight)
            .collect::<Result<Vec<_>, _>>()?;
        check_table_shape(&cmd.scores, cmd.alternatives.len(), cmd.criteria.len())?;

        // 2. Split columns by category
        let benefit = Split::of(&cmd.criteria, &weights, &cmd.scores, CriterionCategory::Benefit);
        let cost = Split::of(&cmd.criteria, &weights, &cmd.scores, CriterionCategory::Cost);
        debug!(
            alternatives = cmd.alternatives.len(),
            benefit = benefit.names.len(),
            cost = cost.names.len(),
            "Starting SAW computation"
        );

        let raw_benefit = ScoreMatrix::new(ScoreSide::Benefit, benefit.rows)?;
        let raw_cost = ScoreMatrix::new(ScoreSide::Cost, cost.rows)?;

        // 3. Normalize, aggregate, rank
        let outcome = score_saw(&raw_benefit, &raw_cost, &benefit.weights, &cost.weights)?;
        let names: Vec<EntityName> = cmd.alternatives.into_iter().map(|a| a.name).collect();
        let ranking = outcome.ranking.with_names(&names)?;

        let mut warnings = Vec::new();
        let total: f64 = weights.iter().sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            warn!(total, "SAW weights do not sum to 1");
            warnings.push(format!(
                "Criterion weights sum to {:.4}; scores are not on a 0-1 scale",
                total
            ));
        }

        if let Some(top) = ranking.top() {
            info!(
                top = top.name.as_deref().unwrap_or_default(),
                score = top.score,
                "SAW ranking computed"
            );
        }

        Ok(SawReport {
            benefit_criteria: benefit.names,
            cost_criteria: cost.names,
            normalized_benefit: outcome.normalized_benefit,
            normalized_cost: outcome.normalized_cost,
            scores: outcome.scores,
            ranking,
            warnings,
        })
    }
}

/// Columns of one category pulled out of the mixed score table.
struct Split {
    names: Vec<String>,
    weights: Vec<f64>,
    rows: Vec<Vec<f64>>,
}

impl Split {
    fn of(
        criteria: &[Criterion],
        weights: &[f64],
        scores: &[Vec<f64>],
        category: CriterionCategory,
    ) -> Self {
        let columns: Vec<usize> = criteria
            .iter()
            .enumerate()
            .filter(|(_, c)| c.category == category)
            .map(|(j, _)| j)
            .collect();

        Self {
            names: columns.iter().map(|j| criteria[*j].name.to_string()).collect(),
            weights: columns.iter().map(|j| weights[*j]).collect(),
            rows: scores
                .iter()
                .map(|row| columns.iter().map(|j| row[*j]).collect())
                .collect(),
        }
    }
}

fn check_table_shape(
    scores: &[Vec<f64>],
    alternatives: usize,
    criteria: usize,
) -> Result<(), ValidationError> {
    if scores.len() != alternatives {
        return Err(ValidationError::invalid_format(
            "scores",
            format!("expected {} rows, got {}", alternatives, scores.len()),
        ));
    }
    if let Some((i, row)) = scores.iter().enumerate().find(|(_, r)| r.len() != criteria) {
        return Err(ValidationError::invalid_format(
            "scores",
            format!("row {} has {} columns, expected {}", i, row.len(), criteria),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::SawError;
    use crate::domain::foundation::ErrorCode;

    fn laptops() -> RunSawCommand {
        RunSawCommand {
            criteria: vec![
                Criterion::weighted("Price", CriterionCategory::Cost, 0.3).unwrap(),
                Criterion::weighted("Performance", CriterionCategory::Benefit, 0.5).unwrap(),
                Criterion::weighted("Battery", CriterionCategory::Benefit, 0.2).unwrap(),
            ],
            alternatives: vec![
                Alternative::new("Laptop A").unwrap(),
                Alternative::new("Laptop B").unwrap(),
                Alternative::new("Laptop C").unwrap(),
            ],
            scores: vec![
                vec![1200.0, 80.0, 10.0],
                vec![1500.0, 100.0, 8.0],
                vec![900.0, 60.0, 12.0],
            ],
        }
    }

    #[test]
    fn mixed_columns_are_split_by_category() {
        let report = RunSawHandler::new().handle(laptops()).unwrap();

        assert_eq!(report.benefit_criteria, vec!["Performance", "Battery"]);
        assert_eq!(report.cost_criteria, vec!["Price"]);
        assert!((report.normalized_cost.get(0, 0).unwrap() - 0.75).abs() < 1e-12);
        assert!((report.scores[2] - 0.8).abs() < 1e-12);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn ranking_is_named() {
        let report = RunSawHandler::new().handle(laptops()).unwrap();
        let order: Vec<_> = report
            .ranking
            .entries()
            .iter()
            .map(|e| e.name.clone().unwrap())
            .collect();
        assert_eq!(order, vec!["Laptop B", "Laptop C", "Laptop A"]);
    }

    #[test]
    fn unnormalized_weights_produce_warning() {
        let mut cmd = laptops();
        for c in &mut cmd.criteria {
            c.weight = Some(1.0);
        }
        let report = RunSawHandler::new().handle(cmd).unwrap();
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn missing_weight_is_rejected() {
        let mut cmd = laptops();
        cmd.criteria[1].weight = None;
        let err = RunSawHandler::new().handle(cmd).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[test]
    fn ragged_table_is_rejected() {
        let mut cmd = laptops();
        cmd.scores[1].pop();
        let err = RunSawHandler::new().handle(cmd).unwrap_err();
        assert!(matches!(
            err,
            DecisionError::Validation(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn zero_cost_value_is_division_by_zero() {
        let mut cmd = laptops();
        cmd.scores[1][0] = 0.0;
        let err = RunSawHandler::new().handle(cmd).unwrap_err();
        assert_eq!(
            err,
            DecisionError::Saw(SawError::DivisionByZero { row: 1, column: 0 })
        );
    }

    #[test]
    fn cost_only_problem_is_allowed() {
        let cmd = RunSawCommand {
            criteria: vec![Criterion::weighted("Price", CriterionCategory::Cost, 1.0).unwrap()],
            alternatives: vec![Alternative::new("A").unwrap(), Alternative::new("B").unwrap()],
            scores: vec![vec![20.0], vec![10.0]],
        };
        let report = RunSawHandler::new().handle(cmd).unwrap();
        assert!(report.benefit_criteria.is_empty());
        assert_eq!(report.ranking.order(), vec![1, 0]);
        assert_eq!(report.scores, vec![0.5, 1.0]);
    }
}
