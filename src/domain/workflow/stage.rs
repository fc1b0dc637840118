//! Workflow stages for one AHP computation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where an AHP computation currently stands.
///
/// The progression is strictly linear. Per-criterion alternative matrices
/// are validated together in a single step, so the stage only advances once
/// every one of them has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    InputCollected,
    CriteriaMatrixValidated,
    CriteriaWeightsDerived,
    AlternativeMatricesValidated,
    AlternativeScoresDerived,
    FinalRankingComputed,
}

impl WorkflowStage {
    /// All stages in order.
    pub const ALL: [WorkflowStage; 6] = [
        WorkflowStage::InputCollected,
        WorkflowStage::CriteriaMatrixValidated,
        WorkflowStage::CriteriaWeightsDerived,
        WorkflowStage::AlternativeMatricesValidated,
        WorkflowStage::AlternativeScoresDerived,
        WorkflowStage::FinalRankingComputed,
    ];

    /// Returns the stage that follows this one, if any.
    pub fn next(&self) -> Option<WorkflowStage> {
        use WorkflowStage::*;
        match self {
            InputCollected => Some(CriteriaMatrixValidated),
            CriteriaMatrixValidated => Some(CriteriaWeightsDerived),
            CriteriaWeightsDerived => Some(AlternativeMatricesValidated),
            AlternativeMatricesValidated => Some(AlternativeScoresDerived),
            AlternativeScoresDerived => Some(FinalRankingComputed),
            FinalRankingComputed => None,
        }
    }
}

impl StateMachine for WorkflowStage {
    fn valid_transitions(&self) -> Vec<Self> {
        self.next().into_iter().collect()
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStage::InputCollected => "input_collected",
            WorkflowStage::CriteriaMatrixValidated => "criteria_matrix_validated",
            WorkflowStage::CriteriaWeightsDerived => "criteria_weights_derived",
            WorkflowStage::AlternativeMatricesValidated => "alternative_matrices_validated",
            WorkflowStage::AlternativeScoresDerived => "alternative_scores_derived",
            WorkflowStage::FinalRankingComputed => "final_ranking_computed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_stage_only_advances_to_its_successor() {
        for pair in WorkflowStage::ALL.windows(2) {
            assert_eq!(pair[0].valid_transitions(), vec![pair[1]]);
            assert!(pair[0].can_transition_to(&pair[1]));
            assert!(!pair[1].can_transition_to(&pair[0]));
        }
    }

    #[test]
    fn cannot_skip_to_ranking() {
        assert!(WorkflowStage::CriteriaWeightsDerived
            .transition_to(WorkflowStage::FinalRankingComputed)
            .is_err());
    }

    #[test]
    fn only_final_ranking_is_terminal() {
        let terminal: Vec<_> = WorkflowStage::ALL
            .iter()
            .filter(|s| s.is_terminal())
            .collect();
        assert_eq!(terminal, vec![&WorkflowStage::FinalRankingComputed]);
    }

    #[test]
    fn display_matches_serialized_name() {
        for stage in WorkflowStage::ALL {
            let json = serde_json::to_string(&stage).unwrap();
            assert_eq!(json, format!("\"{}\"", stage));
        }
    }
}
