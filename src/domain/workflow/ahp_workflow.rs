//! AHP Workflow - Tagged-state progression from raw input to final ranking.
//!
//! Each variant carries only the data that is valid at that stage, so a
//! ranking can never be requested before every matrix has been validated
//! and derived. Steps borrow the current state and return a new one; a
//! failed step leaves the caller holding the last good state.

use rayon::prelude::*;
use serde::Serialize;

use super::{WorkflowError, WorkflowStage};
use crate::domain::analysis::{
    derive_priorities, AhpSynthesizer, ComparisonMatrix, DerivedPriorities, FinalRanking,
    InconsistencyPolicy, MatrixInput, MatrixValidator, RankingAggregator, Synthesis,
    MIN_MATRIX_SIZE,
};
use crate::domain::foundation::{ensure_unique_names, EntityName, StateMachine, ValidationError};

/// Named criteria and alternatives for one AHP decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionInput {
    criteria: Vec<EntityName>,
    alternatives: Vec<EntityName>,
}

impl DecisionInput {
    /// Creates the input, requiring at least two unique names in each list.
    pub fn new(
        criteria: Vec<EntityName>,
        alternatives: Vec<EntityName>,
    ) -> Result<Self, ValidationError> {
        ensure_unique_names("criteria", &criteria, MIN_MATRIX_SIZE)?;
        ensure_unique_names("alternatives", &alternatives, MIN_MATRIX_SIZE)?;
        Ok(Self {
            criteria,
            alternatives,
        })
    }

    pub fn criteria(&self) -> &[EntityName] {
        &self.criteria
    }

    pub fn alternatives(&self) -> &[EntityName] {
        &self.alternatives
    }
}

/// Everything a completed AHP computation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AhpOutcome {
    pub input: DecisionInput,
    pub criteria_matrix: ComparisonMatrix,
    pub criteria: DerivedPriorities,
    /// One matrix per criterion, in criterion order.
    pub alternative_matrices: Vec<ComparisonMatrix>,
    /// One derivation per criterion, in criterion order.
    pub alternatives: Vec<DerivedPriorities>,
    pub synthesis: Synthesis,
    pub ranking: FinalRanking,
}

/// The AHP workflow state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AhpWorkflow {
    InputCollected {
        input: DecisionInput,
    },
    CriteriaMatrixValidated {
        input: DecisionInput,
        criteria_matrix: ComparisonMatrix,
    },
    CriteriaWeightsDerived {
        input: DecisionInput,
        criteria_matrix: ComparisonMatrix,
        criteria: DerivedPriorities,
    },
    AlternativeMatricesValidated {
        input: DecisionInput,
        criteria_matrix: ComparisonMatrix,
        criteria: DerivedPriorities,
        alternative_matrices: Vec<ComparisonMatrix>,
    },
    AlternativeScoresDerived {
        input: DecisionInput,
        criteria_matrix: ComparisonMatrix,
        criteria: DerivedPriorities,
        alternative_matrices: Vec<ComparisonMatrix>,
        alternatives: Vec<DerivedPriorities>,
    },
    FinalRankingComputed(Box<AhpOutcome>),
}

impl AhpWorkflow {
    /// Starts a workflow from collected names.
    pub fn start(input: DecisionInput) -> Self {
        AhpWorkflow::InputCollected { input }
    }

    /// Returns the current stage.
    pub fn stage(&self) -> WorkflowStage {
        match self {
            AhpWorkflow::InputCollected { .. } => WorkflowStage::InputCollected,
            AhpWorkflow::CriteriaMatrixValidated { .. } => WorkflowStage::CriteriaMatrixValidated,
            AhpWorkflow::CriteriaWeightsDerived { .. } => WorkflowStage::CriteriaWeightsDerived,
            AhpWorkflow::AlternativeMatricesValidated { .. } => {
                WorkflowStage::AlternativeMatricesValidated
            }
            AhpWorkflow::AlternativeScoresDerived { .. } => WorkflowStage::AlternativeScoresDerived,
            AhpWorkflow::FinalRankingComputed(_) => WorkflowStage::FinalRankingComputed,
        }
    }

    /// Returns the names the workflow was started with.
    pub fn input(&self) -> &DecisionInput {
        match self {
            AhpWorkflow::InputCollected { input }
            | AhpWorkflow::CriteriaMatrixValidated { input, .. }
            | AhpWorkflow::CriteriaWeightsDerived { input, .. }
            | AhpWorkflow::AlternativeMatricesValidated { input, .. }
            | AhpWorkflow::AlternativeScoresDerived { input, .. } => input,
            AhpWorkflow::FinalRankingComputed(outcome) => &outcome.input,
        }
    }

    /// Returns the derived criterion weights once they exist.
    pub fn criteria_priorities(&self) -> Option<&DerivedPriorities> {
        match self {
            AhpWorkflow::InputCollected { .. } | AhpWorkflow::CriteriaMatrixValidated { .. } => {
                None
            }
            AhpWorkflow::CriteriaWeightsDerived { criteria, .. }
            | AhpWorkflow::AlternativeMatricesValidated { criteria, .. }
            | AhpWorkflow::AlternativeScoresDerived { criteria, .. } => Some(criteria),
            AhpWorkflow::FinalRankingComputed(outcome) => Some(&outcome.criteria),
        }
    }

    /// Returns the per-criterion alternative derivations once they exist.
    pub fn alternative_priorities(&self) -> Option<&[DerivedPriorities]> {
        match self {
            AhpWorkflow::AlternativeScoresDerived { alternatives, .. } => Some(alternatives),
            AhpWorkflow::FinalRankingComputed(outcome) => Some(&outcome.alternatives),
            _ => None,
        }
    }

    /// Returns the final outcome if the workflow is complete.
    pub fn outcome(&self) -> Option<&AhpOutcome> {
        match self {
            AhpWorkflow::FinalRankingComputed(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Consumes a completed workflow and returns its outcome.
    pub fn into_outcome(self) -> Result<AhpOutcome, WorkflowError> {
        match self {
            AhpWorkflow::FinalRankingComputed(outcome) => Ok(*outcome),
            other => Err(other.out_of_order(WorkflowStage::FinalRankingComputed)),
        }
    }

    /// Validates the criteria comparison matrix.
    pub fn submit_criteria_matrix(
        &self,
        matrix: &MatrixInput,
        validator: &MatrixValidator,
    ) -> Result<Self, WorkflowError> {
        self.advance_to(WorkflowStage::CriteriaMatrixValidated)?;
        let AhpWorkflow::InputCollected { input } = self else {
            return Err(self.out_of_order(WorkflowStage::CriteriaMatrixValidated));
        };

        let criteria_matrix = matrix
            .to_matrix(input.criteria().len(), validator)
            .map_err(|e| WorkflowError::matrix("criteria matrix", e))?;

        Ok(AhpWorkflow::CriteriaMatrixValidated {
            input: input.clone(),
            criteria_matrix,
        })
    }

    /// Derives criterion weights and consistency from the criteria matrix.
    pub fn derive_criteria_weights(&self) -> Result<Self, WorkflowError> {
        self.advance_to(WorkflowStage::CriteriaWeightsDerived)?;
        let AhpWorkflow::CriteriaMatrixValidated {
            input,
            criteria_matrix,
        } = self
        else {
            return Err(self.out_of_order(WorkflowStage::CriteriaWeightsDerived));
        };

        Ok(AhpWorkflow::CriteriaWeightsDerived {
            input: input.clone(),
            criteria_matrix: criteria_matrix.clone(),
            criteria: derive_priorities(criteria_matrix).into(),
        })
    }

    /// Validates one alternatives matrix per criterion, in criterion order.
    ///
    /// Matrices are independent and validated on the rayon pool when
    /// `parallel` is set. On failure the error for the lowest criterion
    /// index is returned, whichever mode is used.
    pub fn submit_alternative_matrices(
        &self,
        matrices: &[MatrixInput],
        validator: &MatrixValidator,
        parallel: bool,
    ) -> Result<Self, WorkflowError> {
        self.advance_to(WorkflowStage::AlternativeMatricesValidated)?;
        let AhpWorkflow::CriteriaWeightsDerived {
            input,
            criteria_matrix,
            criteria,
        } = self
        else {
            return Err(self.out_of_order(WorkflowStage::AlternativeMatricesValidated));
        };

        if matrices.len() != input.criteria().len() {
            return Err(WorkflowError::CountMismatch {
                what: "alternative matrices",
                expected: input.criteria().len(),
                actual: matrices.len(),
            });
        }

        let size = input.alternatives().len();
        let validate = |(c, matrix): (usize, &MatrixInput)| {
            matrix.to_matrix(size, validator).map_err(|e| {
                WorkflowError::matrix(
                    format!("alternatives matrix for '{}'", input.criteria()[c]),
                    e,
                )
            })
        };

        let results: Vec<Result<ComparisonMatrix, WorkflowError>> = if parallel {
            matrices.par_iter().enumerate().map(validate).collect()
        } else {
            matrices.iter().enumerate().map(validate).collect()
        };
        let alternative_matrices = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        Ok(AhpWorkflow::AlternativeMatricesValidated {
            input: input.clone(),
            criteria_matrix: criteria_matrix.clone(),
            criteria: criteria.clone(),
            alternative_matrices,
        })
    }

    /// Derives alternative priorities for every criterion.
    pub fn derive_alternative_scores(&self, parallel: bool) -> Result<Self, WorkflowError> {
        self.advance_to(WorkflowStage::AlternativeScoresDerived)?;
        let AhpWorkflow::AlternativeMatricesValidated {
            input,
            criteria_matrix,
            criteria,
            alternative_matrices,
        } = self
        else {
            return Err(self.out_of_order(WorkflowStage::AlternativeScoresDerived));
        };

        let alternatives: Vec<DerivedPriorities> = if parallel {
            alternative_matrices
                .par_iter()
                .map(|m| derive_priorities(m).into())
                .collect()
        } else {
            alternative_matrices
                .iter()
                .map(|m| derive_priorities(m).into())
                .collect()
        };

        Ok(AhpWorkflow::AlternativeScoresDerived {
            input: input.clone(),
            criteria_matrix: criteria_matrix.clone(),
            criteria: criteria.clone(),
            alternative_matrices: alternative_matrices.clone(),
            alternatives,
        })
    }

    /// Synthesizes final scores and ranks the alternatives.
    pub fn compute_ranking(
        &self,
        policy: InconsistencyPolicy,
        threshold: f64,
    ) -> Result<Self, WorkflowError> {
        self.advance_to(WorkflowStage::FinalRankingComputed)?;
        let AhpWorkflow::AlternativeScoresDerived {
            input,
            criteria_matrix,
            criteria,
            alternative_matrices,
            alternatives,
        } = self
        else {
            return Err(self.out_of_order(WorkflowStage::FinalRankingComputed));
        };

        let synthesis =
            AhpSynthesizer::synthesize(&criteria.priorities, alternatives, policy, threshold)?;
        let ranking = RankingAggregator::rank_named(input.alternatives(), &synthesis.scores)?;

        Ok(AhpWorkflow::FinalRankingComputed(Box::new(AhpOutcome {
            input: input.clone(),
            criteria_matrix: criteria_matrix.clone(),
            criteria: criteria.clone(),
            alternative_matrices: alternative_matrices.clone(),
            alternatives: alternatives.clone(),
            synthesis,
            ranking,
        })))
    }

    fn advance_to(&self, target: WorkflowStage) -> Result<WorkflowStage, WorkflowError> {
        self.stage()
            .transition_to(target)
            .map_err(|_| self.out_of_order(target))
    }

    fn out_of_order(&self, target: WorkflowStage) -> WorkflowError {
        WorkflowError::InvalidTransition {
            from: self.stage(),
            to: target,
        }
    }
}
