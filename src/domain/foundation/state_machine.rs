//! State machine trait for stage enums.
//!
//! Gives every lifecycle enum the same checked-transition API, so callers
//! cannot skip ahead of a step whose inputs have not been validated.

use super::ValidationError;

/// Trait for stage enums that represent state machines.
///
/// Implementors list the legal successors of each stage and get validated
/// transitions for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for WorkflowStage {
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             InputCollected => vec![CriteriaMatrixValidated],
///             // ... etc
///             FinalRankingComputed => vec![],
///         }
///     }
/// }
///
/// let stage = stage.transition_to(WorkflowStage::CriteriaMatrixValidated)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns all valid target stages from the current one.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Returns true if moving from self to target is allowed.
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Performs the transition, returning error if it skips or reverses a stage.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "stage_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if the current stage is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Pipeline {
        Parsed,
        Scored,
        Ranked,
    }

    impl StateMachine for Pipeline {
        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Pipeline::Parsed => vec![Pipeline::Scored],
                Pipeline::Scored => vec![Pipeline::Ranked],
                Pipeline::Ranked => vec![],
            }
        }
    }

    #[test]
    fn forward_step_is_allowed() {
        assert_eq!(
            Pipeline::Parsed.transition_to(Pipeline::Scored),
            Ok(Pipeline::Scored)
        );
    }

    #[test]
    fn skipping_a_stage_is_rejected() {
        let err = Pipeline::Parsed.transition_to(Pipeline::Ranked).unwrap_err();
        assert!(err.to_string().contains("Parsed to Ranked"));
    }

    #[test]
    fn going_back_is_rejected() {
        assert!(!Pipeline::Ranked.can_transition_to(&Pipeline::Parsed));
    }

    #[test]
    fn last_stage_is_terminal() {
        assert!(Pipeline::Ranked.is_terminal());
        assert!(!Pipeline::Scored.is_terminal());
    }
}
