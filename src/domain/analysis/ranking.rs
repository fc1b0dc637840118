//! Ranking Aggregator - Final ordering of alternatives by score.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::RankingError;
use crate::domain::foundation::EntityName;

/// One alternative's place in the final ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    /// 1-based position; dense and contiguous even when scores tie.
    pub rank: usize,
    /// Position of the alternative in the caller's input order.
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub score: f64,
}

/// Alternatives sorted by score, highest first.
///
/// Equal scores keep their input order, so the result never depends on
/// names or map iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalRanking {
    entries: Vec<RankedAlternative>,
}

impl FinalRanking {
    /// Returns the ranked entries, best first.
    pub fn entries(&self) -> &[RankedAlternative] {
        &self.entries
    }

    /// Returns the best-ranked alternative.
    pub fn top(&self) -> Option<&RankedAlternative> {
        self.entries.first()
    }

    /// Returns the number of ranked alternatives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was ranked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the input indices in ranked order.
    pub fn order(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }

    /// Attaches display names by input index.
    pub fn with_names(mut self, names: &[EntityName]) -> Result<Self, RankingError> {
        if names.len() != self.entries.len() {
            return Err(RankingError::LengthMismatch {
                expected: self.entries.len(),
                actual: names.len(),
            });
        }
        for entry in &mut self.entries {
            entry.name = Some(names[entry.index].to_string());
        }
        Ok(self)
    }
}

/// Ranking functions.
pub struct RankingAggregator;

impl RankingAggregator {
    /// Ranks scores given in input order.
    ///
    /// # Edge Cases
    /// - Empty input: Returns an empty ranking
    /// - Ties: Earlier input index ranks first
    /// - Non-finite score: Rejected
    pub fn rank(scores: &[f64]) -> Result<FinalRanking, RankingError> {
        if let Some((index, value)) = scores.iter().enumerate().find(|(_, s)| !s.is_finite()) {
            return Err(RankingError::InvalidNumber {
                index,
                value: *value,
            });
        }

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // sort_by is stable: ties stay in input order
        order.sort_by(|a, b| {
            scores[*b]
                .partial_cmp(&scores[*a])
                .unwrap_or(Ordering::Equal)
        });

        let entries = order
            .into_iter()
            .enumerate()
            .map(|(position, index)| RankedAlternative {
                rank: position + 1,
                index,
                name: None,
                score: scores[index],
            })
            .collect();

        Ok(FinalRanking { entries })
    }

    /// Ranks scores and labels each entry with its alternative name.
    pub fn rank_named(names: &[EntityName], scores: &[f64]) -> Result<FinalRanking, RankingError> {
        if names.len() != scores.len() {
            return Err(RankingError::LengthMismatch {
                expected: names.len(),
                actual: scores.len(),
            });
        }
        Self::rank(scores)?.with_names(names)
    }
}

/// Ranks scores given in input order.
pub fn rank(scores: &[f64]) -> Result<FinalRanking, RankingError> {
    RankingAggregator::rank(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(list: &[&str]) -> Vec<EntityName> {
        list.iter().map(|n| EntityName::try_new(*n).unwrap()).collect()
    }

    #[test]
    fn rank_empty_input() {
        let ranking = rank(&[]).unwrap();
        assert!(ranking.is_empty());
        assert!(ranking.top().is_none());
    }

    #[test]
    fn rank_sorts_descending() {
        let ranking = rank(&[0.2, 0.5, 0.3]).unwrap();
        assert_eq!(ranking.order(), vec![1, 2, 0]);
        assert_eq!(
            ranking.entries().iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn ties_keep_input_order_and_dense_ranks() {
        let ranking = rank(&[0.4, 0.4, 0.2]).unwrap();
        assert_eq!(ranking.order(), vec![0, 1, 2]);
        assert_eq!(ranking.entries()[0].rank, 1);
        assert_eq!(ranking.entries()[1].rank, 2);
    }

    #[test]
    fn rank_rejects_non_finite_scores() {
        assert_eq!(
            rank(&[0.1, f64::INFINITY]),
            Err(RankingError::InvalidNumber {
                index: 1,
                value: f64::INFINITY
            })
        );
        assert!(matches!(
            rank(&[f64::NAN]),
            Err(RankingError::InvalidNumber { index: 0, .. })
        ));
    }

    #[test]
    fn rank_named_attaches_names() {
        let ranking =
            RankingAggregator::rank_named(&names(&["Laptop A", "Laptop B"]), &[0.3, 0.7]).unwrap();
        assert_eq!(ranking.top().unwrap().name.as_deref(), Some("Laptop B"));
        assert_eq!(ranking.entries()[1].name.as_deref(), Some("Laptop A"));
    }

    #[test]
    fn rank_named_rejects_length_mismatch() {
        let result = RankingAggregator::rank_named(&names(&["A"]), &[0.3, 0.7]);
        assert_eq!(
            result,
            Err(RankingError::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn ranking_serializes_as_array() {
        let ranking = RankingAggregator::rank_named(&names(&["A"]), &[1.0]).unwrap();
        let json = serde_json::to_string(&ranking).unwrap();
        assert_eq!(json, r#"[{"rank":1,"index":0,"name":"A","score":1.0}]"#);
    }

    proptest! {
        #[test]
        fn ranking_is_sorted_and_a_permutation(scores in prop::collection::vec(0.0f64..1.0, 0..20)) {
            let ranking = rank(&scores).unwrap();

            let mut seen = ranking.order();
            seen.sort_unstable();
            prop_assert_eq!(seen, (0..scores.len()).collect::<Vec<_>>());

            for pair in ranking.entries().windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(pair[0].index < pair[1].index);
                }
            }
        }

        #[test]
        fn reranking_sorted_scores_is_identity(scores in prop::collection::vec(0u8..5, 0..20)) {
            let scores: Vec<f64> = scores.into_iter().map(f64::from).collect();
            let sorted: Vec<f64> = rank(&scores).unwrap().entries().iter().map(|e| e.score).collect();
            let again = rank(&sorted).unwrap();

            prop_assert_eq!(again.order(), (0..sorted.len()).collect::<Vec<_>>());
        }

        #[test]
        fn swapping_tied_inputs_only_swaps_positions(
            mut scores in prop::collection::vec(0u8..4, 2..12),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let (a, b) = (a.index(scores.len()), b.index(scores.len()));
            scores[b] = scores[a];
            let scores: Vec<f64> = scores.into_iter().map(f64::from).collect();

            let mut swapped = scores.clone();
            swapped.swap(a, b);

            let before: Vec<f64> = rank(&scores).unwrap().entries().iter().map(|e| e.score).collect();
            let after: Vec<f64> = rank(&swapped).unwrap().entries().iter().map(|e| e.score).collect();
            prop_assert_eq!(before, after);
        }
    }
}
