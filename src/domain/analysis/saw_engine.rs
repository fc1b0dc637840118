//! SAW Scoring Engine - Simple Additive Weighting.
//!
//! Benefit columns are scaled by their maximum, cost columns by their
//! minimum, and each alternative's score is the weighted sum of its
//! normalized values. Weights are used as supplied.

use serde::Serialize;

use super::errors::ScoreSide;
use super::{FinalRanking, RankingAggregator, SawError};

/// Raw alternatives x criteria scores for one criterion category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreMatrix {
    side: ScoreSide,
    rows: Vec<Vec<f64>>,
    columns: usize,
}

impl ScoreMatrix {
    /// Builds a benefit matrix (higher raw value is better).
    pub fn benefit(rows: Vec<Vec<f64>>) -> Result<Self, SawError> {
        Self::new(ScoreSide::Benefit, rows)
    }

    /// Builds a cost matrix (lower raw value is better).
    pub fn cost(rows: Vec<Vec<f64>>) -> Result<Self, SawError> {
        Self::new(ScoreSide::Cost, rows)
    }

    /// Builds a matrix with `alternatives` rows and no criteria.
    pub fn empty(side: ScoreSide, alternatives: usize) -> Self {
        Self {
            side,
            rows: vec![Vec::new(); alternatives],
            columns: 0,
        }
    }

    /// Builds a matrix, requiring rectangular, finite, non-negative rows.
    pub fn new(side: ScoreSide, rows: Vec<Vec<f64>>) -> Result<Self, SawError> {
        let columns = rows.first().map(Vec::len).unwrap_or(0);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(SawError::ShapeMismatch {
                    side,
                    reason: format!("row {} has {} columns, expected {}", i, row.len(), columns),
                });
            }
            for (j, value) in row.iter().enumerate() {
                if !value.is_finite() {
                    return Err(SawError::InvalidNumber {
                        side,
                        row: i,
                        column: j,
                        value: *value,
                    });
                }
                if *value < 0.0 {
                    return Err(SawError::NegativeScore {
                        side,
                        row: i,
                        column: j,
                        value: *value,
                    });
                }
            }
        }

        Ok(Self {
            side,
            rows,
            columns,
        })
    }

    /// Returns which category this matrix holds.
    pub fn side(&self) -> ScoreSide {
        self.side
    }

    /// Returns the rows, one per alternative.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Returns the number of alternatives.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of criteria.
    pub fn column_count(&self) -> usize {
        self.columns
    }

    fn column(&self, j: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[j])
    }
}

/// Normalized scores, same shape as the raw matrix, every entry in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NormalizedScoreMatrix(Vec<Vec<f64>>);

impl NormalizedScoreMatrix {
    /// Returns the rows, one per alternative.
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.0
    }

    /// Returns the normalized value at `(alternative, criterion)`.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.0.get(row).and_then(|r| r.get(column)).copied()
    }
}

/// Everything the SAW computation produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SawOutcome {
    pub normalized_benefit: NormalizedScoreMatrix,
    pub normalized_cost: NormalizedScoreMatrix,
    /// Aggregate score per alternative, in input order.
    pub scores: Vec<f64>,
    pub ranking: FinalRanking,
}

/// SAW scoring functions.
pub struct SawEngine;

impl SawEngine {
    /// Normalizes both matrices and computes weighted scores and a ranking.
    ///
    /// # Edge Cases
    /// - Benefit column with all zeros: `DegenerateColumn`
    /// - Cost column with all zeros: `DegenerateColumn`
    /// - Cost column with some zero: `DivisionByZero`
    /// - No criteria on either side: `NoCriteria`
    pub fn score(
        raw_benefit: &ScoreMatrix,
        raw_cost: &ScoreMatrix,
        weight_benefit: &[f64],
        weight_cost: &[f64],
    ) -> Result<SawOutcome, SawError> {
        let alternatives = raw_benefit.row_count();
        if raw_cost.row_count() != alternatives {
            return Err(SawError::ShapeMismatch {
                side: ScoreSide::Cost,
                reason: format!(
                    "{} rows, but the benefit matrix has {}",
                    raw_cost.row_count(),
                    alternatives
                ),
            });
        }
        if alternatives == 0 {
            return Err(SawError::NoAlternatives);
        }
        if raw_benefit.column_count() + raw_cost.column_count() == 0 {
            return Err(SawError::NoCriteria);
        }

        check_weights(ScoreSide::Benefit, raw_benefit.column_count(), weight_benefit)?;
        check_weights(ScoreSide::Cost, raw_cost.column_count(), weight_cost)?;

        let normalized_benefit = Self::normalize_benefit(raw_benefit)?;
        let normalized_cost = Self::normalize_cost(raw_cost)?;

        let scores: Vec<f64> = (0..alternatives)
            .map(|i| {
                weighted_sum(&normalized_benefit.0[i], weight_benefit)
                    + weighted_sum(&normalized_cost.0[i], weight_cost)
            })
            .collect();

        let ranking = RankingAggregator::rank(&scores)?;

        Ok(SawOutcome {
            normalized_benefit,
            normalized_cost,
            scores,
            ranking,
        })
    }

    /// `r_ij = x_ij / max_k x_kj`
    pub fn normalize_benefit(raw: &ScoreMatrix) -> Result<NormalizedScoreMatrix, SawError> {
        let maxima = (0..raw.column_count())
            .map(|j| {
                let max = raw.column(j).fold(0.0_f64, f64::max);
                if max <= 0.0 {
                    Err(SawError::DegenerateColumn {
                        side: raw.side(),
                        column: j,
                    })
                } else {
                    Ok(max)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NormalizedScoreMatrix(
            raw.rows()
                .iter()
                .map(|row| row.iter().zip(&maxima).map(|(x, max)| x / max).collect())
                .collect(),
        ))
    }

    /// `r_ij = min_k x_kj / x_ij`
    pub fn normalize_cost(raw: &ScoreMatrix) -> Result<NormalizedScoreMatrix, SawError> {
        let minima = (0..raw.column_count())
            .map(|j| {
                if raw.column(j).all(|x| x == 0.0) {
                    return Err(SawError::DegenerateColumn {
                        side: raw.side(),
                        column: j,
                    });
                }
                if let Some(row) = raw.column(j).position(|x| x == 0.0) {
                    return Err(SawError::DivisionByZero { row, column: j });
                }
                Ok(raw.column(j).fold(f64::INFINITY, f64::min))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NormalizedScoreMatrix(
            raw.rows()
                .iter()
                .map(|row| row.iter().zip(&minima).map(|(x, min)| min / x).collect())
                .collect(),
        ))
    }
}

/// Scores alternatives with SAW.
pub fn score_saw(
    raw_benefit: &ScoreMatrix,
    raw_cost: &ScoreMatrix,
    weight_benefit: &[f64],
    weight_cost: &[f64],
) -> Result<SawOutcome, SawError> {
    SawEngine::score(raw_benefit, raw_cost, weight_benefit, weight_cost)
}

fn check_weights(side: ScoreSide, columns: usize, weights: &[f64]) -> Result<(), SawError> {
    if weights.len() != columns {
        return Err(SawError::ShapeMismatch {
            side,
            reason: format!("{} weights for {} criteria", weights.len(), columns),
        });
    }
    if let Some((column, value)) = weights
        .iter()
        .enumerate()
        .find(|(_, w)| !w.is_finite() || **w <= 0.0)
    {
        return Err(SawError::InvalidWeight {
            side,
            column,
            value: *value,
        });
    }
    Ok(())
}

fn weighted_sum(values: &[f64], weights: &[f64]) -> f64 {
    values.iter().zip(weights).map(|(r, w)| r * w).sum()
}
