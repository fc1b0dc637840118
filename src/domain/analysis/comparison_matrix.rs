//! Comparison Matrix - Reciprocal pairwise-comparison matrix.
//!
//! Only the strict upper triangle is stored. The diagonal is always 1 and the
//! lower triangle is derived as `1 / upper`, so the two halves can never
//! drift apart.

use serde::{Deserialize, Serialize};

use super::{MatrixError, MatrixValidator};

/// Smallest supported matrix dimension.
pub const MIN_MATRIX_SIZE: usize = 2;

/// Upper bound of the Saaty 1-9 scale.
pub const MAX_SCALE_VALUE: f64 = 9.0;

/// Lower bound of the Saaty 1-9 scale.
pub const MIN_SCALE_VALUE: f64 = 1.0 / 9.0;

/// Slack for values typed as decimals of the scale bounds.
const SCALE_EPSILON: f64 = 1e-9;

/// One user-entered judgement: entity `i` is `value` times as important as `j`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairwiseComparison {
    pub i: usize,
    pub j: usize,
    pub value: f64,
}

impl PairwiseComparison {
    /// Creates a new comparison.
    pub fn new(i: usize, j: usize, value: f64) -> Self {
        Self { i, j, value }
    }
}

/// A validated reciprocal comparison matrix.
///
/// Construct through [`MatrixValidator::validate`],
/// [`ComparisonMatrix::from_upper_triangle`] or
/// [`ComparisonMatrix::from_comparisons`]; every constructor enforces the
/// size, finiteness and scale invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct ComparisonMatrix {
    size: usize,
    upper: Vec<f64>,
}

impl ComparisonMatrix {
    /// Builds a matrix from its strict upper triangle in row-major order.
    ///
    /// For `n = 3` the expected order is `[m01, m02, m12]`.
    pub fn from_upper_triangle(size: usize, values: Vec<f64>) -> Result<Self, MatrixError> {
        check_size(size)?;

        let expected = upper_len(size);
        if values.len() != expected {
            return Err(MatrixError::size(
                size,
                format!(
                    "expected {} upper-triangular values for a {}x{} matrix, got {}",
                    expected,
                    size,
                    size,
                    values.len()
                ),
            ));
        }

        let matrix = Self {
            size,
            upper: values,
        };
        for (i, j) in matrix.upper_cells() {
            check_scale(i, j, matrix.get(i, j))?;
        }

        Ok(matrix)
    }

    /// Builds a matrix from individual judgements over an all-ones matrix.
    ///
    /// A comparison with `i > j` sets the mirrored upper cell to `1 / value`.
    /// Later judgements for the same pair overwrite earlier ones. Pairs that
    /// are never mentioned stay at 1 (equal importance).
    pub fn from_comparisons(
        size: usize,
        comparisons: &[PairwiseComparison],
    ) -> Result<Self, MatrixError> {
        check_size(size)?;

        let mut upper = vec![1.0; upper_len(size)];
        for comparison in comparisons {
            let PairwiseComparison { i, j, value } = *comparison;

            if i >= size || j >= size {
                return Err(MatrixError::size(
                    size,
                    format!("comparison ({}, {}) is outside a {}x{} matrix", i, j, size, size),
                ));
            }
            check_finite(i, j, value)?;

            if i == j {
                if value != 1.0 {
                    return Err(MatrixError::DiagonalViolation { index: i, value });
                }
                continue;
            }

            check_scale(i, j, value)?;
            if i < j {
                upper[upper_index(size, i, j)] = value;
            } else {
                upper[upper_index(size, j, i)] = 1.0 / value;
            }
        }

        Ok(Self { size, upper })
    }

    /// Builds an all-ones matrix (every entity equally important).
    pub fn uniform(size: usize) -> Result<Self, MatrixError> {
        Self::from_comparisons(size, &[])
    }

    /// Wraps an upper triangle the validator has already checked.
    pub(crate) fn from_validated_upper(size: usize, upper: Vec<f64>) -> Self {
        debug_assert_eq!(upper.len(), upper_len(size));
        Self { size, upper }
    }

    /// Returns the matrix dimension `n`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the stored strict upper triangle.
    pub fn upper_triangle(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `M[i][j]`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below [`size`](Self::size).
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.size && j < self.size, "cell ({}, {}) out of bounds", i, j);
        match i.cmp(&j) {
            std::cmp::Ordering::Equal => 1.0,
            std::cmp::Ordering::Less => self.upper[upper_index(self.size, i, j)],
            std::cmp::Ordering::Greater => 1.0 / self.upper[upper_index(self.size, j, i)],
        }
    }

    /// Returns row `i` as a fully materialized vector.
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.size).map(|j| self.get(i, j)).collect()
    }

    /// Returns the full `n x n` matrix.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i)).collect()
    }

    /// Multiplies the matrix by a column vector of length `n`.
    pub fn multiply(&self, vector: &[f64]) -> Vec<f64> {
        (0..self.size)
            .map(|i| {
                vector
                    .iter()
                    .enumerate()
                    .map(|(j, v)| self.get(i, j) * v)
                    .sum()
            })
            .collect()
    }

    fn upper_cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let size = self.size;
        (0..size).flat_map(move |i| (i + 1..size).map(move |j| (i, j)))
    }
}

impl TryFrom<Vec<Vec<f64>>> for ComparisonMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        MatrixValidator::default().validate(&rows)
    }
}

impl From<ComparisonMatrix> for Vec<Vec<f64>> {
    fn from(matrix: ComparisonMatrix) -> Self {
        matrix.to_rows()
    }
}

/// Matrix as supplied by the caller: a full square array or a list of
/// judgements. An empty list holds no judgements and yields the all-ones
/// matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatrixInput {
    Rows(Vec<Vec<f64>>),
    Comparisons(Vec<PairwiseComparison>),
}

impl MatrixInput {
    /// Validates the input into a matrix of exactly `size` rows.
    pub fn to_matrix(
        &self,
        size: usize,
        validator: &MatrixValidator,
    ) -> Result<ComparisonMatrix, MatrixError> {
        match self {
            MatrixInput::Rows(rows) if rows.is_empty() => ComparisonMatrix::uniform(size),
            MatrixInput::Rows(rows) => {
                if rows.len() != size {
                    return Err(MatrixError::size(
                        rows.len(),
                        format!("expected {} rows, got {}", size, rows.len()),
                    ));
                }
                validator.validate(rows)
            }
            MatrixInput::Comparisons(comparisons) => {
                ComparisonMatrix::from_comparisons(size, comparisons)
            }
        }
    }
}

/// Number of cells in the strict upper triangle of an `n x n` matrix.
pub(crate) fn upper_len(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

/// Row-major offset of `(i, j)`, `i < j`, in the strict upper triangle.
fn upper_index(size: usize, i: usize, j: usize) -> usize {
    i * (2 * size - i - 1) / 2 + (j - i - 1)
}

pub(crate) fn check_size(size: usize) -> Result<(), MatrixError> {
    if size < MIN_MATRIX_SIZE {
        return Err(MatrixError::size(
            size,
            format!("matrix must be at least {0}x{0}, got {1}x{1}", MIN_MATRIX_SIZE, size),
        ));
    }
    Ok(())
}

pub(crate) fn check_finite(row: usize, column: usize, value: f64) -> Result<(), MatrixError> {
    if !value.is_finite() {
        return Err(MatrixError::InvalidNumber { row, column, value });
    }
    Ok(())
}

/// Positive and within `[1/9, 9]`.
pub(crate) fn check_scale(row: usize, column: usize, value: f64) -> Result<(), MatrixError> {
    check_finite(row, column, value)?;
    if value <= 0.0
        || value < MIN_SCALE_VALUE - SCALE_EPSILON
        || value > MAX_SCALE_VALUE + SCALE_EPSILON
    {
        return Err(MatrixError::RangeViolation { row, column, value });
    }
    Ok(())
}
