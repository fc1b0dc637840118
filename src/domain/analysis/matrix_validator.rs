//! Matrix Validator - Gatekeeper for every comparison matrix entering AHP.

use super::comparison_matrix::{check_finite, check_scale, check_size, upper_len};
use super::{ComparisonMatrix, MatrixError};

/// Allowed deviation of a diagonal cell from 1.
pub const DIAGONAL_TOLERANCE: f64 = 1e-6;

/// Allowed deviation of `M[i][j] * M[j][i]` from 1.
pub const RECIPROCAL_TOLERANCE: f64 = 1e-4;

/// Checks a full square array against the reciprocal-matrix invariants.
///
/// Checks run in a fixed order and stop at the first failure:
/// 1. at least 2x2 and square
/// 2. every cell finite
/// 3. diagonal equal to 1
/// 4. for every `i < j`: positive, reciprocal with `M[j][i]`, within `[1/9, 9]`
///
/// Nothing is coerced. The accepted matrix keeps the caller's upper triangle
/// and derives the lower triangle from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixValidator {
    pub diagonal_tolerance: f64,
    pub reciprocal_tolerance: f64,
}

impl Default for MatrixValidator {
    fn default() -> Self {
        Self {
            diagonal_tolerance: DIAGONAL_TOLERANCE,
            reciprocal_tolerance: RECIPROCAL_TOLERANCE,
        }
    }
}

impl MatrixValidator {
    /// Creates a validator with custom tolerances.
    pub fn new(diagonal_tolerance: f64, reciprocal_tolerance: f64) -> Self {
        Self {
            diagonal_tolerance,
            reciprocal_tolerance,
        }
    }

    /// Validates `rows` and returns the reciprocal matrix.
    pub fn validate(&self, rows: &[Vec<f64>]) -> Result<ComparisonMatrix, MatrixError> {
        let n = rows.len();
        check_size(n)?;

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(MatrixError::size(
                n,
                format!("row {} has {} columns, expected {}", i, row.len(), n),
            ));
        }

        for (i, row) in rows.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                check_finite(i, j, *value)?;
            }
        }

        for (i, row) in rows.iter().enumerate() {
            let value = row[i];
            if (value - 1.0).abs() > self.diagonal_tolerance {
                return Err(MatrixError::DiagonalViolation { index: i, value });
            }
        }

        let mut upper = Vec::with_capacity(upper_len(n));
        for i in 0..n {
            for j in (i + 1)..n {
                let value = rows[i][j];
                let mirror = rows[j][i];

                if value <= 0.0 {
                    return Err(MatrixError::RangeViolation {
                        row: i,
                        column: j,
                        value,
                    });
                }
                if (value * mirror - 1.0).abs() >= self.reciprocal_tolerance {
                    return Err(MatrixError::ReciprocalViolation {
                        row: i,
                        column: j,
                        value,
                        mirror,
                    });
                }
                check_scale(i, j, value)?;

                upper.push(value);
            }
        }

        Ok(ComparisonMatrix::from_validated_upper(n, upper))
    }
}

/// Validates a comparison matrix with the default tolerances.
pub fn validate_matrix(rows: &[Vec<f64>]) -> Result<ComparisonMatrix, MatrixError> {
    MatrixValidator::default().validate(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn saaty_example() -> Vec<Vec<f64>> {
        vec![
            vec![1.0, 3.0, 5.0],
            vec![1.0 / 3.0, 1.0, 2.0],
            vec![1.0 / 5.0, 1.0 / 2.0, 1.0],
        ]
    }

    #[test]
    fn accepts_valid_reciprocal_matrix() {
        let m = validate_matrix(&saaty_example()).unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.upper_triangle(), &[3.0, 5.0, 2.0]);
    }

    #[test]
    fn rejects_empty_and_single_entity_matrices() {
        assert!(matches!(
            validate_matrix(&[]),
            Err(MatrixError::SizeViolation { size: 0, .. })
        ));
        assert!(matches!(
            validate_matrix(&[vec![1.0]]),
            Err(MatrixError::SizeViolation { size: 1, .. })
        ));
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows = vec![vec![1.0, 2.0], vec![0.5]];
        assert!(matches!(
            validate_matrix(&rows),
            Err(MatrixError::SizeViolation { size: 2, .. })
        ));
    }

    #[test]
    fn rejects_non_finite_before_other_checks() {
        let mut rows = saaty_example();
        rows[0][0] = 7.0;
        rows[2][1] = f64::INFINITY;
        assert!(matches!(
            validate_matrix(&rows),
            Err(MatrixError::InvalidNumber { row: 2, column: 1, .. })
        ));
    }

    #[test]
    fn rejects_nan_entry() {
        let mut rows = saaty_example();
        rows[1][2] = f64::NAN;
        assert!(matches!(
            validate_matrix(&rows),
            Err(MatrixError::InvalidNumber { row: 1, column: 2, .. })
        ));
    }

    #[test]
    fn rejects_bad_diagonal() {
        let mut rows = saaty_example();
        rows[1][1] = 2.0;
        assert_eq!(
            validate_matrix(&rows),
            Err(MatrixError::DiagonalViolation {
                index: 1,
                value: 2.0
            })
        );
    }

    #[test]
    fn diagonal_tolerance_allows_rounding_noise() {
        let mut rows = saaty_example();
        rows[2][2] = 1.0 + 1e-9;
        assert!(validate_matrix(&rows).is_ok());
    }

    #[test]
    fn rejects_non_reciprocal_pair() {
        let mut rows = saaty_example();
        rows[2][0] = 0.5;
        assert!(matches!(
            validate_matrix(&rows),
            Err(MatrixError::ReciprocalViolation { row: 0, column: 2, .. })
        ));
    }

    #[test]
    fn rejects_value_above_nine() {
        let rows = vec![vec![1.0, 10.0], vec![0.1, 1.0]];
        assert_eq!(
            validate_matrix(&rows),
            Err(MatrixError::RangeViolation {
                row: 0,
                column: 1,
                value: 10.0
            })
        );
    }

    #[test]
    fn rejects_value_below_one_ninth_in_upper_triangle() {
        let rows = vec![vec![1.0, 0.1], vec![10.0, 1.0]];
        assert!(matches!(
            validate_matrix(&rows),
            Err(MatrixError::RangeViolation { row: 0, column: 1, .. })
        ));
    }

    #[test]
    fn rejects_non_positive_entry() {
        let rows = vec![vec![1.0, -2.0], vec![-0.5, 1.0]];
        assert!(matches!(
            validate_matrix(&rows),
            Err(MatrixError::RangeViolation { row: 0, column: 1, .. })
        ));
    }

    #[test]
    fn custom_tolerance_accepts_rounded_reciprocals() {
        let rows = vec![vec![1.0, 3.0], vec![0.333, 1.0]];
        assert!(validate_matrix(&rows).is_err());

        let lenient = MatrixValidator::new(DIAGONAL_TOLERANCE, 1e-2);
        assert!(lenient.validate(&rows).is_ok());
    }

    fn scale_value() -> impl Strategy<Value = f64> {
        prop_oneof![
            (1u32..=9).prop_map(f64::from),
            (1u32..=9).prop_map(|v| 1.0 / f64::from(v)),
        ]
    }

    fn reciprocal_rows() -> impl Strategy<Value = Vec<Vec<f64>>> {
        (2usize..=8).prop_flat_map(|n| {
            prop::collection::vec(scale_value(), n * (n - 1) / 2).prop_map(move |upper| {
                let mut rows = vec![vec![1.0; n]; n];
                let mut k = 0;
                for i in 0..n {
                    for j in (i + 1)..n {
                        rows[i][j] = upper[k];
                        rows[j][i] = 1.0 / upper[k];
                        k += 1;
                    }
                }
                rows
            })
        })
    }

    proptest! {
        #[test]
        fn accepts_every_reciprocal_matrix_on_scale(rows in reciprocal_rows()) {
            let m = validate_matrix(&rows).unwrap();
            for i in 0..rows.len() {
                for j in 0..rows.len() {
                    prop_assert!((m.get(i, j) - rows[i][j]).abs() < 1e-9);
                }
            }
        }

        #[test]
        fn breaking_one_reciprocal_cell_flips_to_rejection(
            rows in reciprocal_rows(),
            pick in any::<prop::sample::Index>(),
        ) {
            let n = rows.len();
            let pairs: Vec<(usize, usize)> = (0..n)
                .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
                .collect();
            let (i, j) = pairs[pick.index(pairs.len())];

            let mut broken = rows.clone();
            broken[j][i] = rows[j][i] * 2.0;

            let rejected = matches!(
                validate_matrix(&broken),
                Err(MatrixError::ReciprocalViolation { .. })
            );
            prop_assert!(rejected);
        }

        #[test]
        fn any_non_finite_cell_is_rejected(
            rows in reciprocal_rows(),
            pick in any::<prop::sample::Index>(),
            bad in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)],
        ) {
            let n = rows.len();
            let cell = pick.index(n * n);
            let mut broken = rows.clone();
            broken[cell / n][cell % n] = bad;

            let rejected = matches!(
                validate_matrix(&broken),
                Err(MatrixError::InvalidNumber { .. })
            );
            prop_assert!(rejected);
        }
    }
}
