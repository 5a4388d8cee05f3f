//! Priority Calculator - geometric-mean eigenvector approximation and
//! priority vector normalization.

use serde::{Deserialize, Serialize};

use super::ComparisonMatrix;
use crate::domain::foundation::AhpError;

/// How the weighted sum `L` pairs coefficients with priorities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LambdaFormula {
    /// `L = Σ_i Σ_j a_ij · w_i`: every coefficient of a row is weighted by
    /// that row's own priority.
    #[default]
    RowPriority,
    /// `L = Σ_i Σ_j a_ij · w_j`: every coefficient is weighted by the
    /// priority of the column it compares against (Saaty's λ_max estimate).
    ColumnPriority,
}

/// Eigenvector and priority vector computations over a comparison matrix.
pub struct PriorityCalculator;

impl PriorityCalculator {
    /// Geometric mean of `values`: product raised to `1 / count`.
    ///
    /// Returns `None` for an empty input.
    pub fn geometric_mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
        let (product, count) = values
            .into_iter()
            .fold((1.0_f64, 0_u32), |(product, count), v| (product * v, count + 1));

        if count == 0 {
            return None;
        }
        Some(product.powf(1.0 / f64::from(count)))
    }

    /// Stores the geometric-mean eigenvector of every populated row.
    pub fn component_eigenvectors(matrix: &mut ComparisonMatrix) {
        let rows: Vec<usize> = matrix.populated_rows().collect();
        for row in rows {
            let eigenvector = Self::geometric_mean(matrix.row_entries(row).map(|(_, v)| v));
            matrix.set_eigenvector(row, eigenvector);
        }
    }

    /// Sum of the row eigenvectors.
    ///
    /// # Errors
    /// `PreconditionFailed` if no row eigenvector has been computed.
    pub fn eigenvector_total(matrix: &ComparisonMatrix) -> Result<f64, AhpError> {
        let eigenvectors: Vec<f64> = (0..matrix.order())
            .filter_map(|row| matrix.eigenvector(row))
            .collect();

        if eigenvectors.is_empty() {
            return Err(AhpError::precondition(
                "row eigenvectors must be computed before their total",
            ));
        }
        Ok(eigenvectors.iter().sum())
    }

    /// Stores `eigenvector / total` as each solved row's priority.
    ///
    /// A zero total leaves every priority unset; the caller decides whether
    /// that is an error.
    pub fn priority_vector(matrix: &mut ComparisonMatrix, total: f64) {
        for row in 0..matrix.order() {
            let priority = match matrix.eigenvector(row) {
                Some(eigenvector) if total != 0.0 => Some(eigenvector / total),
                _ => None,
            };
            matrix.set_priority_vector(row, priority);
        }
    }

    /// Weighted sum `L` used by the consistency index.
    ///
    /// Rows without a priority contribute nothing.
    ///
    /// # Errors
    /// `PreconditionFailed` if the priority vector has not been computed.
    pub fn weighted_sum(matrix: &ComparisonMatrix, formula: LambdaFormula) -> Result<f64, AhpError> {
        if !matrix.has_priorities() {
            return Err(AhpError::precondition(
                "the priority vector must be computed before the weighted sum",
            ));
        }

        let mut l = 0.0;
        for row in 0..matrix.order() {
            for (column, value) in matrix.row_entries(row) {
                let weight = match formula {
                    LambdaFormula::RowPriority => matrix.priority_vector(row),
                    LambdaFormula::ColumnPriority => matrix.priority_vector(column),
                };
                l += value * weight.unwrap_or(0.0);
            }
        }
        Ok(l)
    }

    /// Order used by the consistency index: the entry count of the first
    /// populated row.
    pub fn matrix_order(matrix: &ComparisonMatrix) -> usize {
        matrix
            .populated_rows()
            .next()
            .map(|row| matrix.row_len(row))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::NameIndex;

    const EPS: f64 = 1e-9;

    fn reciprocal(labels: &[&str], upper: &[(usize, usize, f64)]) -> ComparisonMatrix {
        let mut m = ComparisonMatrix::empty(NameIndex::new(labels.iter().copied()));
        for i in 0..labels.len() {
            m.set(i, i, 1.0);
        }
        for &(i, j, v) in upper {
            m.set(i, j, v);
            m.set(j, i, 1.0 / v);
        }
        m
    }

    fn solve(m: &mut ComparisonMatrix) {
        PriorityCalculator::component_eigenvectors(m);
        let total = PriorityCalculator::eigenvector_total(m).unwrap();
        PriorityCalculator::priority_vector(m, total);
    }

    #[test]
    fn geometric_mean_of_empty_is_none() {
        assert_eq!(PriorityCalculator::geometric_mean(Vec::new()), None);
    }

    #[test]
    fn geometric_mean_matches_definition() {
        let gm = PriorityCalculator::geometric_mean(vec![1.0, 3.0]).unwrap();
        assert!((gm - 3.0_f64.sqrt()).abs() < EPS);

        let gm = PriorityCalculator::geometric_mean(vec![2.0, 4.0, 8.0]).unwrap();
        assert!((gm - 4.0).abs() < EPS);
    }

    #[test]
    fn geometric_mean_with_zero_is_zero() {
        assert_eq!(PriorityCalculator::geometric_mean(vec![0.0, 5.0]), Some(0.0));
    }

    #[test]
    fn two_by_two_priorities() {
        let mut m = reciprocal(&["Cost", "Quality"], &[(0, 1, 3.0)]);
        solve(&mut m);
        assert!((m.priority_vector(0).unwrap() - 0.75).abs() < EPS);
        assert!((m.priority_vector(1).unwrap() - 0.25).abs() < EPS);
    }

    #[test]
    fn eigenvector_total_requires_eigenvectors() {
        let m = reciprocal(&["A", "B"], &[(0, 1, 2.0)]);
        let err = PriorityCalculator::eigenvector_total(&m).unwrap_err();
        assert!(matches!(err, AhpError::PreconditionFailed { .. }));
    }

    #[test]
    fn zero_total_leaves_priorities_unset() {
        let mut m = ComparisonMatrix::zeroed(NameIndex::new(["X", "Y"]));
        PriorityCalculator::component_eigenvectors(&mut m);
        let total = PriorityCalculator::eigenvector_total(&m).unwrap();
        assert_eq!(total, 0.0);

        PriorityCalculator::priority_vector(&mut m, total);
        assert_eq!(m.priority_vector(0), None);
        assert!(!m.has_priorities());
    }

    #[test]
    fn weighted_sum_requires_priorities() {
        let m = reciprocal(&["A", "B"], &[(0, 1, 2.0)]);
        assert!(PriorityCalculator::weighted_sum(&m, LambdaFormula::RowPriority).is_err());
    }

    #[test]
    fn weighted_sum_row_priority_on_consistent_pair() {
        // (1 + 2)·2/3 + (0.5 + 1)·1/3
        let mut m = reciprocal(&["A", "B"], &[(0, 1, 2.0)]);
        solve(&mut m);
        let l = PriorityCalculator::weighted_sum(&m, LambdaFormula::RowPriority).unwrap();
        assert!((l - 2.5).abs() < EPS);
    }

    #[test]
    fn weighted_sum_column_priority_equals_order_when_consistent() {
        let mut m = reciprocal(&["A", "B", "C"], &[(0, 1, 2.0), (0, 2, 4.0), (1, 2, 2.0)]);
        solve(&mut m);
        let l = PriorityCalculator::weighted_sum(&m, LambdaFormula::ColumnPriority).unwrap();
        assert!((l - 3.0).abs() < 1e-9);
    }

    #[test]
    fn matrix_order_counts_first_populated_row() {
        let mut m = ComparisonMatrix::empty(NameIndex::new(["A", "B", "C"]));
        assert_eq!(PriorityCalculator::matrix_order(&m), 0);

        m.set(1, 0, 1.0);
        m.set(1, 1, 1.0);
        assert_eq!(PriorityCalculator::matrix_order(&m), 2);
    }

    #[test]
    fn lambda_formula_deserializes_snake_case() {
        let f: LambdaFormula = serde_json::from_str("\"column_priority\"").unwrap();
        assert_eq!(f, LambdaFormula::ColumnPriority);
        assert_eq!(LambdaFormula::default(), LambdaFormula::RowPriority);
    }
}
