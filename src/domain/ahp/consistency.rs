//! Consistency Calculator - consistency index, random consistency lookup and
//! relative consistency (CR) with the permissibility cutoff.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::AhpError;

/// Saaty's random consistency index for matrix orders 1 through 10.
pub const RANDOM_CONSISTENCY: [f64; 10] = [0.0, 0.0, 0.58, 0.9, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49];

/// Relative consistency (percent) above which a matrix is inconsistent.
pub const MAX_REL_CONS: f64 = 10.0;

/// Consistency index together with the order it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyIndex {
    pub order: usize,
    pub value: f64,
}

/// Outcome of checking one comparison matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    /// Matrix order `n`.
    pub order: usize,
    /// Weighted sum `L`.
    pub l: f64,
    pub consistency_index: f64,
    pub random_consistency: f64,
    /// CR in percent. `None` for orders whose random consistency is zero.
    pub relative_consistency: Option<f64>,
    pub permissible: bool,
}

/// Consistency computations.
pub struct ConsistencyCalculator;

impl ConsistencyCalculator {
    /// Looks up the random consistency index for order `n`.
    ///
    /// Returns `None` for `n == 0` and `n > 10`.
    pub fn random_consistency_for(n: usize) -> Option<f64> {
        n.checked_sub(1)
            .and_then(|i| RANDOM_CONSISTENCY.get(i))
            .copied()
    }

    /// `CI = (L - n) / (n - 1)`.
    ///
    /// # Errors
    /// `DegenerateMatrix` for `n <= 1`, where the index is undefined.
    pub fn consistency_index(l: f64, n: usize) -> Result<ConsistencyIndex, AhpError> {
        if n <= 1 {
            return Err(AhpError::DegenerateMatrix { order: n });
        }
        let order = n as f64;
        Ok(ConsistencyIndex {
            order: n,
            value: (l - order) / (order - 1.0),
        })
    }

    /// Random consistency for order `n`.
    ///
    /// # Errors
    /// - `PreconditionFailed` if `n` is zero (order not computed yet)
    /// - `UnsupportedOrder` if `n > 10`
    pub fn random_consistency(n: usize) -> Result<f64, AhpError> {
        if n == 0 {
            return Err(AhpError::precondition(
                "the matrix order must be computed before the random consistency",
            ));
        }
        Self::random_consistency_for(n).ok_or(AhpError::UnsupportedOrder { order: n })
    }

    /// `CR = CI / RI * 100`.
    ///
    /// # Errors
    /// `PreconditionFailed` if either the consistency index or the random
    /// consistency is zero.
    pub fn relative_consistency(consistency_index: f64, random_consistency: f64) -> Result<f64, AhpError> {
        if consistency_index == 0.0 {
            return Err(AhpError::precondition(
                "before calculating relative consistency, it is necessary to calculate the consistency index",
            ));
        }
        if random_consistency == 0.0 {
            return Err(AhpError::precondition(
                "relative consistency needs a non-zero random consistency (matrix order of at least 3)",
            ));
        }
        Ok(consistency_index / random_consistency * 100.0)
    }

    /// True iff `value <= MAX_REL_CONS`.
    pub fn is_permissible(value: f64) -> bool {
        Self::is_permissible_with(value, MAX_REL_CONS)
    }

    /// True iff `value <= max`.
    pub fn is_permissible_with(value: f64, max: f64) -> bool {
        value <= max
    }

    /// Runs the index, lookup and ratio steps for a solved matrix.
    ///
    /// Orders 1-2 have no meaningful ratio and are reported permissible
    /// without one. A zero index means perfect consistency (CR = 0).
    pub fn evaluate(l: f64, n: usize, max_relative_consistency: f64) -> Result<ConsistencyReport, AhpError> {
        let ci = Self::consistency_index(l, n)?;
        let ri = Self::random_consistency(n)?;

        let relative_consistency = if ri == 0.0 {
            None
        } else if ci.value == 0.0 {
            Some(0.0)
        } else {
            Some(Self::relative_consistency(ci.value, ri)?)
        };

        let permissible = relative_consistency
            .map(|cr| Self::is_permissible_with(cr, max_relative_consistency))
            .unwrap_or(true);

        Ok(ConsistencyReport {
            order: n,
            l,
            consistency_index: ci.value,
            random_consistency: ri,
            relative_consistency,
            permissible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_consistency_table_lookup() {
        assert_eq!(ConsistencyCalculator::random_consistency_for(1), Some(0.0));
        assert_eq!(ConsistencyCalculator::random_consistency_for(2), Some(0.0));
        assert_eq!(ConsistencyCalculator::random_consistency_for(3), Some(0.58));
        assert_eq!(ConsistencyCalculator::random_consistency_for(10), Some(1.49));
        assert_eq!(ConsistencyCalculator::random_consistency_for(11), None);
        assert_eq!(ConsistencyCalculator::random_consistency_for(0), None);
    }

    #[test]
    fn random_consistency_requires_order() {
        let err = ConsistencyCalculator::random_consistency(0).unwrap_err();
        assert!(matches!(err, AhpError::PreconditionFailed { .. }));
    }

    #[test]
    fn random_consistency_rejects_large_orders() {
        assert_eq!(
            ConsistencyCalculator::random_consistency(11),
            Err(AhpError::UnsupportedOrder { order: 11 })
        );
    }

    #[test]
    fn consistency_index_formula() {
        let ci = ConsistencyCalculator::consistency_index(3.1, 3).unwrap();
        assert_eq!(ci.order, 3);
        assert!((ci.value - 0.05).abs() < 1e-12);
    }

    #[test]
    fn consistency_index_is_degenerate_for_order_one() {
        assert_eq!(
            ConsistencyCalculator::consistency_index(1.0, 1),
            Err(AhpError::DegenerateMatrix { order: 1 })
        );
        assert!(ConsistencyCalculator::consistency_index(0.0, 0).is_err());
    }

    #[test]
    fn relative_consistency_formula() {
        let cr = ConsistencyCalculator::relative_consistency(0.058, 0.58).unwrap();
        assert!((cr - 10.0).abs() < 1e-9);
    }

    #[test]
    fn relative_consistency_needs_index_first() {
        match ConsistencyCalculator::relative_consistency(0.0, 0.58) {
            Err(AhpError::PreconditionFailed { reason }) => {
                assert!(reason.contains("consistency index"));
            }
            other => panic!("Expected PreconditionFailed, got {:?}", other),
        }
    }

    #[test]
    fn relative_consistency_needs_random_consistency() {
        assert!(ConsistencyCalculator::relative_consistency(0.1, 0.0).is_err());
    }

    #[test]
    fn permissible_boundary() {
        assert!(ConsistencyCalculator::is_permissible(10.0));
        assert!(ConsistencyCalculator::is_permissible(-3.0));
        assert!(!ConsistencyCalculator::is_permissible(10.0001));
    }

    #[test]
    fn evaluate_small_orders_skip_ratio() {
        let report = ConsistencyCalculator::evaluate(2.5, 2, MAX_REL_CONS).unwrap();
        assert!((report.consistency_index - 0.5).abs() < 1e-12);
        assert_eq!(report.relative_consistency, None);
        assert!(report.permissible);
    }

    #[test]
    fn evaluate_flags_inconsistent_matrix() {
        // CI = (3.2 - 3) / 2 = 0.1, CR = 0.1 / 0.58 * 100 ≈ 17.2
        let report = ConsistencyCalculator::evaluate(3.2, 3, MAX_REL_CONS).unwrap();
        assert!(report.relative_consistency.unwrap() > 17.0);
        assert!(!report.permissible);
    }

    #[test]
    fn evaluate_perfect_consistency_is_zero_ratio() {
        let report = ConsistencyCalculator::evaluate(3.0, 3, MAX_REL_CONS).unwrap();
        assert_eq!(report.relative_consistency, Some(0.0));
        assert!(report.permissible);
    }
}
