//! Hierarchy - the AHP engine.
//!
//! Drives the judgment matrix over the criteria, one pairwise comparison
//! matrix per criterion over the alternatives, and the summary table that
//! combines them.
//!
//! # Call order
//!
//! 1. `set_priority_factor` for every ordered criterion pair
//! 2. `set_component_eigenvector`, `set_eigenvector`,
//!    `set_component_priority_vector`, `calc_l`, `calc_consistency_index`,
//!    `calc_random_consistency`, `calc_relative_consistency`
//!    (or `solve_criteria` for the whole chain)
//! 3. `set_pairwise_comparisons`, then `set_alternative_assessment` for every
//!    ordered alternative pair under every criterion
//! 4. `set_comp_eigenvector_comparisons`, `set_eigenvector_comparison`,
//!    `set_comp_priority_vector_comparisons`, `calc_lc`,
//!    `calc_cons_index_comparisons` per criterion
//!    (or `solve_alternatives`)
//! 5. `set_summary_data`, `set_comp_pr_vector_summary_data`,
//!    `best_alternative`
//!
//! Intermediate values (eigenvector totals, `L`, `n`, CI, RI, CR) are
//! returned to the caller instead of being kept on the engine.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    ComparisonMatrix, ConsistencyCalculator, ConsistencyIndex, ConsistencyReport, CriterionConsistency,
    DecisionReport, LambdaFormula, PriorityCalculator, RankedAlternative, Structuring, SummaryTable, MAX_REL_CONS,
};
use crate::domain::foundation::{AhpError, DecisionId, NameIndex, Timestamp, ValidationError};

/// Tunables for a [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// CR percentage above which a matrix is inconsistent.
    pub max_relative_consistency: f64,
    /// Pairing of coefficients and priorities in the criteria weighted sum `L`.
    pub lambda_formula: LambdaFormula,
    /// Pairing used for the weighted sum of each alternative matrix.
    pub alternative_lambda_formula: LambdaFormula,
    /// Fail `solve_criteria` when the judgment matrix is not permissible.
    pub require_consistent_criteria: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_relative_consistency: MAX_REL_CONS,
            lambda_formula: LambdaFormula::RowPriority,
            alternative_lambda_formula: LambdaFormula::ColumnPriority,
            require_consistent_criteria: false,
        }
    }
}

/// Per-criterion eigenvector totals produced by
/// [`Hierarchy::set_eigenvector_comparison`].
///
/// A criterion whose row eigenvectors have not been computed has no total,
/// which is distinct from a zero total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorTotals {
    totals: Vec<(String, Option<f64>)>,
}

impl EigenvectorTotals {
    /// Total for `criterion`, ignoring case. `None` if the name is unknown
    /// or the criterion's eigenvectors were not computed.
    pub fn get(&self, criterion: &str) -> Option<f64> {
        let wanted = NameIndex::canonical(criterion);
        self.totals
            .iter()
            .find(|(name, _)| NameIndex::canonical(name) == wanted)
            .and_then(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.totals.iter().map(|(name, total)| (name.as_str(), *total))
    }
}

/// The AHP engine for one decision run.
#[derive(Debug, Clone)]
pub struct Hierarchy {
    structure: Structuring,
    settings: EngineSettings,
    judgment_matrix: ComparisonMatrix,
    pairwise_comparisons: Vec<ComparisonMatrix>,
    summary_data: Option<SummaryTable>,
    criteria_consistency: Option<ConsistencyReport>,
    alternative_consistency: Vec<Option<ConsistencyReport>>,
}

impl Hierarchy {
    /// Creates an engine around `structure` with default settings.
    pub fn new(structure: Structuring) -> Self {
        Self::with_settings(structure, EngineSettings::default())
    }

    pub fn with_settings(structure: Structuring, settings: EngineSettings) -> Self {
        let judgment_matrix = ComparisonMatrix::empty(structure.criterion_index().clone());
        let criteria = structure.criteria().len();
        Self {
            structure,
            settings,
            judgment_matrix,
            pairwise_comparisons: Vec::new(),
            summary_data: None,
            criteria_consistency: None,
            alternative_consistency: vec![None; criteria],
        }
    }

    pub fn structure(&self) -> &Structuring {
        &self.structure
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn judgment_matrix(&self) -> &ComparisonMatrix {
        &self.judgment_matrix
    }

    /// Per-criterion alternative matrices, in criterion order.
    ///
    /// Empty until [`Hierarchy::set_pairwise_comparisons`] is called.
    pub fn pairwise_comparisons(&self) -> &[ComparisonMatrix] {
        &self.pairwise_comparisons
    }

    /// Alternative matrix for `criterion`, ignoring case.
    pub fn comparison_matrix(&self, criterion: &str) -> Option<&ComparisonMatrix> {
        let position = self.structure.criterion_index().position(criterion)?;
        self.pairwise_comparisons.get(position)
    }

    pub fn summary_data(&self) -> Option<&SummaryTable> {
        self.summary_data.as_ref()
    }

    // ------------------------------------------------------------------
    // Criteria weighting
    // ------------------------------------------------------------------

    /// Stores `judgment_matrix[criterion1][criterion2] = coefficient`.
    ///
    /// Reciprocals are not derived; supply every ordered pair. Zero is
    /// accepted and reads as "no judgment".
    ///
    /// # Errors
    /// - `UnknownCriterion` if either name is not a criterion (case-insensitive)
    /// - `Validation` if the coefficient is negative, NaN or infinite
    pub fn set_priority_factor(&mut self, criterion1: &str, criterion2: &str, coefficient: f64) -> Result<(), AhpError> {
        check_coefficient("judgment coefficient", coefficient)?;
        let row = self.criterion_position(criterion1)?;
        let column = self.criterion_position(criterion2)?;
        self.judgment_matrix.set(row, column, coefficient);
        Ok(())
    }

    /// Stores `a_12 = coefficient` and `a_21 = 1 / coefficient`.
    ///
    /// # Errors
    /// `Validation` unless the coefficient is finite and strictly positive.
    pub fn set_reciprocal_priority_factor(
        &mut self,
        criterion1: &str,
        criterion2: &str,
        coefficient: f64,
    ) -> Result<(), AhpError> {
        check_reciprocal("judgment coefficient", coefficient)?;
        self.set_priority_factor(criterion1, criterion2, coefficient)?;
        self.set_priority_factor(criterion2, criterion1, 1.0 / coefficient)
    }

    /// Computes the geometric-mean eigenvector of every judgment row.
    pub fn set_component_eigenvector(&mut self) {
        PriorityCalculator::component_eigenvectors(&mut self.judgment_matrix);
    }

    /// Returns the sum of the judgment rows' eigenvectors.
    pub fn set_eigenvector(&self) -> Result<f64, AhpError> {
        let total = PriorityCalculator::eigenvector_total(&self.judgment_matrix)?;
        debug!(total, "criteria eigenvector total");
        Ok(total)
    }

    /// Normalizes the judgment eigenvectors by `total`.
    ///
    /// # Errors
    /// `DegenerateMatrix` if `total` is zero.
    pub fn set_component_priority_vector(&mut self, total: f64) -> Result<(), AhpError> {
        if total == 0.0 {
            return Err(AhpError::DegenerateMatrix {
                order: self.judgment_matrix.order(),
            });
        }
        PriorityCalculator::priority_vector(&mut self.judgment_matrix, total);
        Ok(())
    }

    /// Weighted sum `L` of the judgment matrix.
    pub fn calc_l(&self) -> Result<f64, AhpError> {
        PriorityCalculator::weighted_sum(&self.judgment_matrix, self.settings.lambda_formula)
    }

    /// Consistency index of the judgment matrix for weighted sum `l`.
    pub fn calc_consistency_index(&self, l: f64) -> Result<ConsistencyIndex, AhpError> {
        ConsistencyCalculator::consistency_index(l, PriorityCalculator::matrix_order(&self.judgment_matrix))
    }

    /// Random consistency for order `n`.
    pub fn calc_random_consistency(&self, n: usize) -> Result<f64, AhpError> {
        ConsistencyCalculator::random_consistency(n)
    }

    /// Relative consistency in percent.
    pub fn calc_relative_consistency(&self, consistency_index: f64, random_consistency: f64) -> Result<f64, AhpError> {
        ConsistencyCalculator::relative_consistency(consistency_index, random_consistency)
    }

    /// True iff `value` does not exceed the configured threshold.
    pub fn is_permissible(&self, value: f64) -> bool {
        ConsistencyCalculator::is_permissible_with(value, self.settings.max_relative_consistency)
    }

    /// Runs the full criteria chain and records its consistency report.
    ///
    /// # Errors
    /// `InconsistentCriteria` when the matrix is not permissible and
    /// `require_consistent_criteria` is set. The report is still recorded.
    pub fn solve_criteria(&mut self) -> Result<ConsistencyReport, AhpError> {
        self.set_component_eigenvector();
        let total = self.set_eigenvector()?;
        self.set_component_priority_vector(total)?;
        let l = self.calc_l()?;
        let n = PriorityCalculator::matrix_order(&self.judgment_matrix);

        let report = ConsistencyCalculator::evaluate(l, n, self.settings.max_relative_consistency)?;
        debug!(
            l = report.l,
            ci = report.consistency_index,
            cr = ?report.relative_consistency,
            "criteria judgment matrix solved"
        );
        self.criteria_consistency = Some(report);

        if !report.permissible {
            warn!(
                cr = ?report.relative_consistency,
                max = self.settings.max_relative_consistency,
                "criteria judgment matrix is inconsistent; judgments should be revised"
            );
            if self.settings.require_consistent_criteria {
                return Err(AhpError::InconsistentCriteria {
                    relative_consistency: report.relative_consistency.unwrap_or_default(),
                    max: self.settings.max_relative_consistency,
                });
            }
        }
        Ok(report)
    }

    pub fn criteria_consistency(&self) -> Option<&ConsistencyReport> {
        self.criteria_consistency.as_ref()
    }

    /// `(criterion, weight)` for every solved judgment row.
    pub fn criteria_weights(&self) -> Vec<(String, f64)> {
        self.judgment_matrix.priorities()
    }

    // ------------------------------------------------------------------
    // Alternative weighting per criterion
    // ------------------------------------------------------------------

    /// Creates a zeroed alternatives × alternatives matrix per criterion.
    ///
    /// Calling it again discards previously entered assessments.
    pub fn set_pairwise_comparisons(&mut self) {
        let alternatives = self.structure.alternative_index().clone();
        self.pairwise_comparisons = self
            .structure
            .criteria()
            .iter()
            .map(|_| ComparisonMatrix::zeroed(alternatives.clone()))
            .collect();
        self.alternative_consistency = vec![None; self.pairwise_comparisons.len()];
    }

    /// Stores `pairwise_comparisons[criterion][alternative1][alternative2]`.
    ///
    /// # Errors
    /// - `InvalidMatrixParameters` if the slot has not been initialized by
    ///   `set_pairwise_comparisons` or any name is unknown
    /// - `Validation` if the coefficient is negative, NaN or infinite
    pub fn set_alternative_assessment(
        &mut self,
        criterion: &str,
        alternative1: &str,
        alternative2: &str,
        coefficient: f64,
    ) -> Result<(), AhpError> {
        check_coefficient("assessment coefficient", coefficient)?;
        let invalid = || AhpError::invalid_matrix_parameters(criterion, alternative1, alternative2);

        let matrix = self
            .structure
            .criterion_index()
            .position(criterion)
            .and_then(|c| self.pairwise_comparisons.get_mut(c))
            .ok_or_else(invalid)?;
        let row = matrix.position(alternative1).ok_or_else(invalid)?;
        let column = matrix.position(alternative2).ok_or_else(invalid)?;
        if !matrix.is_initialized(row, column) {
            return Err(invalid());
        }

        matrix.set(row, column, coefficient);
        Ok(())
    }

    /// Stores `a_12 = coefficient` and `a_21 = 1 / coefficient` under `criterion`.
    ///
    /// # Errors
    /// `Validation` unless the coefficient is finite and strictly positive.
    pub fn set_reciprocal_assessment(
        &mut self,
        criterion: &str,
        alternative1: &str,
        alternative2: &str,
        coefficient: f64,
    ) -> Result<(), AhpError> {
        check_reciprocal("assessment coefficient", coefficient)?;
        self.set_alternative_assessment(criterion, alternative1, alternative2, coefficient)?;
        self.set_alternative_assessment(criterion, alternative2, alternative1, 1.0 / coefficient)
    }

    /// Computes the eigenvector of every alternative row under `criterion`.
    pub fn set_comp_eigenvector_comparisons(&mut self, criterion: &str) -> Result<(), AhpError> {
        let matrix = self.comparison_matrix_mut(criterion)?;
        PriorityCalculator::component_eigenvectors(matrix);
        Ok(())
    }

    /// Sums the alternative eigenvectors of every criterion.
    ///
    /// Criteria whose eigenvectors have not been computed yet have no total.
    pub fn set_eigenvector_comparison(&self) -> EigenvectorTotals {
        let totals = self
            .structure
            .criteria()
            .iter()
            .zip(&self.pairwise_comparisons)
            .map(|(criterion, matrix)| {
                let total = PriorityCalculator::eigenvector_total(matrix).ok();
                (criterion.clone(), total)
            })
            .collect();
        EigenvectorTotals { totals }
    }

    /// Normalizes the alternative eigenvectors of `criterion` by its total.
    ///
    /// A zero total leaves the priorities unset: the comparison set for the
    /// criterion is degenerate (all zero).
    ///
    /// # Errors
    /// `PreconditionFailed` if `totals` has no total for `criterion`.
    pub fn set_comp_priority_vector_comparisons(
        &mut self,
        criterion: &str,
        totals: &EigenvectorTotals,
    ) -> Result<(), AhpError> {
        let total = totals.get(criterion).ok_or_else(|| {
            AhpError::precondition(format!("no eigenvector total computed for criterion '{}'", criterion))
        })?;
        if total == 0.0 {
            warn!(criterion, "all pairwise comparisons are zero; no priorities derived");
        }

        let matrix = self.comparison_matrix_mut(criterion)?;
        PriorityCalculator::priority_vector(matrix, total);
        Ok(())
    }

    /// Weighted sum `L` of the alternative matrix under `criterion`.
    pub fn calc_lc(&self, criterion: &str) -> Result<f64, AhpError> {
        PriorityCalculator::weighted_sum(
            self.comparison_matrix_checked(criterion)?,
            self.settings.alternative_lambda_formula,
        )
    }

    /// Consistency index of the alternative matrix under `criterion`.
    pub fn calc_cons_index_comparisons(&self, criterion: &str, l: f64) -> Result<ConsistencyIndex, AhpError> {
        let matrix = self.comparison_matrix_checked(criterion)?;
        ConsistencyCalculator::consistency_index(l, PriorityCalculator::matrix_order(matrix))
    }

    /// Runs the full alternative chain for `criterion`.
    pub fn solve_alternatives(&mut self, criterion: &str) -> Result<ConsistencyReport, AhpError> {
        let position = self.criterion_position(criterion)?;

        self.set_comp_eigenvector_comparisons(criterion)?;
        let totals = self.set_eigenvector_comparison();
        self.set_comp_priority_vector_comparisons(criterion, &totals)?;
        let l = self.calc_lc(criterion)?;
        let n = PriorityCalculator::matrix_order(self.comparison_matrix_checked(criterion)?);

        let report = ConsistencyCalculator::evaluate(l, n, self.settings.max_relative_consistency)?;
        debug!(
            criterion,
            l = report.l,
            ci = report.consistency_index,
            cr = ?report.relative_consistency,
            "alternative comparison matrix solved"
        );
        if !report.permissible {
            warn!(
                criterion,
                cr = ?report.relative_consistency,
                "alternative comparisons are inconsistent; judgments should be revised"
            );
        }

        if let Some(slot) = self.alternative_consistency.get_mut(position) {
            *slot = Some(report);
        }
        Ok(report)
    }

    /// Priority of `alternative` under `criterion`, if solved.
    ///
    /// # Errors
    /// - `UnknownCriterion` / `UnknownAlternative` for unrecognized names
    /// - `PreconditionFailed` before `set_pairwise_comparisons`
    pub fn alternative_priority(&self, criterion: &str, alternative: &str) -> Result<Option<f64>, AhpError> {
        let matrix = self.comparison_matrix_checked(criterion)?;
        let row = self
            .structure
            .alternative_index()
            .position(alternative)
            .ok_or_else(|| AhpError::unknown_alternative(alternative))?;
        Ok(matrix.priority_vector(row))
    }

    /// Consistency report of the alternatives under `criterion`, if solved.
    pub fn alternative_consistency(&self, criterion: &str) -> Option<&ConsistencyReport> {
        let position = self.structure.criterion_index().position(criterion)?;
        self.alternative_consistency.get(position)?.as_ref()
    }

    // ------------------------------------------------------------------
    // Summary & selection
    // ------------------------------------------------------------------

    /// Copies every solved alternative priority into the summary table.
    ///
    /// The table is zero-initialized on the first call.
    pub fn set_summary_data(&mut self) {
        let structure = &self.structure;
        let summary = self.summary_data.get_or_insert_with(|| {
            SummaryTable::new(
                structure.alternative_index().clone(),
                structure.criterion_index().clone(),
            )
        });

        for (criterion, matrix) in self.pairwise_comparisons.iter().enumerate() {
            for alternative in 0..matrix.order() {
                if let Some(priority) = matrix.priority_vector(alternative) {
                    summary.set(alternative, criterion, priority);
                }
            }
        }
    }

    /// Computes each alternative's total vector: Σ over criteria of the
    /// alternative's priority times the criterion's weight.
    ///
    /// Criteria without a weight do not contribute.
    pub fn set_comp_pr_vector_summary_data(&mut self) -> Result<(), AhpError> {
        let summary = self.summary_data.as_mut().ok_or_else(|| {
            AhpError::precondition("summary data must be set before computing total vectors")
        })?;

        let weights: Vec<Option<f64>> = (0..self.judgment_matrix.order())
            .map(|criterion| self.judgment_matrix.priority_vector(criterion))
            .collect();

        for alternative in 0..summary.alternatives().len() {
            let total = summary
                .row(alternative)
                .map(|row| {
                    row.iter()
                        .zip(&weights)
                        .filter_map(|(value, weight)| weight.map(|w| value * w))
                        .sum::<f64>()
                })
                .unwrap_or(0.0);
            summary.set_total_vector(alternative, total);
        }
        Ok(())
    }

    /// Alternative with the highest total vector.
    ///
    /// # Errors
    /// - `PreconditionFailed` if the summary has not been built
    /// - `NoValidResult` if no alternative scored above zero
    pub fn best_alternative(&self) -> Result<&str, AhpError> {
        let summary = self
            .summary_data
            .as_ref()
            .ok_or_else(|| AhpError::precondition("summary data has not been computed"))?;
        let best = summary.best_alternative()?;
        info!(best, "best alternative selected");
        Ok(best)
    }

    /// Alternatives ordered by total vector, highest first.
    pub fn ranking(&self) -> Vec<RankedAlternative> {
        self.summary_data
            .as_ref()
            .map(SummaryTable::ranking)
            .unwrap_or_default()
    }

    /// Runs every step after the coefficients have been entered.
    pub fn solve(&mut self) -> Result<DecisionReport, AhpError> {
        self.solve_criteria()?;
        let criteria = self.structure.criteria().to_vec();
        for criterion in &criteria {
            self.solve_alternatives(criterion)?;
        }
        self.set_summary_data();
        self.set_comp_pr_vector_summary_data()?;
        self.report()
    }

    /// Snapshot of the decision run.
    ///
    /// # Errors
    /// `PreconditionFailed` if the summary table has not been built.
    pub fn report(&self) -> Result<DecisionReport, AhpError> {
        let summary = self
            .summary_data
            .as_ref()
            .ok_or_else(|| AhpError::precondition("summary data has not been computed"))?;

        let alternative_consistency = self
            .structure
            .criteria()
            .iter()
            .zip(&self.alternative_consistency)
            .filter_map(|(criterion, report)| {
                report.map(|report| CriterionConsistency {
                    criterion: criterion.clone(),
                    report,
                })
            })
            .collect();

        Ok(DecisionReport {
            decision_id: DecisionId::new(),
            purpose: self.structure.purpose().to_string(),
            criteria_weights: self.criteria_weights(),
            criteria_consistency: self.criteria_consistency,
            alternative_consistency,
            ranking: summary.ranking(),
            best_alternative: summary.best_alternative().ok().map(str::to_string),
            computed_at: Timestamp::now(),
        })
    }

    fn criterion_position(&self, name: &str) -> Result<usize, AhpError> {
        self.structure
            .criterion_index()
            .position(name)
            .ok_or_else(|| AhpError::unknown_criterion(name))
    }

    fn comparison_matrix_checked(&self, criterion: &str) -> Result<&ComparisonMatrix, AhpError> {
        let position = self.criterion_position(criterion)?;
        self.pairwise_comparisons
            .get(position)
            .ok_or_else(|| AhpError::precondition("pairwise comparisons have not been initialized"))
    }

    fn comparison_matrix_mut(&mut self, criterion: &str) -> Result<&mut ComparisonMatrix, AhpError> {
        let position = self.criterion_position(criterion)?;
        self.pairwise_comparisons
            .get_mut(position)
            .ok_or_else(|| AhpError::precondition("pairwise comparisons have not been initialized"))
    }
}

fn check_coefficient(field: &str, coefficient: f64) -> Result<(), AhpError> {
    if !coefficient.is_finite() || coefficient < 0.0 {
        return Err(ValidationError::invalid_coefficient(field, coefficient).into());
    }
    Ok(())
}

fn check_reciprocal(field: &str, coefficient: f64) -> Result<(), AhpError> {
    if !coefficient.is_finite() || coefficient <= 0.0 {
        return Err(ValidationError::invalid_coefficient(field, coefficient).into());
    }
    Ok(())
}
