//! Decision Report - serializable snapshot of a solved decision run.

use serde::{Deserialize, Serialize};

use super::{ConsistencyReport, RankedAlternative};
use crate::domain::foundation::{DecisionId, Timestamp};

/// Consistency of the alternative comparisons under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionConsistency {
    pub criterion: String,
    pub report: ConsistencyReport,
}

/// Result of a decision run.
///
/// Contains summarized results (weights, ranking, consistency verdicts), not
/// the raw comparison matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReport {
    /// Unique identifier of this run.
    pub decision_id: DecisionId,
    /// The decision goal.
    pub purpose: String,
    /// `(criterion, weight)` from the judgment matrix.
    pub criteria_weights: Vec<(String, f64)>,
    /// Consistency of the judgment matrix, if it was solved in one shot.
    pub criteria_consistency: Option<ConsistencyReport>,
    pub alternative_consistency: Vec<CriterionConsistency>,
    /// Alternatives by total vector, highest first.
    pub ranking: Vec<RankedAlternative>,
    /// Best alternative; `None` when no alternative scored above zero.
    pub best_alternative: Option<String>,
    /// When the report was produced.
    pub computed_at: Timestamp,
}

impl DecisionReport {
    /// True if every solved matrix passed the permissibility check.
    pub fn is_consistent(&self) -> bool {
        self.criteria_consistency.map_or(true, |r| r.permissible)
            && self.alternative_consistency.iter().all(|c| c.report.permissible)
    }

    /// Criteria whose alternative comparisons should be revised.
    pub fn inconsistent_criteria(&self) -> Vec<&str> {
        self.alternative_consistency
            .iter()
            .filter(|c| !c.report.permissible)
            .map(|c| c.criterion.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consistency(permissible: bool) -> ConsistencyReport {
        ConsistencyReport {
            order: 3,
            l: 3.1,
            consistency_index: 0.05,
            random_consistency: 0.58,
            relative_consistency: Some(if permissible { 8.6 } else { 25.0 }),
            permissible,
        }
    }

    fn report(criteria_ok: bool, alternatives_ok: &[(&str, bool)]) -> DecisionReport {
        DecisionReport {
            decision_id: DecisionId::new(),
            purpose: "Choose".to_string(),
            criteria_weights: vec![("Cost".to_string(), 1.0)],
            criteria_consistency: Some(consistency(criteria_ok)),
            alternative_consistency: alternatives_ok
                .iter()
                .map(|(name, ok)| CriterionConsistency {
                    criterion: name.to_string(),
                    report: consistency(*ok),
                })
                .collect(),
            ranking: Vec::new(),
            best_alternative: None,
            computed_at: Timestamp::now(),
        }
    }

    #[test]
    fn consistent_when_every_matrix_passes() {
        let r = report(true, &[("Cost", true), ("Quality", true)]);
        assert!(r.is_consistent());
        assert!(r.inconsistent_criteria().is_empty());
    }

    #[test]
    fn lists_inconsistent_criteria() {
        let r = report(true, &[("Cost", true), ("Quality", false)]);
        assert!(!r.is_consistent());
        assert_eq!(r.inconsistent_criteria(), vec!["Quality"]);
    }

    #[test]
    fn inconsistent_criteria_matrix_fails_report() {
        assert!(!report(false, &[]).is_consistent());
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_string(&report(true, &[("Cost", true)])).unwrap();
        assert!(json.contains("decision_id"));
        assert!(json.contains("\"criterion\":\"Cost\""));
        assert!(json.contains("computed_at"));
    }
}
