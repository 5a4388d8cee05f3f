//! Engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::ahp::{EngineSettings, LambdaFormula, MAX_REL_CONS};

/// Settings applied to every `Hierarchy` built from this configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Relative consistency (percent) above which a matrix is rejected
    #[serde(default = "default_max_relative_consistency")]
    pub max_relative_consistency: f64,

    /// Weighted-sum formula used for the criteria consistency index
    #[serde(default)]
    pub lambda_formula: LambdaFormula,

    /// Weighted-sum formula used for each alternative matrix
    #[serde(default = "default_alternative_lambda_formula")]
    pub alternative_lambda_formula: LambdaFormula,

    /// Reject an inconsistent criteria matrix instead of only warning
    #[serde(default)]
    pub require_consistent_criteria: bool,
}

impl EngineConfig {
    /// Engine settings derived from this configuration
    pub fn settings(&self) -> EngineSettings {
        EngineSettings {
            max_relative_consistency: self.max_relative_consistency,
            lambda_formula: self.lambda_formula,
            alternative_lambda_formula: self.alternative_lambda_formula,
            require_consistent_criteria: self.require_consistent_criteria,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.max_relative_consistency.is_finite() || self.max_relative_consistency <= 0.0 {
            return Err(ValidationError::InvalidConsistencyThreshold);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_relative_consistency: default_max_relative_consistency(),
            lambda_formula: LambdaFormula::default(),
            alternative_lambda_formula: default_alternative_lambda_formula(),
            require_consistent_criteria: false,
        }
    }
}

fn default_max_relative_consistency() -> f64 {
    MAX_REL_CONS
}

fn default_alternative_lambda_formula() -> LambdaFormula {
    LambdaFormula::ColumnPriority
}
