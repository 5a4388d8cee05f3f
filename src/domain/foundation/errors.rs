//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur while structuring a decision problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' already contains '{name}'")]
    DuplicateName { field: String, name: String },

    #[error("Field '{field}' is not a valid comparison coefficient: {value}")]
    InvalidCoefficient { field: String, value: f64 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid coefficient validation error.
    pub fn invalid_coefficient(field: impl Into<String>, value: f64) -> Self {
        ValidationError::InvalidCoefficient {
            field: field.into(),
            value,
        }
    }

    /// Creates a duplicate name validation error.
    pub fn duplicate_name(field: impl Into<String>, name: impl Into<String>) -> Self {
        ValidationError::DuplicateName {
            field: field.into(),
            name: name.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Structuring errors
    ValidationFailed,
    InvalidFormat,
    InvalidCoefficient,

    // Lookup errors
    UnknownCriterion,
    UnknownAlternative,
    InvalidMatrixParameters,

    // Computation errors
    PreconditionFailed,
    DegenerateMatrix,
    UnsupportedOrder,
    InconsistentCriteria,
    NoValidResult,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidCoefficient => "INVALID_COEFFICIENT",
            ErrorCode::UnknownCriterion => "UNKNOWN_CRITERION",
            ErrorCode::UnknownAlternative => "UNKNOWN_ALTERNATIVE",
            ErrorCode::InvalidMatrixParameters => "INVALID_MATRIX_PARAMETERS",
            ErrorCode::PreconditionFailed => "PRECONDITION_FAILED",
            ErrorCode::DegenerateMatrix => "DEGENERATE_MATRIX",
            ErrorCode::UnsupportedOrder => "UNSUPPORTED_ORDER",
            ErrorCode::InconsistentCriteria => "INCONSISTENT_CRITERIA",
            ErrorCode::NoValidResult => "NO_VALID_RESULT",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised by the hierarchy engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown criterion '{name}': it does not match the source data")]
    UnknownCriterion { name: String },

    #[error("Unknown alternative '{name}': it does not match the source data")]
    UnknownAlternative { name: String },

    #[error("The parameters of the matrix are incorrect: [{criterion}][{row}][{column}]")]
    InvalidMatrixParameters {
        criterion: String,
        row: String,
        column: String,
    },

    #[error("Precondition failed: {reason}")]
    PreconditionFailed { reason: String },

    #[error("Matrix of order {order} has no consistency index")]
    DegenerateMatrix { order: usize },

    #[error("No random consistency value for matrix order {order} (supported: 1-10)")]
    UnsupportedOrder { order: usize },

    #[error("Criteria judgments are inconsistent: CR {relative_consistency:.2}% exceeds {max}%")]
    InconsistentCriteria { relative_consistency: f64, max: f64 },

    #[error("No alternative has a positive total priority")]
    NoValidResult,
}

impl AhpError {
    /// Creates an unknown criterion error.
    pub fn unknown_criterion(name: impl Into<String>) -> Self {
        AhpError::UnknownCriterion { name: name.into() }
    }

    /// Creates an unknown alternative error.
    pub fn unknown_alternative(name: impl Into<String>) -> Self {
        AhpError::UnknownAlternative { name: name.into() }
    }

    /// Creates an invalid matrix parameters error for a comparison slot.
    pub fn invalid_matrix_parameters(
        criterion: impl Into<String>,
        row: impl Into<String>,
        column: impl Into<String>,
    ) -> Self {
        AhpError::InvalidMatrixParameters {
            criterion: criterion.into(),
            row: row.into(),
            column: column.into(),
        }
    }

    /// Creates a precondition failure with a descriptive reason.
    pub fn precondition(reason: impl Into<String>) -> Self {
        AhpError::PreconditionFailed {
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AhpError::Validation(ValidationError::InvalidFormat { .. }) => ErrorCode::InvalidFormat,
            AhpError::Validation(ValidationError::InvalidCoefficient { .. }) => ErrorCode::InvalidCoefficient,
            AhpError::Validation(_) => ErrorCode::ValidationFailed,
            AhpError::UnknownCriterion { .. } => ErrorCode::UnknownCriterion,
            AhpError::UnknownAlternative { .. } => ErrorCode::UnknownAlternative,
            AhpError::InvalidMatrixParameters { .. } => ErrorCode::InvalidMatrixParameters,
            AhpError::PreconditionFailed { .. } => ErrorCode::PreconditionFailed,
            AhpError::DegenerateMatrix { .. } => ErrorCode::DegenerateMatrix,
            AhpError::UnsupportedOrder { .. } => ErrorCode::UnsupportedOrder,
            AhpError::InconsistentCriteria { .. } => ErrorCode::InconsistentCriteria,
            AhpError::NoValidResult => ErrorCode::NoValidResult,
        }
    }
}
