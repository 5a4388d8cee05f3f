//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the AHP domain.

mod errors;
mod ids;
mod names;
mod timestamp;

pub use errors::{AhpError, ErrorCode, ValidationError};
pub use ids::DecisionId;
pub use names::NameIndex;
pub use timestamp::Timestamp;
