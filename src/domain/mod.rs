//! Domain layer containing the decision model and its computations.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, name index, errors)
//! - `ahp` - Analytic Hierarchy Process: structuring, comparison matrices,
//!   consistency checks and the `Hierarchy` engine

pub mod ahp;
pub mod foundation;
