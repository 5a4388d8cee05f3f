//! AHP Module - Analytic Hierarchy Process.
//!
//! Ranks alternatives against criteria from pairwise comparisons:
//! geometric-mean eigenvector approximation, Saaty's random consistency
//! table and a relative consistency cutoff.
//!
//! # Components
//!
//! - `Structuring` - Goal, criteria, alternatives and initial data
//! - `ComparisonMatrix` - Square coefficient matrix with derived row scalars
//! - `PriorityCalculator` - Eigenvector approximation and priority vectors
//! - `ConsistencyCalculator` - CI, RI lookup, CR and permissibility
//! - `SummaryTable` - Alternative priorities per criterion and total vectors
//! - `Hierarchy` - The engine driving all of the above
//! - `DecisionReport` - Serializable outcome of a run

mod consistency;
mod hierarchy;
mod matrix;
mod priority;
mod report;
mod structuring;
mod summary;

pub use consistency::{
    ConsistencyCalculator, ConsistencyIndex, ConsistencyReport, MAX_REL_CONS, RANDOM_CONSISTENCY,
};
pub use hierarchy::{EigenvectorTotals, EngineSettings, Hierarchy};
pub use matrix::{ComparisonMatrix, RowDerived};
pub use priority::{LambdaFormula, PriorityCalculator};
pub use report::{CriterionConsistency, DecisionReport};
pub use structuring::{
    AlternativeLeaf, CriterionNode, HierarchyView, InitialData, NameInput, Structuring,
};
pub use summary::{RankedAlternative, SummaryTable};
