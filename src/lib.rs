//! Saaty AHP - Analytic Hierarchy Process engine
//!
//! Ranks a finite set of alternatives against a finite set of criteria from
//! pairwise comparisons, using the geometric-mean approximation of the
//! principal eigenvector and Saaty's consistency ratio.
//!
//! # Example
//!
//! ```
//! use saaty_ahp::domain::ahp::{Hierarchy, Structuring};
//!
//! let mut structuring = Structuring::new();
//! structuring.set_purpose("Choose a supplier").unwrap();
//! structuring.set_criterion(["Cost", "Quality"]).unwrap();
//! structuring.set_alternative(["X", "Y"]).unwrap();
//!
//! let mut hierarchy = Hierarchy::new(structuring);
//! hierarchy.set_priority_factor("Cost", "Cost", 1.0).unwrap();
//! hierarchy.set_reciprocal_priority_factor("Cost", "Quality", 3.0).unwrap();
//! hierarchy.set_priority_factor("Quality", "Quality", 1.0).unwrap();
//!
//! hierarchy.set_pairwise_comparisons();
//! for (criterion, x_over_y) in [("Cost", 2.0), ("Quality", 0.5)] {
//!     hierarchy.set_alternative_assessment(criterion, "X", "X", 1.0).unwrap();
//!     hierarchy.set_reciprocal_assessment(criterion, "X", "Y", x_over_y).unwrap();
//!     hierarchy.set_alternative_assessment(criterion, "Y", "Y", 1.0).unwrap();
//! }
//!
//! let report = hierarchy.solve().unwrap();
//! assert_eq!(report.best_alternative.as_deref(), Some("X"));
//! ```

pub mod config;
pub mod domain;
pub mod telemetry;
