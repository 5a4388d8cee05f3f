//! Structuring - goal, criteria, alternatives and the optional initial data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::{NameIndex, ValidationError};

/// Initial data: criterion → alternative → value.
pub type InitialData = BTreeMap<String, BTreeMap<String, f64>>;

/// Argument accepted by the criterion and alternative setters.
///
/// A single name is always appended. A list replaces the sequence and is
/// only accepted while the sequence is still empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInput {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for NameInput {
    fn from(name: &str) -> Self {
        NameInput::One(name.to_string())
    }
}

impl From<String> for NameInput {
    fn from(name: String) -> Self {
        NameInput::One(name)
    }
}

impl From<Vec<String>> for NameInput {
    fn from(names: Vec<String>) -> Self {
        NameInput::Many(names)
    }
}

impl From<Vec<&str>> for NameInput {
    fn from(names: Vec<&str>) -> Self {
        NameInput::Many(names.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for NameInput {
    fn from(names: [&str; N]) -> Self {
        NameInput::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

/// The decision problem as collected from the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Structuring {
    purpose: Option<String>,
    criterion: NameIndex,
    alternative: NameIndex,
    initial_data: InitialData,
}

impl Structuring {
    /// Creates an empty structuring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decision goal. The goal can only be set once.
    pub fn set_purpose(&mut self, purpose: impl Into<String>) -> Result<(), ValidationError> {
        if self.purpose.is_some() {
            return Err(ValidationError::invalid_format("purpose", "purpose is already set"));
        }
        self.purpose = Some(purpose.into());
        Ok(())
    }

    /// Appends one criterion or sets the whole (empty) criterion list.
    pub fn set_criterion(&mut self, value: impl Into<NameInput>) -> Result<(), ValidationError> {
        Self::apply(&mut self.criterion, "criterion", value.into())
    }

    /// Appends one alternative or sets the whole (empty) alternative list.
    pub fn set_alternative(&mut self, value: impl Into<NameInput>) -> Result<(), ValidationError> {
        Self::apply(&mut self.alternative, "alternative", value.into())
    }

    /// Records `initial_data[criterion][alternative] = value`.
    ///
    /// Names are stored verbatim and are not checked against the criterion
    /// or alternative lists.
    pub fn set_initial_data(&mut self, criterion: impl Into<String>, pair: (impl Into<String>, f64)) {
        let (alternative, value) = pair;
        self.initial_data
            .entry(criterion.into())
            .or_default()
            .insert(alternative.into(), value);
    }

    /// Returns the goal label, empty if none was set.
    pub fn purpose(&self) -> &str {
        self.purpose.as_deref().unwrap_or("")
    }

    pub fn criteria(&self) -> &[String] {
        self.criterion.names()
    }

    pub fn alternatives(&self) -> &[String] {
        self.alternative.names()
    }

    pub fn initial_data(&self) -> &InitialData {
        &self.initial_data
    }

    /// Case-insensitive lookup index over the criteria.
    pub fn criterion_index(&self) -> &NameIndex {
        &self.criterion
    }

    /// Case-insensitive lookup index over the alternatives.
    pub fn alternative_index(&self) -> &NameIndex {
        &self.alternative
    }

    /// Returns true if `name` is a key of the initial data, ignoring case.
    pub fn has_initial_criterion(&self, name: &str) -> bool {
        let wanted = NameIndex::canonical(name);
        self.initial_data
            .keys()
            .any(|key| NameIndex::canonical(key) == wanted)
    }

    /// Builds the simple goal → criterion → alternative tree from the
    /// initial data.
    ///
    /// Criteria and alternatives known to the lists come first, in list
    /// order; names only present in the initial data follow in key order.
    pub fn hierarchy_view(&self) -> HierarchyView {
        let mut keys: Vec<&String> = self.initial_data.keys().collect();
        keys.sort_by_key(|key| self.criterion.position(key).unwrap_or(usize::MAX));

        let criteria = keys
            .into_iter()
            .map(|criterion| {
                let mut leaves: Vec<(&String, &f64)> = self.initial_data[criterion].iter().collect();
                leaves.sort_by_key(|(name, _)| self.alternative.position(name).unwrap_or(usize::MAX));

                CriterionNode {
                    name: criterion.clone(),
                    alternatives: leaves
                        .into_iter()
                        .map(|(name, value)| AlternativeLeaf {
                            name: name.clone(),
                            value: *value,
                        })
                        .collect(),
                }
            })
            .collect();

        HierarchyView {
            goal: self.purpose().to_string(),
            criteria,
        }
    }

    fn apply(target: &mut NameIndex, field: &str, value: NameInput) -> Result<(), ValidationError> {
        match value {
            NameInput::One(name) => {
                Self::check_name(target, field, &name)?;
                target.push(name);
                Ok(())
            }
            NameInput::Many(names) if target.is_empty() => {
                let mut fresh = NameIndex::default();
                for name in names {
                    Self::check_name(&fresh, field, &name)?;
                    fresh.push(name);
                }
                *target = fresh;
                Ok(())
            }
            NameInput::Many(_) => Err(ValidationError::invalid_format(
                field,
                "a list can only be set while no values are defined; append single names instead",
            )),
        }
    }

    fn check_name(target: &NameIndex, field: &str, name: &str) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if target.contains(name) {
            return Err(ValidationError::duplicate_name(field, name));
        }
        Ok(())
    }
}

/// Goal → criterion → alternative tree built from the initial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyView {
    pub goal: String,
    pub criteria: Vec<CriterionNode>,
}

/// One criterion level of a [`HierarchyView`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionNode {
    pub name: String,
    pub alternatives: Vec<AlternativeLeaf>,
}

/// An alternative with its initial value under one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeLeaf {
    pub name: String,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_names_are_appended_in_order() {
        let mut s = Structuring::new();
        s.set_criterion("Cost").unwrap();
        s.set_criterion("Quality").unwrap();
        assert_eq!(s.criteria(), &["Cost".to_string(), "Quality".to_string()]);
    }

    #[test]
    fn list_replaces_empty_sequence() {
        let mut s = Structuring::new();
        s.set_alternative(vec!["X", "Y", "Z"]).unwrap();
        assert_eq!(s.alternatives().len(), 3);
    }

    #[test]
    fn list_after_population_is_invalid_format() {
        let mut s = Structuring::new();
        s.set_criterion("Cost").unwrap();

        let err = s.set_criterion(["Quality", "Speed"]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "criterion"));
        assert_eq!(s.criteria().len(), 1);
    }

    #[test]
    fn single_name_after_list_is_appended() {
        let mut s = Structuring::new();
        s.set_alternative(["X", "Y"]).unwrap();
        s.set_alternative("Z").unwrap();
        assert_eq!(s.alternatives().last().map(String::as_str), Some("Z"));
    }

    #[test]
    fn duplicate_names_are_rejected_ignoring_case() {
        let mut s = Structuring::new();
        s.set_criterion("Cost").unwrap();
        let err = s.set_criterion("COST").unwrap_err();
        assert_eq!(err, ValidationError::duplicate_name("criterion", "COST"));

        let mut s = Structuring::new();
        assert!(s.set_alternative(["X", "x"]).is_err());
        assert!(s.alternatives().is_empty(), "failed list must not be applied");
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut s = Structuring::new();
        assert_eq!(
            s.set_criterion("  ").unwrap_err(),
            ValidationError::empty_field("criterion")
        );
    }

    #[test]
    fn purpose_is_set_once() {
        let mut s = Structuring::new();
        assert_eq!(s.purpose(), "");
        s.set_purpose("Choose a laptop").unwrap();
        assert!(s.set_purpose("Choose a phone").is_err());
        assert_eq!(s.purpose(), "Choose a laptop");
    }

    #[test]
    fn initial_data_is_stored_without_validation() {
        let mut s = Structuring::new();
        s.set_initial_data("Price", ("Unknown", 12.5));
        s.set_initial_data("Price", ("Other", 3.0));
        s.set_initial_data("Price", ("Unknown", 7.0));

        let price = &s.initial_data()["Price"];
        assert_eq!(price.len(), 2);
        assert_eq!(price["Unknown"], 7.0);
        assert!(s.has_initial_criterion("price"));
        assert!(!s.has_initial_criterion("Weight"));
    }

    #[test]
    fn hierarchy_view_follows_list_order() {
        let mut s = Structuring::new();
        s.set_purpose("Pick a car").unwrap();
        s.set_criterion(["Safety", "Price"]).unwrap();
        s.set_alternative(["Zeta", "Alpha"]).unwrap();
        s.set_initial_data("Price", ("Alpha", 20.0));
        s.set_initial_data("Price", ("Zeta", 30.0));
        s.set_initial_data("Safety", ("Alpha", 4.0));
        s.set_initial_data("Comfort", ("Alpha", 1.0));

        let view = s.hierarchy_view();
        assert_eq!(view.goal, "Pick a car");
        let names: Vec<_> = view.criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Safety", "Price", "Comfort"]);

        let price: Vec<_> = view.criteria[1].alternatives.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(price, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn structuring_serializes_to_json() {
        let mut s = Structuring::new();
        s.set_criterion(["Cost"]).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains(r#""criterion":["Cost"]"#));
    }
}
