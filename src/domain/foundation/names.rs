//! Case-insensitive name index for criteria and alternatives.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered list of names with a canonical (lower-cased) lookup table.
///
/// Positions are stable: the index of a name is its position in the
/// sequence it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NameIndex {
    names: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl NameIndex {
    /// Builds an index over `names`.
    ///
    /// When two names differ only in case, the first one wins the lookup.
    pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut index = Self::default();
        for name in names {
            index.push(name.into());
        }
        index
    }

    /// Canonical form used for comparisons.
    pub fn canonical(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Appends a name, returning its position.
    pub fn push(&mut self, name: String) -> usize {
        let position = self.names.len();
        self.lookup.entry(Self::canonical(&name)).or_insert(position);
        self.names.push(name);
        position
    }

    /// Returns the position of `name`, ignoring case.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.lookup.get(&Self::canonical(name)).copied()
    }

    /// Returns true if `name` is present, ignoring case.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the name stored at `position`.
    pub fn name(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<Vec<String>> for NameIndex {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<NameIndex> for Vec<String> {
    fn from(index: NameIndex) -> Self {
        index.names
    }
}
