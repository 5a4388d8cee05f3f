//! Comparison Matrix - square coefficient matrix with derived per-row scalars.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::NameIndex;

/// Values derived for one row once the matrix is solved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RowDerived {
    /// Geometric mean of the row's coefficients.
    pub eigenvector: Option<f64>,
    /// Row eigenvector normalized by the matrix total.
    pub priority_vector: Option<f64>,
}

/// Square matrix of pairwise coefficients indexed by name.
///
/// Cells are `None` until the caller supplies them. Derived scalars live in
/// a side table so a coefficient can never be mistaken for a computed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonMatrix {
    labels: NameIndex,
    cells: Vec<Option<f64>>,
    derived: Vec<RowDerived>,
}

impl ComparisonMatrix {
    /// Creates a matrix with no coefficients set.
    pub fn empty(labels: NameIndex) -> Self {
        Self::filled(labels, None)
    }

    /// Creates a matrix with every coefficient set to zero.
    pub fn zeroed(labels: NameIndex) -> Self {
        Self::filled(labels, Some(0.0))
    }

    fn filled(labels: NameIndex, value: Option<f64>) -> Self {
        let order = labels.len();
        Self {
            labels,
            cells: vec![value; order * order],
            derived: vec![RowDerived::default(); order],
        }
    }

    /// Number of rows (and columns).
    pub fn order(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &NameIndex {
        &self.labels
    }

    /// Position of a row/column label, ignoring case.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.position(name)
    }

    /// Stores a coefficient. Out-of-range positions are ignored.
    pub fn set(&mut self, row: usize, column: usize, value: f64) {
        if let Some(cell) = self.cell_mut(row, column) {
            *cell = Some(value);
        }
    }

    /// Returns the coefficient at `(row, column)` if it has been set.
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.order() || column >= self.order() {
            return None;
        }
        self.cells[row * self.order() + column]
    }

    /// Returns the coefficient addressed by names.
    pub fn get_by_name(&self, row: &str, column: &str) -> Option<f64> {
        self.get(self.position(row)?, self.position(column)?)
    }

    /// Returns true if the `(row, column)` slot exists and holds a value.
    pub fn is_initialized(&self, row: usize, column: usize) -> bool {
        self.get(row, column).is_some()
    }

    /// Iterates over `(column, coefficient)` for the set cells of a row.
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let order = self.order();
        let start = row.min(order) * order;
        let end = if row < order { start + order } else { start };
        self.cells[start..end]
            .iter()
            .enumerate()
            .filter_map(|(column, cell)| cell.map(|value| (column, value)))
    }

    /// Number of coefficients set in a row.
    pub fn row_len(&self, row: usize) -> usize {
        self.row_entries(row).count()
    }

    /// Rows that hold at least one coefficient, in label order.
    pub fn populated_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.order()).filter(move |&row| self.row_len(row) > 0)
    }

    pub fn derived(&self, row: usize) -> Option<&RowDerived> {
        self.derived.get(row)
    }

    pub fn eigenvector(&self, row: usize) -> Option<f64> {
        self.derived(row).and_then(|d| d.eigenvector)
    }

    pub fn priority_vector(&self, row: usize) -> Option<f64> {
        self.derived(row).and_then(|d| d.priority_vector)
    }

    /// Priority of the row labelled `name`, ignoring case.
    pub fn priority_by_name(&self, name: &str) -> Option<f64> {
        self.priority_vector(self.position(name)?)
    }

    pub fn set_eigenvector(&mut self, row: usize, value: Option<f64>) {
        if let Some(derived) = self.derived.get_mut(row) {
            derived.eigenvector = value;
        }
    }

    pub fn set_priority_vector(&mut self, row: usize, value: Option<f64>) {
        if let Some(derived) = self.derived.get_mut(row) {
            derived.priority_vector = value;
        }
    }

    /// Returns true once any row carries a priority.
    pub fn has_priorities(&self) -> bool {
        self.derived.iter().any(|d| d.priority_vector.is_some())
    }

    /// `(label, priority)` pairs for the solved rows.
    pub fn priorities(&self) -> Vec<(String, f64)> {
        self.labels
            .names()
            .iter()
            .zip(&self.derived)
            .filter_map(|(name, d)| d.priority_vector.map(|p| (name.clone(), p)))
            .collect()
    }

    fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Option<f64>> {
        let order = self.order();
        if row >= order || column >= order {
            return None;
        }
        self.cells.get_mut(row * order + column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> NameIndex {
        NameIndex::new(["Cost", "Quality", "Speed"])
    }

    #[test]
    fn empty_matrix_has_no_entries() {
        let m = ComparisonMatrix::empty(labels());
        assert_eq!(m.order(), 3);
        assert_eq!(m.row_len(0), 0);
        assert_eq!(m.populated_rows().count(), 0);
        assert!(!m.is_initialized(0, 1));
    }

    #[test]
    fn zeroed_matrix_is_fully_initialized() {
        let m = ComparisonMatrix::zeroed(labels());
        assert_eq!(m.row_len(2), 3);
        assert_eq!(m.get(2, 1), Some(0.0));
        assert_eq!(m.populated_rows().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn set_and_get_by_name_ignore_case() {
        let mut m = ComparisonMatrix::empty(labels());
        m.set(0, 1, 3.0);
        assert_eq!(m.get_by_name("COST", "quality"), Some(3.0));
        assert_eq!(m.get_by_name("Cost", "Weight"), None);
    }

    #[test]
    fn out_of_range_positions_are_ignored() {
        let mut m = ComparisonMatrix::empty(labels());
        m.set(5, 0, 1.0);
        assert_eq!(m.get(5, 0), None);
        assert_eq!(m.row_entries(7).count(), 0);
    }

    #[test]
    fn row_entries_skip_unset_cells() {
        let mut m = ComparisonMatrix::empty(labels());
        m.set(1, 0, 0.5);
        m.set(1, 2, 4.0);
        let entries: Vec<_> = m.row_entries(1).collect();
        assert_eq!(entries, vec![(0, 0.5), (2, 4.0)]);
    }

    #[test]
    fn derived_values_are_kept_apart_from_cells() {
        let mut m = ComparisonMatrix::zeroed(labels());
        m.set_eigenvector(0, Some(1.5));
        m.set_priority_vector(0, Some(0.5));

        assert_eq!(m.row_len(0), 3);
        assert_eq!(m.eigenvector(0), Some(1.5));
        assert_eq!(m.priority_by_name("cost"), Some(0.5));
        assert!(m.has_priorities());
        assert_eq!(m.priorities(), vec![("Cost".to_string(), 0.5)]);
    }
}
