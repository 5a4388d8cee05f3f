//! Summary Table - per-criterion alternative priorities and total vectors.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AhpError, NameIndex};

/// An alternative with its total priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub rank: usize,
    pub alternative: String,
    pub total_vector: f64,
}

/// Alternatives × criteria priority table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    alternatives: NameIndex,
    criteria: NameIndex,
    /// Row per alternative, column per criterion.
    values: Vec<Vec<f64>>,
    total_vector: Vec<Option<f64>>,
}

impl SummaryTable {
    /// Creates a table with every value set to zero and no totals.
    pub fn new(alternatives: NameIndex, criteria: NameIndex) -> Self {
        let values = vec![vec![0.0; criteria.len()]; alternatives.len()];
        let total_vector = vec![None; alternatives.len()];
        Self {
            alternatives,
            criteria,
            values,
            total_vector,
        }
    }

    /// Creates a table that only carries totals, one per alternative.
    pub fn from_totals(totals: impl IntoIterator<Item = (impl Into<String>, f64)>) -> Self {
        let (names, totals): (Vec<String>, Vec<f64>) =
            totals.into_iter().map(|(name, total)| (name.into(), total)).unzip();

        let mut table = Self::new(NameIndex::new(names), NameIndex::default());
        table.total_vector = totals.into_iter().map(Some).collect();
        table
    }

    pub fn alternatives(&self) -> &[String] {
        self.alternatives.names()
    }

    pub fn criteria(&self) -> &[String] {
        self.criteria.names()
    }

    /// Sets the priority of alternative `alternative` under criterion `criterion`.
    pub fn set(&mut self, alternative: usize, criterion: usize, value: f64) {
        if let Some(cell) = self
            .values
            .get_mut(alternative)
            .and_then(|row| row.get_mut(criterion))
        {
            *cell = value;
        }
    }

    /// Priority of `alternative` under `criterion`, addressed by name.
    pub fn value(&self, alternative: &str, criterion: &str) -> Option<f64> {
        let a = self.alternatives.position(alternative)?;
        let c = self.criteria.position(criterion)?;
        Some(self.values[a][c])
    }

    /// Row of criterion priorities for the alternative at `alternative`.
    pub fn row(&self, alternative: usize) -> Option<&[f64]> {
        self.values.get(alternative).map(Vec::as_slice)
    }

    pub fn set_total_vector(&mut self, alternative: usize, total: f64) {
        if let Some(slot) = self.total_vector.get_mut(alternative) {
            *slot = Some(total);
        }
    }

    /// Total priority of `alternative`, if computed.
    pub fn total_vector(&self, alternative: &str) -> Option<f64> {
        self.total_vector[self.alternatives.position(alternative)?]
    }

    /// Name of the alternative with the highest total vector.
    ///
    /// Ties go to the alternative listed first.
    ///
    /// # Errors
    /// `NoValidResult` if no alternative has a positive total.
    pub fn best_alternative(&self) -> Result<&str, AhpError> {
        let mut best: Option<(usize, f64)> = None;
        for (position, total) in self.total_vector.iter().enumerate() {
            let total = total.unwrap_or(0.0);
            if best.map_or(true, |(_, max)| total > max) {
                best = Some((position, total));
            }
        }

        match best {
            Some((position, max)) if max > 0.0 => self
                .alternatives
                .name(position)
                .ok_or(AhpError::NoValidResult),
            _ => Err(AhpError::NoValidResult),
        }
    }

    /// Alternatives ordered by total vector, highest first.
    ///
    /// Equal totals keep their input order; missing totals count as zero.
    pub fn ranking(&self) -> Vec<RankedAlternative> {
        let mut entries: Vec<(String, f64)> = self
            .alternatives
            .names()
            .iter()
            .zip(&self.total_vector)
            .map(|(name, total)| (name.clone(), total.unwrap_or(0.0)))
            .collect();

        entries.sort_by(|a, b| b.1.total_cmp(&a.1));

        entries
            .into_iter()
            .enumerate()
            .map(|(i, (alternative, total_vector))| RankedAlternative {
                rank: i + 1,
                alternative,
                total_vector,
            })
            .collect()
    }
}
