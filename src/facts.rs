//! The fact store: what is certain about the grid.
//!
//! All three sets only grow. A cell can never be both safe and a hazard;
//! an insertion that would break that is reported instead of applied.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::InconsistentObservation;

/// Cells already observed, proven safe, and proven hazardous.
///
/// Every observed cell is safe and no cell is both safe and a hazard.
/// Deserialization rejects input that breaks either rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FactStore {
    moves_made: BTreeSet<Cell>,
    safe_cells: BTreeSet<Cell>,
    hazard_cells: BTreeSet<Cell>,
}

impl FactStore {
    /// Creates an empty fact store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `cell` has been observed. Returns true if it is new.
    pub fn record_move(&mut self, cell: Cell) -> bool {
        self.moves_made.insert(cell)
    }

    /// Records `cell` as safe. Returns true if it was not already known.
    pub fn insert_safe(&mut self, cell: Cell) -> Result<bool, InconsistentObservation> {
        if self.hazard_cells.contains(&cell) {
            return Err(InconsistentObservation::SafeAndHazard { cell });
        }
        Ok(self.safe_cells.insert(cell))
    }

    /// Records `cell` as a hazard. Returns true if it was not already known.
    pub fn insert_hazard(&mut self, cell: Cell) -> Result<bool, InconsistentObservation> {
        if self.safe_cells.contains(&cell) {
            return Err(InconsistentObservation::SafeAndHazard { cell });
        }
        Ok(self.hazard_cells.insert(cell))
    }

    /// Cells already observed.
    #[must_use]
    pub const fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    /// Cells proven hazard-free.
    #[must_use]
    pub const fn safe_cells(&self) -> &BTreeSet<Cell> {
        &self.safe_cells
    }

    /// Cells proven to hold a hazard.
    #[must_use]
    pub const fn hazard_cells(&self) -> &BTreeSet<Cell> {
        &self.hazard_cells
    }

    /// Returns true if `cell` has been observed.
    #[must_use]
    pub fn has_moved(&self, cell: Cell) -> bool {
        self.moves_made.contains(&cell)
    }

    /// Returns true if `cell` is proven safe.
    #[must_use]
    pub fn is_safe(&self, cell: Cell) -> bool {
        self.safe_cells.contains(&cell)
    }

    /// Returns true if `cell` is proven to be a hazard.
    #[must_use]
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazard_cells.contains(&cell)
    }

    /// Returns true if `cell` is proven either way.
    #[must_use]
    pub fn is_resolved(&self, cell: Cell) -> bool {
        self.is_safe(cell) || self.is_hazard(cell)
    }

    /// Safe cells that have not been observed yet, in row-major order.
    pub fn unexplored_safe(&self) -> impl Iterator<Item = Cell> + '_ {
        self.safe_cells
            .iter()
            .filter(|cell| !self.moves_made.contains(*cell))
            .copied()
    }
}

impl<'de> Deserialize<'de> for FactStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            moves_made: BTreeSet<Cell>,
            safe_cells: BTreeSet<Cell>,
            hazard_cells: BTreeSet<Cell>,
        }

        let raw = Raw::deserialize(deserializer)?;
        if let Some(cell) = raw.safe_cells.intersection(&raw.hazard_cells).next() {
            return Err(serde::de::Error::custom(InconsistentObservation::SafeAndHazard {
                cell: *cell,
            }));
        }
        if let Some(cell) = raw.moves_made.difference(&raw.safe_cells).next() {
            return Err(serde::de::Error::custom(format!(
                "observed cell {cell} is not recorded as safe"
            )));
        }
        Ok(Self {
            moves_made: raw.moves_made,
            safe_cells: raw.safe_cells,
            hazard_cells: raw.hazard_cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inserts_are_idempotent() {
        let mut facts = FactStore::new();
        assert!(facts.insert_safe(Cell::new(0, 0)).unwrap());
        let once = facts.clone();
        assert!(!facts.insert_safe(Cell::new(0, 0)).unwrap());
        assert_eq!(facts, once);

        assert!(facts.insert_hazard(Cell::new(1, 1)).unwrap());
        let once = facts.clone();
        assert!(!facts.insert_hazard(Cell::new(1, 1)).unwrap());
        assert_eq!(facts, once);
    }

    #[test]
    fn test_safe_and_hazard_are_disjoint() {
        let mut facts = FactStore::new();
        facts.insert_safe(Cell::new(0, 0)).unwrap();
        facts.insert_hazard(Cell::new(0, 1)).unwrap();
        assert_eq!(
            facts.insert_hazard(Cell::new(0, 0)),
            Err(InconsistentObservation::SafeAndHazard { cell: Cell::new(0, 0) })
        );
        assert_eq!(
            facts.insert_safe(Cell::new(0, 1)),
            Err(InconsistentObservation::SafeAndHazard { cell: Cell::new(0, 1) })
        );
        assert!(facts.safe_cells().is_disjoint(facts.hazard_cells()));
    }

    #[test]
    fn test_unexplored_safe_skips_moves() {
        let mut facts = FactStore::new();
        facts.insert_safe(Cell::new(0, 0)).unwrap();
        facts.insert_safe(Cell::new(0, 1)).unwrap();
        facts.record_move(Cell::new(0, 0));
        let unexplored: Vec<Cell> = facts.unexplored_safe().collect();
        assert_eq!(unexplored, vec![Cell::new(0, 1)]);
        assert!(facts.has_moved(Cell::new(0, 0)));
        assert!(facts.is_resolved(Cell::new(0, 1)));
        assert!(!facts.is_resolved(Cell::new(2, 2)));
    }

    #[test]
    fn test_deserialize_validates() {
        let mut facts = FactStore::new();
        facts.record_move(Cell::new(0, 0));
        facts.insert_safe(Cell::new(0, 0)).unwrap();
        facts.insert_hazard(Cell::new(1, 1)).unwrap();
        let json = serde_json::to_string(&facts).unwrap();
        let back: FactStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, facts);

        let overlapping = serde_json::json!({
            "moves_made": [],
            "safe_cells": [{ "row": 1, "col": 1 }],
            "hazard_cells": [{ "row": 1, "col": 1 }]
        });
        let err = serde_json::from_value::<FactStore>(overlapping).unwrap_err();
        assert!(err.to_string().contains("both safe and hazard"));

        let unsafe_move = serde_json::json!({
            "moves_made": [{ "row": 0, "col": 0 }],
            "safe_cells": [],
            "hazard_cells": []
        });
        assert!(serde_json::from_value::<FactStore>(unsafe_move).is_err());
    }
}
