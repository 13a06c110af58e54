//! Statements: the atomic unit of knowledge.
//!
//! A statement asserts that exactly `count` of its `cells` are hazards.
//! The cell set only ever holds unresolved cells; as cells are proven safe
//! or hazardous they are removed and the count adjusted, so a statement
//! shrinks toward the empty (vacuous) statement.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{InconsistentObservation, ValidationError};

/// "Exactly `count` of these `cells` are hazards."
///
/// Invariant: `count <= cells.len()`. It holds on construction and every
/// mark either preserves it or fails without mutating.
///
/// # Examples
///
/// ```
/// use minelogic::{Cell, Statement};
///
/// let statement = Statement::new([Cell::new(0, 0), Cell::new(0, 1)], 2).unwrap();
/// assert_eq!(statement.known_hazards().len(), 2);
/// assert!(statement.known_safe().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Statement {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Statement {
    /// Creates a statement, rejecting a count larger than the cell set.
    ///
    /// Duplicate cells collapse.
    pub fn new(
        cells: impl IntoIterator<Item = Cell>,
        count: usize,
    ) -> Result<Self, ValidationError> {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if count > cells.len() {
            return Err(ValidationError::CountExceedsCells {
                count,
                size: cells.len(),
            });
        }
        Ok(Self { cells, count })
    }

    /// The unresolved cells this statement constrains.
    #[must_use]
    pub const fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// Number of hazards among [`Self::cells`].
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of cells constrained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the statement constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if `cell` is constrained by this statement.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Every cell, if every cell must be a hazard.
    #[must_use]
    pub fn known_hazards(&self) -> BTreeSet<Cell> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Every cell, if no cell can be a hazard.
    #[must_use]
    pub fn known_safe(&self) -> BTreeSet<Cell> {
        if !self.cells.is_empty() && self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Removes a hazard from the statement, decrementing the count.
    ///
    /// Returns whether the statement changed. A cell that is not part of the
    /// statement is a no-op.
    pub fn mark_hazard(&mut self, cell: Cell) -> Result<bool, InconsistentObservation> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == 0 {
            return Err(InconsistentObservation::StatementUnderflow {
                cell,
                statement: self.to_string(),
            });
        }
        self.cells.remove(&cell);
        self.count -= 1;
        Ok(true)
    }

    /// Removes a safe cell from the statement; the count is unchanged.
    ///
    /// Returns whether the statement changed. A cell that is not part of the
    /// statement is a no-op.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<bool, InconsistentObservation> {
        if !self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.count == self.cells.len() {
            return Err(InconsistentObservation::StatementOverflow {
                cell,
                statement: self.to_string(),
            });
        }
        self.cells.remove(&cell);
        Ok(true)
    }

    /// Returns true if this statement's cells are a strict subset of `other`'s.
    #[must_use]
    pub fn is_strict_subset_of(&self, other: &Self) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// The statement over `self.cells - subset.cells`.
    ///
    /// `subset` must be a strict subset of `self`; the hazards of `self` are
    /// exactly those of `subset` plus those of the remainder.
    pub fn subtract(&self, subset: &Self) -> Result<Self, InconsistentObservation> {
        let count = self.count.checked_sub(subset.count).ok_or_else(|| {
            InconsistentObservation::NegativeDerivedCount {
                subset: subset.to_string(),
                superset: self.to_string(),
            }
        })?;
        let cells: BTreeSet<Cell> = self.cells.difference(&subset.cells).copied().collect();
        if count > cells.len() {
            return Err(InconsistentObservation::CountExceedsCells {
                count,
                size: cells.len(),
            });
        }
        Ok(Self { cells, count })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            cells: Vec<Cell>,
            count: usize,
        }

        let raw = Raw::deserialize(deserializer)?;
        Statement::new(raw.cells, raw.count).map_err(serde::de::Error::custom)
    }
}
