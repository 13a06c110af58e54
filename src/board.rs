//! A simulated board with hidden hazards.

use std::collections::BTreeSet;
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cell::Cell;
use crate::error::{MineResult, PlayError, ValidationError};
use crate::grid::GridBounds;
use crate::oracle::HazardOracle;

/// Hazard layout for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    bounds: GridBounds,
    hazards: BTreeSet<Cell>,
}

impl Board {
    /// Place exactly `hazards` hazards uniformly at random.
    pub fn random<R: Rng + ?Sized>(
        bounds: GridBounds,
        hazards: usize,
        rng: &mut R,
    ) -> Result<Self, ValidationError> {
        if hazards > bounds.cell_count() {
            return Err(ValidationError::TooManyHazards {
                hazards,
                cells: bounds.cell_count(),
            });
        }
        let cells: Vec<Cell> = bounds.cells().collect();
        let hazards = cells.choose_multiple(rng, hazards).copied().collect();
        Ok(Self { bounds, hazards })
    }

    /// Place hazards at exactly the given cells.
    pub fn with_hazards(
        bounds: GridBounds,
        hazards: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, ValidationError> {
        let hazards: BTreeSet<Cell> = hazards.into_iter().collect();
        for cell in &hazards {
            bounds.check(*cell)?;
        }
        Ok(Self { bounds, hazards })
    }

    /// Board dimensions.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Every hazard on the board.
    #[must_use]
    pub const fn hazards(&self) -> &BTreeSet<Cell> {
        &self.hazards
    }

    /// Returns true if `cell` holds a hazard.
    #[must_use]
    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazards.contains(&cell)
    }

    /// Hazards among the 8 neighbours of `cell`, not counting `cell` itself.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn nearby_hazards(&self, cell: Cell) -> u8 {
        // At most 8 neighbours.
        self.bounds
            .neighbors(cell)
            .filter(|neighbor| self.hazards.contains(neighbor))
            .count() as u8
    }

    /// Returns true if `flagged` is exactly the set of hazards.
    #[must_use]
    pub fn is_cleared(&self, flagged: &BTreeSet<Cell>) -> bool {
        *flagged == self.hazards
    }
}

impl HazardOracle for Board {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn hazard_count(&self) -> usize {
        self.hazards.len()
    }

    fn query(&self, cell: Cell) -> MineResult<u8> {
        self.bounds.check(cell)?;
        if self.is_hazard(cell) {
            return Err(PlayError::Detonated { cell }.into());
        }
        Ok(self.nearby_hazards(cell))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = format!("{}-", "--".repeat(self.bounds.width()));
        for row in 0..self.bounds.height() {
            writeln!(f, "{rule}")?;
            for col in 0..self.bounds.width() {
                let mark = if self.is_hazard(Cell::new(row, col)) { 'X' } else { ' ' };
                write!(f, "|{mark}")?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{rule}")
    }
}
